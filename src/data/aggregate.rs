use std::collections::{BTreeMap, HashMap};

use super::model::{CellValue, DataError, Dataset};

/// Number of bins used when a histogram is requested without an explicit count.
pub const DEFAULT_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// Frequency table of one column: `(value, count)` pairs, most frequent first.
pub type CategoryCounts = Vec<(CellValue, usize)>;

/// Count occurrences of each distinct non-null value of `column`.
///
/// Sorted by descending count; equal counts keep the order in which the
/// values first appear in the table.
pub fn value_counts(dataset: &Dataset, column: &str) -> Result<CategoryCounts, DataError> {
    let mut index: HashMap<&CellValue, usize> = HashMap::new();
    let mut counts: CategoryCounts = Vec::new();

    for value in dataset.column(column)? {
        if value.is_missing() {
            continue;
        }
        match index.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }

    // stable sort: ties stay in first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    log::debug!("value_counts({column}): {} distinct values", counts.len());
    Ok(counts)
}

// ---------------------------------------------------------------------------
// Grouped statistics
// ---------------------------------------------------------------------------

/// Summary of one group's measured values.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub group: CellValue,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Mean, min and max of `value_column` for every distinct `group_column` value.
///
/// Groups come back in ascending label order. Null groups and null measured
/// values are skipped; a group left with no values is omitted.
pub fn group_stats(
    dataset: &Dataset,
    group_column: &str,
    value_column: &str,
) -> Result<Vec<GroupStats>, DataError> {
    if !dataset.has_column(group_column) {
        return Err(DataError::MissingColumn(group_column.to_string()));
    }
    if !dataset.has_column(value_column) {
        return Err(DataError::MissingColumn(value_column.to_string()));
    }

    // group → (count, sum, min, max)
    let mut acc: BTreeMap<&CellValue, (usize, f64, f64, f64)> = BTreeMap::new();

    for (row, rec) in dataset.records.iter().enumerate() {
        let group = rec.get(group_column);
        if group.is_missing() {
            continue;
        }
        let Some(v) = numeric(rec.get(value_column), value_column, row)? else {
            continue;
        };
        let entry = acc
            .entry(group)
            .or_insert((0, 0.0, f64::INFINITY, f64::NEG_INFINITY));
        entry.0 += 1;
        entry.1 += v;
        entry.2 = entry.2.min(v);
        entry.3 = entry.3.max(v);
    }

    let stats: Vec<GroupStats> = acc
        .into_iter()
        .map(|(group, (count, sum, min, max))| GroupStats {
            group: group.clone(),
            count,
            // clamp guards against rounding drift on near-constant groups
            mean: (sum / count as f64).clamp(min, max),
            min,
            max,
        })
        .collect();

    log::debug!(
        "group_stats({group_column}, {value_column}): {} groups",
        stats.len()
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Numeric sample
// ---------------------------------------------------------------------------

/// The numeric values of `column` in row order, missing entries dropped.
pub fn numeric_sample(dataset: &Dataset, column: &str) -> Result<Vec<f64>, DataError> {
    let mut sample = Vec::with_capacity(dataset.len());
    for (row, value) in dataset.column(column)?.enumerate() {
        if let Some(v) = numeric(value, column, row)? {
            sample.push(v);
        }
    }
    Ok(sample)
}

/// `Ok(None)` for a missing cell, an error for anything non-numeric.
fn numeric(value: &CellValue, column: &str, row: usize) -> Result<Option<f64>, DataError> {
    if value.is_missing() {
        return Ok(None);
    }
    match value.as_f64() {
        Some(v) => Ok(Some(v)),
        None => Err(DataError::NotNumeric {
            column: column.to_string(),
            row,
            value: value.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width bins: `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(lower, upper, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

/// Bin `sample` into `num_bins` equal-width bins over `[min, max]`.
///
/// Every bin is half-open except the last, which includes `max`. A constant
/// sample is spread over `[v - 0.5, v + 0.5]`.
pub fn histogram(sample: &[f64], num_bins: usize) -> Histogram {
    if sample.is_empty() || num_bins == 0 {
        return Histogram {
            edges: vec![],
            counts: vec![],
        };
    }

    let mut min = sample.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }

    let step = (max - min) / num_bins as f64;
    let edges: Vec<f64> = (0..=num_bins)
        .map(|i| if i == num_bins { max } else { min + i as f64 * step })
        .collect();

    let mut counts = vec![0usize; num_bins];
    for &v in sample {
        let idx = (((v - min) / step).floor() as usize).min(num_bins - 1);
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}
