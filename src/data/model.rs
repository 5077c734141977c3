use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Columns of the shipping table the dashboard reads.
pub const WAREHOUSE_BLOCK: &str = "Warehouse_block";
pub const MODE_OF_SHIPMENT: &str = "Mode_of_Shipment";
pub const CUSTOMER_RATING: &str = "Customer_rating";
pub const WEIGHT_IN_GMS: &str = "Weight_in_gms";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Groups are keyed in a `BTreeMap` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can key a BTreeMap by CellValue --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`. NaN floats count as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether the cell holds no value (Pandas `isna`).
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors raised by column lookups
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("column '{column}', row {row}: '{value}' is not numeric")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single input row: column name → value.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub fields: BTreeMap<String, CellValue>,
}

static NULL: CellValue = CellValue::Null;

impl Record {
    /// The cell for `column`, `Null` when the row has no such field.
    pub fn get(&self, column: &str) -> &CellValue {
        self.fields.get(column).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// Shipment – typed row of the shipping table
// ---------------------------------------------------------------------------

/// One shipment, with the column names of the shipping dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(rename = "ID")]
    pub id: u32,
    #[serde(rename = "Warehouse_block")]
    pub warehouse_block: String,
    #[serde(rename = "Mode_of_Shipment")]
    pub mode_of_shipment: String,
    #[serde(rename = "Customer_care_calls")]
    pub customer_care_calls: u8,
    #[serde(rename = "Customer_rating")]
    pub customer_rating: u8,
    #[serde(rename = "Cost_of_the_Product")]
    pub cost_of_the_product: u32,
    #[serde(rename = "Prior_purchases")]
    pub prior_purchases: u8,
    #[serde(rename = "Product_importance")]
    pub product_importance: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Discount_offered")]
    pub discount_offered: u8,
    /// Missing weights are written as empty cells.
    #[serde(rename = "Weight_in_gms")]
    pub weight_in_gms: Option<u32>,
    #[serde(rename = "Reached.on.Time_Y.N")]
    pub reached_on_time: u8,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All rows, in file order.
    pub records: Vec<Record>,
    /// Column names in header order.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Assemble the table from loaded records.
    ///
    /// `column_names` keeps the header order; any column that only shows up
    /// in the records is appended after them. A column holding any `Float`
    /// has its `Integer` cells promoted to `Float`, so each numeric column
    /// carries a single type.
    pub fn from_records(mut column_names: Vec<String>, mut records: Vec<Record>) -> Self {
        let mut float_columns: BTreeSet<String> = BTreeSet::new();

        for rec in &records {
            for (col, val) in &rec.fields {
                if !column_names.contains(col) {
                    column_names.push(col.clone());
                }
                if matches!(val, CellValue::Float(_)) {
                    float_columns.insert(col.clone());
                }
            }
        }

        if !float_columns.is_empty() {
            for rec in &mut records {
                for (col, val) in rec.fields.iter_mut() {
                    if let CellValue::Integer(i) = *val {
                        if float_columns.contains(col) {
                            *val = CellValue::Float(i as f64);
                        }
                    }
                }
            }
        }

        Dataset {
            records,
            column_names,
        }
    }

    /// Iterate over one column's cells in row order.
    pub fn column<'a>(
        &'a self,
        name: &'a str,
    ) -> Result<impl Iterator<Item = &'a CellValue> + 'a, DataError> {
        if !self.has_column(name) {
            return Err(DataError::MissingColumn(name.to_string()));
        }
        Ok(self.records.iter().map(move |rec| rec.get(name)))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        Record {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn ordering_groups_by_type_then_value() {
        let mut values = vec![
            CellValue::String("b".into()),
            CellValue::Float(2.5),
            CellValue::Null,
            CellValue::Integer(7),
            CellValue::String("a".into()),
            CellValue::Integer(-1),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Integer(-1),
                CellValue::Integer(7),
                CellValue::Float(2.5),
                CellValue::String("a".into()),
                CellValue::String("b".into()),
            ]
        );
    }

    #[test]
    fn nan_is_missing_and_not_numeric() {
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Integer(4).as_f64(), Some(4.0));
        assert!(!CellValue::String("x".into()).is_missing());
    }

    #[test]
    fn column_lookup_reports_missing_column() {
        let ds = Dataset::from_records(
            vec!["a".into()],
            vec![record(&[("a", CellValue::Integer(1))])],
        );
        assert!(ds.column("a").is_ok());
        assert!(matches!(
            ds.column("b"),
            Err(DataError::MissingColumn(ref name)) if name == "b"
        ));
    }

    #[test]
    fn shipments_round_trip_through_the_loader() {
        let shipments = vec![
            Shipment {
                id: 1,
                warehouse_block: "D".into(),
                mode_of_shipment: "Flight".into(),
                customer_care_calls: 4,
                customer_rating: 2,
                cost_of_the_product: 177,
                prior_purchases: 3,
                product_importance: "low".into(),
                gender: "F".into(),
                discount_offered: 44,
                weight_in_gms: Some(1233),
                reached_on_time: 1,
            },
            Shipment {
                id: 2,
                warehouse_block: "F".into(),
                mode_of_shipment: "Ship".into(),
                customer_care_calls: 2,
                customer_rating: 5,
                cost_of_the_product: 216,
                prior_purchases: 2,
                product_importance: "medium".into(),
                gender: "M".into(),
                discount_offered: 3,
                weight_in_gms: None,
                reached_on_time: 0,
            },
        ];

        let mut writer = csv::Writer::from_writer(Vec::new());
        for s in &shipments {
            writer.serialize(s).unwrap();
        }
        let bytes = writer.into_inner().unwrap();

        let ds = crate::data::loader::read_csv(csv::Reader::from_reader(bytes.as_slice())).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.has_column(WAREHOUSE_BLOCK));
        assert!(ds.has_column("Reached.on.Time_Y.N"));
        assert_eq!(ds.records[0].get(WEIGHT_IN_GMS), &CellValue::Integer(1233));
        assert_eq!(ds.records[1].get(WEIGHT_IN_GMS), &CellValue::Null);

        let typed: Vec<Shipment> = csv::Reader::from_reader(bytes.as_slice())
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(typed, shipments);
    }

    #[test]
    fn absent_cells_read_as_null() {
        let ds = Dataset::from_records(
            vec!["a".into(), "b".into()],
            vec![
                record(&[("a", CellValue::Integer(1))]),
                record(&[("a", CellValue::Integer(2)), ("b", CellValue::Bool(true))]),
            ],
        );
        let b: Vec<&CellValue> = ds.column("b").unwrap().collect();
        assert_eq!(b, vec![&CellValue::Null, &CellValue::Bool(true)]);
    }

    #[test]
    fn integer_cells_promoted_in_float_columns() {
        let ds = Dataset::from_records(
            vec!["w".into(), "n".into()],
            vec![
                record(&[("w", CellValue::Integer(1)), ("n", CellValue::Integer(7))]),
                record(&[("w", CellValue::Float(2.5)), ("n", CellValue::Null)]),
            ],
        );
        let w: Vec<&CellValue> = ds.column("w").unwrap().collect();
        assert_eq!(w, vec![&CellValue::Float(1.0), &CellValue::Float(2.5)]);
        assert_eq!(ds.records[0].get("n"), &CellValue::Integer(7));
    }
}
