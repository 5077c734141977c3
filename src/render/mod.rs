//! Rendering layer: one PNG per aggregate view.
//!
//! Every chart is drawn on a surface acquired by [`with_surface`], which
//! presents and drops the bitmap before returning, whether drawing
//! succeeded or not.

pub mod backend;
pub mod charts;

use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::data::aggregate::{self, group_stats, numeric_sample, value_counts};
use crate::data::model::{
    Dataset, CUSTOMER_RATING, MODE_OF_SHIPMENT, WAREHOUSE_BLOCK, WEIGHT_IN_GMS,
};
use backend::TextTolerantBackend;

/// Drawing area handed to chart routines.
pub type Surface<'a> = DrawingArea<TextTolerantBackend<BitMapBackend<'a>>, Shift>;

// ---------------------------------------------------------------------------
// Chart catalogue
// ---------------------------------------------------------------------------

/// The four charts on the dashboard, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    ShippingPerWarehouse,
    ModeOfShipment,
    AverageCustomerRating,
    WeightDistribution,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::ShippingPerWarehouse,
        ChartKind::ModeOfShipment,
        ChartKind::AverageCustomerRating,
        ChartKind::WeightDistribution,
    ];

    /// Image file name, relative to the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::ShippingPerWarehouse => "shipping_per_warehouse.png",
            ChartKind::ModeOfShipment => "mode_of_shipment.png",
            ChartKind::AverageCustomerRating => "average_customer_rating.png",
            ChartKind::WeightDistribution => "weight_distribution.png",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::ShippingPerWarehouse => "Shipping per Warehouse",
            ChartKind::ModeOfShipment => "Mode of shipment",
            ChartKind::AverageCustomerRating => "Average Customer Rating",
            ChartKind::WeightDistribution => "Shipped Weight Distribution",
        }
    }

    /// Alt text used on the dashboard page.
    pub fn alt_text(self) -> &'static str {
        match self {
            ChartKind::ShippingPerWarehouse => "Shipping per Warehouse",
            ChartKind::ModeOfShipment => "Mode of Shipment",
            ChartKind::AverageCustomerRating => "Average Customer Rating",
            ChartKind::WeightDistribution => "Weight Distribution",
        }
    }
}

// ---------------------------------------------------------------------------
// Surface lifecycle
// ---------------------------------------------------------------------------

/// Acquire a white bitmap surface at `path`, run `draw` on it, then write
/// the PNG. The surface is released when this function returns.
pub fn with_surface<F>(path: &Path, size: (u32, u32), draw: F) -> Result<()>
where
    F: for<'a> FnOnce(&Surface<'a>) -> Result<()>,
{
    let root = TextTolerantBackend::new(BitMapBackend::new(path, size)).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("preparing {}", path.display()))?;

    draw(&root).with_context(|| format!("drawing {}", path.display()))?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Dataset → chart
// ---------------------------------------------------------------------------

/// Compute the aggregate behind `kind` and write its chart to `path`.
pub fn render_chart(kind: ChartKind, dataset: &Dataset, path: &Path, size: (u32, u32)) -> Result<()> {
    let title = kind.title();
    match kind {
        ChartKind::ShippingPerWarehouse => {
            let counts = value_counts(dataset, WAREHOUSE_BLOCK)?;
            with_surface(path, size, |root| {
                charts::bar_chart(root, title, "Warehouse block", "Record Count", &counts)
            })
        }
        ChartKind::ModeOfShipment => {
            let counts = value_counts(dataset, MODE_OF_SHIPMENT)?;
            with_surface(path, size, |root| charts::donut_chart(root, title, &counts))
        }
        ChartKind::AverageCustomerRating => {
            let stats = group_stats(dataset, MODE_OF_SHIPMENT, CUSTOMER_RATING)?;
            with_surface(path, size, |root| charts::range_chart(root, title, &stats))
        }
        ChartKind::WeightDistribution => {
            let sample = numeric_sample(dataset, WEIGHT_IN_GMS)?;
            let bins = aggregate::histogram(&sample, aggregate::DEFAULT_BINS);
            log::debug!("{} weights in {} bins", sample.len(), bins.counts.len());
            with_surface(path, size, |root| charts::histogram_chart(root, title, &bins))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_distinct_pngs() {
        let names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(name.ends_with(".png"));
            assert!(!names[i + 1..].contains(name));
        }
    }

    #[test]
    fn surface_is_written_even_when_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blank.png");
        with_surface(&path, (32, 24), |_| Ok(())).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (32, 24));
    }

    #[test]
    fn failed_drawing_propagates() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        let err = with_surface(&path, (32, 24), |_| anyhow::bail!("boom")).unwrap_err();
        assert!(format!("{err:#}").contains("boom"));
    }
}
