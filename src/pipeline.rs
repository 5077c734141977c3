use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::DashboardConfig;
use crate::data::loader;
use crate::page;
use crate::render::{self, ChartKind};

/// Files produced by one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows: usize,
    pub charts: Vec<PathBuf>,
    pub index: PathBuf,
}

/// Load the table, render every chart, then write the page.
///
/// The input is read before the output directory is touched, so a bad
/// input leaves previous output as it was.
pub fn run(config: &DashboardConfig) -> Result<RunSummary> {
    let dataset = loader::load_file(config.input())?;

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let mut charts = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let path = config.output_path(kind.file_name());
        render::render_chart(kind, &dataset, &path, config.chart_size)?;
        log::info!("Wrote {}", path.display());
        charts.push(path);
    }

    let index = page::write_index(&config.output_dir)?;
    log::info!("Wrote {}", index.display());

    Ok(RunSummary {
        rows: dataset.len(),
        charts,
        index,
    })
}
