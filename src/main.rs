use anyhow::Result;

use shipping_dashboard::config::DashboardConfig;
use shipping_dashboard::pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let summary = pipeline::run(&config)?;

    log::info!(
        "Dashboard ready: {} rows, {} charts, {}",
        summary.rows,
        summary.charts.len(),
        summary.index.display()
    );
    Ok(())
}
