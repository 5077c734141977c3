use std::path::{Path, PathBuf};

/// Input table read by the dashboard binary.
pub const INPUT_CSV: &str = "files/input/shipping-data.csv";

/// Directory receiving the chart images and `index.html`.
pub const DOCS_DIR: &str = "docs";

/// Fixed locations and sizes for one dashboard run.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Pixel size of every chart image.
    pub chart_size: (u32, u32),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(INPUT_CSV),
            output_dir: PathBuf::from(DOCS_DIR),
            chart_size: (640, 480),
        }
    }
}

impl DashboardConfig {
    /// Same chart size as the default, different paths.
    pub fn with_paths(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}
