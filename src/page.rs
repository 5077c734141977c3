use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::render::ChartKind;

pub const INDEX_FILE: &str = "index.html";

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Shipping Data Dashboard</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 20px; }
    h1 { text-align: center; }
    .container { display: flex; flex-wrap: wrap; justify-content: center; }
    .chart { margin: 20px; text-align: center; }
    img { max-width: 100%; height: auto; border: 1px solid #ddd; }
  </style>
</head>
<body>
  <h1>Shipping Data Dashboard</h1>
  <div class="container">
"#;

const TAIL: &str = r#"  </div>
</body>
</html>
"#;

/// The dashboard document: one `<img>` per chart, in [`ChartKind::ALL`] order.
pub fn render_index() -> String {
    let mut html = String::from(HEAD);
    for kind in ChartKind::ALL {
        let _ = writeln!(
            html,
            r#"    <div class="chart"><img src="{}" alt="{}"></div>"#,
            kind.file_name(),
            kind.alt_text()
        );
    }
    html.push_str(TAIL);
    html
}

/// Write `index.html` into `dir`, replacing any previous copy.
pub fn write_index(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(INDEX_FILE);
    std::fs::write(&path, render_index())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
