//! Point lists from command-line coordinates or tabular files.

use anyhow::{bail, Context, Result};
use convex_reorder::prelude::{pairs, Vec2};
use polars::prelude::*;
use std::path::Path;

/// Points from a flat `x1 y1 x2 y2 …` argument list.
pub fn points_from_args(coords: &[f64], what: &str) -> Result<Vec<Vec2<f64>>> {
    pairs(coords).with_context(|| format!("parsing {what} coordinates"))
}

/// Points from the `x` and `y` columns of a `.csv` or `.parquet` file.
pub fn read_points(path: &Path) -> Result<Vec<Vec2<f64>>> {
    let lf = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish(),
        Some("parquet") => LazyFrame::scan_parquet(path, ScanArgsParquet::default()),
        _ => bail!(
            "unsupported point file {} (expected .csv or .parquet)",
            path.display()
        ),
    }
    .with_context(|| format!("opening {}", path.display()))?;

    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x/y columns of {}", path.display()))?;
    tracing::info!(rows = df.height(), path = %path.display(), "points_loaded");

    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Vec2::new(x, y)),
            _ => bail!("row {row} of {} has a missing coordinate", path.display()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn csv_points_are_read_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lower.csv");
        fs::write(&path, "x,y\n0,0\n0.5,0.1\n1,1\n").unwrap();
        let pts = read_points(&path).unwrap();
        assert_eq!(pts.len(), 3);
        assert!((pts[1].x - 0.5).abs() < 1e-12 && (pts[1].y - 0.1).abs() < 1e-12);
        assert!((pts[2].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_points(Path::new("points.txt")).unwrap_err();
        assert!(err.to_string().contains("unsupported point file"));
    }

    #[test]
    fn odd_argument_list_is_rejected() {
        let err = points_from_args(&[0.0, 0.0, 1.0], "lower").unwrap_err();
        assert!(format!("{err:#}").contains("even number"));
    }
}
