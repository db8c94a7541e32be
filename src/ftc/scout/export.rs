use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::ftc::scout::error::Result;
use crate::ftc::scout::format::{ExportRow, build_table};
use crate::ftc::scout::io::excel_write;

/// Message returned alongside a freshly written export.
pub const EXPORT_MESSAGE: &str = "Excel file generated!";

/// Where the export is written and how clients reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub path: PathBuf,
    pub public_path: String,
}

impl ExportTarget {
    pub fn new(path: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            public_path: public_path.into(),
        }
    }
}

/// Writes `rows` under a header row to the export target, overwriting any
/// previous export, and returns the public path of the file.
///
/// Nothing is written when `rows` is empty.
pub fn write_export(target: &ExportTarget, rows: Vec<ExportRow>) -> Result<String> {
    let row_count = rows.len();
    let table = build_table(rows).inspect_err(|_| error!("No valid match data found!"))?;

    ensure_parent_dir(&target.path)?;
    excel_write::write_table(&target.path, &table)?;

    info!(path = %target.path.display(), rows = row_count, "Excel file created");
    Ok(target.public_path.clone())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftc::scout::error::ScoutError;
    use crate::ftc::scout::format::format_row;
    use crate::ftc::scout::model::{Alliance, AllianceScoreRecord};
    use tempfile::tempdir;

    fn red_row(total_points: u32) -> ExportRow {
        format_row(&AllianceScoreRecord {
            team_number: 254,
            match_id: Some(3),
            event_name: Some("Qualifier".into()),
            alliance: Alliance::Red,
            auto_high_basket: 0,
            auto_low_basket: 0,
            teleop_high_basket: 0,
            teleop_low_basket: 0,
            auto_points: 0,
            teleop_points: 0,
            total_points,
            penalty_points: 0,
        })
        .expect("valid row")
    }

    #[test]
    fn empty_export_writes_nothing() {
        let temp_dir = tempdir().expect("temporary directory");
        let target = ExportTarget::new(temp_dir.path().join("generated.xlsx"), "/generated.xlsx");

        let error = write_export(&target, Vec::new()).expect_err("should fail");

        assert!(matches!(error, ScoutError::NoValidData));
        assert!(!target.path.exists());
    }

    #[test]
    fn creates_parent_directory_and_overwrites() {
        let temp_dir = tempdir().expect("temporary directory");
        let target = ExportTarget::new(
            temp_dir.path().join("static").join("generated.xlsx"),
            "/generated.xlsx",
        );

        assert_eq!(
            write_export(&target, vec![red_row(1), red_row(2)]).expect("first export"),
            "/generated.xlsx"
        );
        write_export(&target, vec![red_row(3)]).expect("second export");

        let rows = crate::ftc::scout::io::excel_read::read_first_sheet(&target.path)
            .expect("export readable");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Total Points"], 3);
    }
}
