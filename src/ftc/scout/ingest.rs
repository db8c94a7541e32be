use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::ftc::scout::io::excel_read;

/// Rows loaded from one spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestedFile {
    pub file_name: String,
    pub data: Vec<Map<String, Value>>,
}

/// Loads the first sheet of every existing file in `paths`.
///
/// Missing or unreadable files are skipped, as are files without data rows.
pub fn ingest_files(paths: &[PathBuf]) -> Vec<IngestedFile> {
    paths
        .iter()
        .filter_map(|path| {
            let data = load_rows(path);
            if data.is_empty() {
                return None;
            }
            Some(IngestedFile {
                file_name: file_name(path),
                data,
            })
        })
        .collect()
}

fn load_rows(path: &Path) -> Vec<Map<String, Value>> {
    if !path.exists() {
        error!(path = %path.display(), "File not found");
        return Vec::new();
    }

    match excel_read::read_first_sheet(path) {
        Ok(rows) => {
            info!(path = %path.display(), rows = rows.len(), "Loaded spreadsheet");
            rows
        }
        Err(err) => {
            error!(path = %path.display(), %err, "Failed to read spreadsheet");
            Vec::new()
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| {
            debug!(path = %path.display(), "path has no file name");
            path.display().to_string()
        })
}
