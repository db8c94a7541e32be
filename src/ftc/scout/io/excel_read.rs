use std::collections::HashMap;
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use serde_json::{Map, Number, Value};

use crate::ftc::scout::error::{Result, ScoutError};

/// Header used for columns whose first-row cell is blank.
const EMPTY_HEADER: &str = "__EMPTY";

/// Reads the first worksheet of the workbook at `path` as a list of JSON
/// objects keyed by the header row. Blank cells are omitted and blank rows
/// skipped.
pub fn read_first_sheet(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScoutError::InvalidWorkbook(format!("no sheet in {}", path.display())))?
        .map_err(ScoutError::from)?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(first_row) => unique_headers(first_row),
        None => return Ok(Vec::new()),
    };

    let objects = rows
        .map(|row| {
            row.iter()
                .enumerate()
                .filter_map(|(col_idx, cell)| {
                    let header = headers.get(col_idx)?;
                    cell_to_value(cell).map(|value| (header.clone(), value))
                })
                .collect::<Map<String, Value>>()
        })
        .filter(|object| !object.is_empty())
        .collect();

    Ok(objects)
}

fn unique_headers(row: &[DataType]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    row.iter()
        .map(|cell| {
            let raw = cell_to_string(cell);
            let base = if raw.trim().is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                raw
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let header = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            header
        })
        .collect()
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_to_value(cell: &DataType) -> Option<Value> {
    match cell {
        DataType::Empty => None,
        DataType::String(value) if value.is_empty() => None,
        DataType::String(value) => Some(Value::String(value.clone())),
        DataType::Int(value) => Some(Value::from(*value)),
        DataType::Float(value) => Some(float_to_value(*value)),
        DataType::Bool(value) => Some(Value::Bool(*value)),
        DataType::DateTime(_) => Some(Value::String(
            cell.as_datetime()
                .map(|datetime| datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
                .unwrap_or_else(|| cell.to_string()),
        )),
        other => Some(Value::String(other.to_string())),
    }
}

fn float_to_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
