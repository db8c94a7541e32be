use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::ftc::scout::error::Result;
use crate::ftc::scout::format::SheetTable;
use crate::ftc::scout::model::Cell;

/// Writes the table as the single sheet of a new workbook at `path`,
/// replacing any existing file.
pub fn write_table(path: &Path, table: &SheetTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.sheet_name)?;

    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(value) => {
                    worksheet.write_string(excel_row, col_idx as u16, value)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(excel_row, col_idx as u16, *value)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
