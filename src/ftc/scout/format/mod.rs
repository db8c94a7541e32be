use tracing::warn;

use crate::ftc::scout::error::{Result, ScoutError};
use crate::ftc::scout::model::{
    AllianceScoreRecord, Cell, MatchClassification, MatchType, TeamNumberSet,
};

/// Sheet name used for the exported table.
pub const EXPORT_SHEET: &str = "Teams Data";

/// Column headers of the exported table, in order.
pub const EXPORT_COLUMNS: [&str; 14] = [
    "Team Number",
    "Match ID",
    "Event Name",
    "Match Type",
    "Match Number",
    "Alliance",
    "Auto High Basket",
    "Auto Low Basket",
    "Teleop High Basket",
    "Teleop Low Basket",
    "Auto Points",
    "Teleop Points",
    "Total Points",
    "Penalty Points",
];

/// Match ids above this value belong to playoff rounds.
const PLAYOFF_ID_THRESHOLD: i64 = 20000;
const PLAYOFF_ID_BASE: i64 = 20001;
const PLAYOFF_ROUND_STRIDE: f64 = 1000.0;

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// One output row, aligned with [`EXPORT_COLUMNS`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow(pub [Cell; 14]);

/// Derives match type and number from a match id.
///
/// Playoff numbers are not truncated: `(id - 20001) / 1000` is kept as is.
pub fn classify_match(match_id: i64) -> MatchClassification {
    if match_id > PLAYOFF_ID_THRESHOLD {
        MatchClassification {
            match_type: MatchType::Playoff,
            match_number: (match_id - PLAYOFF_ID_BASE) as f64 / PLAYOFF_ROUND_STRIDE,
        }
    } else {
        MatchClassification {
            match_type: MatchType::Qualification,
            match_number: match_id as f64,
        }
    }
}

/// Maps a record into a row. Returns `None` for records whose alliance is
/// neither red nor blue.
pub fn format_row(record: &AllianceScoreRecord) -> Option<ExportRow> {
    if !record.alliance.is_valid() {
        warn!(
            match_id = ?record.match_id,
            team_number = record.team_number,
            "Skipping match with invalid alliance"
        );
        return None;
    }

    let team = match record.team_number {
        0 => Cell::text("Unknown"),
        number => Cell::from(number),
    };
    let match_id = match record.match_id {
        Some(id) if id != 0 => Cell::Number(id as f64),
        _ => Cell::text("N/A"),
    };
    let event = match record.event_name.as_deref() {
        Some(name) if !name.is_empty() => Cell::text(name),
        _ => Cell::text("Unknown Event"),
    };
    let (match_type, match_number) = match record.match_id {
        Some(id) => {
            let classification = classify_match(id);
            (
                classification.match_type,
                Cell::Number(classification.match_number),
            )
        }
        None => (MatchType::Qualification, Cell::text("N/A")),
    };

    Some(ExportRow([
        team,
        match_id,
        event,
        Cell::text(match_type.to_string()),
        match_number,
        Cell::text(record.alliance.to_string()),
        Cell::from(record.auto_high_basket),
        Cell::from(record.auto_low_basket),
        Cell::from(record.teleop_high_basket),
        Cell::from(record.teleop_low_basket),
        Cell::from(record.auto_points),
        Cell::from(record.teleop_points),
        Cell::from(record.total_points),
        Cell::from(record.penalty_points),
    ]))
}

/// Formats every record that belongs to a requested team, keeping input order.
pub fn format_rows(records: &[AllianceScoreRecord], requested: &TeamNumberSet) -> Vec<ExportRow> {
    records
        .iter()
        .filter(|record| requested.contains(record.team_number))
        .filter_map(format_row)
        .collect()
}

/// Builds the export table: a fixed header row followed by `rows`.
pub fn build_table(rows: Vec<ExportRow>) -> Result<SheetTable> {
    if rows.is_empty() {
        return Err(ScoutError::NoValidData);
    }

    Ok(SheetTable {
        sheet_name: EXPORT_SHEET.to_string(),
        columns: EXPORT_COLUMNS.iter().map(|name| name.to_string()).collect(),
        rows: rows.into_iter().map(|ExportRow(cells)| cells.to_vec()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftc::scout::model::Alliance;

    fn record(team_number: u32, match_id: Option<i64>, alliance: Alliance) -> AllianceScoreRecord {
        AllianceScoreRecord {
            team_number,
            match_id,
            event_name: Some("State Championship".into()),
            alliance,
            auto_high_basket: 1,
            auto_low_basket: 2,
            teleop_high_basket: 3,
            teleop_low_basket: 4,
            auto_points: 5,
            teleop_points: 6,
            total_points: 7,
            penalty_points: 8,
        }
    }

    #[test]
    fn classifies_qualification_and_playoff_ids() {
        assert_eq!(
            classify_match(20000),
            MatchClassification {
                match_type: MatchType::Qualification,
                match_number: 20000.0
            }
        );
        assert_eq!(classify_match(-4).match_number, -4.0);

        let playoff = classify_match(21001);
        assert_eq!(playoff.match_type, MatchType::Playoff);
        assert_eq!(playoff.match_number, 1.0);

        let fractional = classify_match(20002);
        assert_eq!(fractional.match_type, MatchType::Playoff);
        assert_eq!(fractional.match_number, 0.001);
    }

    #[test]
    fn formats_all_fourteen_columns() {
        let row = format_row(&record(254, Some(21001), Alliance::Blue)).expect("row");

        assert_eq!(
            row.0.to_vec(),
            vec![
                Cell::Number(254.0),
                Cell::Number(21001.0),
                Cell::text("State Championship"),
                Cell::text("Playoff"),
                Cell::Number(1.0),
                Cell::text("Blue"),
                Cell::Number(1.0),
                Cell::Number(2.0),
                Cell::Number(3.0),
                Cell::Number(4.0),
                Cell::Number(5.0),
                Cell::Number(6.0),
                Cell::Number(7.0),
                Cell::Number(8.0),
            ]
        );
    }

    #[test]
    fn substitutes_fallbacks_for_missing_fields() {
        let mut missing = record(0, None, Alliance::Red);
        missing.event_name = None;

        let ExportRow(cells) = format_row(&missing).expect("row");
        assert_eq!(cells[0], Cell::text("Unknown"));
        assert_eq!(cells[1], Cell::text("N/A"));
        assert_eq!(cells[2], Cell::text("Unknown Event"));
        assert_eq!(cells[3], Cell::text("Qualification"));
        assert_eq!(cells[4], Cell::text("N/A"));
    }

    #[test]
    fn filters_unrequested_teams_and_invalid_alliances() {
        let records = vec![
            record(1, Some(1), Alliance::Red),
            record(2, Some(2), Alliance::Blue),
            record(1, Some(3), Alliance::Unknown),
            record(1, Some(4), Alliance::Blue),
        ];
        let requested = TeamNumberSet::new(vec![1]).unwrap();

        let rows = format_rows(&records, &requested);

        let ids: Vec<_> = rows.iter().map(|row| row.0[1].clone()).collect();
        assert_eq!(ids, vec![Cell::Number(1.0), Cell::Number(4.0)]);
    }

    #[test]
    fn empty_rows_are_rejected() {
        assert!(matches!(build_table(Vec::new()), Err(ScoutError::NoValidData)));
    }

    #[test]
    fn table_has_header_then_rows_in_order() {
        let rows = vec![
            format_row(&record(1, Some(2), Alliance::Red)).unwrap(),
            format_row(&record(1, Some(1), Alliance::Red)).unwrap(),
        ];

        let table = build_table(rows).expect("table");

        assert_eq!(table.sheet_name, EXPORT_SHEET);
        assert_eq!(table.columns.len(), 14);
        assert_eq!(table.columns[0], "Team Number");
        assert_eq!(table.columns[13], "Penalty Points");
        assert_eq!(table.rows[0][1], Cell::Number(2.0));
        assert_eq!(table.rows[1][1], Cell::Number(1.0));
    }
}
