use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ftc::scout::error::{Result, ScoutError};

/// Team number as assigned by FIRST.
pub type TeamNumber = u32;

/// Side of the field an alliance played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alliance {
    Red,
    Blue,
    /// Anything else found in a record that did not come from the normalizer.
    #[serde(other)]
    Unknown,
}

impl Alliance {
    pub fn is_valid(self) -> bool {
        matches!(self, Alliance::Red | Alliance::Blue)
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alliance::Red => write!(f, "Red"),
            Alliance::Blue => write!(f, "Blue"),
            Alliance::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One alliance's result in one match of one event, fetched for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllianceScoreRecord {
    pub team_number: TeamNumber,
    /// Service-assigned identifier; only unique within an event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    pub alliance: Alliance,
    #[serde(default)]
    pub auto_high_basket: u32,
    #[serde(default)]
    pub auto_low_basket: u32,
    #[serde(default)]
    pub teleop_high_basket: u32,
    #[serde(default)]
    pub teleop_low_basket: u32,
    #[serde(default)]
    pub auto_points: u32,
    #[serde(default)]
    pub teleop_points: u32,
    #[serde(default)]
    pub total_points: u32,
    #[serde(default)]
    pub penalty_points: u32,
}

/// Whether a match belongs to the qualification rounds or the playoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Qualification,
    Playoff,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Qualification => write!(f, "Qualification"),
            MatchType::Playoff => write!(f, "Playoff"),
        }
    }
}

/// Match type and number derived from a match identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchClassification {
    pub match_type: MatchType,
    /// Playoff numbers can be fractional, so this is kept as a float.
    pub match_number: f64,
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Number(f64::from(value))
    }
}

/// The caller-supplied list of teams to fetch. Never empty; may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamNumberSet(Vec<TeamNumber>);

/// Message returned for every malformed `teamNumbers` request.
pub const INVALID_TEAM_NUMBERS: &str = "Invalid teamNumbers format. Expected an array.";

impl TeamNumberSet {
    pub fn new(numbers: Vec<TeamNumber>) -> Result<Self> {
        if numbers.is_empty() {
            return Err(ScoutError::InvalidInput(INVALID_TEAM_NUMBERS.into()));
        }
        if numbers.contains(&0) {
            return Err(ScoutError::InvalidInput(
                "team numbers must be positive integers".into(),
            ));
        }
        Ok(Self(numbers))
    }

    /// Extracts the set from a request body of the form
    /// `{ "teamNumbers": [..] }`.
    pub fn from_request(body: &Value) -> Result<Self> {
        let items = body
            .get("teamNumbers")
            .and_then(Value::as_array)
            .ok_or_else(|| ScoutError::InvalidInput(INVALID_TEAM_NUMBERS.into()))?;

        let numbers = items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|number| TeamNumber::try_from(number).ok())
                    .ok_or_else(|| {
                        ScoutError::InvalidInput(format!("invalid team number {item}"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(numbers)
    }

    pub fn contains(&self, team_number: TeamNumber) -> bool {
        self.0.contains(&team_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = TeamNumber> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
