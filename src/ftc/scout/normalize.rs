//! Flattens the nested team → events → matches → scores payload returned by
//! the score service into one [`AllianceScoreRecord`] per alliance.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ftc::scout::error::{Result, ScoutError};
use crate::ftc::scout::model::{Alliance, AllianceScoreRecord, TeamNumber};

#[derive(Debug, Default, Deserialize)]
struct ScoreResponse {
    #[serde(default)]
    data: Option<QueryData>,
    #[serde(default)]
    errors: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryData {
    #[serde(default)]
    team_by_number: Option<TeamNode>,
}

#[derive(Debug, Default, Deserialize)]
struct TeamNode {
    #[serde(default)]
    events: Option<Vec<EventNode>>,
}

#[derive(Debug, Default, Deserialize)]
struct EventNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    event: Option<EventDetails>,
    #[serde(default)]
    matches: Option<Vec<TeamMatchNode>>,
}

impl EventNode {
    /// FTCScout nests the name under the participation's `event`; a flat
    /// `name` is accepted too.
    fn take_name(&mut self) -> Option<String> {
        self.name
            .take()
            .or_else(|| self.event.take().and_then(|event| event.name))
    }
}

#[derive(Debug, Default, Deserialize)]
struct EventDetails {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TeamMatchNode {
    #[serde(default, rename = "match")]
    game: Option<MatchNode>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchNode {
    #[serde(default)]
    scores: Option<MatchScores>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchScores {
    #[serde(default)]
    red: Option<AllianceScores>,
    #[serde(default)]
    blue: Option<AllianceScores>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllianceScores {
    #[serde(default, deserialize_with = "lenient_id")]
    match_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    auto_sample_high: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    auto_sample_low: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    dc_sample_high: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    dc_sample_low: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    auto_points: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    dc_points: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    total_points: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    penalty_points_committed: Option<u32>,
}

/// Accepts any JSON value; only whole, non-negative numbers that fit in a
/// `u32` survive, everything else reads as absent.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(whole_number(&value)
        .filter(|number| *number >= 0)
        .and_then(|number| u32::try_from(number).ok()))
}

/// Like [`lenient_count`] but keeps negative identifiers.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(whole_number(&value))
}

fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.fract() == 0.0 && number.abs() < i64::MAX as f64)
            .map(|number| number as i64)
    })
}

/// Normalizes one team's raw payload. Malformed payloads are logged and
/// contribute nothing.
pub fn normalize_team(team_number: TeamNumber, payload: &Value) -> Vec<AllianceScoreRecord> {
    match try_normalize_team(team_number, payload) {
        Ok(records) => {
            debug!(team_number, records = records.len(), "normalized team scores");
            records
        }
        Err(error) => {
            warn!(team_number, %error, "discarding team payload");
            Vec::new()
        }
    }
}

/// Strict variant of [`normalize_team`] that reports why a payload was
/// unusable.
pub fn try_normalize_team(
    team_number: TeamNumber,
    payload: &Value,
) -> Result<Vec<AllianceScoreRecord>> {
    let response = ScoreResponse::deserialize(payload)
        .map_err(|err| ScoutError::MalformedPayload(err.to_string()))?;

    if let Some(errors) = response.errors.as_ref().filter(|errors| !errors.is_empty()) {
        warn!(team_number, ?errors, "score service reported query errors");
    }

    let events = response
        .data
        .and_then(|data| data.team_by_number)
        .and_then(|team| team.events)
        .ok_or_else(|| {
            ScoutError::MalformedPayload("missing data.teamByNumber.events".into())
        })?;

    let records = events
        .into_iter()
        .flat_map(|mut event| {
            let name = event.take_name();
            event
                .matches
                .unwrap_or_default()
                .into_iter()
                .filter_map(|entry| entry.game.and_then(|game| game.scores))
                .flat_map(move |scores| {
                    let name = name.clone();
                    [(Alliance::Red, scores.red), (Alliance::Blue, scores.blue)]
                        .into_iter()
                        .filter_map(move |(alliance, score)| {
                            score.map(|score| {
                                to_record(team_number, name.clone(), alliance, score)
                            })
                        })
                })
        })
        .collect();

    Ok(records)
}

fn to_record(
    team_number: TeamNumber,
    event_name: Option<String>,
    alliance: Alliance,
    score: AllianceScores,
) -> AllianceScoreRecord {
    AllianceScoreRecord {
        team_number,
        match_id: score.match_id,
        event_name,
        alliance,
        auto_high_basket: score.auto_sample_high.unwrap_or(0),
        auto_low_basket: score.auto_sample_low.unwrap_or(0),
        teleop_high_basket: score.dc_sample_high.unwrap_or(0),
        teleop_low_basket: score.dc_sample_low.unwrap_or(0),
        auto_points: score.auto_points.unwrap_or(0),
        teleop_points: score.dc_points.unwrap_or(0),
        total_points: score.total_points.unwrap_or(0),
        penalty_points: score.penalty_points_committed.unwrap_or(0),
    }
}
