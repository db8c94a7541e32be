use tracing::{info, warn};

use crate::ftc::scout::io::graphql::ScoreSource;
use crate::ftc::scout::model::{AllianceScoreRecord, TeamNumberSet};
use crate::ftc::scout::normalize::normalize_team;

/// Fetches every requested team one after another and concatenates the
/// normalized records in request order.
///
/// A team whose fetch fails contributes nothing; the remaining teams are
/// still processed.
pub async fn fetch_teams<S: ScoreSource>(
    source: &S,
    teams: &TeamNumberSet,
) -> Vec<AllianceScoreRecord> {
    let mut records = Vec::new();

    for team_number in teams.iter() {
        match source.team_scores(team_number).await {
            Ok(payload) => records.extend(normalize_team(team_number, &payload)),
            Err(error) => warn!(team_number, %error, "failed to fetch team scores"),
        }
    }

    info!(
        teams = teams.len(),
        records = records.len(),
        "fetched team scores"
    );
    records
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;
    use crate::ftc::scout::error::{Result, ScoutError};
    use crate::ftc::scout::model::{Alliance, TeamNumber};

    #[derive(Default)]
    struct FakeSource {
        payloads: HashMap<TeamNumber, Value>,
        calls: Mutex<Vec<TeamNumber>>,
    }

    impl FakeSource {
        fn with(mut self, team: TeamNumber, payload: Value) -> Self {
            self.payloads.insert(team, payload);
            self
        }
    }

    impl ScoreSource for FakeSource {
        async fn team_scores(&self, team_number: TeamNumber) -> Result<Value> {
            self.calls.lock().unwrap().push(team_number);
            self.payloads
                .get(&team_number)
                .cloned()
                .ok_or(ScoutError::UpstreamStatus {
                    status: 500,
                    team_number,
                })
        }
    }

    fn single_match(total: u32) -> Value {
        json!({ "data": { "teamByNumber": { "events": [{
            "name": "Event",
            "matches": [{ "match": { "scores": { "red": { "matchId": 1, "totalPoints": total } } } }]
        }] } } })
    }

    #[tokio::test]
    async fn concatenates_in_request_order() {
        let source = FakeSource::default()
            .with(1, single_match(10))
            .with(2, single_match(20));
        let teams = TeamNumberSet::new(vec![2, 1, 2]).unwrap();

        let records = fetch_teams(&source, &teams).await;

        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.team_number, r.total_points))
            .collect();
        assert_eq!(summary, vec![(2, 20), (1, 10), (2, 20)]);
        assert_eq!(*source.calls.lock().unwrap(), vec![2, 1, 2]);
    }

    #[tokio::test]
    async fn failing_team_does_not_abort_batch() {
        let source = FakeSource::default()
            .with(3, single_match(30))
            .with(5, json!({ "data": null }));
        let teams = TeamNumberSet::new(vec![4, 3, 5]).unwrap();

        let records = fetch_teams(&source, &teams).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].team_number, 3);
        assert_eq!(records[0].alliance, Alliance::Red);
        assert_eq!(*source.calls.lock().unwrap(), vec![4, 3, 5]);
    }
}
