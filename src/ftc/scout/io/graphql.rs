use std::future::Future;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument};

use crate::ftc::scout::error::{Result, ScoutError};
use crate::ftc::scout::model::TeamNumber;

/// Public FTCScout GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.ftcscout.org/graphql";

const TEAM_SCORES_QUERY: &str = r#"
query TeamScores($number: Int!, $season: Int!) {
    teamByNumber(number: $number) {
        events(season: $season) {
            event {
                name
            }
            matches {
                match {
                    matchNum
                    scores {
                        ... on MatchScores2024 {
                            red { ...AllianceFields }
                            blue { ...AllianceFields }
                        }
                    }
                }
            }
        }
    }
}

fragment AllianceFields on MatchScores2024Alliance {
    eventCode
    matchId
    alliance
    autoSampleHigh
    autoSampleLow
    dcSampleHigh
    dcSampleLow
    autoPoints
    dcPoints
    totalPoints
    penaltyPointsCommitted
}
"#;

/// Anything able to return the raw score payload for a single team.
pub trait ScoreSource {
    fn team_scores(&self, team_number: TeamNumber) -> impl Future<Output = Result<Value>> + Send;
}

/// GraphQL client for the FTCScout API.
#[derive(Debug, Clone)]
pub struct ScoutClient {
    client: Client,
    api_url: String,
    season: u16,
}

impl ScoutClient {
    pub fn new(api_url: impl Into<String>, season: u16) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            season,
        }
    }
}

impl ScoreSource for ScoutClient {
    #[instrument(skip(self), fields(season = self.season))]
    async fn team_scores(&self, team_number: TeamNumber) -> Result<Value> {
        info!("Fetching scores for team {team_number}");

        let body = json!({
            "query": TEAM_SCORES_QUERY,
            "variables": { "number": team_number, "season": self.season },
        });

        let response = self.client.post(&self.api_url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            error!("HTTP {} from {} for team {}", status, self.api_url, team_number);
            return Err(ScoutError::UpstreamStatus {
                status: status.as_u16(),
                team_number,
            });
        }

        let payload: Value = response.json().await?;
        debug!(team_number, "score payload received");
        Ok(payload)
    }
}
