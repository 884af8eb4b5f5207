use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Free label: any status may be set at any time.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Completed => "COMPLETED",
            MatchStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Default for MatchStatus {
    fn default() -> Self {
        MatchStatus::Scheduled
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SCHEDULED" => Ok(MatchStatus::Scheduled),
            "COMPLETED" => Ok(MatchStatus::Completed),
            "CANCELLED" => Ok(MatchStatus::Cancelled),
            other => Err(format!("Unknown match status: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Match {
    pub id: Uuid,
    pub stage_id: Uuid,
    pub round_id: Option<Uuid>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_system_id: Option<Uuid>,
    pub playground_id: Option<Uuid>,
    pub match_date: DateTime<Utc>,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchRequest {
    pub stage_id: Uuid,
    pub round_id: Option<Uuid>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_system_id: Option<Uuid>,
    pub playground_id: Option<Uuid>,
    pub match_date: DateTime<Utc>,
    #[serde(default)]
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchListQuery {
    pub stage_id: Option<Uuid>,
}
