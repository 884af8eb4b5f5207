// src/models/team.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub club_id: Uuid,
    pub league_id: Option<Uuid>,
    /// Sub-leagues the team is a member of.
    pub sub_league_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamRequest {
    pub name: String,
    pub club_id: Uuid,
    pub league_id: Option<Uuid>,
    #[serde(default)]
    pub sub_league_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamListQuery {
    pub league_id: Option<Uuid>,
}
