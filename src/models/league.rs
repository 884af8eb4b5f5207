// src/models/league.rs
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::models::entity::EntityKind;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Season {
    pub id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat reference data that leagues, teams and matches point at.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    Gender,
    LeagueType,
    Club,
    Playground,
    Position,
}

impl LookupKind {
    pub fn entity(&self) -> EntityKind {
        match self {
            LookupKind::Gender => EntityKind::Gender,
            LookupKind::LeagueType => EntityKind::LeagueType,
            LookupKind::Club => EntityKind::Club,
            LookupKind::Playground => EntityKind::Playground,
            LookupKind::Position => EntityKind::Position,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Lookup {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub kind: LookupKind,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct League {
    pub id: Uuid,
    pub name: String,
    pub season_id: Uuid,
    pub gender_id: Uuid,
    pub league_type_id: Uuid,
    pub match_system_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubLeague {
    pub id: Uuid,
    pub name: String,
    pub league_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub match_system_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The competition a stage is played in. Exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageScope {
    League(Uuid),
    SubLeague(Uuid),
}

impl StageScope {
    pub fn league_id(&self) -> Option<Uuid> {
        match self {
            StageScope::League(id) => Some(*id),
            StageScope::SubLeague(_) => None,
        }
    }

    pub fn sub_league_id(&self) -> Option<Uuid> {
        match self {
            StageScope::League(_) => None,
            StageScope::SubLeague(id) => Some(*id),
        }
    }
}

// Flattened into the owning record as `league_id` / `sub_league_id`.
impl Serialize for StageScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("league_id", &self.league_id())?;
        map.serialize_entry("sub_league_id", &self.sub_league_id())?;
        map.end()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Stage {
    pub id: Uuid,
    pub name: String,
    pub order: i32,
    #[serde(flatten)]
    pub scope: StageScope,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Round {
    pub id: Uuid,
    pub name: String,
    pub order: i32,
    pub stage_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Request DTOs. Updates are full replacements (PUT) and reuse the create shape.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SeasonRequest {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LookupRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LeagueRequest {
    pub name: String,
    pub season_id: Uuid,
    pub gender_id: Uuid,
    pub league_type_id: Uuid,
    pub match_system_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubLeagueRequest {
    pub name: String,
    pub league_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub match_system_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubLeagueTeamsRequest {
    pub team_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StageRequest {
    pub name: String,
    pub order: i32,
    pub league_id: Option<Uuid>,
    pub sub_league_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoundRequest {
    pub name: String,
    pub order: i32,
    pub stage_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeagueListQuery {
    pub season_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubLeagueListQuery {
    pub league_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StageListQuery {
    pub league_id: Option<Uuid>,
    pub sub_league_id: Option<Uuid>,
}
