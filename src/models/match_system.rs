use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchSystemType {
    Predefined,
    Custom,
}

impl MatchSystemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchSystemType::Predefined => "PREDEFINED",
            MatchSystemType::Custom => "CUSTOM",
        }
    }
}

impl FromStr for MatchSystemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PREDEFINED" => Ok(MatchSystemType::Predefined),
            "CUSTOM" => Ok(MatchSystemType::Custom),
            other => Err(format!("Unknown match system type: {}", other)),
        }
    }
}

/// Format of a tie: how many singles and doubles are played and in which order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchSystem {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub system_type: MatchSystemType,
    pub total_matches: i32,
    pub singles_count: i32,
    pub doubles_count: i32,
    /// Slot tags in play order, e.g. `["S1", "S2", "D1"]`.
    pub match_order: Vec<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchSystemRequest {
    pub name: String,
    #[serde(rename = "type", default = "default_system_type")]
    pub system_type: MatchSystemType,
    pub total_matches: i32,
    pub singles_count: i32,
    pub doubles_count: i32,
    pub match_order: Vec<String>,
    pub description: Option<String>,
}

fn default_system_type() -> MatchSystemType {
    MatchSystemType::Custom
}
