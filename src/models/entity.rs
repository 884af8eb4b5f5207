use serde::{Deserialize, Serialize};
use std::fmt;

/// Every record kind the admin API can create or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Season,
    Gender,
    LeagueType,
    Club,
    Playground,
    Position,
    League,
    SubLeague,
    Stage,
    Round,
    Team,
    MatchSystem,
    Match,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Season => "Season",
            EntityKind::Gender => "Gender",
            EntityKind::LeagueType => "League type",
            EntityKind::Club => "Club",
            EntityKind::Playground => "Playground",
            EntityKind::Position => "Position",
            EntityKind::League => "League",
            EntityKind::SubLeague => "Sub-league",
            EntityKind::Stage => "Stage",
            EntityKind::Round => "Round",
            EntityKind::Team => "Team",
            EntityKind::MatchSystem => "Match system",
            EntityKind::Match => "Match",
        }
    }

    /// Backing table of the PostgreSQL store.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Season => "seasons",
            EntityKind::Gender => "genders",
            EntityKind::LeagueType => "league_types",
            EntityKind::Club => "clubs",
            EntityKind::Playground => "playgrounds",
            EntityKind::Position => "positions",
            EntityKind::League => "leagues",
            EntityKind::SubLeague => "sub_leagues",
            EntityKind::Stage => "stages",
            EntityKind::Round => "rounds",
            EntityKind::Team => "teams",
            EntityKind::MatchSystem => "match_systems",
            EntityKind::Match => "matches",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
