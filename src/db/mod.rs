//! Repository interface over the competition store.
//!
//! A [`Store`] hands out units of work. Each [`Repository`] is one atomic
//! unit: everything read and written through it is published by `commit`
//! and discarded when it is dropped without committing. Handlers run every
//! validate-then-write sequence inside a single unit of work.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CompetitionResult;
use crate::models::entity::EntityKind;
use crate::models::league::{League, Lookup, LookupKind, Round, Season, Stage, StageScope, SubLeague};
use crate::models::match_system::MatchSystem;
use crate::models::matches::Match;
use crate::models::team::Team;

pub mod helpers;
pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

/// A child column that points at a parent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKey {
    LeagueSeason,
    LeagueGender,
    LeagueLeagueType,
    LeagueMatchSystem,
    SubLeagueLeague,
    SubLeagueParent,
    SubLeagueMatchSystem,
    SubLeagueMembership,
    TeamClub,
    TeamLeague,
    TeamMembership,
    StageLeague,
    StageSubLeague,
    RoundStage,
    MatchStage,
    MatchRound,
    MatchHomeTeam,
    MatchAwayTeam,
    MatchMatchSystem,
    MatchPlayground,
}

impl ForeignKey {
    /// Human readable name of the referencing rows, used in conflict messages.
    pub fn dependent(&self) -> &'static str {
        match self {
            ForeignKey::LeagueSeason
            | ForeignKey::LeagueGender
            | ForeignKey::LeagueLeagueType
            | ForeignKey::LeagueMatchSystem => "leagues",
            ForeignKey::SubLeagueLeague | ForeignKey::SubLeagueMatchSystem => "sub-leagues",
            ForeignKey::SubLeagueParent => "child sub-leagues",
            ForeignKey::SubLeagueMembership | ForeignKey::TeamMembership => "sub-league memberships",
            ForeignKey::TeamClub | ForeignKey::TeamLeague => "teams",
            ForeignKey::StageLeague | ForeignKey::StageSubLeague => "stages",
            ForeignKey::RoundStage => "rounds",
            ForeignKey::MatchStage
            | ForeignKey::MatchRound
            | ForeignKey::MatchHomeTeam
            | ForeignKey::MatchAwayTeam
            | ForeignKey::MatchMatchSystem
            | ForeignKey::MatchPlayground => "matches",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            ForeignKey::LeagueSeason
            | ForeignKey::LeagueGender
            | ForeignKey::LeagueLeagueType
            | ForeignKey::LeagueMatchSystem => "leagues",
            ForeignKey::SubLeagueLeague
            | ForeignKey::SubLeagueParent
            | ForeignKey::SubLeagueMatchSystem => "sub_leagues",
            ForeignKey::SubLeagueMembership | ForeignKey::TeamMembership => "sub_league_teams",
            ForeignKey::TeamClub | ForeignKey::TeamLeague => "teams",
            ForeignKey::StageLeague | ForeignKey::StageSubLeague => "stages",
            ForeignKey::RoundStage => "rounds",
            ForeignKey::MatchStage
            | ForeignKey::MatchRound
            | ForeignKey::MatchHomeTeam
            | ForeignKey::MatchAwayTeam
            | ForeignKey::MatchMatchSystem
            | ForeignKey::MatchPlayground => "matches",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ForeignKey::LeagueSeason => "season_id",
            ForeignKey::LeagueGender => "gender_id",
            ForeignKey::LeagueLeagueType => "league_type_id",
            ForeignKey::LeagueMatchSystem
            | ForeignKey::SubLeagueMatchSystem
            | ForeignKey::MatchMatchSystem => "match_system_id",
            ForeignKey::SubLeagueLeague | ForeignKey::TeamLeague | ForeignKey::StageLeague => "league_id",
            ForeignKey::SubLeagueParent => "parent_id",
            ForeignKey::SubLeagueMembership | ForeignKey::StageSubLeague => "sub_league_id",
            ForeignKey::TeamMembership => "team_id",
            ForeignKey::TeamClub => "club_id",
            ForeignKey::RoundStage | ForeignKey::MatchStage => "stage_id",
            ForeignKey::MatchRound => "round_id",
            ForeignKey::MatchHomeTeam => "home_team_id",
            ForeignKey::MatchAwayTeam => "away_team_id",
            ForeignKey::MatchPlayground => "playground_id",
        }
    }
}

/// Factory for units of work.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> CompetitionResult<Box<dyn Repository>>;
}

/// One unit of work against the competition store.
#[async_trait]
pub trait Repository: Send {
    async fn get_season(&mut self, id: Uuid) -> CompetitionResult<Option<Season>>;
    async fn list_seasons(&mut self) -> CompetitionResult<Vec<Season>>;
    async fn upsert_season(&mut self, season: &Season) -> CompetitionResult<()>;

    async fn get_lookup(&mut self, kind: LookupKind, id: Uuid) -> CompetitionResult<Option<Lookup>>;
    async fn list_lookups(&mut self, kind: LookupKind) -> CompetitionResult<Vec<Lookup>>;
    async fn upsert_lookup(&mut self, lookup: &Lookup) -> CompetitionResult<()>;

    async fn get_league(&mut self, id: Uuid) -> CompetitionResult<Option<League>>;
    /// Leagues of one season, or every league when `season_id` is `None`.
    async fn list_leagues(&mut self, season_id: Option<Uuid>) -> CompetitionResult<Vec<League>>;
    async fn upsert_league(&mut self, league: &League) -> CompetitionResult<()>;

    async fn get_sub_league(&mut self, id: Uuid) -> CompetitionResult<Option<SubLeague>>;
    /// Sub-leagues of one league, or every sub-league when `league_id` is `None`.
    async fn list_sub_leagues(&mut self, league_id: Option<Uuid>) -> CompetitionResult<Vec<SubLeague>>;
    async fn upsert_sub_league(&mut self, sub_league: &SubLeague) -> CompetitionResult<()>;
    async fn list_sub_league_team_ids(&mut self, sub_league_id: Uuid) -> CompetitionResult<Vec<Uuid>>;
    async fn replace_sub_league_teams(&mut self, sub_league_id: Uuid, team_ids: &[Uuid]) -> CompetitionResult<()>;

    async fn get_stage(&mut self, id: Uuid) -> CompetitionResult<Option<Stage>>;
    async fn list_stages(&mut self, scope: Option<StageScope>) -> CompetitionResult<Vec<Stage>>;
    async fn upsert_stage(&mut self, stage: &Stage) -> CompetitionResult<()>;

    async fn get_round(&mut self, id: Uuid) -> CompetitionResult<Option<Round>>;
    async fn list_rounds(&mut self, stage_id: Uuid) -> CompetitionResult<Vec<Round>>;
    async fn upsert_round(&mut self, round: &Round) -> CompetitionResult<()>;

    /// Teams come back with their sub-league memberships filled in.
    async fn get_team(&mut self, id: Uuid) -> CompetitionResult<Option<Team>>;
    async fn list_teams(&mut self, league_id: Option<Uuid>) -> CompetitionResult<Vec<Team>>;
    /// Writes the team row and replaces its sub-league memberships.
    async fn upsert_team(&mut self, team: &Team) -> CompetitionResult<()>;

    async fn get_match_system(&mut self, id: Uuid) -> CompetitionResult<Option<MatchSystem>>;
    async fn get_match_system_by_name(&mut self, name: &str) -> CompetitionResult<Option<MatchSystem>>;
    async fn list_match_systems(&mut self) -> CompetitionResult<Vec<MatchSystem>>;
    async fn upsert_match_system(&mut self, system: &MatchSystem) -> CompetitionResult<()>;

    async fn get_match(&mut self, id: Uuid) -> CompetitionResult<Option<Match>>;
    async fn list_matches(&mut self, stage_id: Option<Uuid>) -> CompetitionResult<Vec<Match>>;
    async fn upsert_match(&mut self, fixture: &Match) -> CompetitionResult<()>;

    /// Number of rows whose `key` column equals `id`.
    async fn count_by_foreign_key(&mut self, key: ForeignKey, id: Uuid) -> CompetitionResult<i64>;

    /// Removes the record; `false` when it did not exist.
    async fn delete(&mut self, kind: EntityKind, id: Uuid) -> CompetitionResult<bool>;

    async fn commit(&mut self) -> CompetitionResult<()>;
}
