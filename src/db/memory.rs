//! In-memory store.
//!
//! A unit of work holds the store lock for its whole lifetime, mutates a
//! staged copy of the state and publishes it on `commit`. Dropping the unit
//! without committing discards the staged copy.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::db::{ForeignKey, Repository, Store};
use crate::errors::{CompetitionError, CompetitionResult};
use crate::models::entity::EntityKind;
use crate::models::league::{League, Lookup, LookupKind, Round, Season, Stage, StageScope, SubLeague};
use crate::models::match_system::MatchSystem;
use crate::models::matches::Match;
use crate::models::team::Team;

#[derive(Debug, Default, Clone)]
struct MemoryState {
    seasons: HashMap<Uuid, Season>,
    lookups: HashMap<Uuid, Lookup>,
    leagues: HashMap<Uuid, League>,
    sub_leagues: HashMap<Uuid, SubLeague>,
    /// (sub_league_id, team_id)
    memberships: BTreeSet<(Uuid, Uuid)>,
    stages: HashMap<Uuid, Stage>,
    rounds: HashMap<Uuid, Round>,
    teams: HashMap<Uuid, Team>,
    match_systems: HashMap<Uuid, MatchSystem>,
    matches: HashMap<Uuid, Match>,
}

impl MemoryState {
    fn hydrate_team(&self, team: &Team) -> Team {
        let mut team = team.clone();
        team.sub_league_ids = self
            .memberships
            .iter()
            .filter(|(_, team_id)| *team_id == team.id)
            .map(|(sub_league_id, _)| *sub_league_id)
            .collect();
        team
    }
}

/// Oldest first, id as tie breaker, matching the PostgreSQL ordering.
fn ordered<'a, T: Clone + 'a>(
    items: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> (DateTime<Utc>, Uuid),
) -> Vec<T> {
    let mut items: Vec<T> = items.cloned().collect();
    items.sort_by_key(|item| key(item));
    items
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn begin(&self) -> CompetitionResult<Box<dyn Repository>> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryRepository {
            guard: Some(guard),
            staged,
        }))
    }
}

pub struct InMemoryRepository {
    guard: Option<OwnedMutexGuard<MemoryState>>,
    staged: MemoryState,
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get_season(&mut self, id: Uuid) -> CompetitionResult<Option<Season>> {
        Ok(self.staged.seasons.get(&id).cloned())
    }

    async fn list_seasons(&mut self) -> CompetitionResult<Vec<Season>> {
        Ok(ordered(self.staged.seasons.values(), |s| (s.created_at, s.id)))
    }

    async fn upsert_season(&mut self, season: &Season) -> CompetitionResult<()> {
        self.staged.seasons.insert(season.id, season.clone());
        Ok(())
    }

    async fn get_lookup(&mut self, kind: LookupKind, id: Uuid) -> CompetitionResult<Option<Lookup>> {
        Ok(self.staged.lookups.get(&id).filter(|l| l.kind == kind).cloned())
    }

    async fn list_lookups(&mut self, kind: LookupKind) -> CompetitionResult<Vec<Lookup>> {
        Ok(ordered(
            self.staged.lookups.values().filter(|l| l.kind == kind),
            |l| (l.created_at, l.id),
        ))
    }

    async fn upsert_lookup(&mut self, lookup: &Lookup) -> CompetitionResult<()> {
        self.staged.lookups.insert(lookup.id, lookup.clone());
        Ok(())
    }

    async fn get_league(&mut self, id: Uuid) -> CompetitionResult<Option<League>> {
        Ok(self.staged.leagues.get(&id).cloned())
    }

    async fn list_leagues(&mut self, season_id: Option<Uuid>) -> CompetitionResult<Vec<League>> {
        Ok(ordered(
            self.staged
                .leagues
                .values()
                .filter(|l| season_id.map_or(true, |season_id| l.season_id == season_id)),
            |l| (l.created_at, l.id),
        ))
    }

    async fn upsert_league(&mut self, league: &League) -> CompetitionResult<()> {
        self.staged.leagues.insert(league.id, league.clone());
        Ok(())
    }

    async fn get_sub_league(&mut self, id: Uuid) -> CompetitionResult<Option<SubLeague>> {
        Ok(self.staged.sub_leagues.get(&id).cloned())
    }

    async fn list_sub_leagues(&mut self, league_id: Option<Uuid>) -> CompetitionResult<Vec<SubLeague>> {
        Ok(ordered(
            self.staged
                .sub_leagues
                .values()
                .filter(|s| league_id.map_or(true, |league_id| s.league_id == league_id)),
            |s| (s.created_at, s.id),
        ))
    }

    async fn upsert_sub_league(&mut self, sub_league: &SubLeague) -> CompetitionResult<()> {
        self.staged.sub_leagues.insert(sub_league.id, sub_league.clone());
        Ok(())
    }

    async fn list_sub_league_team_ids(&mut self, sub_league_id: Uuid) -> CompetitionResult<Vec<Uuid>> {
        Ok(self
            .staged
            .memberships
            .iter()
            .filter(|(id, _)| *id == sub_league_id)
            .map(|(_, team_id)| *team_id)
            .collect())
    }

    async fn replace_sub_league_teams(&mut self, sub_league_id: Uuid, team_ids: &[Uuid]) -> CompetitionResult<()> {
        self.staged.memberships.retain(|(id, _)| *id != sub_league_id);
        self.staged
            .memberships
            .extend(team_ids.iter().map(|team_id| (sub_league_id, *team_id)));
        Ok(())
    }

    async fn get_stage(&mut self, id: Uuid) -> CompetitionResult<Option<Stage>> {
        Ok(self.staged.stages.get(&id).cloned())
    }

    async fn list_stages(&mut self, scope: Option<StageScope>) -> CompetitionResult<Vec<Stage>> {
        Ok(ordered(
            self.staged
                .stages
                .values()
                .filter(|s| scope.map_or(true, |scope| s.scope == scope)),
            |s| (s.created_at, s.id),
        ))
    }

    async fn upsert_stage(&mut self, stage: &Stage) -> CompetitionResult<()> {
        self.staged.stages.insert(stage.id, stage.clone());
        Ok(())
    }

    async fn get_round(&mut self, id: Uuid) -> CompetitionResult<Option<Round>> {
        Ok(self.staged.rounds.get(&id).cloned())
    }

    async fn list_rounds(&mut self, stage_id: Uuid) -> CompetitionResult<Vec<Round>> {
        let mut rounds: Vec<Round> = self
            .staged
            .rounds
            .values()
            .filter(|r| r.stage_id == stage_id)
            .cloned()
            .collect();
        rounds.sort_by_key(|r| (r.order, r.created_at, r.id));
        Ok(rounds)
    }

    async fn upsert_round(&mut self, round: &Round) -> CompetitionResult<()> {
        self.staged.rounds.insert(round.id, round.clone());
        Ok(())
    }

    async fn get_team(&mut self, id: Uuid) -> CompetitionResult<Option<Team>> {
        Ok(self.staged.teams.get(&id).map(|t| self.staged.hydrate_team(t)))
    }

    async fn list_teams(&mut self, league_id: Option<Uuid>) -> CompetitionResult<Vec<Team>> {
        let teams = ordered(
            self.staged
                .teams
                .values()
                .filter(|t| league_id.map_or(true, |league_id| t.league_id == Some(league_id))),
            |t| (t.created_at, t.id),
        );
        Ok(teams.iter().map(|t| self.staged.hydrate_team(t)).collect())
    }

    async fn upsert_team(&mut self, team: &Team) -> CompetitionResult<()> {
        let mut stored = team.clone();
        stored.sub_league_ids.clear();
        self.staged.teams.insert(team.id, stored);
        self.staged.memberships.retain(|(_, team_id)| *team_id != team.id);
        self.staged
            .memberships
            .extend(team.sub_league_ids.iter().map(|sub_league_id| (*sub_league_id, team.id)));
        Ok(())
    }

    async fn get_match_system(&mut self, id: Uuid) -> CompetitionResult<Option<MatchSystem>> {
        Ok(self.staged.match_systems.get(&id).cloned())
    }

    async fn get_match_system_by_name(&mut self, name: &str) -> CompetitionResult<Option<MatchSystem>> {
        Ok(self.staged.match_systems.values().find(|m| m.name == name).cloned())
    }

    async fn list_match_systems(&mut self) -> CompetitionResult<Vec<MatchSystem>> {
        let mut systems: Vec<MatchSystem> = self.staged.match_systems.values().cloned().collect();
        systems.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(systems)
    }

    async fn upsert_match_system(&mut self, system: &MatchSystem) -> CompetitionResult<()> {
        self.staged.match_systems.insert(system.id, system.clone());
        Ok(())
    }

    async fn get_match(&mut self, id: Uuid) -> CompetitionResult<Option<Match>> {
        Ok(self.staged.matches.get(&id).cloned())
    }

    async fn list_matches(&mut self, stage_id: Option<Uuid>) -> CompetitionResult<Vec<Match>> {
        let mut matches: Vec<Match> = self
            .staged
            .matches
            .values()
            .filter(|m| stage_id.map_or(true, |stage_id| m.stage_id == stage_id))
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.match_date, m.id));
        Ok(matches)
    }

    async fn upsert_match(&mut self, fixture: &Match) -> CompetitionResult<()> {
        self.staged.matches.insert(fixture.id, fixture.clone());
        Ok(())
    }

    async fn count_by_foreign_key(&mut self, key: ForeignKey, id: Uuid) -> CompetitionResult<i64> {
        let state = &self.staged;
        let target = Some(id);
        let count = match key {
            ForeignKey::LeagueSeason => state.leagues.values().filter(|l| l.season_id == id).count(),
            ForeignKey::LeagueGender => state.leagues.values().filter(|l| l.gender_id == id).count(),
            ForeignKey::LeagueLeagueType => state.leagues.values().filter(|l| l.league_type_id == id).count(),
            ForeignKey::LeagueMatchSystem => state.leagues.values().filter(|l| l.match_system_id == target).count(),
            ForeignKey::SubLeagueLeague => state.sub_leagues.values().filter(|s| s.league_id == id).count(),
            ForeignKey::SubLeagueParent => state.sub_leagues.values().filter(|s| s.parent_id == target).count(),
            ForeignKey::SubLeagueMatchSystem => {
                state.sub_leagues.values().filter(|s| s.match_system_id == target).count()
            }
            ForeignKey::SubLeagueMembership => state.memberships.iter().filter(|(s, _)| *s == id).count(),
            ForeignKey::TeamMembership => state.memberships.iter().filter(|(_, t)| *t == id).count(),
            ForeignKey::TeamClub => state.teams.values().filter(|t| t.club_id == id).count(),
            ForeignKey::TeamLeague => state.teams.values().filter(|t| t.league_id == target).count(),
            ForeignKey::StageLeague => state.stages.values().filter(|s| s.scope.league_id() == target).count(),
            ForeignKey::StageSubLeague => {
                state.stages.values().filter(|s| s.scope.sub_league_id() == target).count()
            }
            ForeignKey::RoundStage => state.rounds.values().filter(|r| r.stage_id == id).count(),
            ForeignKey::MatchStage => state.matches.values().filter(|m| m.stage_id == id).count(),
            ForeignKey::MatchRound => state.matches.values().filter(|m| m.round_id == target).count(),
            ForeignKey::MatchHomeTeam => state.matches.values().filter(|m| m.home_team_id == id).count(),
            ForeignKey::MatchAwayTeam => state.matches.values().filter(|m| m.away_team_id == id).count(),
            ForeignKey::MatchMatchSystem => state.matches.values().filter(|m| m.match_system_id == target).count(),
            ForeignKey::MatchPlayground => state.matches.values().filter(|m| m.playground_id == target).count(),
        };
        Ok(count as i64)
    }

    async fn delete(&mut self, kind: EntityKind, id: Uuid) -> CompetitionResult<bool> {
        let state = &mut self.staged;
        let removed = match kind {
            EntityKind::Season => state.seasons.remove(&id).is_some(),
            EntityKind::Gender
            | EntityKind::LeagueType
            | EntityKind::Club
            | EntityKind::Playground
            | EntityKind::Position => {
                let matches_kind = state
                    .lookups
                    .get(&id)
                    .map_or(false, |l| l.kind.entity() == kind);
                matches_kind && state.lookups.remove(&id).is_some()
            }
            EntityKind::League => state.leagues.remove(&id).is_some(),
            EntityKind::SubLeague => {
                state.memberships.retain(|(sub_league_id, _)| *sub_league_id != id);
                state.sub_leagues.remove(&id).is_some()
            }
            EntityKind::Stage => state.stages.remove(&id).is_some(),
            EntityKind::Round => state.rounds.remove(&id).is_some(),
            EntityKind::Team => {
                state.memberships.retain(|(_, team_id)| *team_id != id);
                state.teams.remove(&id).is_some()
            }
            EntityKind::MatchSystem => state.match_systems.remove(&id).is_some(),
            EntityKind::Match => state.matches.remove(&id).is_some(),
        };
        Ok(removed)
    }

    async fn commit(&mut self) -> CompetitionResult<()> {
        let mut guard = self
            .guard
            .take()
            .ok_or_else(|| CompetitionError::Internal("Unit of work already committed".into()))?;
        *guard = self.staged.clone();
        Ok(())
    }
}
