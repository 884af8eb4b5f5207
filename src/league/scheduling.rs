use uuid::Uuid;

use crate::db::helpers::require_optional_match_system;
use crate::db::Repository;
use crate::errors::{CompetitionError, CompetitionResult};
use crate::league::eligibility::{EligibilityResolver, TeamSide};
use crate::league::validation::LeagueValidator;
use crate::models::entity::EntityKind;
use crate::models::league::{LookupKind, Stage, StageRequest, StageScope};
use crate::models::matches::MatchRequest;
use crate::models::team::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

/// Validates stage and match writes against the current store state.
pub struct SchedulingGuard<'r> {
    repo: &'r mut dyn Repository,
    validator: LeagueValidator,
}

impl<'r> SchedulingGuard<'r> {
    pub fn new(repo: &'r mut dyn Repository) -> Self {
        Self {
            repo,
            validator: LeagueValidator::new(),
        }
    }

    /// Exactly one of the two ids must be present.
    pub fn stage_scope(league_id: Option<Uuid>, sub_league_id: Option<Uuid>) -> CompetitionResult<StageScope> {
        match (league_id, sub_league_id) {
            (Some(id), None) => Ok(StageScope::League(id)),
            (None, Some(id)) => Ok(StageScope::SubLeague(id)),
            (Some(_), Some(_)) => Err(CompetitionError::validation(
                "A stage belongs to either a league or a sub-league, not both",
            )),
            (None, None) => Err(CompetitionError::validation(
                "A stage requires either league_id or sub_league_id",
            )),
        }
    }

    /// Scope rule plus existence of the referenced league or sub-league.
    pub async fn check_stage(&mut self, request: &StageRequest) -> CompetitionResult<StageScope> {
        let scope = Self::stage_scope(request.league_id, request.sub_league_id)?;
        self.validator.validate_order(request.order)?;
        self.validator.validate_date_range(request.start_date, request.end_date)?;

        match scope {
            StageScope::League(id) => {
                if self.repo.get_league(id).await?.is_none() {
                    return Err(CompetitionError::not_found(EntityKind::League, "league_id", id));
                }
            }
            StageScope::SubLeague(id) => {
                if self.repo.get_sub_league(id).await?.is_none() {
                    return Err(CompetitionError::not_found(EntityKind::SubLeague, "sub_league_id", id));
                }
            }
        }

        Ok(scope)
    }

    /// Resolves every reference of a match, then applies the pairing rules.
    /// Eligibility is only enforced when the match is created.
    pub async fn check_match(&mut self, request: &MatchRequest, mode: WriteMode) -> CompetitionResult<Stage> {
        let stage = self
            .repo
            .get_stage(request.stage_id)
            .await?
            .ok_or_else(|| CompetitionError::not_found(EntityKind::Stage, "stage_id", request.stage_id))?;

        if let Some(round_id) = request.round_id {
            let round = self
                .repo
                .get_round(round_id)
                .await?
                .ok_or_else(|| CompetitionError::not_found(EntityKind::Round, "round_id", round_id))?;
            if round.stage_id != stage.id {
                return Err(CompetitionError::validation(format!(
                    "Round {} does not belong to stage {}",
                    round.id, stage.id
                )));
            }
        }

        let home_team = self.team(request.home_team_id, "home_team_id").await?;
        let away_team = self.team(request.away_team_id, "away_team_id").await?;

        require_optional_match_system(&mut *self.repo, "match_system_id", request.match_system_id).await?;

        if let Some(playground_id) = request.playground_id {
            if self
                .repo
                .get_lookup(LookupKind::Playground, playground_id)
                .await?
                .is_none()
            {
                return Err(CompetitionError::not_found(
                    EntityKind::Playground,
                    "playground_id",
                    playground_id,
                ));
            }
        }

        if home_team.id == away_team.id {
            return Err(CompetitionError::validation(format!(
                "same team: home and away team must differ ({})",
                home_team.id
            )));
        }

        self.validator
            .validate_scores(request.home_score, request.away_score)?;

        if mode == WriteMode::Create {
            EligibilityResolver::ensure_eligible(&home_team, &stage.scope, TeamSide::Home)?;
            EligibilityResolver::ensure_eligible(&away_team, &stage.scope, TeamSide::Away)?;
        }

        Ok(stage)
    }

    async fn team(&mut self, id: Uuid, field: &'static str) -> CompetitionResult<Team> {
        self.repo
            .get_team(id)
            .await?
            .ok_or_else(|| CompetitionError::not_found(EntityKind::Team, field, id))
    }
}
