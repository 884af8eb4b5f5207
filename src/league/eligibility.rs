use std::fmt;

use crate::errors::{CompetitionError, CompetitionResult};
use crate::models::league::StageScope;
use crate::models::team::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Home,
    Away,
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => f.write_str("home"),
            TeamSide::Away => f.write_str("away"),
        }
    }
}

/// Decides whether a team may play within a stage's scope.
pub struct EligibilityResolver;

impl EligibilityResolver {
    /// Direct membership only. A team in a parent sub-league is not eligible
    /// for a stage bound to one of its children.
    pub fn is_eligible(team: &Team, scope: &StageScope) -> bool {
        match scope {
            StageScope::League(league_id) => team.league_id == Some(*league_id),
            StageScope::SubLeague(sub_league_id) => team.sub_league_ids.contains(sub_league_id),
        }
    }

    pub fn ensure_eligible(team: &Team, scope: &StageScope, side: TeamSide) -> CompetitionResult<()> {
        if Self::is_eligible(team, scope) {
            return Ok(());
        }

        let target = match scope {
            StageScope::League(id) => format!("league {}", id),
            StageScope::SubLeague(id) => format!("sub-league {}", id),
        };
        Err(CompetitionError::validation(format!(
            "{} team not eligible: team '{}' ({}) does not belong to {}",
            side, team.name, team.id, target
        )))
    }
}
