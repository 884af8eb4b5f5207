use uuid::Uuid;

use crate::db::{ForeignKey, Repository};
use crate::errors::{CompetitionError, CompetitionResult};
use crate::models::entity::EntityKind;

/// Rows that must be gone before an entity of the given kind may be deleted.
const DEPENDENCIES: &[(EntityKind, &[ForeignKey])] = &[
    (EntityKind::Season, &[ForeignKey::LeagueSeason]),
    (EntityKind::Gender, &[ForeignKey::LeagueGender]),
    (EntityKind::LeagueType, &[ForeignKey::LeagueLeagueType]),
    (EntityKind::Club, &[ForeignKey::TeamClub]),
    (EntityKind::Playground, &[ForeignKey::MatchPlayground]),
    (EntityKind::Position, &[]),
    (
        EntityKind::League,
        &[ForeignKey::TeamLeague, ForeignKey::StageLeague, ForeignKey::SubLeagueLeague],
    ),
    (
        EntityKind::SubLeague,
        &[
            ForeignKey::SubLeagueParent,
            ForeignKey::StageSubLeague,
            ForeignKey::SubLeagueMembership,
        ],
    ),
    (EntityKind::Stage, &[ForeignKey::RoundStage, ForeignKey::MatchStage]),
    (EntityKind::Round, &[ForeignKey::MatchRound]),
    (
        EntityKind::Team,
        &[
            ForeignKey::MatchHomeTeam,
            ForeignKey::MatchAwayTeam,
            ForeignKey::TeamMembership,
        ],
    ),
    (
        EntityKind::MatchSystem,
        &[
            ForeignKey::LeagueMatchSystem,
            ForeignKey::SubLeagueMatchSystem,
            ForeignKey::MatchMatchSystem,
        ],
    ),
    (EntityKind::Match, &[]),
];

/// Blocks deletes that would orphan children.
pub struct DependencyGuard;

impl DependencyGuard {
    pub fn dependents_of(kind: EntityKind) -> &'static [ForeignKey] {
        DEPENDENCIES
            .iter()
            .find(|(entity, _)| *entity == kind)
            .map(|(_, keys)| *keys)
            .unwrap_or(&[])
    }

    /// Counts every declared dependent and fails with a conflict naming the
    /// blocking ones.
    pub async fn guard_delete(repo: &mut dyn Repository, kind: EntityKind, id: Uuid) -> CompetitionResult<()> {
        // Keys sharing a dependent label (home/away matches) are reported together.
        let mut counts: Vec<(&'static str, i64)> = Vec::new();

        for key in Self::dependents_of(kind) {
            let count = repo.count_by_foreign_key(*key, id).await?;
            if count == 0 {
                continue;
            }
            tracing::debug!("{} {} is referenced by {} {} ({})", kind, id, count, key.dependent(), key.column());
            match counts.iter_mut().find(|(label, _)| *label == key.dependent()) {
                Some((_, total)) => *total += count,
                None => counts.push((key.dependent(), count)),
            }
        }

        if counts.is_empty() {
            return Ok(());
        }

        let blocked_by = counts
            .into_iter()
            .map(|(label, count)| format!("{} {}", count, label))
            .collect();
        Err(CompetitionError::Conflict { entity: kind, id, blocked_by })
    }

    /// Guarded delete inside the caller's unit of work.
    pub async fn delete(repo: &mut dyn Repository, kind: EntityKind, id: Uuid) -> CompetitionResult<()> {
        Self::guard_delete(repo, kind, id).await?;
        if !repo.delete(kind, id).await? {
            return Err(CompetitionError::not_found(kind, "id", id));
        }
        Ok(())
    }
}
