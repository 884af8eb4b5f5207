//! Lookup helpers that turn a missing record into a `NotFound` naming the field.
//!
//! # Usage
//!
//! ```ignore
//! let league = require_record(repo.get_league(id).await?, EntityKind::League, "league_id", id)?;
//! ```

use uuid::Uuid;

use crate::db::Repository;
use crate::errors::{CompetitionError, CompetitionResult};
use crate::models::entity::EntityKind;
use crate::models::league::{Lookup, LookupKind};
use crate::models::match_system::MatchSystem;

/// Unwrap an optional record, returning NotFound if None.
pub fn require_record<T>(
    record: Option<T>,
    entity: EntityKind,
    field: &'static str,
    id: Uuid,
) -> CompetitionResult<T> {
    record.ok_or_else(|| CompetitionError::not_found(entity, field, id))
}

/// Fetch a lookup record of the given kind or fail with NotFound.
pub async fn require_lookup(
    repo: &mut dyn Repository,
    kind: LookupKind,
    field: &'static str,
    id: Uuid,
) -> CompetitionResult<Lookup> {
    require_record(repo.get_lookup(kind, id).await?, kind.entity(), field, id)
}

/// Fetch a match system or fail with NotFound naming `field`.
pub async fn require_match_system(
    repo: &mut dyn Repository,
    field: &'static str,
    id: Uuid,
) -> CompetitionResult<MatchSystem> {
    require_record(repo.get_match_system(id).await?, EntityKind::MatchSystem, field, id)
}

/// Check an optional reference; `None` is always fine.
pub async fn require_optional_match_system(
    repo: &mut dyn Repository,
    field: &'static str,
    id: Option<Uuid>,
) -> CompetitionResult<()> {
    if let Some(id) = id {
        require_match_system(repo, field, id).await?;
    }
    Ok(())
}
