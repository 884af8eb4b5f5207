use chrono::Utc;
use uuid::Uuid;

use crate::db::{Repository, Store};
use crate::errors::{CompetitionError, CompetitionResult};
use crate::league::validation::LeagueValidator;
use crate::models::match_system::{MatchSystem, MatchSystemRequest, MatchSystemType};

struct PredefinedSystem {
    name: &'static str,
    singles_count: i32,
    doubles_count: i32,
    match_order: &'static [&'static str],
    description: &'static str,
}

const PREDEFINED_SYSTEMS: &[PredefinedSystem] = &[
    PredefinedSystem {
        name: "Swaythling Cup",
        singles_count: 9,
        doubles_count: 0,
        match_order: &["S1", "S2", "S3", "S4", "S5", "S6", "S7", "S8", "S9"],
        description: "Three players per team, every player meets every opponent: nine singles.",
    },
    PredefinedSystem {
        name: "Corbillon Cup",
        singles_count: 4,
        doubles_count: 1,
        match_order: &["S1", "S2", "D1", "S3", "S4"],
        description: "Two singles, the doubles, then two reverse singles.",
    },
    PredefinedSystem {
        name: "Olympic",
        singles_count: 4,
        doubles_count: 1,
        match_order: &["D1", "S1", "S2", "S3", "S4"],
        description: "Doubles first, followed by four singles.",
    },
    PredefinedSystem {
        name: "Düsseldorf",
        singles_count: 6,
        doubles_count: 0,
        match_order: &["S1", "S2", "S3", "S4", "S5", "S6"],
        description: "Three players per team, six singles.",
    },
];

/// Validates and stores match-format definitions.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchSystemCatalog;

impl MatchSystemCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Counts must add up and the play order must list one slot per game.
    ///
    /// Tag content is not cross-checked: an order of `["S1", "S2"]` is accepted
    /// for one singles plus one doubles.
    pub fn validate(&self, system: &MatchSystem) -> CompetitionResult<()> {
        if system.total_matches < 1 {
            return Err(CompetitionError::validation(format!(
                "total_matches must be at least 1, got {}",
                system.total_matches
            )));
        }

        if system.singles_count < 0 || system.doubles_count < 0 {
            return Err(CompetitionError::validation(
                "singles_count and doubles_count cannot be negative",
            ));
        }

        let counted = system.singles_count.checked_add(system.doubles_count).ok_or_else(|| {
            CompetitionError::validation(format!(
                "singles_count ({}) + doubles_count ({}) is out of range",
                system.singles_count, system.doubles_count
            ))
        })?;
        if counted != system.total_matches {
            return Err(CompetitionError::validation(format!(
                "singles_count ({}) + doubles_count ({}) must equal total_matches ({})",
                system.singles_count, system.doubles_count, system.total_matches
            )));
        }

        if system.match_order.len() != system.total_matches as usize {
            return Err(CompetitionError::validation(format!(
                "match_order has {} entries but total_matches is {}",
                system.match_order.len(),
                system.total_matches
            )));
        }

        if let Some(position) = system.match_order.iter().position(|tag| tag.trim().is_empty()) {
            return Err(CompetitionError::validation(format!(
                "match_order entry {} is empty",
                position + 1
            )));
        }

        Ok(())
    }

    /// Builds a record from a request, keeping identity when it replaces `existing`.
    pub fn build(
        &self,
        request: &MatchSystemRequest,
        existing: Option<&MatchSystem>,
    ) -> CompetitionResult<MatchSystem> {
        let name = LeagueValidator::new().validate_name("Match system name", &request.name)?;
        let now = Utc::now();
        let system = MatchSystem {
            id: existing.map_or_else(Uuid::new_v4, |e| e.id),
            name,
            system_type: request.system_type,
            total_matches: request.total_matches,
            singles_count: request.singles_count,
            doubles_count: request.doubles_count,
            match_order: request.match_order.iter().map(|tag| tag.trim().to_string()).collect(),
            description: request.description.clone(),
            created_at: existing.map_or(now, |e| e.created_at),
            updated_at: now,
        };
        self.validate(&system)?;
        Ok(system)
    }

    /// Validates, enforces a unique name and writes the record.
    pub async fn save(&self, repo: &mut dyn Repository, system: &MatchSystem) -> CompetitionResult<()> {
        self.validate(system)?;
        if let Some(other) = repo.get_match_system_by_name(&system.name).await? {
            if other.id != system.id {
                return Err(CompetitionError::validation(format!(
                    "A match system named '{}' already exists",
                    system.name
                )));
            }
        }
        repo.upsert_match_system(system).await
    }

    pub async fn find_by_name(&self, repo: &mut dyn Repository, name: &str) -> CompetitionResult<Option<MatchSystem>> {
        repo.get_match_system_by_name(name).await
    }

    /// Upserts the four standard formats by name. Running it twice changes nothing
    /// but `updated_at`.
    pub async fn seed_predefined(&self, store: &dyn Store) -> CompetitionResult<Vec<MatchSystem>> {
        let mut repo = store.begin().await?;
        let mut seeded = Vec::with_capacity(PREDEFINED_SYSTEMS.len());

        for predefined in PREDEFINED_SYSTEMS {
            let existing = repo.get_match_system_by_name(predefined.name).await?;
            let now = Utc::now();
            let system = MatchSystem {
                id: existing.as_ref().map_or_else(Uuid::new_v4, |e| e.id),
                name: predefined.name.to_string(),
                system_type: MatchSystemType::Predefined,
                total_matches: predefined.singles_count + predefined.doubles_count,
                singles_count: predefined.singles_count,
                doubles_count: predefined.doubles_count,
                match_order: predefined.match_order.iter().map(|tag| tag.to_string()).collect(),
                description: Some(predefined.description.to_string()),
                created_at: existing.as_ref().map_or(now, |e| e.created_at),
                updated_at: now,
            };
            self.validate(&system)?;
            repo.upsert_match_system(&system).await?;
            seeded.push(system);
        }

        repo.commit().await?;
        tracing::info!("Seeded {} predefined match systems", seeded.len());
        Ok(seeded)
    }
}
