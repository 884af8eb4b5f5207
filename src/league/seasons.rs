use chrono::Utc;
use uuid::Uuid;

use crate::db::Repository;
use crate::errors::CompetitionResult;
use crate::league::validation::LeagueValidator;
use crate::models::league::{Season, SeasonRequest};

/// Season management: at most one season is active at a time.
pub struct SeasonService<'r> {
    repo: &'r mut dyn Repository,
}

impl<'r> SeasonService<'r> {
    pub fn new(repo: &'r mut dyn Repository) -> Self {
        Self { repo }
    }

    /// Create a season, or replace `existing` with the request's fields
    pub async fn save(&mut self, request: &SeasonRequest, existing: Option<&Season>) -> CompetitionResult<Season> {
        let validator = LeagueValidator::new();
        let name = validator.validate_name("Season name", &request.name)?;
        validator.validate_date_range(request.start_date, request.end_date)?;

        let now = Utc::now();
        let season = Season {
            id: existing.map_or_else(Uuid::new_v4, |e| e.id),
            name,
            start_date: request.start_date,
            end_date: request.end_date,
            is_active: request.is_active,
            created_at: existing.map_or(now, |e| e.created_at),
            updated_at: now,
        };

        if season.is_active {
            self.deactivate_others(season.id).await?;
        }
        self.repo.upsert_season(&season).await?;

        tracing::info!(
            "Saved season '{}' ({}) running from {} to {}, active: {}",
            season.name,
            season.id,
            season.start_date,
            season.end_date,
            season.is_active
        );

        Ok(season)
    }

    /// Mark any other active seasons as inactive
    async fn deactivate_others(&mut self, keep: Uuid) -> CompetitionResult<()> {
        let now = Utc::now();
        for mut other in self.repo.list_seasons().await? {
            if other.id != keep && other.is_active {
                other.is_active = false;
                other.updated_at = now;
                self.repo.upsert_season(&other).await?;
                tracing::info!("Deactivated season {}", other.id);
            }
        }
        Ok(())
    }
}
