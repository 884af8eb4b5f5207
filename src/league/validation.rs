use chrono::{DateTime, Utc};

use crate::errors::{CompetitionError, CompetitionResult};

const MAX_NAME_LENGTH: usize = 255;

/// Field-level validation shared by the admin handlers
pub struct LeagueValidator;

impl LeagueValidator {
    pub fn new() -> Self {
        Self
    }

    /// Strips NUL characters and trims surrounding whitespace.
    pub fn sanitize_string_input(&self, input: &str) -> String {
        input.replace('\0', "").trim().to_string()
    }

    /// Validate and sanitize a display name; `label` names the field in the error
    pub fn validate_name(&self, label: &str, name: &str) -> CompetitionResult<String> {
        let sanitized = self.sanitize_string_input(name);

        if sanitized.is_empty() {
            return Err(CompetitionError::validation(format!("{} cannot be empty", label)));
        }

        if sanitized.chars().count() > MAX_NAME_LENGTH {
            return Err(CompetitionError::validation(format!(
                "{} too long (maximum {} characters)",
                label, MAX_NAME_LENGTH
            )));
        }

        Ok(sanitized)
    }

    /// Validate that a period does not end before it starts
    pub fn validate_date_range(&self, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> CompetitionResult<()> {
        if start_date > end_date {
            return Err(CompetitionError::validation(format!(
                "start_date {} must not be after end_date {}",
                start_date, end_date
            )));
        }
        Ok(())
    }

    /// Validate ordering position of a stage or round
    pub fn validate_order(&self, order: i32) -> CompetitionResult<()> {
        if order < 0 {
            return Err(CompetitionError::validation(format!(
                "order cannot be negative: {}",
                order
            )));
        }
        Ok(())
    }

    /// Validate match scores; either side may still be unset
    pub fn validate_scores(&self, home_score: Option<i32>, away_score: Option<i32>) -> CompetitionResult<()> {
        if let Some(home) = home_score.filter(|s| *s < 0) {
            return Err(CompetitionError::validation(format!(
                "Home score cannot be negative: {}",
                home
            )));
        }

        if let Some(away) = away_score.filter(|s| *s < 0) {
            return Err(CompetitionError::validation(format!(
                "Away score cannot be negative: {}",
                away
            )));
        }

        Ok(())
    }
}

impl Default for LeagueValidator {
    fn default() -> Self {
        Self::new()
    }
}
