//! Error taxonomy shared by the guards, the stores and the HTTP layer.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::entity::EntityKind;

#[derive(Debug, Error)]
pub enum CompetitionError {
    /// Malformed input: scope XOR violation, count mismatch, same-team match, ineligible team.
    #[error("{0}")]
    Validation(String),

    /// Sub-league parent assignment that would close a loop.
    #[error("{0}")]
    Cycle(String),

    #[error("{entity} not found ({field} = {id})")]
    NotFound {
        entity: EntityKind,
        field: &'static str,
        id: Uuid,
    },

    #[error("Cannot delete {entity} {id}: still referenced by {}", blocked_by.join(", "))]
    Conflict {
        entity: EntityKind,
        id: Uuid,
        blocked_by: Vec<String>,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CompetitionResult<T> = Result<T, CompetitionError>;

impl CompetitionError {
    pub fn validation(message: impl Into<String>) -> Self {
        CompetitionError::Validation(message.into())
    }

    pub fn not_found(entity: EntityKind, field: &'static str, id: Uuid) -> Self {
        CompetitionError::NotFound { entity, field, id }
    }

    /// Cycle errors are a specialization of validation errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, CompetitionError::Validation(_) | CompetitionError::Cycle(_))
    }

    /// Message safe to hand to API clients; store internals are not exposed.
    pub fn client_message(&self) -> String {
        match self {
            CompetitionError::Database(_)
            | CompetitionError::Migration(_)
            | CompetitionError::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl ResponseError for CompetitionError {
    fn status_code(&self) -> StatusCode {
        match self {
            CompetitionError::Validation(_) | CompetitionError::Cycle(_) => StatusCode::BAD_REQUEST,
            CompetitionError::NotFound { .. } => StatusCode::NOT_FOUND,
            CompetitionError::Conflict { .. } => StatusCode::CONFLICT,
            CompetitionError::Database(_)
            | CompetitionError::Migration(_)
            | CompetitionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.client_message()
        }))
    }
}
