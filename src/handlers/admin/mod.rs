use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::db::Store;
use crate::errors::CompetitionError;
use crate::league::DependencyGuard;
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;

pub mod league_handler;
pub mod lookup_handler;
pub mod match_handler;
pub mod match_system_handler;
pub mod round_handler;
pub mod season_handler;
pub mod stage_handler;
pub mod sub_league_handler;
pub mod team_handler;

pub type HandlerResult = Result<HttpResponse, CompetitionError>;

/// DELETE for every entity kind: dependents are checked first, in the same unit of work.
pub async fn delete_guarded(store: web::Data<dyn Store>, kind: EntityKind, id: Uuid) -> HandlerResult {
    let mut repo = store.begin().await?;
    DependencyGuard::delete(repo.as_mut(), kind, id).await?;
    repo.commit().await?;

    tracing::info!("Deleted {} {}", kind, id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("{} deleted successfully", kind),
        json!({ "id": id }),
    )))
}
