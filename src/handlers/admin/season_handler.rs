use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::db::helpers::require_record;
use crate::db::Store;
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::SeasonService;
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;
use crate::models::league::SeasonRequest;

// GET /api/seasons - Get all seasons
pub async fn get_seasons(store: web::Data<dyn Store>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let seasons = repo.list_seasons().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Seasons retrieved", seasons)))
}

// GET /api/seasons/{id} - Get season by ID
pub async fn get_season_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let season_id = path.into_inner();
    let mut repo = store.begin().await?;
    let season = require_record(repo.get_season(season_id).await?, EntityKind::Season, "id", season_id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Season retrieved", season)))
}

// POST /api/seasons - Create season; an active one deactivates all others
pub async fn create_season(store: web::Data<dyn Store>, body: web::Json<SeasonRequest>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let season = SeasonService::new(repo.as_mut()).save(&body, None).await?;
    repo.commit().await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("Season created successfully", season)))
}

// PUT /api/seasons/{id} - Update season
pub async fn update_season(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<SeasonRequest>,
) -> HandlerResult {
    let season_id = path.into_inner();
    let mut repo = store.begin().await?;
    let existing = require_record(repo.get_season(season_id).await?, EntityKind::Season, "id", season_id)?;
    let season = SeasonService::new(repo.as_mut()).save(&body, Some(&existing)).await?;
    repo.commit().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Season updated successfully", season)))
}

// DELETE /api/seasons/{id}
pub async fn delete_season(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    delete_guarded(store, EntityKind::Season, path.into_inner()).await
}
