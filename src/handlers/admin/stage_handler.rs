use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::db::helpers::require_record;
use crate::db::Store;
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::{LeagueValidator, SchedulingGuard};
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;
use crate::models::league::{Stage, StageListQuery, StageRequest};

// GET /api/stages?league_id= | ?sub_league_id=
pub async fn get_stages(store: web::Data<dyn Store>, query: web::Query<StageListQuery>) -> HandlerResult {
    let scope = match (query.league_id, query.sub_league_id) {
        (None, None) => None,
        (league_id, sub_league_id) => Some(SchedulingGuard::stage_scope(league_id, sub_league_id)?),
    };

    let mut repo = store.begin().await?;
    let stages = repo.list_stages(scope).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Stages retrieved", stages)))
}

// GET /api/stages/{id}
pub async fn get_stage_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let stage = require_record(repo.get_stage(id).await?, EntityKind::Stage, "id", id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Stage retrieved", stage)))
}

// POST /api/stages - Bound to exactly one league or sub-league
pub async fn create_stage(store: web::Data<dyn Store>, body: web::Json<StageRequest>) -> HandlerResult {
    let name = LeagueValidator::new().validate_name("Stage name", &body.name)?;

    let mut repo = store.begin().await?;
    let scope = SchedulingGuard::new(repo.as_mut()).check_stage(&body).await?;

    let now = Utc::now();
    let stage = Stage {
        id: Uuid::new_v4(),
        name,
        order: body.order,
        scope,
        start_date: body.start_date,
        end_date: body.end_date,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_stage(&stage).await?;
    repo.commit().await?;

    tracing::info!("Created stage '{}' ({}) for {:?}", stage.name, stage.id, stage.scope);
    Ok(HttpResponse::Created().json(ApiResponse::success("Stage created successfully", stage)))
}

// PUT /api/stages/{id}
pub async fn update_stage(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<StageRequest>,
) -> HandlerResult {
    let id = path.into_inner();
    let name = LeagueValidator::new().validate_name("Stage name", &body.name)?;

    let mut repo = store.begin().await?;
    let existing = require_record(repo.get_stage(id).await?, EntityKind::Stage, "id", id)?;
    let scope = SchedulingGuard::new(repo.as_mut()).check_stage(&body).await?;

    let stage = Stage {
        name,
        order: body.order,
        scope,
        start_date: body.start_date,
        end_date: body.end_date,
        updated_at: Utc::now(),
        ..existing
    };
    repo.upsert_stage(&stage).await?;
    repo.commit().await?;

    tracing::info!("Updated stage {}", stage.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Stage updated successfully", stage)))
}

// DELETE /api/stages/{id}
pub async fn delete_stage(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    delete_guarded(store, EntityKind::Stage, path.into_inner()).await
}
