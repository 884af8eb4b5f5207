use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::db::helpers::require_record;
use crate::db::{ForeignKey, Repository, Store};
use crate::errors::{CompetitionError, CompetitionResult};
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::LeagueValidator;
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;
use crate::models::league::{Round, RoundRequest};

// GET /api/stages/{id}/rounds
pub async fn get_stage_rounds(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let stage_id = path.into_inner();
    let mut repo = store.begin().await?;
    require_record(repo.get_stage(stage_id).await?, EntityKind::Stage, "id", stage_id)?;
    let rounds = repo.list_rounds(stage_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Rounds retrieved", rounds)))
}

// GET /api/rounds/{id}
pub async fn get_round_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let round = require_record(repo.get_round(id).await?, EntityKind::Round, "id", id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Round retrieved", round)))
}

// POST /api/rounds
pub async fn create_round(store: web::Data<dyn Store>, body: web::Json<RoundRequest>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let round = build_round(repo.as_mut(), &body, None).await?;
    repo.upsert_round(&round).await?;
    repo.commit().await?;

    tracing::info!("Created round '{}' ({}) in stage {}", round.name, round.id, round.stage_id);
    Ok(HttpResponse::Created().json(ApiResponse::success("Round created successfully", round)))
}

// PUT /api/rounds/{id}
pub async fn update_round(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<RoundRequest>,
) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let existing = require_record(repo.get_round(id).await?, EntityKind::Round, "id", id)?;
    let round = build_round(repo.as_mut(), &body, Some(&existing)).await?;
    repo.upsert_round(&round).await?;
    repo.commit().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Round updated successfully", round)))
}

// DELETE /api/rounds/{id}
pub async fn delete_round(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    delete_guarded(store, EntityKind::Round, path.into_inner()).await
}

async fn build_round(
    repo: &mut dyn Repository,
    request: &RoundRequest,
    existing: Option<&Round>,
) -> CompetitionResult<Round> {
    let validator = LeagueValidator::new();
    let name = validator.validate_name("Round name", &request.name)?;
    validator.validate_order(request.order)?;
    validator.validate_date_range(request.start_date, request.end_date)?;
    require_record(
        repo.get_stage(request.stage_id).await?,
        EntityKind::Stage,
        "stage_id",
        request.stage_id,
    )?;

    // Matches must stay in their round's stage
    if let Some(existing) = existing.filter(|e| e.stage_id != request.stage_id) {
        let scheduled = repo.count_by_foreign_key(ForeignKey::MatchRound, existing.id).await?;
        if scheduled > 0 {
            tracing::warn!(
                "Refusing to move round {} from stage {} to {}: {} matches reference it",
                existing.id,
                existing.stage_id,
                request.stage_id,
                scheduled
            );
            return Err(CompetitionError::validation(format!(
                "Round {} is used by {} matches and cannot move to stage {}",
                existing.id, scheduled, request.stage_id
            )));
        }
    }

    let now = Utc::now();
    Ok(Round {
        id: existing.map_or_else(Uuid::new_v4, |e| e.id),
        name,
        order: request.order,
        stage_id: request.stage_id,
        start_date: request.start_date,
        end_date: request.end_date,
        created_at: existing.map_or(now, |e| e.created_at),
        updated_at: now,
    })
}
