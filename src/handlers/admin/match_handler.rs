use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::db::helpers::require_record;
use crate::db::Store;
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::{SchedulingGuard, WriteMode};
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;
use crate::models::matches::{Match, MatchListQuery, MatchRequest};

// GET /api/matches?stage_id=
pub async fn get_matches(store: web::Data<dyn Store>, query: web::Query<MatchListQuery>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let matches = repo.list_matches(query.stage_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Matches retrieved", matches)))
}

// GET /api/matches/{id}
pub async fn get_match_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let fixture = require_record(repo.get_match(id).await?, EntityKind::Match, "id", id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match retrieved", fixture)))
}

// POST /api/matches - Both teams must be direct members of the stage's scope
pub async fn create_match(store: web::Data<dyn Store>, body: web::Json<MatchRequest>) -> HandlerResult {
    let mut repo = store.begin().await?;
    if let Err(e) = SchedulingGuard::new(repo.as_mut()).check_match(&body, WriteMode::Create).await {
        tracing::warn!(
            "Rejected match {} vs {} in stage {}: {}",
            body.home_team_id,
            body.away_team_id,
            body.stage_id,
            e
        );
        return Err(e);
    }

    let now = Utc::now();
    let fixture = Match {
        id: Uuid::new_v4(),
        stage_id: body.stage_id,
        round_id: body.round_id,
        home_team_id: body.home_team_id,
        away_team_id: body.away_team_id,
        match_system_id: body.match_system_id,
        playground_id: body.playground_id,
        match_date: body.match_date,
        status: body.status,
        home_score: body.home_score,
        away_score: body.away_score,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_match(&fixture).await?;
    repo.commit().await?;

    tracing::info!(
        "Scheduled match {} ({} vs {}) in stage {}",
        fixture.id,
        fixture.home_team_id,
        fixture.away_team_id,
        fixture.stage_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success("Match created successfully", fixture)))
}

// PUT /api/matches/{id} - Any status may be set; eligibility is not re-checked
pub async fn update_match(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<MatchRequest>,
) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let existing = require_record(repo.get_match(id).await?, EntityKind::Match, "id", id)?;
    if let Err(e) = SchedulingGuard::new(repo.as_mut()).check_match(&body, WriteMode::Update).await {
        tracing::warn!("Rejected update of match {}: {}", id, e);
        return Err(e);
    }

    let fixture = Match {
        stage_id: body.stage_id,
        round_id: body.round_id,
        home_team_id: body.home_team_id,
        away_team_id: body.away_team_id,
        match_system_id: body.match_system_id,
        playground_id: body.playground_id,
        match_date: body.match_date,
        status: body.status,
        home_score: body.home_score,
        away_score: body.away_score,
        updated_at: Utc::now(),
        ..existing
    };
    repo.upsert_match(&fixture).await?;
    repo.commit().await?;

    tracing::info!("Updated match {} (status {})", fixture.id, fixture.status.as_str());
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match updated successfully", fixture)))
}

// DELETE /api/matches/{id}
pub async fn delete_match(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    delete_guarded(store, EntityKind::Match, path.into_inner()).await
}
