use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::db::helpers::{require_lookup, require_optional_match_system, require_record};
use crate::db::{Repository, Store};
use crate::errors::CompetitionResult;
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::LeagueValidator;
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;
use crate::models::league::{League, LeagueListQuery, LeagueRequest, LookupKind};

// GET /api/leagues?season_id= - Get all leagues, optionally of one season
pub async fn get_leagues(store: web::Data<dyn Store>, query: web::Query<LeagueListQuery>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let leagues = repo.list_leagues(query.season_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Leagues retrieved", leagues)))
}

// GET /api/leagues/{id} - Get league by ID
pub async fn get_league_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let league_id = path.into_inner();
    let mut repo = store.begin().await?;
    let league = require_record(repo.get_league(league_id).await?, EntityKind::League, "id", league_id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("League retrieved", league)))
}

// POST /api/leagues - Create league
pub async fn create_league(store: web::Data<dyn Store>, body: web::Json<LeagueRequest>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let league = build_league(repo.as_mut(), &body, None).await?;
    repo.upsert_league(&league).await?;
    repo.commit().await?;

    tracing::info!("Created league '{}' ({}) in season {}", league.name, league.id, league.season_id);
    Ok(HttpResponse::Created().json(ApiResponse::success("League created successfully", league)))
}

// PUT /api/leagues/{id} - Update league
pub async fn update_league(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<LeagueRequest>,
) -> HandlerResult {
    let league_id = path.into_inner();
    let mut repo = store.begin().await?;
    let existing = require_record(repo.get_league(league_id).await?, EntityKind::League, "id", league_id)?;
    let league = build_league(repo.as_mut(), &body, Some(&existing)).await?;
    repo.upsert_league(&league).await?;
    repo.commit().await?;

    tracing::info!("Updated league {}", league.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("League updated successfully", league)))
}

// DELETE /api/leagues/{id} - Blocked while teams, stages or sub-leagues remain
pub async fn delete_league(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    delete_guarded(store, EntityKind::League, path.into_inner()).await
}

async fn build_league(
    repo: &mut dyn Repository,
    request: &LeagueRequest,
    existing: Option<&League>,
) -> CompetitionResult<League> {
    let name = LeagueValidator::new().validate_name("League name", &request.name)?;

    require_record(
        repo.get_season(request.season_id).await?,
        EntityKind::Season,
        "season_id",
        request.season_id,
    )?;
    require_lookup(repo, LookupKind::Gender, "gender_id", request.gender_id).await?;
    require_lookup(repo, LookupKind::LeagueType, "league_type_id", request.league_type_id).await?;
    require_optional_match_system(repo, "match_system_id", request.match_system_id).await?;

    let now = Utc::now();
    Ok(League {
        id: existing.map_or_else(Uuid::new_v4, |e| e.id),
        name,
        season_id: request.season_id,
        gender_id: request.gender_id,
        league_type_id: request.league_type_id,
        match_system_id: request.match_system_id,
        created_at: existing.map_or(now, |e| e.created_at),
        updated_at: now,
    })
}
