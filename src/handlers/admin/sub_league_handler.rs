use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::db::helpers::{require_match_system, require_optional_match_system, require_record};
use crate::db::{Repository, Store};
use crate::errors::CompetitionResult;
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::{CompetitionTree, LeagueValidator};
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;
use crate::models::league::{SubLeague, SubLeagueListQuery, SubLeagueRequest, SubLeagueTeamsRequest};

// GET /api/sub-leagues?league_id=
pub async fn get_sub_leagues(store: web::Data<dyn Store>, query: web::Query<SubLeagueListQuery>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let sub_leagues = repo.list_sub_leagues(query.league_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Sub-leagues retrieved", sub_leagues)))
}

// GET /api/sub-leagues/{id}
pub async fn get_sub_league_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let sub_league = require_record(repo.get_sub_league(id).await?, EntityKind::SubLeague, "id", id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Sub-league retrieved", sub_league)))
}

// POST /api/sub-leagues
pub async fn create_sub_league(store: web::Data<dyn Store>, body: web::Json<SubLeagueRequest>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let sub_league = build_sub_league(repo.as_mut(), &body, None).await?;
    repo.upsert_sub_league(&sub_league).await?;
    repo.commit().await?;

    tracing::info!(
        "Created sub-league '{}' ({}) in league {}, parent {:?}",
        sub_league.name,
        sub_league.id,
        sub_league.league_id,
        sub_league.parent_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success("Sub-league created successfully", sub_league)))
}

// PUT /api/sub-leagues/{id} - Re-parenting is checked against the whole forest
pub async fn update_sub_league(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<SubLeagueRequest>,
) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let existing = require_record(repo.get_sub_league(id).await?, EntityKind::SubLeague, "id", id)?;
    let sub_league = build_sub_league(repo.as_mut(), &body, Some(&existing)).await?;

    let mut tree = CompetitionTree::load(repo.as_mut()).await?;
    if let Err(e) = tree.set_parent(id, sub_league.parent_id) {
        tracing::warn!("Rejected parent {:?} for sub-league {}: {}", sub_league.parent_id, id, e);
        return Err(e);
    }

    repo.upsert_sub_league(&sub_league).await?;
    repo.commit().await?;

    tracing::info!("Updated sub-league {}", sub_league.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Sub-league updated successfully", sub_league)))
}

// DELETE /api/sub-leagues/{id}
pub async fn delete_sub_league(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    delete_guarded(store, EntityKind::SubLeague, path.into_inner()).await
}

// GET /api/sub-leagues/{id}/teams - Teams that are direct members
pub async fn get_sub_league_teams(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    require_record(repo.get_sub_league(id).await?, EntityKind::SubLeague, "id", id)?;

    let mut teams = Vec::new();
    for team_id in repo.list_sub_league_team_ids(id).await? {
        if let Some(team) = repo.get_team(team_id).await? {
            teams.push(team);
        }
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success("Sub-league teams retrieved", teams)))
}

// PUT /api/sub-leagues/{id}/teams - Replace the membership set
pub async fn set_sub_league_teams(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<SubLeagueTeamsRequest>,
) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    require_record(repo.get_sub_league(id).await?, EntityKind::SubLeague, "id", id)?;

    let mut team_ids: Vec<Uuid> = Vec::with_capacity(body.team_ids.len());
    for team_id in &body.team_ids {
        require_record(repo.get_team(*team_id).await?, EntityKind::Team, "team_ids", *team_id)?;
        if !team_ids.contains(team_id) {
            team_ids.push(*team_id);
        }
    }

    repo.replace_sub_league_teams(id, &team_ids).await?;
    repo.commit().await?;

    tracing::info!("Sub-league {} now has {} teams", id, team_ids.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Sub-league teams updated successfully",
        json!({ "sub_league_id": id, "team_ids": team_ids }),
    )))
}

// GET /api/sub-leagues/{id}/descendants
pub async fn get_sub_league_descendants(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    require_record(repo.get_sub_league(id).await?, EntityKind::SubLeague, "id", id)?;

    let tree = CompetitionTree::load(repo.as_mut()).await?;
    let mut descendants: Vec<Uuid> = tree.descendant_ids(id).into_iter().collect();
    descendants.sort();
    Ok(HttpResponse::Ok().json(ApiResponse::success("Sub-league descendants retrieved", descendants)))
}

// GET /api/sub-leagues/{id}/match-system - The sub-league's own system; nothing is inherited
pub async fn get_sub_league_match_system(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let sub_league = require_record(repo.get_sub_league(id).await?, EntityKind::SubLeague, "id", id)?;

    let system = match sub_league.match_system_id {
        Some(system_id) => Some(require_match_system(repo.as_mut(), "match_system_id", system_id).await?),
        None => None,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success("Sub-league match system retrieved", system)))
}

async fn build_sub_league(
    repo: &mut dyn Repository,
    request: &SubLeagueRequest,
    existing: Option<&SubLeague>,
) -> CompetitionResult<SubLeague> {
    let name = LeagueValidator::new().validate_name("Sub-league name", &request.name)?;

    require_record(
        repo.get_league(request.league_id).await?,
        EntityKind::League,
        "league_id",
        request.league_id,
    )?;
    if let Some(parent_id) = request.parent_id {
        require_record(
            repo.get_sub_league(parent_id).await?,
            EntityKind::SubLeague,
            "parent_id",
            parent_id,
        )?;
    }
    require_optional_match_system(repo, "match_system_id", request.match_system_id).await?;

    let now = Utc::now();
    Ok(SubLeague {
        id: existing.map_or_else(Uuid::new_v4, |e| e.id),
        name,
        league_id: request.league_id,
        parent_id: request.parent_id,
        match_system_id: request.match_system_id,
        created_at: existing.map_or(now, |e| e.created_at),
        updated_at: now,
    })
}
