use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::db::helpers::{require_lookup, require_record};
use crate::db::{Repository, Store};
use crate::errors::CompetitionResult;
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::LeagueValidator;
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;
use crate::models::league::LookupKind;
use crate::models::team::{Team, TeamListQuery, TeamRequest};

// GET /api/teams?league_id= - Get all teams
pub async fn get_teams(store: web::Data<dyn Store>, query: web::Query<TeamListQuery>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let teams = repo.list_teams(query.league_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Teams retrieved", teams)))
}

// GET /api/teams/{id} - Get team by ID
pub async fn get_team_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let team_id = path.into_inner();
    let mut repo = store.begin().await?;
    let team = require_record(repo.get_team(team_id).await?, EntityKind::Team, "id", team_id)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Team retrieved", team)))
}

// POST /api/teams - Create team
pub async fn create_team(store: web::Data<dyn Store>, body: web::Json<TeamRequest>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let team = build_team(repo.as_mut(), &body, None).await?;
    repo.upsert_team(&team).await?;
    repo.commit().await?;

    tracing::info!("Created team '{}' ({}) for club {}", team.name, team.id, team.club_id);
    Ok(HttpResponse::Created().json(ApiResponse::success("Team created successfully", team)))
}

// PUT /api/teams/{id} - Update team, including its sub-league memberships
pub async fn update_team(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<TeamRequest>,
) -> HandlerResult {
    let team_id = path.into_inner();
    let mut repo = store.begin().await?;
    let existing = require_record(repo.get_team(team_id).await?, EntityKind::Team, "id", team_id)?;
    let team = build_team(repo.as_mut(), &body, Some(&existing)).await?;
    repo.upsert_team(&team).await?;
    repo.commit().await?;

    tracing::info!("Updated team {}", team.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Team updated successfully", team)))
}

// DELETE /api/teams/{id} - Blocked while matches or memberships reference it
pub async fn delete_team(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    delete_guarded(store, EntityKind::Team, path.into_inner()).await
}

async fn build_team(repo: &mut dyn Repository, request: &TeamRequest, existing: Option<&Team>) -> CompetitionResult<Team> {
    let name = LeagueValidator::new().validate_name("Team name", &request.name)?;

    require_lookup(repo, LookupKind::Club, "club_id", request.club_id).await?;
    if let Some(league_id) = request.league_id {
        require_record(repo.get_league(league_id).await?, EntityKind::League, "league_id", league_id)?;
    }

    let mut sub_league_ids = Vec::with_capacity(request.sub_league_ids.len());
    for sub_league_id in &request.sub_league_ids {
        require_record(
            repo.get_sub_league(*sub_league_id).await?,
            EntityKind::SubLeague,
            "sub_league_ids",
            *sub_league_id,
        )?;
        if !sub_league_ids.contains(sub_league_id) {
            sub_league_ids.push(*sub_league_id);
        }
    }

    let now = Utc::now();
    Ok(Team {
        id: existing.map_or_else(Uuid::new_v4, |e| e.id),
        name,
        club_id: request.club_id,
        league_id: request.league_id,
        sub_league_ids,
        created_at: existing.map_or(now, |e| e.created_at),
        updated_at: now,
    })
}
