use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::db::helpers::require_match_system;
use crate::db::Store;
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::MatchSystemCatalog;
use crate::models::common::ApiResponse;
use crate::models::entity::EntityKind;
use crate::models::match_system::MatchSystemRequest;

// GET /api/match-systems
pub async fn get_match_systems(store: web::Data<dyn Store>) -> HandlerResult {
    let mut repo = store.begin().await?;
    let systems = repo.list_match_systems().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match systems retrieved", systems)))
}

// GET /api/match-systems/{id}
pub async fn get_match_system_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let system = require_match_system(repo.as_mut(), "id", id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match system retrieved", system)))
}

// GET /api/match-systems/by-name/{name}
pub async fn get_match_system_by_name(store: web::Data<dyn Store>, path: web::Path<String>) -> HandlerResult {
    let name = path.into_inner();
    let mut repo = store.begin().await?;
    match MatchSystemCatalog::new().find_by_name(repo.as_mut(), name.trim()).await? {
        Some(system) => Ok(HttpResponse::Ok().json(ApiResponse::success("Match system retrieved", system))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Match system not found (name = {})", name)
        }))),
    }
}

// POST /api/match-systems
pub async fn create_match_system(store: web::Data<dyn Store>, body: web::Json<MatchSystemRequest>) -> HandlerResult {
    let catalog = MatchSystemCatalog::new();
    let system = catalog.build(&body, None).map_err(|e| {
        tracing::warn!("Rejected match system '{}': {}", body.name, e);
        e
    })?;

    let mut repo = store.begin().await?;
    catalog.save(repo.as_mut(), &system).await?;
    repo.commit().await?;

    tracing::info!(
        "Created match system '{}' ({}): {} singles, {} doubles",
        system.name,
        system.id,
        system.singles_count,
        system.doubles_count
    );
    Ok(HttpResponse::Created().json(ApiResponse::success("Match system created successfully", system)))
}

// PUT /api/match-systems/{id}
pub async fn update_match_system(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<MatchSystemRequest>,
) -> HandlerResult {
    let id = path.into_inner();
    let catalog = MatchSystemCatalog::new();

    let mut repo = store.begin().await?;
    let existing = require_match_system(repo.as_mut(), "id", id).await?;
    let system = catalog.build(&body, Some(&existing)).map_err(|e| {
        tracing::warn!("Rejected update of match system {}: {}", id, e);
        e
    })?;
    catalog.save(repo.as_mut(), &system).await?;
    repo.commit().await?;

    tracing::info!("Updated match system {}", system.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Match system updated successfully", system)))
}

// DELETE /api/match-systems/{id}
pub async fn delete_match_system(store: web::Data<dyn Store>, path: web::Path<Uuid>) -> HandlerResult {
    delete_guarded(store, EntityKind::MatchSystem, path.into_inner()).await
}
