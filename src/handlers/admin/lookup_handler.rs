//! CRUD for the flat reference tables: genders, league types, clubs,
//! playgrounds and positions. The kind is bound when the routes are built.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::db::helpers::require_lookup;
use crate::db::Store;
use crate::handlers::admin::{delete_guarded, HandlerResult};
use crate::league::LeagueValidator;
use crate::models::common::ApiResponse;
use crate::models::league::{Lookup, LookupKind, LookupRequest};

pub async fn get_lookups(store: web::Data<dyn Store>, kind: LookupKind) -> HandlerResult {
    let mut repo = store.begin().await?;
    let records = repo.list_lookups(kind).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("{} records retrieved", kind.entity()),
        records,
    )))
}

pub async fn get_lookup_by_id(store: web::Data<dyn Store>, path: web::Path<Uuid>, kind: LookupKind) -> HandlerResult {
    let id = path.into_inner();
    let mut repo = store.begin().await?;
    let record = require_lookup(repo.as_mut(), kind, "id", id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{} retrieved", kind.entity()), record)))
}

pub async fn create_lookup(
    store: web::Data<dyn Store>,
    body: web::Json<LookupRequest>,
    kind: LookupKind,
) -> HandlerResult {
    let name = LeagueValidator::new().validate_name(&format!("{} name", kind.entity()), &body.name)?;
    let now = Utc::now();
    let record = Lookup {
        id: Uuid::new_v4(),
        kind,
        name,
        description: body.description.clone(),
        created_at: now,
        updated_at: now,
    };

    let mut repo = store.begin().await?;
    repo.upsert_lookup(&record).await?;
    repo.commit().await?;

    tracing::info!("Created {} '{}' ({})", kind.entity(), record.name, record.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        format!("{} created successfully", kind.entity()),
        record,
    )))
}

pub async fn update_lookup(
    store: web::Data<dyn Store>,
    path: web::Path<Uuid>,
    body: web::Json<LookupRequest>,
    kind: LookupKind,
) -> HandlerResult {
    let id = path.into_inner();
    let name = LeagueValidator::new().validate_name(&format!("{} name", kind.entity()), &body.name)?;

    let mut repo = store.begin().await?;
    let mut record = require_lookup(repo.as_mut(), kind, "id", id).await?;
    record.name = name;
    record.description = body.description.clone();
    record.updated_at = Utc::now();
    repo.upsert_lookup(&record).await?;
    repo.commit().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("{} updated successfully", kind.entity()),
        record,
    )))
}

pub async fn delete_lookup(store: web::Data<dyn Store>, path: web::Path<Uuid>, kind: LookupKind) -> HandlerResult {
    delete_guarded(store, kind.entity(), path.into_inner()).await
}
