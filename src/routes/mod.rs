use actix_web::{web, HttpResponse};

use crate::errors::CompetitionError;
use crate::handlers::backend_health_handler::backend_health_check;

pub mod admin;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Extractor failures use the same `{ "error": ... }` body as every other rejection.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        CompetitionError::validation(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        CompetitionError::validation(format!("Invalid path parameter: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        CompetitionError::validation(format!("Invalid query string: {}", err)).into()
    }));

    cfg.service(
        web::resource("/backend_health")
            .route(web::get().to(backend_health_check))
    );

    admin::init_admin_routes(cfg);

    cfg.default_service(web::to(|| async {
        HttpResponse::NotFound().json(serde_json::json!({ "error": "Resource not found" }))
    }));
}
