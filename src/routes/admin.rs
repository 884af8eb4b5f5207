use actix_web::web;

use crate::db::Store;
use crate::handlers::admin::{
    league_handler,
    lookup_handler,
    match_handler,
    match_system_handler,
    round_handler,
    season_handler,
    stage_handler,
    sub_league_handler,
    team_handler,
};
use crate::models::league::{LookupKind, LookupRequest};

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Season management routes
            .service(
                web::resource("/seasons")
                    .route(web::get().to(season_handler::get_seasons))
                    .route(web::post().to(season_handler::create_season))
            )
            .service(
                web::resource("/seasons/{id}")
                    .route(web::get().to(season_handler::get_season_by_id))
                    .route(web::put().to(season_handler::update_season))
                    .route(web::delete().to(season_handler::delete_season))
            )

            // Reference data routes
            .configure(|cfg| lookup_routes(cfg, "/genders", LookupKind::Gender))
            .configure(|cfg| lookup_routes(cfg, "/league-types", LookupKind::LeagueType))
            .configure(|cfg| lookup_routes(cfg, "/clubs", LookupKind::Club))
            .configure(|cfg| lookup_routes(cfg, "/playgrounds", LookupKind::Playground))
            .configure(|cfg| lookup_routes(cfg, "/positions", LookupKind::Position))

            // League management routes
            .service(
                web::resource("/leagues")
                    .route(web::get().to(league_handler::get_leagues))
                    .route(web::post().to(league_handler::create_league))
            )
            .service(
                web::resource("/leagues/{id}")
                    .route(web::get().to(league_handler::get_league_by_id))
                    .route(web::put().to(league_handler::update_league))
                    .route(web::delete().to(league_handler::delete_league))
            )

            // Sub-league routes
            .service(
                web::resource("/sub-leagues")
                    .route(web::get().to(sub_league_handler::get_sub_leagues))
                    .route(web::post().to(sub_league_handler::create_sub_league))
            )
            .service(
                web::resource("/sub-leagues/{id}")
                    .route(web::get().to(sub_league_handler::get_sub_league_by_id))
                    .route(web::put().to(sub_league_handler::update_sub_league))
                    .route(web::delete().to(sub_league_handler::delete_sub_league))
            )
            .service(
                web::resource("/sub-leagues/{id}/teams")
                    .route(web::get().to(sub_league_handler::get_sub_league_teams))
                    .route(web::put().to(sub_league_handler::set_sub_league_teams))
            )
            .service(
                web::resource("/sub-leagues/{id}/descendants")
                    .route(web::get().to(sub_league_handler::get_sub_league_descendants))
            )
            .service(
                web::resource("/sub-leagues/{id}/match-system")
                    .route(web::get().to(sub_league_handler::get_sub_league_match_system))
            )

            // Stage and round routes
            .service(
                web::resource("/stages")
                    .route(web::get().to(stage_handler::get_stages))
                    .route(web::post().to(stage_handler::create_stage))
            )
            .service(
                web::resource("/stages/{id}")
                    .route(web::get().to(stage_handler::get_stage_by_id))
                    .route(web::put().to(stage_handler::update_stage))
                    .route(web::delete().to(stage_handler::delete_stage))
            )
            .service(
                web::resource("/stages/{id}/rounds")
                    .route(web::get().to(round_handler::get_stage_rounds))
            )
            .service(
                web::resource("/rounds")
                    .route(web::post().to(round_handler::create_round))
            )
            .service(
                web::resource("/rounds/{id}")
                    .route(web::get().to(round_handler::get_round_by_id))
                    .route(web::put().to(round_handler::update_round))
                    .route(web::delete().to(round_handler::delete_round))
            )

            // Team management routes
            .service(
                web::resource("/teams")
                    .route(web::get().to(team_handler::get_teams))
                    .route(web::post().to(team_handler::create_team))
            )
            .service(
                web::resource("/teams/{id}")
                    .route(web::get().to(team_handler::get_team_by_id))
                    .route(web::put().to(team_handler::update_team))
                    .route(web::delete().to(team_handler::delete_team))
            )

            // Match system routes
            .service(
                web::resource("/match-systems")
                    .route(web::get().to(match_system_handler::get_match_systems))
                    .route(web::post().to(match_system_handler::create_match_system))
            )
            .service(
                web::resource("/match-systems/by-name/{name}")
                    .route(web::get().to(match_system_handler::get_match_system_by_name))
            )
            .service(
                web::resource("/match-systems/{id}")
                    .route(web::get().to(match_system_handler::get_match_system_by_id))
                    .route(web::put().to(match_system_handler::update_match_system))
                    .route(web::delete().to(match_system_handler::delete_match_system))
            )

            // Match routes
            .service(
                web::resource("/matches")
                    .route(web::get().to(match_handler::get_matches))
                    .route(web::post().to(match_handler::create_match))
            )
            .service(
                web::resource("/matches/{id}")
                    .route(web::get().to(match_handler::get_match_by_id))
                    .route(web::put().to(match_handler::update_match))
                    .route(web::delete().to(match_handler::delete_match))
            )
    );
}

fn lookup_routes(cfg: &mut web::ServiceConfig, path: &str, kind: LookupKind) {
    cfg.service(
        web::resource(path)
            .route(web::get().to(move |store: web::Data<dyn Store>| lookup_handler::get_lookups(store, kind)))
            .route(web::post().to(move |store: web::Data<dyn Store>, body: web::Json<LookupRequest>| {
                lookup_handler::create_lookup(store, body, kind)
            }))
    )
    .service(
        web::resource(format!("{}/{{id}}", path))
            .route(web::get().to(move |store: web::Data<dyn Store>, id: web::Path<uuid::Uuid>| {
                lookup_handler::get_lookup_by_id(store, id, kind)
            }))
            .route(web::put().to(
                move |store: web::Data<dyn Store>, id: web::Path<uuid::Uuid>, body: web::Json<LookupRequest>| {
                    lookup_handler::update_lookup(store, id, body, kind)
                },
            ))
            .route(web::delete().to(move |store: web::Data<dyn Store>, id: web::Path<uuid::Uuid>| {
                lookup_handler::delete_lookup(store, id, kind)
            }))
    );
}
