use reqwest::{Client, Method, Response};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::utils::TestApp;

/// Send a JSON request to the admin API.
pub async fn make_request(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> Response {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.expect("Failed to execute request.")
}

/// POST and return the `data` of a 201 response.
pub async fn create_entity(client: &Client, app: &TestApp, path: &str, body: Value) -> Value {
    let response = make_request(client, Method::POST, &app.api(path), Some(body.clone())).await;
    let status = response.status().as_u16();
    let payload: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(201, status, "POST {} with {} failed: {}", path, body, payload);
    payload["data"].clone()
}

pub fn id_of(entity: &Value) -> Uuid {
    entity["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("Entity without id")
}

pub async fn create_season(client: &Client, app: &TestApp) -> Uuid {
    let season = create_entity(client, app, "/seasons", json!({
        "name": format!("Season {}", Uuid::new_v4()),
        "start_date": "2026-09-01T00:00:00Z",
        "end_date": "2027-05-31T23:59:59Z",
        "is_active": true
    })).await;
    id_of(&season)
}

pub async fn create_lookup(client: &Client, app: &TestApp, path: &str, name: &str) -> Uuid {
    let record = create_entity(client, app, path, json!({ "name": name })).await;
    id_of(&record)
}

/// Season, gender and league type the league hangs off.
pub async fn create_league(client: &Client, app: &TestApp, name: &str) -> Uuid {
    let season_id = create_season(client, app).await;
    let gender_id = create_lookup(client, app, "/genders", "Mixed").await;
    let league_type_id = create_lookup(client, app, "/league-types", "Regional").await;

    let league = create_entity(client, app, "/leagues", json!({
        "name": name,
        "season_id": season_id,
        "gender_id": gender_id,
        "league_type_id": league_type_id
    })).await;
    id_of(&league)
}

pub async fn create_sub_league(
    client: &Client,
    app: &TestApp,
    league_id: Uuid,
    name: &str,
    parent_id: Option<Uuid>,
) -> Uuid {
    let sub_league = create_entity(client, app, "/sub-leagues", json!({
        "name": name,
        "league_id": league_id,
        "parent_id": parent_id
    })).await;
    id_of(&sub_league)
}

pub async fn create_team(
    client: &Client,
    app: &TestApp,
    name: &str,
    league_id: Option<Uuid>,
    sub_league_ids: &[Uuid],
) -> Uuid {
    let club_id = create_lookup(client, app, "/clubs", &format!("{} Club", name)).await;
    let team = create_entity(client, app, "/teams", json!({
        "name": name,
        "club_id": club_id,
        "league_id": league_id,
        "sub_league_ids": sub_league_ids
    })).await;
    id_of(&team)
}

pub fn stage_body(name: &str, league_id: Option<Uuid>, sub_league_id: Option<Uuid>) -> Value {
    json!({
        "name": name,
        "order": 1,
        "league_id": league_id,
        "sub_league_id": sub_league_id,
        "start_date": "2026-10-01T00:00:00Z",
        "end_date": "2026-12-20T00:00:00Z"
    })
}

pub fn match_body(stage_id: Uuid, home_team_id: Uuid, away_team_id: Uuid) -> Value {
    json!({
        "stage_id": stage_id,
        "home_team_id": home_team_id,
        "away_team_id": away_team_id,
        "match_date": "2026-10-17T19:30:00Z"
    })
}

pub async fn error_message(response: Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse error body");
    body["error"].as_str().unwrap_or_default().to_string()
}
