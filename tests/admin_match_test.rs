use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::utils::spawn_app;
use common::admin_helpers::{
    create_entity, create_league, create_lookup, create_sub_league, create_team, error_message, id_of,
    make_request, match_body, stage_body,
};

#[tokio::test]
async fn team_from_another_league_is_not_eligible() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let l1 = create_league(&client, &test_app, "League One").await;
    let l2 = create_league(&client, &test_app, "League Two").await;
    let t = create_team(&client, &test_app, "T", Some(l1), &[]).await;
    let t2 = create_team(&client, &test_app, "T2", Some(l2), &[]).await;
    let t3 = create_team(&client, &test_app, "T3", Some(l1), &[]).await;
    let stage = create_entity(&client, &test_app, "/stages", stage_body("Stage S", Some(l1), None)).await;
    let stage_id = id_of(&stage);

    // Act
    let rejected = make_request(
        &client,
        Method::POST,
        &test_app.api("/matches"),
        Some(match_body(stage_id, t, t2)),
    ).await;

    // Assert
    assert_eq!(400, rejected.status().as_u16());
    let message = error_message(rejected).await;
    assert!(message.contains("away team not eligible"), "{}", message);

    let accepted = make_request(
        &client,
        Method::POST,
        &test_app.api("/matches"),
        Some(match_body(stage_id, t, t3)),
    ).await;
    assert_eq!(201, accepted.status().as_u16());
    let body: Value = accepted.json().await.unwrap();
    assert_eq!("SCHEDULED", body["data"]["status"]);
}

#[tokio::test]
async fn home_team_ineligibility_is_named() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let l1 = create_league(&client, &test_app, "League One").await;
    let outsider = create_team(&client, &test_app, "Outsider", None, &[]).await;
    let insider = create_team(&client, &test_app, "Insider", Some(l1), &[]).await;
    let stage = create_entity(&client, &test_app, "/stages", stage_body("Stage", Some(l1), None)).await;

    let response = make_request(
        &client,
        Method::POST,
        &test_app.api("/matches"),
        Some(match_body(id_of(&stage), outsider, insider)),
    ).await;

    assert_eq!(400, response.status().as_u16());
    assert!(error_message(response).await.contains("home team not eligible"));
}

#[tokio::test]
async fn sub_league_stage_requires_direct_membership() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let league_id = create_league(&client, &test_app, "Regional").await;
    let parent = create_sub_league(&client, &test_app, league_id, "Parent", None).await;
    let child = create_sub_league(&client, &test_app, league_id, "Child", Some(parent)).await;
    let member = create_team(&client, &test_app, "Member", None, &[child]).await;
    let parent_member = create_team(&client, &test_app, "Parent Member", None, &[parent]).await;
    let other_member = create_team(&client, &test_app, "Other Member", None, &[child]).await;
    let stage = create_entity(&client, &test_app, "/stages", stage_body("Group stage", None, Some(child))).await;

    let response = make_request(
        &client,
        Method::POST,
        &test_app.api("/matches"),
        Some(match_body(id_of(&stage), member, parent_member)),
    ).await;
    assert_eq!(400, response.status().as_u16());

    let response = make_request(
        &client,
        Method::POST,
        &test_app.api("/matches"),
        Some(match_body(id_of(&stage), member, other_member)),
    ).await;
    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn same_team_on_both_sides_is_rejected() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let l1 = create_league(&client, &test_app, "League").await;
    let t = create_team(&client, &test_app, "Solo", Some(l1), &[]).await;
    let stage = create_entity(&client, &test_app, "/stages", stage_body("Stage", Some(l1), None)).await;

    let response = make_request(
        &client,
        Method::POST,
        &test_app.api("/matches"),
        Some(match_body(id_of(&stage), t, t)),
    ).await;

    assert_eq!(400, response.status().as_u16());
    assert!(error_message(response).await.starts_with("same team"));
}

#[tokio::test]
async fn missing_references_are_not_found() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let l1 = create_league(&client, &test_app, "League").await;
    let home = create_team(&client, &test_app, "Home", Some(l1), &[]).await;
    let away = create_team(&client, &test_app, "Away", Some(l1), &[]).await;

    let response = make_request(
        &client,
        Method::POST,
        &test_app.api("/matches"),
        Some(match_body(Uuid::new_v4(), home, away)),
    ).await;
    assert_eq!(404, response.status().as_u16());
    assert!(error_message(response).await.contains("stage_id"));

    let stage = create_entity(&client, &test_app, "/stages", stage_body("Stage", Some(l1), None)).await;
    let mut body = match_body(id_of(&stage), home, away);
    body["playground_id"] = json!(Uuid::new_v4());
    let response = make_request(&client, Method::POST, &test_app.api("/matches"), Some(body)).await;
    assert_eq!(404, response.status().as_u16());
    assert!(error_message(response).await.contains("playground_id"));
}

#[tokio::test]
async fn result_update_accepts_any_status_and_skips_eligibility() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let l1 = create_league(&client, &test_app, "League").await;
    let home = create_team(&client, &test_app, "Home", Some(l1), &[]).await;
    let away = create_team(&client, &test_app, "Away", Some(l1), &[]).await;
    let playground = create_lookup(&client, &test_app, "/playgrounds", "Sporthalle Mitte").await;
    let stage = create_entity(&client, &test_app, "/stages", stage_body("Stage", Some(l1), None)).await;
    let mut body = match_body(id_of(&stage), home, away);
    body["playground_id"] = json!(playground);
    let fixture = create_entity(&client, &test_app, "/matches", body.clone()).await;
    let url = test_app.api(&format!("/matches/{}", id_of(&fixture)));

    // The away team leaves the league after the match was scheduled
    let club_id = create_lookup(&client, &test_app, "/clubs", "New Club").await;
    let response = make_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/teams/{}", away)),
        Some(json!({ "name": "Away", "club_id": club_id })),
    ).await;
    assert_eq!(200, response.status().as_u16());

    body["status"] = json!("COMPLETED");
    body["home_score"] = json!(6);
    body["away_score"] = json!(4);
    let response = make_request(&client, Method::PUT, &url, Some(body.clone())).await;
    assert_eq!(200, response.status().as_u16());

    // Back to scheduled is allowed
    body["status"] = json!("SCHEDULED");
    let response = make_request(&client, Method::PUT, &url, Some(body.clone())).await;
    assert_eq!(200, response.status().as_u16());
    let updated: Value = response.json().await.unwrap();
    assert_eq!("SCHEDULED", updated["data"]["status"]);
    assert_eq!(6, updated["data"]["home_score"]);

    body["away_score"] = json!(-2);
    let response = make_request(&client, Method::PUT, &url, Some(body)).await;
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn team_with_matches_is_protected_until_match_deleted() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let l1 = create_league(&client, &test_app, "League").await;
    let home = create_team(&client, &test_app, "Home", Some(l1), &[]).await;
    let away = create_team(&client, &test_app, "Away", Some(l1), &[]).await;
    let stage = create_entity(&client, &test_app, "/stages", stage_body("Stage", Some(l1), None)).await;
    let fixture = create_entity(&client, &test_app, "/matches", match_body(id_of(&stage), home, away)).await;

    let team_url = test_app.api(&format!("/teams/{}", away));
    let response = make_request(&client, Method::DELETE, &team_url, None).await;
    assert_eq!(409, response.status().as_u16());
    assert!(error_message(response).await.contains("1 matches"));

    let response = make_request(
        &client,
        Method::DELETE,
        &test_app.api(&format!("/matches/{}", id_of(&fixture))),
        None,
    ).await;
    assert_eq!(200, response.status().as_u16());

    let response = make_request(&client, Method::DELETE, &team_url, None).await;
    assert_eq!(200, response.status().as_u16());
}
