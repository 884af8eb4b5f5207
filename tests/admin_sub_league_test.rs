use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::utils::spawn_app;
use common::admin_helpers::{
    create_entity, create_league, create_sub_league, create_team, error_message, id_of, make_request,
};

#[tokio::test]
async fn reparenting_onto_own_descendant_is_rejected() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let league_id = create_league(&client, &test_app, "Bezirksliga").await;
    let a = create_sub_league(&client, &test_app, league_id, "Group A", None).await;
    let b = create_sub_league(&client, &test_app, league_id, "Group B", Some(a)).await;

    // Act
    let response = make_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/sub-leagues/{}", a)),
        Some(json!({ "name": "Group A", "league_id": league_id, "parent_id": b })),
    ).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let message = error_message(response).await;
    assert!(message.contains(&b.to_string()), "{}", message);

    let stored: Value = make_request(&client, Method::GET, &test_app.api(&format!("/sub-leagues/{}", a)), None)
        .await
        .json()
        .await
        .unwrap();
    assert!(stored["data"]["parent_id"].is_null());
}

#[tokio::test]
async fn sub_league_cannot_be_its_own_parent() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let league_id = create_league(&client, &test_app, "Kreisliga").await;
    let a = create_sub_league(&client, &test_app, league_id, "Group A", None).await;

    let response = make_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/sub-leagues/{}", a)),
        Some(json!({ "name": "Group A", "league_id": league_id, "parent_id": a })),
    ).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn valid_reparenting_is_accepted_and_descendants_follow() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let league_id = create_league(&client, &test_app, "Verbandsliga").await;
    let root = create_sub_league(&client, &test_app, league_id, "North", None).await;
    let other_root = create_sub_league(&client, &test_app, league_id, "South", None).await;
    let child = create_sub_league(&client, &test_app, league_id, "North 1", Some(root)).await;

    let response = make_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/sub-leagues/{}", child)),
        Some(json!({ "name": "North 1", "league_id": league_id, "parent_id": other_root })),
    ).await;
    assert_eq!(200, response.status().as_u16());

    let descendants: Value = make_request(
        &client,
        Method::GET,
        &test_app.api(&format!("/sub-leagues/{}/descendants", other_root)),
        None,
    ).await.json().await.unwrap();
    assert_eq!(json!([child]), descendants["data"]);

    let descendants: Value = make_request(
        &client,
        Method::GET,
        &test_app.api(&format!("/sub-leagues/{}/descendants", root)),
        None,
    ).await.json().await.unwrap();
    assert_eq!(json!([]), descendants["data"]);
}

#[tokio::test]
async fn unknown_parent_is_reported_by_field() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let league_id = create_league(&client, &test_app, "Oberliga").await;

    let response = make_request(
        &client,
        Method::POST,
        &test_app.api("/sub-leagues"),
        Some(json!({ "name": "Orphan", "league_id": league_id, "parent_id": Uuid::new_v4() })),
    ).await;

    assert_eq!(404, response.status().as_u16());
    assert!(error_message(response).await.contains("parent_id"));
}

#[tokio::test]
async fn membership_set_is_replaced_and_listed() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let league_id = create_league(&client, &test_app, "Landesliga").await;
    let group = create_sub_league(&client, &test_app, league_id, "Group 1", None).await;
    let t1 = create_team(&client, &test_app, "TTC Nord", Some(league_id), &[]).await;
    let t2 = create_team(&client, &test_app, "TSV Süd", Some(league_id), &[]).await;

    let response = make_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/sub-leagues/{}/teams", group)),
        Some(json!({ "team_ids": [t1, t2, t1] })),
    ).await;
    assert_eq!(200, response.status().as_u16());

    let response = make_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/sub-leagues/{}/teams", group)),
        Some(json!({ "team_ids": [t2] })),
    ).await;
    assert_eq!(200, response.status().as_u16());

    let members: Value = make_request(
        &client,
        Method::GET,
        &test_app.api(&format!("/sub-leagues/{}/teams", group)),
        None,
    ).await.json().await.unwrap();
    let members = members["data"].as_array().unwrap();
    assert_eq!(1, members.len());
    assert_eq!(t2, id_of(&members[0]));
    assert_eq!(json!([group]), members[0]["sub_league_ids"]);

    // Unknown team ids leave the membership untouched
    let response = make_request(
        &client,
        Method::PUT,
        &test_app.api(&format!("/sub-leagues/{}/teams", group)),
        Some(json!({ "team_ids": [t1, Uuid::new_v4()] })),
    ).await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn sub_league_match_system_is_not_inherited() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let system = create_entity(&client, &test_app, "/match-systems", json!({
        "name": "Two Singles",
        "total_matches": 2,
        "singles_count": 2,
        "doubles_count": 0,
        "match_order": ["S1", "S2"]
    })).await;
    let league_id = create_league(&client, &test_app, "Stadtliga").await;
    let parent = create_entity(&client, &test_app, "/sub-leagues", json!({
        "name": "Parent",
        "league_id": league_id,
        "match_system_id": id_of(&system)
    })).await;
    let child = create_sub_league(&client, &test_app, league_id, "Child", Some(id_of(&parent))).await;

    let own: Value = make_request(
        &client,
        Method::GET,
        &test_app.api(&format!("/sub-leagues/{}/match-system", id_of(&parent))),
        None,
    ).await.json().await.unwrap();
    assert_eq!("Two Singles", own["data"]["name"]);

    let inherited: Value = make_request(
        &client,
        Method::GET,
        &test_app.api(&format!("/sub-leagues/{}/match-system", child)),
        None,
    ).await.json().await.unwrap();
    assert!(inherited["data"].is_null());
}

#[tokio::test]
async fn sub_league_with_child_cannot_be_deleted() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let league_id = create_league(&client, &test_app, "Bezirksoberliga").await;
    let parent = create_sub_league(&client, &test_app, league_id, "Parent", None).await;
    let child = create_sub_league(&client, &test_app, league_id, "Child", Some(parent)).await;

    let url = test_app.api(&format!("/sub-leagues/{}", parent));
    let response = make_request(&client, Method::DELETE, &url, None).await;
    assert_eq!(409, response.status().as_u16());
    assert!(error_message(response).await.contains("child sub-leagues"));

    let response = make_request(&client, Method::DELETE, &test_app.api(&format!("/sub-leagues/{}", child)), None).await;
    assert_eq!(200, response.status().as_u16());
    let response = make_request(&client, Method::DELETE, &url, None).await;
    assert_eq!(200, response.status().as_u16());
}
