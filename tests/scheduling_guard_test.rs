use uuid::Uuid;

use pingpong_league_backend::db::{InMemoryStore, Store};
use pingpong_league_backend::errors::CompetitionError;
use pingpong_league_backend::league::{SchedulingGuard, WriteMode};
use pingpong_league_backend::models::entity::EntityKind;
use pingpong_league_backend::models::league::{LookupKind, StageRequest, StageScope};
use pingpong_league_backend::models::matches::{MatchRequest, MatchStatus};

mod common;
use common::fixtures::{
    insert_league, insert_lookup, insert_match, insert_round, insert_stage, insert_sub_league, insert_team,
    match_request,
};

fn stage_request(league_id: Option<Uuid>, sub_league_id: Option<Uuid>) -> StageRequest {
    StageRequest {
        name: "Rückrunde".to_string(),
        order: 2,
        league_id,
        sub_league_id,
        start_date: chrono::Utc::now(),
        end_date: chrono::Utc::now() + chrono::Duration::days(60),
    }
}

#[test]
fn stage_scope_requires_exactly_one_owner() {
    let id = Uuid::new_v4();
    assert_eq!(StageScope::League(id), SchedulingGuard::stage_scope(Some(id), None).unwrap());
    assert_eq!(StageScope::SubLeague(id), SchedulingGuard::stage_scope(None, Some(id)).unwrap());
    assert!(matches!(
        SchedulingGuard::stage_scope(Some(id), Some(Uuid::new_v4())),
        Err(CompetitionError::Validation(_))
    ));
    assert!(matches!(SchedulingGuard::stage_scope(None, None), Err(CompetitionError::Validation(_))));
}

#[tokio::test]
async fn check_stage_reports_missing_owner_by_field() {
    let store = InMemoryStore::new();
    let mut repo = store.begin().await.unwrap();
    let missing = Uuid::new_v4();

    let result = SchedulingGuard::new(repo.as_mut())
        .check_stage(&stage_request(None, Some(missing)))
        .await;
    match result {
        Err(CompetitionError::NotFound { entity, field, id }) => {
            assert_eq!(EntityKind::SubLeague, entity);
            assert_eq!("sub_league_id", field);
            assert_eq!(missing, id);
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }

    let league_id = insert_league(repo.as_mut()).await;
    let scope = SchedulingGuard::new(repo.as_mut())
        .check_stage(&stage_request(Some(league_id), None))
        .await
        .expect("Existing league rejected");
    assert_eq!(StageScope::League(league_id), scope);
}

#[tokio::test]
async fn check_stage_rejects_inverted_dates_and_negative_order() {
    let store = InMemoryStore::new();
    let mut repo = store.begin().await.unwrap();
    let league_id = insert_league(repo.as_mut()).await;

    let mut inverted = stage_request(Some(league_id), None);
    std::mem::swap(&mut inverted.start_date, &mut inverted.end_date);
    assert!(SchedulingGuard::new(repo.as_mut()).check_stage(&inverted).await.is_err());

    let mut negative = stage_request(Some(league_id), None);
    negative.order = -1;
    assert!(SchedulingGuard::new(repo.as_mut()).check_stage(&negative).await.is_err());
}

#[tokio::test]
async fn check_match_names_each_missing_reference() {
    let store = InMemoryStore::new();
    let mut repo = store.begin().await.unwrap();
    let league_id = insert_league(repo.as_mut()).await;
    let stage_id = insert_stage(repo.as_mut(), StageScope::League(league_id)).await;
    let home = insert_team(repo.as_mut(), Some(league_id), vec![]).await;
    let away = insert_team(repo.as_mut(), Some(league_id), vec![]).await;

    let cases: [(&str, fn(&mut MatchRequest)); 6] = [
        ("stage_id", |r| r.stage_id = Uuid::new_v4()),
        ("round_id", |r| r.round_id = Some(Uuid::new_v4())),
        ("home_team_id", |r| r.home_team_id = Uuid::new_v4()),
        ("away_team_id", |r| r.away_team_id = Uuid::new_v4()),
        ("match_system_id", |r| r.match_system_id = Some(Uuid::new_v4())),
        ("playground_id", |r| r.playground_id = Some(Uuid::new_v4())),
    ];

    for (expected_field, mutate) in cases {
        let mut request = match_request(stage_id, home.id, away.id);
        mutate(&mut request);
        match SchedulingGuard::new(repo.as_mut()).check_match(&request, WriteMode::Create).await {
            Err(CompetitionError::NotFound { field, .. }) => assert_eq!(expected_field, field),
            other => panic!("Expected NotFound for {}, got {:?}", expected_field, other),
        }
    }
}

#[tokio::test]
async fn check_match_rejects_round_of_another_stage() {
    let store = InMemoryStore::new();
    let mut repo = store.begin().await.unwrap();
    let league_id = insert_league(repo.as_mut()).await;
    let stage_id = insert_stage(repo.as_mut(), StageScope::League(league_id)).await;
    let other_stage_id = insert_stage(repo.as_mut(), StageScope::League(league_id)).await;
    let foreign_round = insert_round(repo.as_mut(), other_stage_id).await;
    let home = insert_team(repo.as_mut(), Some(league_id), vec![]).await;
    let away = insert_team(repo.as_mut(), Some(league_id), vec![]).await;

    let mut request = match_request(stage_id, home.id, away.id);
    request.round_id = Some(foreign_round);
    let result = SchedulingGuard::new(repo.as_mut()).check_match(&request, WriteMode::Create).await;
    assert!(matches!(result, Err(CompetitionError::Validation(_))));

    request.round_id = Some(insert_round(repo.as_mut(), stage_id).await);
    SchedulingGuard::new(repo.as_mut())
        .check_match(&request, WriteMode::Create)
        .await
        .expect("Round of the same stage rejected");
}

#[tokio::test]
async fn check_match_rejects_same_team_on_both_sides() {
    let store = InMemoryStore::new();
    let mut repo = store.begin().await.unwrap();
    let league_id = insert_league(repo.as_mut()).await;
    let stage_id = insert_stage(repo.as_mut(), StageScope::League(league_id)).await;
    let team = insert_team(repo.as_mut(), Some(league_id), vec![]).await;

    match SchedulingGuard::new(repo.as_mut())
        .check_match(&match_request(stage_id, team.id, team.id), WriteMode::Create)
        .await
    {
        Err(CompetitionError::Validation(message)) => assert!(message.starts_with("same team")),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn eligibility_applies_on_create_but_not_on_update() {
    let store = InMemoryStore::new();
    let mut repo = store.begin().await.unwrap();
    let league_id = insert_league(repo.as_mut()).await;
    let parent = insert_sub_league(repo.as_mut(), league_id, None).await;
    let child = insert_sub_league(repo.as_mut(), league_id, Some(parent)).await;
    let stage_id = insert_stage(repo.as_mut(), StageScope::SubLeague(child)).await;

    let member = insert_team(repo.as_mut(), None, vec![child]).await;
    let parent_only = insert_team(repo.as_mut(), None, vec![parent]).await;
    let request = match_request(stage_id, member.id, parent_only.id);

    match SchedulingGuard::new(repo.as_mut()).check_match(&request, WriteMode::Create).await {
        Err(CompetitionError::Validation(message)) => assert!(message.starts_with("away team not eligible")),
        other => panic!("Expected eligibility failure, got {:?}", other),
    }

    SchedulingGuard::new(repo.as_mut())
        .check_match(&request, WriteMode::Update)
        .await
        .expect("Updates do not re-check eligibility");
}

#[tokio::test]
async fn any_status_and_scores_are_accepted() {
    let store = InMemoryStore::new();
    let mut repo = store.begin().await.unwrap();
    let league_id = insert_league(repo.as_mut()).await;
    let stage_id = insert_stage(repo.as_mut(), StageScope::League(league_id)).await;
    let home = insert_team(repo.as_mut(), Some(league_id), vec![]).await;
    let away = insert_team(repo.as_mut(), Some(league_id), vec![]).await;
    let playground = insert_lookup(repo.as_mut(), LookupKind::Playground).await;

    let mut request = match_request(stage_id, home.id, away.id);
    request.playground_id = Some(playground);
    insert_match(repo.as_mut(), &request).await;

    for status in [MatchStatus::Completed, MatchStatus::Scheduled, MatchStatus::Cancelled] {
        request.status = status;
        request.home_score = Some(9);
        request.away_score = Some(0);
        SchedulingGuard::new(repo.as_mut())
            .check_match(&request, WriteMode::Update)
            .await
            .expect("Status is a free label");
    }

    request.home_score = Some(-1);
    assert!(SchedulingGuard::new(repo.as_mut())
        .check_match(&request, WriteMode::Update)
        .await
        .is_err());
}
