//! Records written straight into a repository, bypassing the HTTP layer.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use pingpong_league_backend::db::Repository;
use pingpong_league_backend::models::league::{League, Lookup, LookupKind, Round, Season, Stage, StageScope, SubLeague};
use pingpong_league_backend::models::matches::{Match, MatchRequest, MatchStatus};
use pingpong_league_backend::models::team::Team;

pub async fn insert_lookup(repo: &mut dyn Repository, kind: LookupKind) -> Uuid {
    let now = Utc::now();
    let lookup = Lookup {
        id: Uuid::new_v4(),
        kind,
        name: format!("{:?}", kind),
        description: None,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_lookup(&lookup).await.expect("Failed to insert lookup");
    lookup.id
}

pub async fn insert_league(repo: &mut dyn Repository) -> Uuid {
    let now = Utc::now();
    let season = Season {
        id: Uuid::new_v4(),
        name: "2026/27".to_string(),
        start_date: Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2027, 5, 31, 0, 0, 0).unwrap(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_season(&season).await.expect("Failed to insert season");

    let league = League {
        id: Uuid::new_v4(),
        name: format!("League {}", Uuid::new_v4()),
        season_id: season.id,
        gender_id: insert_lookup(repo, LookupKind::Gender).await,
        league_type_id: insert_lookup(repo, LookupKind::LeagueType).await,
        match_system_id: None,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_league(&league).await.expect("Failed to insert league");
    league.id
}

pub async fn insert_sub_league(repo: &mut dyn Repository, league_id: Uuid, parent_id: Option<Uuid>) -> Uuid {
    let now = Utc::now();
    let sub_league = SubLeague {
        id: Uuid::new_v4(),
        name: "Group".to_string(),
        league_id,
        parent_id,
        match_system_id: None,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_sub_league(&sub_league).await.expect("Failed to insert sub-league");
    sub_league.id
}

pub async fn insert_team(repo: &mut dyn Repository, league_id: Option<Uuid>, sub_league_ids: Vec<Uuid>) -> Team {
    let now = Utc::now();
    let team = Team {
        id: Uuid::new_v4(),
        name: format!("Team {}", Uuid::new_v4()),
        club_id: insert_lookup(repo, LookupKind::Club).await,
        league_id,
        sub_league_ids,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_team(&team).await.expect("Failed to insert team");
    team
}

pub async fn insert_stage(repo: &mut dyn Repository, scope: StageScope) -> Uuid {
    let now = Utc::now();
    let stage = Stage {
        id: Uuid::new_v4(),
        name: "Hinrunde".to_string(),
        order: 1,
        scope,
        start_date: now,
        end_date: now,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_stage(&stage).await.expect("Failed to insert stage");
    stage.id
}

pub async fn insert_round(repo: &mut dyn Repository, stage_id: Uuid) -> Uuid {
    let now = Utc::now();
    let round = Round {
        id: Uuid::new_v4(),
        name: "Round 1".to_string(),
        order: 1,
        stage_id,
        start_date: now,
        end_date: now,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_round(&round).await.expect("Failed to insert round");
    round.id
}

pub fn match_request(stage_id: Uuid, home_team_id: Uuid, away_team_id: Uuid) -> MatchRequest {
    MatchRequest {
        stage_id,
        round_id: None,
        home_team_id,
        away_team_id,
        match_system_id: None,
        playground_id: None,
        match_date: Utc::now(),
        status: MatchStatus::Scheduled,
        home_score: None,
        away_score: None,
    }
}

pub async fn insert_match(repo: &mut dyn Repository, request: &MatchRequest) -> Uuid {
    let now = Utc::now();
    let fixture = Match {
        id: Uuid::new_v4(),
        stage_id: request.stage_id,
        round_id: request.round_id,
        home_team_id: request.home_team_id,
        away_team_id: request.away_team_id,
        match_system_id: request.match_system_id,
        playground_id: request.playground_id,
        match_date: request.match_date,
        status: request.status,
        home_score: request.home_score,
        away_score: request.away_score,
        created_at: now,
        updated_at: now,
    };
    repo.upsert_match(&fixture).await.expect("Failed to insert match");
    fixture.id
}
