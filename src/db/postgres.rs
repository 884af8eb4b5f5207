//! PostgreSQL store. Each unit of work is one `SERIALIZABLE` transaction.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::db::{ForeignKey, Repository, Store};
use crate::errors::{CompetitionError, CompetitionResult};
use crate::models::entity::EntityKind;
use crate::models::league::{League, Lookup, LookupKind, Round, Season, Stage, StageScope, SubLeague};
use crate::models::match_system::MatchSystem;
use crate::models::matches::Match;
use crate::models::team::Team;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the schema in `./migrations`.
    pub async fn migrate(&self) -> CompetitionResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> CompetitionResult<Box<dyn Repository>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;
        Ok(Box::new(PgRepository { tx: Some(tx) }))
    }
}

pub struct PgRepository {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgRepository {
    fn conn(&mut self) -> CompetitionResult<&mut PgConnection> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| CompetitionError::Internal("Unit of work already committed".into()))
    }
}

fn lookup_table(kind: LookupKind) -> &'static str {
    kind.entity().table()
}

fn season_from_row(row: &PgRow) -> Result<Season, sqlx::Error> {
    Ok(Season {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn lookup_from_row(kind: LookupKind, row: &PgRow) -> Result<Lookup, sqlx::Error> {
    Ok(Lookup {
        id: row.try_get("id")?,
        kind,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn league_from_row(row: &PgRow) -> Result<League, sqlx::Error> {
    Ok(League {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        season_id: row.try_get("season_id")?,
        gender_id: row.try_get("gender_id")?,
        league_type_id: row.try_get("league_type_id")?,
        match_system_id: row.try_get("match_system_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn sub_league_from_row(row: &PgRow) -> Result<SubLeague, sqlx::Error> {
    Ok(SubLeague {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        league_id: row.try_get("league_id")?,
        parent_id: row.try_get("parent_id")?,
        match_system_id: row.try_get("match_system_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn stage_from_row(row: &PgRow) -> CompetitionResult<Stage> {
    let league_id: Option<Uuid> = row.try_get("league_id")?;
    let sub_league_id: Option<Uuid> = row.try_get("sub_league_id")?;
    let scope = match (league_id, sub_league_id) {
        (Some(id), None) => StageScope::League(id),
        (None, Some(id)) => StageScope::SubLeague(id),
        _ => {
            return Err(CompetitionError::Internal(
                "Stage row violates the league/sub-league scope constraint".into(),
            ))
        }
    };
    Ok(Stage {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        order: row.try_get("sort_order")?,
        scope,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn round_from_row(row: &PgRow) -> Result<Round, sqlx::Error> {
    Ok(Round {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        order: row.try_get("sort_order")?,
        stage_id: row.try_get("stage_id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// Memberships are aggregated into `sub_league_ids` by the team queries.
fn team_from_row(row: &PgRow) -> Result<Team, sqlx::Error> {
    Ok(Team {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        club_id: row.try_get("club_id")?,
        league_id: row.try_get("league_id")?,
        sub_league_ids: row.try_get("sub_league_ids")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn match_system_from_row(row: &PgRow) -> CompetitionResult<MatchSystem> {
    let system_type: String = row.try_get("system_type")?;
    Ok(MatchSystem {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        system_type: system_type.parse().map_err(CompetitionError::Internal)?,
        total_matches: row.try_get("total_matches")?,
        singles_count: row.try_get("singles_count")?,
        doubles_count: row.try_get("doubles_count")?,
        match_order: row.try_get("match_order")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn match_from_row(row: &PgRow) -> CompetitionResult<Match> {
    let status: String = row.try_get("status")?;
    Ok(Match {
        id: row.try_get("id")?,
        stage_id: row.try_get("stage_id")?,
        round_id: row.try_get("round_id")?,
        home_team_id: row.try_get("home_team_id")?,
        away_team_id: row.try_get("away_team_id")?,
        match_system_id: row.try_get("match_system_id")?,
        playground_id: row.try_get("playground_id")?,
        match_date: row.try_get("match_date")?,
        status: status.parse().map_err(CompetitionError::Internal)?,
        home_score: row.try_get("home_score")?,
        away_score: row.try_get("away_score")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const TEAM_SELECT: &str = r#"
    SELECT
        t.id,
        t.name,
        t.club_id,
        t.league_id,
        t.created_at,
        t.updated_at,
        COALESCE(
            ARRAY_AGG(slt.sub_league_id ORDER BY slt.sub_league_id) FILTER (WHERE slt.sub_league_id IS NOT NULL),
            '{}'
        ) AS sub_league_ids
    FROM teams t
    LEFT JOIN sub_league_teams slt ON slt.team_id = t.id
"#;

#[async_trait]
impl Repository for PgRepository {
    async fn get_season(&mut self, id: Uuid) -> CompetitionResult<Option<Season>> {
        let row = sqlx::query("SELECT * FROM seasons WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(row.as_ref().map(season_from_row).transpose()?)
    }

    async fn list_seasons(&mut self) -> CompetitionResult<Vec<Season>> {
        let rows = sqlx::query("SELECT * FROM seasons ORDER BY created_at, id")
            .fetch_all(self.conn()?)
            .await?;
        Ok(rows.iter().map(season_from_row).collect::<Result<_, _>>()?)
    }

    async fn upsert_season(&mut self, season: &Season) -> CompetitionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO seasons (id, name, start_date, end_date, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                is_active = EXCLUDED.is_active,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(season.id)
        .bind(&season.name)
        .bind(season.start_date)
        .bind(season.end_date)
        .bind(season.is_active)
        .bind(season.created_at)
        .bind(season.updated_at)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn get_lookup(&mut self, kind: LookupKind, id: Uuid) -> CompetitionResult<Option<Lookup>> {
        let query = format!("SELECT * FROM {} WHERE id = $1", lookup_table(kind));
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(row.as_ref().map(|r| lookup_from_row(kind, r)).transpose()?)
    }

    async fn list_lookups(&mut self, kind: LookupKind) -> CompetitionResult<Vec<Lookup>> {
        let query = format!("SELECT * FROM {} ORDER BY created_at, id", lookup_table(kind));
        let rows = sqlx::query(&query).fetch_all(self.conn()?).await?;
        Ok(rows
            .iter()
            .map(|r| lookup_from_row(kind, r))
            .collect::<Result<_, _>>()?)
    }

    async fn upsert_lookup(&mut self, lookup: &Lookup) -> CompetitionResult<()> {
        let query = format!(
            r#"
            INSERT INTO {} (id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                updated_at = EXCLUDED.updated_at
            "#,
            lookup_table(lookup.kind)
        );
        sqlx::query(&query)
            .bind(lookup.id)
            .bind(&lookup.name)
            .bind(&lookup.description)
            .bind(lookup.created_at)
            .bind(lookup.updated_at)
            .execute(self.conn()?)
            .await?;
        Ok(())
    }

    async fn get_league(&mut self, id: Uuid) -> CompetitionResult<Option<League>> {
        let row = sqlx::query("SELECT * FROM leagues WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(row.as_ref().map(league_from_row).transpose()?)
    }

    async fn list_leagues(&mut self, season_id: Option<Uuid>) -> CompetitionResult<Vec<League>> {
        let rows = sqlx::query(
            "SELECT * FROM leagues WHERE ($1::uuid IS NULL OR season_id = $1) ORDER BY created_at, id",
        )
        .bind(season_id)
        .fetch_all(self.conn()?)
        .await?;
        Ok(rows.iter().map(league_from_row).collect::<Result<_, _>>()?)
    }

    async fn upsert_league(&mut self, league: &League) -> CompetitionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO leagues (id, name, season_id, gender_id, league_type_id, match_system_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                season_id = EXCLUDED.season_id,
                gender_id = EXCLUDED.gender_id,
                league_type_id = EXCLUDED.league_type_id,
                match_system_id = EXCLUDED.match_system_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(league.id)
        .bind(&league.name)
        .bind(league.season_id)
        .bind(league.gender_id)
        .bind(league.league_type_id)
        .bind(league.match_system_id)
        .bind(league.created_at)
        .bind(league.updated_at)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn get_sub_league(&mut self, id: Uuid) -> CompetitionResult<Option<SubLeague>> {
        let row = sqlx::query("SELECT * FROM sub_leagues WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(row.as_ref().map(sub_league_from_row).transpose()?)
    }

    async fn list_sub_leagues(&mut self, league_id: Option<Uuid>) -> CompetitionResult<Vec<SubLeague>> {
        let rows = sqlx::query(
            "SELECT * FROM sub_leagues WHERE ($1::uuid IS NULL OR league_id = $1) ORDER BY created_at, id",
        )
        .bind(league_id)
        .fetch_all(self.conn()?)
        .await?;
        Ok(rows.iter().map(sub_league_from_row).collect::<Result<_, _>>()?)
    }

    async fn upsert_sub_league(&mut self, sub_league: &SubLeague) -> CompetitionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sub_leagues (id, name, league_id, parent_id, match_system_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                league_id = EXCLUDED.league_id,
                parent_id = EXCLUDED.parent_id,
                match_system_id = EXCLUDED.match_system_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(sub_league.id)
        .bind(&sub_league.name)
        .bind(sub_league.league_id)
        .bind(sub_league.parent_id)
        .bind(sub_league.match_system_id)
        .bind(sub_league.created_at)
        .bind(sub_league.updated_at)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn list_sub_league_team_ids(&mut self, sub_league_id: Uuid) -> CompetitionResult<Vec<Uuid>> {
        let rows = sqlx::query(
            "SELECT team_id FROM sub_league_teams WHERE sub_league_id = $1 ORDER BY team_id",
        )
        .bind(sub_league_id)
        .fetch_all(self.conn()?)
        .await?;
        Ok(rows
            .iter()
            .map(|r| r.try_get("team_id"))
            .collect::<Result<_, _>>()?)
    }

    async fn replace_sub_league_teams(&mut self, sub_league_id: Uuid, team_ids: &[Uuid]) -> CompetitionResult<()> {
        sqlx::query("DELETE FROM sub_league_teams WHERE sub_league_id = $1")
            .bind(sub_league_id)
            .execute(self.conn()?)
            .await?;
        sqlx::query(
            r#"
            INSERT INTO sub_league_teams (sub_league_id, team_id)
            SELECT $1, team_id FROM UNNEST($2::uuid[]) AS team_id
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(sub_league_id)
        .bind(team_ids)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn get_stage(&mut self, id: Uuid) -> CompetitionResult<Option<Stage>> {
        let row = sqlx::query("SELECT * FROM stages WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        row.as_ref().map(stage_from_row).transpose()
    }

    async fn list_stages(&mut self, scope: Option<StageScope>) -> CompetitionResult<Vec<Stage>> {
        let rows = match scope {
            None => {
                sqlx::query("SELECT * FROM stages ORDER BY created_at, id")
                    .fetch_all(self.conn()?)
                    .await?
            }
            Some(scope) => {
                sqlx::query(
                    r#"
                    SELECT * FROM stages
                    WHERE league_id IS NOT DISTINCT FROM $1
                      AND sub_league_id IS NOT DISTINCT FROM $2
                    ORDER BY sort_order, created_at, id
                    "#,
                )
                .bind(scope.league_id())
                .bind(scope.sub_league_id())
                .fetch_all(self.conn()?)
                .await?
            }
        };
        rows.iter().map(stage_from_row).collect()
    }

    async fn upsert_stage(&mut self, stage: &Stage) -> CompetitionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stages (id, name, sort_order, league_id, sub_league_id, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                sort_order = EXCLUDED.sort_order,
                league_id = EXCLUDED.league_id,
                sub_league_id = EXCLUDED.sub_league_id,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(stage.id)
        .bind(&stage.name)
        .bind(stage.order)
        .bind(stage.scope.league_id())
        .bind(stage.scope.sub_league_id())
        .bind(stage.start_date)
        .bind(stage.end_date)
        .bind(stage.created_at)
        .bind(stage.updated_at)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn get_round(&mut self, id: Uuid) -> CompetitionResult<Option<Round>> {
        let row = sqlx::query("SELECT * FROM rounds WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(row.as_ref().map(round_from_row).transpose()?)
    }

    async fn list_rounds(&mut self, stage_id: Uuid) -> CompetitionResult<Vec<Round>> {
        let rows = sqlx::query("SELECT * FROM rounds WHERE stage_id = $1 ORDER BY sort_order, created_at, id")
            .bind(stage_id)
            .fetch_all(self.conn()?)
            .await?;
        Ok(rows.iter().map(round_from_row).collect::<Result<_, _>>()?)
    }

    async fn upsert_round(&mut self, round: &Round) -> CompetitionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rounds (id, name, sort_order, stage_id, start_date, end_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                sort_order = EXCLUDED.sort_order,
                stage_id = EXCLUDED.stage_id,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(round.id)
        .bind(&round.name)
        .bind(round.order)
        .bind(round.stage_id)
        .bind(round.start_date)
        .bind(round.end_date)
        .bind(round.created_at)
        .bind(round.updated_at)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn get_team(&mut self, id: Uuid) -> CompetitionResult<Option<Team>> {
        let query = format!("{} WHERE t.id = $1 GROUP BY t.id", TEAM_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(row.as_ref().map(team_from_row).transpose()?)
    }

    async fn list_teams(&mut self, league_id: Option<Uuid>) -> CompetitionResult<Vec<Team>> {
        let query = format!(
            "{} WHERE ($1::uuid IS NULL OR t.league_id = $1) GROUP BY t.id ORDER BY t.created_at, t.id",
            TEAM_SELECT
        );
        let rows = sqlx::query(&query)
            .bind(league_id)
            .fetch_all(self.conn()?)
            .await?;
        Ok(rows.iter().map(team_from_row).collect::<Result<_, _>>()?)
    }

    async fn upsert_team(&mut self, team: &Team) -> CompetitionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, club_id, league_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                club_id = EXCLUDED.club_id,
                league_id = EXCLUDED.league_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(team.club_id)
        .bind(team.league_id)
        .bind(team.created_at)
        .bind(team.updated_at)
        .execute(self.conn()?)
        .await?;

        sqlx::query("DELETE FROM sub_league_teams WHERE team_id = $1")
            .bind(team.id)
            .execute(self.conn()?)
            .await?;
        sqlx::query(
            r#"
            INSERT INTO sub_league_teams (sub_league_id, team_id)
            SELECT sub_league_id, $1 FROM UNNEST($2::uuid[]) AS sub_league_id
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(team.id)
        .bind(&team.sub_league_ids)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn get_match_system(&mut self, id: Uuid) -> CompetitionResult<Option<MatchSystem>> {
        let row = sqlx::query("SELECT * FROM match_systems WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        row.as_ref().map(match_system_from_row).transpose()
    }

    async fn get_match_system_by_name(&mut self, name: &str) -> CompetitionResult<Option<MatchSystem>> {
        let row = sqlx::query("SELECT * FROM match_systems WHERE name = $1")
            .bind(name)
            .fetch_optional(self.conn()?)
            .await?;
        row.as_ref().map(match_system_from_row).transpose()
    }

    async fn list_match_systems(&mut self) -> CompetitionResult<Vec<MatchSystem>> {
        let rows = sqlx::query("SELECT * FROM match_systems ORDER BY name")
            .fetch_all(self.conn()?)
            .await?;
        rows.iter().map(match_system_from_row).collect()
    }

    async fn upsert_match_system(&mut self, system: &MatchSystem) -> CompetitionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO match_systems (
                id, name, system_type, total_matches, singles_count, doubles_count,
                match_order, description, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                system_type = EXCLUDED.system_type,
                total_matches = EXCLUDED.total_matches,
                singles_count = EXCLUDED.singles_count,
                doubles_count = EXCLUDED.doubles_count,
                match_order = EXCLUDED.match_order,
                description = EXCLUDED.description,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(system.id)
        .bind(&system.name)
        .bind(system.system_type.as_str())
        .bind(system.total_matches)
        .bind(system.singles_count)
        .bind(system.doubles_count)
        .bind(&system.match_order)
        .bind(&system.description)
        .bind(system.created_at)
        .bind(system.updated_at)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn get_match(&mut self, id: Uuid) -> CompetitionResult<Option<Match>> {
        let row = sqlx::query("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(self.conn()?)
            .await?;
        row.as_ref().map(match_from_row).transpose()
    }

    async fn list_matches(&mut self, stage_id: Option<Uuid>) -> CompetitionResult<Vec<Match>> {
        let rows = sqlx::query(
            "SELECT * FROM matches WHERE ($1::uuid IS NULL OR stage_id = $1) ORDER BY match_date, id",
        )
        .bind(stage_id)
        .fetch_all(self.conn()?)
        .await?;
        rows.iter().map(match_from_row).collect()
    }

    async fn upsert_match(&mut self, fixture: &Match) -> CompetitionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO matches (
                id, stage_id, round_id, home_team_id, away_team_id, match_system_id, playground_id,
                match_date, status, home_score, away_score, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE SET
                stage_id = EXCLUDED.stage_id,
                round_id = EXCLUDED.round_id,
                home_team_id = EXCLUDED.home_team_id,
                away_team_id = EXCLUDED.away_team_id,
                match_system_id = EXCLUDED.match_system_id,
                playground_id = EXCLUDED.playground_id,
                match_date = EXCLUDED.match_date,
                status = EXCLUDED.status,
                home_score = EXCLUDED.home_score,
                away_score = EXCLUDED.away_score,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(fixture.id)
        .bind(fixture.stage_id)
        .bind(fixture.round_id)
        .bind(fixture.home_team_id)
        .bind(fixture.away_team_id)
        .bind(fixture.match_system_id)
        .bind(fixture.playground_id)
        .bind(fixture.match_date)
        .bind(fixture.status.as_str())
        .bind(fixture.home_score)
        .bind(fixture.away_score)
        .bind(fixture.created_at)
        .bind(fixture.updated_at)
        .execute(self.conn()?)
        .await?;
        Ok(())
    }

    async fn count_by_foreign_key(&mut self, key: ForeignKey, id: Uuid) -> CompetitionResult<i64> {
        let query = format!("SELECT COUNT(*) AS count FROM {} WHERE {} = $1", key.table(), key.column());
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_one(self.conn()?)
            .await?;
        Ok(row.try_get::<i64, _>("count")?)
    }

    async fn delete(&mut self, kind: EntityKind, id: Uuid) -> CompetitionResult<bool> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query)
            .bind(id)
            .execute(self.conn()?)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn commit(&mut self) -> CompetitionResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| CompetitionError::Internal("Unit of work already committed".into()))?;
        tx.commit().await?;
        Ok(())
    }
}
