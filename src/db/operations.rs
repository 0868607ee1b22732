use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::auth::CredentialStore;
use crate::config::DatabaseConfig;
use crate::db::models::{
    Coach, CoachInput, Dashboard, DashboardCounts, Match, MatchInput, Player, PlayerInput,
    PlayerSeasonStats, RecentMatch, Team, TeamInput, TopPlayer, User,
};
use crate::error::{AppError, DatabaseError};

const USER_COLUMNS: &str =
    "id, name, email, password, role, reset_token, reset_token_expires, created_at";

const PLAYER_SELECT: &str = r#"
    SELECT p.id, p.name, p.position, p.team_id, t.name AS team, p.age, p.nationality,
           p.jersey_number, p.height, p.weight, p.status
    FROM players p
    LEFT JOIN teams t ON p.team_id = t.id
"#;

const TEAM_SELECT: &str = r#"
    SELECT t.id, t.name, t.city, t.country, t.founded_year, t.stadium, t.coach_id,
           c.name AS coach_name
    FROM teams t
    LEFT JOIN coaches c ON t.coach_id = c.id
"#;

const COACH_SELECT: &str = r#"
    SELECT c.id, c.name, c.nationality, c.date_of_birth, c.experience_years, c.specialization,
           c.license_type AS license_level, c.status, t.id AS team_id, t.name AS team_name
    FROM coaches c
    LEFT JOIN teams t ON t.coach_id = c.id
"#;

const MATCH_SELECT: &str = r#"
    SELECT m.id, m.home_team_id, m.away_team_id, home.name AS home_team, away.name AS away_team,
           m.match_date, m.match_time, m.venue, m.competition, m.home_score, m.away_score, m.status
    FROM matches m
    JOIN teams home ON m.home_team_id = home.id
    JOIN teams away ON m.away_team_id = away.id
"#;

#[derive(Clone)]
pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens the bounded pool. Requests beyond `max_connections` wait up to
    /// `acquire_timeout_secs` for a free connection before failing.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        info!("Database pool ready (max {} connections)", config.max_connections);
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Pool that connects on first use; lets tests mount the full router
    /// without a live database.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.url)?;
        Ok(Self { pool: Arc::new(pool) })
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // Players

    pub async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        let players = sqlx::query_as::<_, Player>(&format!("{PLAYER_SELECT} ORDER BY p.name"))
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(players)
    }

    pub async fn get_player(&self, id: i64) -> Result<Option<Player>, AppError> {
        let player = sqlx::query_as::<_, Player>(&format!("{PLAYER_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(player)
    }

    pub async fn list_team_players(&self, team_id: i64) -> Result<Vec<Player>, AppError> {
        let players = sqlx::query_as::<_, Player>(&format!(
            "{PLAYER_SELECT} WHERE p.team_id = $1 ORDER BY p.position, p.jersey_number"
        ))
        .bind(team_id)
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(players)
    }

    pub async fn create_player(&self, input: &PlayerInput) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO players
                (name, position, team_id, age, nationality, jersey_number, height, weight, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.position)
        .bind(input.team_id)
        .bind(input.age)
        .bind(&input.nationality)
        .bind(input.jersey_number)
        .bind(input.height)
        .bind(input.weight)
        .bind(input.status.as_deref().unwrap_or("Active"))
        .fetch_one(self.pool.as_ref())
        .await?;
        Ok(id)
    }

    pub async fn update_player(&self, id: i64, input: &PlayerInput) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE players
            SET name = $1, position = $2, team_id = $3, age = $4, nationality = $5,
                jersey_number = $6, height = $7, weight = $8, status = $9
            WHERE id = $10
            "#,
        )
        .bind(&input.name)
        .bind(&input.position)
        .bind(input.team_id)
        .bind(input.age)
        .bind(&input.nationality)
        .bind(input.jersey_number)
        .bind(input.height)
        .bind(input.weight)
        .bind(input.status.as_deref().unwrap_or("Active"))
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_player(&self, id: i64) -> Result<bool, AppError> {
        self.delete_by_id("players", id).await
    }

    // Teams

    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let teams = sqlx::query_as::<_, Team>(&format!("{TEAM_SELECT} ORDER BY t.name"))
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(teams)
    }

    pub async fn get_team(&self, id: i64) -> Result<Option<Team>, AppError> {
        let team = sqlx::query_as::<_, Team>(&format!("{TEAM_SELECT} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(team)
    }

    pub async fn create_team(&self, input: &TeamInput) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO teams (name, city, country, founded_year, stadium, coach_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.country)
        .bind(input.founded_year)
        .bind(&input.stadium)
        .bind(input.coach_id)
        .fetch_one(self.pool.as_ref())
        .await?;
        Ok(id)
    }

    pub async fn update_team(&self, id: i64, input: &TeamInput) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = $1, city = $2, country = $3, founded_year = $4, stadium = $5, coach_id = $6
            WHERE id = $7
            "#,
        )
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.country)
        .bind(input.founded_year)
        .bind(&input.stadium)
        .bind(input.coach_id)
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_team(&self, id: i64) -> Result<bool, AppError> {
        self.delete_by_id("teams", id).await
    }

    // Coaches

    pub async fn list_coaches(&self) -> Result<Vec<Coach>, AppError> {
        let coaches = sqlx::query_as::<_, Coach>(&format!("{COACH_SELECT} ORDER BY c.name"))
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(coaches)
    }

    pub async fn get_coach(&self, id: i64) -> Result<Option<Coach>, AppError> {
        let coach = sqlx::query_as::<_, Coach>(&format!("{COACH_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(coach)
    }

    pub async fn create_coach(&self, input: &CoachInput) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO coaches
                (name, nationality, date_of_birth, experience_years, specialization, license_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.nationality)
        .bind(input.date_of_birth)
        .bind(input.experience_years)
        .bind(&input.specialization)
        .bind(&input.license_level)
        .bind(input.status.as_deref().unwrap_or("Active"))
        .fetch_one(self.pool.as_ref())
        .await?;
        Ok(id)
    }

    pub async fn update_coach(&self, id: i64, input: &CoachInput) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE coaches
            SET name = $1, nationality = $2, date_of_birth = $3, experience_years = $4,
                specialization = $5, license_type = $6, status = $7
            WHERE id = $8
            "#,
        )
        .bind(&input.name)
        .bind(&input.nationality)
        .bind(input.date_of_birth)
        .bind(input.experience_years)
        .bind(&input.specialization)
        .bind(&input.license_level)
        .bind(input.status.as_deref().unwrap_or("Active"))
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_coach(&self, id: i64) -> Result<bool, AppError> {
        self.delete_by_id("coaches", id).await
    }

    // Matches

    pub async fn list_matches(&self) -> Result<Vec<Match>, AppError> {
        let matches = sqlx::query_as::<_, Match>(&format!(
            "{MATCH_SELECT} ORDER BY m.match_date DESC, m.match_time DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(matches)
    }

    pub async fn get_match(&self, id: i64) -> Result<Option<Match>, AppError> {
        let found = sqlx::query_as::<_, Match>(&format!("{MATCH_SELECT} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(found)
    }

    pub async fn create_match(&self, input: &MatchInput) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO matches
                (home_team_id, away_team_id, match_date, match_time, venue, competition,
                 home_score, away_score, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(input.home_team_id)
        .bind(input.away_team_id)
        .bind(input.match_date)
        .bind(input.match_time)
        .bind(&input.venue)
        .bind(&input.competition)
        .bind(input.home_score)
        .bind(input.away_score)
        .bind(input.status.as_deref().unwrap_or("Scheduled"))
        .fetch_one(self.pool.as_ref())
        .await?;
        Ok(id)
    }

    pub async fn update_match(&self, id: i64, input: &MatchInput) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE matches
            SET home_team_id = $1, away_team_id = $2, match_date = $3, match_time = $4,
                venue = $5, competition = $6, home_score = $7, away_score = $8, status = $9
            WHERE id = $10
            "#,
        )
        .bind(input.home_team_id)
        .bind(input.away_team_id)
        .bind(input.match_date)
        .bind(input.match_time)
        .bind(&input.venue)
        .bind(&input.competition)
        .bind(input.home_score)
        .bind(input.away_score)
        .bind(input.status.as_deref().unwrap_or("Scheduled"))
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_match(&self, id: i64) -> Result<bool, AppError> {
        self.delete_by_id("matches", id).await
    }

    // Statistics and dashboard

    pub async fn season_player_stats(&self, season: &str) -> Result<Vec<PlayerSeasonStats>, AppError> {
        let stats = sqlx::query_as::<_, PlayerSeasonStats>(
            r#"
            SELECT p.id, p.name AS player_name, p.position, t.name AS team_name,
                   ps.matches_played, ps.goals, ps.assists, ps.yellow_cards, ps.red_cards,
                   ps.minutes_played
            FROM player_statistics ps
            JOIN players p ON ps.player_id = p.id
            JOIN teams t ON p.team_id = t.id
            WHERE ps.season = $1
            ORDER BY ps.goals DESC, ps.assists DESC
            "#,
        )
        .bind(season)
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(stats)
    }

    pub async fn dashboard(&self, season: &str) -> Result<Dashboard, AppError> {
        let pool = self.pool.as_ref();
        let count = |sql: &'static str| sqlx::query_scalar::<_, i64>(sql).fetch_one(pool);

        let (total_players, total_teams, upcoming_matches, total_coaches) = tokio::try_join!(
            count("SELECT COUNT(*) FROM players"),
            count("SELECT COUNT(*) FROM teams"),
            count("SELECT COUNT(*) FROM matches WHERE status = 'Scheduled'"),
            count("SELECT COUNT(*) FROM coaches"),
        )?;

        let recent_matches = sqlx::query_as::<_, RecentMatch>(
            r#"
            SELECT m.id, m.match_date, home.name AS home_team, away.name AS away_team,
                   m.home_score, m.away_score, m.status
            FROM matches m
            JOIN teams home ON m.home_team_id = home.id
            JOIN teams away ON m.away_team_id = away.id
            WHERE m.status = 'Completed'
            ORDER BY m.match_date DESC
            LIMIT 5
            "#,
        )
        .fetch_all(pool)
        .await?;

        let top_players = sqlx::query_as::<_, TopPlayer>(
            r#"
            SELECT p.id, p.name, t.name AS team, ps.goals, ps.assists
            FROM players p
            JOIN teams t ON p.team_id = t.id
            JOIN player_statistics ps ON p.id = ps.player_id
            WHERE ps.season = $1
            ORDER BY ps.goals DESC, ps.assists DESC
            LIMIT 5
            "#,
        )
        .bind(season)
        .fetch_all(pool)
        .await?;

        Ok(Dashboard {
            stats: DashboardCounts {
                total_players,
                total_teams,
                upcoming_matches,
                total_coaches,
            },
            recent_matches,
            top_players,
        })
    }

    /// `table` is always one of this module's literals, never caller input.
    async fn delete_by_id(&self, table: &'static str, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CredentialStore for DbOperations {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;
        Ok(user)
    }

    async fn find_user_by_reset_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND reset_token = $2"
        ))
        .bind(email)
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;
        Ok(user)
    }

    async fn store_reset_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET reset_token = $2, reset_token_expires = $3 WHERE id = $1",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound.into());
        }
        Ok(())
    }

    async fn complete_password_reset(
        &self,
        user_id: i64,
        token: &str,
        password_hash: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = $2, reset_token = NULL, reset_token_expires = NULL
            WHERE id = $1 AND reset_token = $3
            "#,
        )
        .bind(user_id)
        .bind(password_hash)
        .bind(token)
        .execute(self.pool.as_ref())
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
