use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account row. Never serialized directly: responses go through [`UserSummary`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub reset_token: Option<String>,
    pub reset_token_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, name: &str, email: &str, password_hash: &str, role: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            role: role.to_string(),
            reset_token: None,
            reset_token_expires: None,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }

    pub fn reset_token_expired(&self, now: DateTime<Utc>) -> bool {
        match self.reset_token_expires {
            Some(expires) => expires < now,
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub team_id: Option<i64>,
    pub team: Option<String>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    pub jersey_number: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInput {
    pub name: Option<String>,
    pub position: Option<String>,
    pub team_id: Option<i64>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    pub jersey_number: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub country: String,
    pub founded_year: Option<i32>,
    pub stadium: Option<String>,
    pub coach_id: Option<i64>,
    pub coach_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub founded_year: Option<i32>,
    pub stadium: Option<String>,
    pub coach_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    pub id: i64,
    pub name: String,
    pub nationality: String,
    pub date_of_birth: Option<NaiveDate>,
    pub experience_years: Option<i32>,
    pub specialization: Option<String>,
    pub license_level: Option<String>,
    pub status: String,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachInput {
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub experience_years: Option<i32>,
    pub specialization: Option<String>,
    pub license_level: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_team: String,
    pub away_team: String,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    pub venue: Option<String>,
    pub competition: Option<String>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInput {
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub match_date: Option<NaiveDate>,
    pub match_time: Option<NaiveTime>,
    pub venue: Option<String>,
    pub competition: Option<String>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeasonStats {
    pub id: i64,
    pub player_name: String,
    pub position: String,
    pub team_name: String,
    pub matches_played: i32,
    pub goals: i32,
    pub assists: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub minutes_played: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentMatch {
    pub id: i64,
    pub match_date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TopPlayer {
    pub id: i64,
    pub name: String,
    pub team: String,
    pub goals: i32,
    pub assists: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub total_players: i64,
    pub total_teams: i64,
    pub upcoming_matches: i64,
    pub total_coaches: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardCounts,
    pub recent_matches: Vec<RecentMatch>,
    pub top_players: Vec<TopPlayer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_summary_omits_secrets() {
        let mut user = User::new(7, "Coach", "coach@example.com", "$2b$10$hash", "admin");
        user.reset_token = Some("pending".into());

        let json = serde_json::to_value(user.summary()).unwrap();
        assert_eq!(json["email"], "coach@example.com");
        assert!(json.get("password").is_none());
        assert!(json.get("reset_token").is_none());
    }

    #[test]
    fn test_reset_token_expiry_is_strict() {
        let now = Utc::now();
        let mut user = User::new(1, "A", "a@example.com", "x", "user");
        assert!(user.reset_token_expired(now), "no expiry means no live token");

        user.reset_token_expires = Some(now);
        assert!(!user.reset_token_expired(now));

        user.reset_token_expires = Some(now - Duration::seconds(1));
        assert!(user.reset_token_expired(now));
    }

    #[test]
    fn test_player_input_uses_camel_case() {
        let input: PlayerInput = serde_json::from_value(serde_json::json!({
            "name": "Bukayo Saka",
            "position": "Forward",
            "teamId": 3,
            "jerseyNumber": 7
        }))
        .unwrap();
        assert_eq!(input.team_id, Some(3));
        assert_eq!(input.jersey_number, Some(7));
        assert!(input.status.is_none());
    }
}
