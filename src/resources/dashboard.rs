use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::config::Settings;
use crate::db::DbOperations;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<String>,
}

/// Counts, the five latest completed matches and the current season's top scorers.
pub async fn dashboard(
    db: web::Data<DbOperations>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let dashboard = db.dashboard(&settings.club.current_season).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

pub async fn player_statistics(
    query: web::Query<SeasonQuery>,
    db: web::Data<DbOperations>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let season = query
        .season
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(settings.club.current_season.as_str());

    Ok(HttpResponse::Ok().json(db.season_player_stats(season).await?))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(dashboard));
}

pub fn statistics_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/players", web::get().to(player_statistics));
}
