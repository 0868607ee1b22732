use actix_web::{web, HttpResponse};
use tracing::info;

use super::{created, deleted, found, updated};
use crate::auth::AuthenticatedUser;
use crate::db::models::MatchInput;
use crate::db::DbOperations;
use crate::error::AppError;

pub fn validate(input: &MatchInput) -> Result<(), AppError> {
    let (Some(home), Some(away)) = (input.home_team_id, input.away_team_id) else {
        return Err(missing_fields());
    };
    if input.match_date.is_none() || input.match_time.is_none() {
        return Err(missing_fields());
    }
    if home == away {
        return Err(AppError::ValidationError(
            "Home and away teams must be different".into(),
        ));
    }
    Ok(())
}

fn missing_fields() -> AppError {
    AppError::ValidationError("Home team, away team, date, and time are required".into())
}

pub async fn list_matches(db: web::Data<DbOperations>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(db.list_matches().await?))
}

pub async fn get_match(
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    let found_match = found(db.get_match(path.into_inner()).await?, "Match")?;
    Ok(HttpResponse::Ok().json(found_match))
}

pub async fn create_match(
    user: AuthenticatedUser,
    input: web::Json<MatchInput>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    let id = db.create_match(&input).await?;
    info!(match_id = id, by = %user.0.email, "Match created");
    Ok(created("Match", id))
}

pub async fn update_match(
    path: web::Path<i64>,
    input: web::Json<MatchInput>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    updated("Match", db.update_match(path.into_inner(), &input).await?)
}

pub async fn delete_match(
    user: AuthenticatedUser,
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let affected = db.delete_match(id).await?;
    if affected {
        info!(match_id = id, by = %user.0.email, "Match deleted");
    }
    deleted("Match", affected)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_matches))
        .route("", web::post().to(create_match))
        .route("/{id}", web::get().to(get_match))
        .route("/{id}", web::put().to(update_match))
        .route("/{id}", web::delete().to(delete_match));
}
