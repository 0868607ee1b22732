use actix_web::{web, HttpResponse};
use tracing::info;

use super::{created, deleted, found, is_blank, updated};
use crate::auth::AuthenticatedUser;
use crate::db::models::TeamInput;
use crate::db::DbOperations;
use crate::error::AppError;

pub fn validate(input: &TeamInput) -> Result<(), AppError> {
    if is_blank(&input.name) || is_blank(&input.city) || is_blank(&input.country) {
        return Err(AppError::ValidationError(
            "Name, city, and country are required".into(),
        ));
    }
    Ok(())
}

pub async fn list_teams(db: web::Data<DbOperations>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(db.list_teams().await?))
}

pub async fn get_team(
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    let team = found(db.get_team(path.into_inner()).await?, "Team")?;
    Ok(HttpResponse::Ok().json(team))
}

pub async fn team_players(
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(db.list_team_players(path.into_inner()).await?))
}

pub async fn create_team(
    user: AuthenticatedUser,
    input: web::Json<TeamInput>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    let id = db.create_team(&input).await?;
    info!(team_id = id, by = %user.0.email, "Team created");
    Ok(created("Team", id))
}

pub async fn update_team(
    path: web::Path<i64>,
    input: web::Json<TeamInput>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    updated("Team", db.update_team(path.into_inner(), &input).await?)
}

pub async fn delete_team(
    user: AuthenticatedUser,
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let affected = db.delete_team(id).await?;
    if affected {
        info!(team_id = id, by = %user.0.email, "Team deleted");
    }
    deleted("Team", affected)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_teams))
        .route("", web::post().to(create_team))
        .route("/{id}", web::get().to(get_team))
        .route("/{id}", web::put().to(update_team))
        .route("/{id}", web::delete().to(delete_team))
        .route("/{id}/players", web::get().to(team_players));
}
