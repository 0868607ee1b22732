use actix_web::{web, HttpResponse};
use tracing::info;

use super::{created, deleted, found, is_blank, updated};
use crate::auth::AuthenticatedUser;
use crate::db::models::PlayerInput;
use crate::db::DbOperations;
use crate::error::AppError;

pub fn validate(input: &PlayerInput) -> Result<(), AppError> {
    if is_blank(&input.name) || is_blank(&input.position) || input.team_id.is_none() {
        return Err(AppError::ValidationError(
            "Name, position, and team are required".into(),
        ));
    }
    Ok(())
}

pub async fn list_players(db: web::Data<DbOperations>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(db.list_players().await?))
}

pub async fn get_player(
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    let player = found(db.get_player(path.into_inner()).await?, "Player")?;
    Ok(HttpResponse::Ok().json(player))
}

pub async fn create_player(
    user: AuthenticatedUser,
    input: web::Json<PlayerInput>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    let id = db.create_player(&input).await?;
    info!(player_id = id, by = %user.0.email, "Player created");
    Ok(created("Player", id))
}

pub async fn update_player(
    path: web::Path<i64>,
    input: web::Json<PlayerInput>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    updated("Player", db.update_player(path.into_inner(), &input).await?)
}

pub async fn delete_player(
    user: AuthenticatedUser,
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let affected = db.delete_player(id).await?;
    if affected {
        info!(player_id = id, by = %user.0.email, "Player deleted");
    }
    deleted("Player", affected)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_players))
        .route("", web::post().to(create_player))
        .route("/{id}", web::get().to(get_player))
        .route("/{id}", web::put().to(update_player))
        .route("/{id}", web::delete().to(delete_player));
}
