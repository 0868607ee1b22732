use actix_web::{web, HttpResponse};
use tracing::info;

use super::{created, deleted, found, is_blank, updated};
use crate::auth::AuthenticatedUser;
use crate::db::models::CoachInput;
use crate::db::DbOperations;
use crate::error::AppError;

pub fn validate(input: &CoachInput) -> Result<(), AppError> {
    if is_blank(&input.name) || is_blank(&input.nationality) {
        return Err(AppError::ValidationError(
            "Name and nationality are required".into(),
        ));
    }
    Ok(())
}

pub async fn list_coaches(db: web::Data<DbOperations>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(db.list_coaches().await?))
}

pub async fn get_coach(
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    let coach = found(db.get_coach(path.into_inner()).await?, "Coach")?;
    Ok(HttpResponse::Ok().json(coach))
}

pub async fn create_coach(
    user: AuthenticatedUser,
    input: web::Json<CoachInput>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    let id = db.create_coach(&input).await?;
    info!(coach_id = id, by = %user.0.email, "Coach created");
    Ok(created("Coach", id))
}

pub async fn update_coach(
    path: web::Path<i64>,
    input: web::Json<CoachInput>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    validate(&input)?;
    updated("Coach", db.update_coach(path.into_inner(), &input).await?)
}

pub async fn delete_coach(
    user: AuthenticatedUser,
    path: web::Path<i64>,
    db: web::Data<DbOperations>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let affected = db.delete_coach(id).await?;
    if affected {
        info!(coach_id = id, by = %user.0.email, "Coach deleted");
    }
    deleted("Coach", affected)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_coaches))
        .route("", web::post().to(create_coach))
        .route("/{id}", web::get().to(get_coach))
        .route("/{id}", web::put().to(update_coach))
        .route("/{id}", web::delete().to(delete_coach));
}
