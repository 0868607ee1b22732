use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::auth::AuthService;
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub token: Option<String>,
    pub new_password: Option<String>,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let email = req.email.as_deref().unwrap_or_default();
    let password = req.password.as_deref().unwrap_or_default();

    info!("Received login request for email: {}", email);
    match auth.login(email, password).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            error!("Login failed for email: {}: {}", email, e);
            Err(e)
        }
    }
}

pub async fn forgot_password(
    req: web::Json<ForgotPasswordRequest>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let email = req.email.as_deref().unwrap_or_default();

    info!("Received password reset request for email: {}", email);
    let message = auth.request_password_reset(email).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

pub async fn reset_password(
    req: web::Json<ResetPasswordRequest>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let email = req.email.as_deref().unwrap_or_default();
    let token = req.token.as_deref().unwrap_or_default();
    let new_password = req.new_password.as_deref().unwrap_or_default();

    let message = auth.reset_password(email, token, new_password).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

/// Public auth routes, mounted under `/auth`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/forgot-password", web::post().to(forgot_password))
        .route("/reset-password", web::post().to(reset_password));
}
