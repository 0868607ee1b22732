pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod mail;
pub mod resources;

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, TokenIssuer};
pub use db::{DbOperations, User, UserSummary};

use auth::CredentialStore;
use mail::{MailDispatcher, SmtpMailer};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "Server is running",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "message": "Route not found" }))
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: web::Data<Settings>,
    pub db: web::Data<DbOperations>,
    pub auth: web::Data<AuthService>,
    pub tokens: web::Data<TokenIssuer>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        if !config.is_development() && config.auth.jwt_secret == config::DEVELOPMENT_JWT_SECRET {
            warn!("auth.jwt_secret is the development default; set APP_AUTH__JWT_SECRET");
        }

        let db = DbOperations::connect(&config.database).await?;
        if config.database.run_migrations {
            db.run_migrations().await?;
        }

        let store: Arc<dyn CredentialStore> = Arc::new(db.clone());
        let mailer: Arc<dyn MailDispatcher> = Arc::new(SmtpMailer::new(config.mail.clone()));
        let auth = AuthService::new(store, mailer, &config.auth, &config.frontend)?;

        Ok(Self::from_parts(config, db, auth))
    }

    pub fn from_parts(config: Settings, db: DbOperations, auth: AuthService) -> Self {
        let tokens = web::Data::new(auth.tokens().clone());
        Self {
            config: web::Data::new(config),
            db: web::Data::new(db),
            auth: web::Data::new(auth),
            tokens,
        }
    }

    /// Registers shared data and every route under `/api`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.config.clone())
            .app_data(self.db.clone())
            .app_data(self.auth.clone())
            .app_data(self.tokens.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(format!("Invalid request body: {}", err)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, req| {
                debug!(path = %req.path(), "Unparseable path segment: {}", err);
                AppError::NotFound("Route not found".into()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(format!("Invalid query string: {}", err)).into()
            }))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health_check))
                    .service(web::scope("/auth").configure(auth::handlers::routes))
                    .configure(resources::routes),
            )
            .default_service(web::route().to(route_not_found));
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.db.close().await;
        info!("Database pool closed");
        Ok(())
    }
}
