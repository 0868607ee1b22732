use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::password::PasswordHasher;
use crate::auth::store::CredentialStore;
use crate::auth::token::{TokenIssuer, TokenSubject};
use crate::config::{AuthConfig, FrontendConfig};
use crate::db::models::{User, UserSummary};
use crate::error::{AppError, AuthError};
use crate::mail::{MailDispatcher, OutgoingMail};

pub const RESET_EMAIL_SENT: &str = "Password reset email sent";
pub const PASSWORD_RESET_DONE: &str = "Password reset successfully";

const RESET_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone)]
pub struct AuthPolicy {
    pub session_ttl: Duration,
    pub reset_ttl: Duration,
    pub disclose_unknown_email: bool,
    pub demo_password: Option<String>,
}

impl From<&AuthConfig> for AuthPolicy {
    fn from(config: &AuthConfig) -> Self {
        Self {
            session_ttl: Duration::hours(config.token_expiry_hours),
            reset_ttl: Duration::minutes(config.reset_token_expiry_minutes),
            disclose_unknown_email: config.disclose_unknown_email,
            demo_password: config.demo_password.clone().filter(|p| !p.is_empty()),
        }
    }
}

/// Login, forgot-password and reset-password flows.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    mailer: Arc<dyn MailDispatcher>,
    tokens: TokenIssuer,
    hasher: PasswordHasher,
    policy: AuthPolicy,
    reset_page: Url,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        mailer: Arc<dyn MailDispatcher>,
        auth: &AuthConfig,
        frontend: &FrontendConfig,
    ) -> Result<Self, AppError> {
        let policy = AuthPolicy::from(auth);
        if policy.demo_password.is_some() {
            warn!("Demo password is enabled: it unlocks every account");
        }

        Ok(Self {
            store,
            mailer,
            tokens: TokenIssuer::new(&auth.jwt_secret)?,
            hasher: PasswordHasher::new(auth.bcrypt_cost)?,
            policy,
            reset_page: reset_page_url(frontend)?,
        })
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::ValidationError("Email and password required".into()));
        }

        let user = match self.store.find_user_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("Login rejected: no account for the supplied email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.password_matches(&user, password).await? {
            debug!(user_id = user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(&TokenSubject::from(&user), self.policy.session_ttl)?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            token,
            user: user.summary(),
        })
    }

    /// Issues a fresh reset token (replacing any pending one) and mails the
    /// link. The token stays stored if delivery fails; calling again simply
    /// re-issues it.
    pub async fn request_password_reset(&self, email: &str) -> Result<&'static str, AppError> {
        if email.trim().is_empty() {
            return Err(AppError::ValidationError("Email is required".into()));
        }

        let user = match self.store.find_user_by_email(email).await? {
            Some(user) => user,
            None if self.policy.disclose_unknown_email => {
                return Err(AuthError::UserNotFound.into());
            }
            None => {
                info!("Password reset requested for an unregistered email");
                return Ok(RESET_EMAIL_SENT);
            }
        };

        let token = generate_reset_token();
        let expires_at = Utc::now() + self.policy.reset_ttl;
        self.store.store_reset_token(user.id, &token, expires_at).await?;

        let link = self.reset_link(&token, &user.email);
        self.mailer
            .dispatch(OutgoingMail::password_reset(&user.email, &link))
            .await?;

        info!(user_id = user.id, "Password reset link dispatched");
        Ok(RESET_EMAIL_SENT)
    }

    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<&'static str, AppError> {
        if email.trim().is_empty() || token.trim().is_empty() || new_password.is_empty() {
            return Err(AppError::ValidationError("All fields are required".into()));
        }

        let user = self
            .store
            .find_user_by_reset_token(email, token)
            .await?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        if user.reset_token_expired(Utc::now()) {
            debug!(user_id = user.id, "Reset rejected: token expired");
            return Err(AuthError::InvalidOrExpiredToken.into());
        }

        let hash = self.hasher.hash(new_password).await?;
        if !self.store.complete_password_reset(user.id, token, &hash).await? {
            warn!(user_id = user.id, "Reset token was replaced before the reset completed");
            return Err(AuthError::InvalidOrExpiredToken.into());
        }

        info!(user_id = user.id, "Password reset completed");
        Ok(PASSWORD_RESET_DONE)
    }

    pub fn reset_link(&self, token: &str, email: &str) -> String {
        let mut link = self.reset_page.clone();
        link.query_pairs_mut()
            .append_pair("token", token)
            .append_pair("email", email);
        link.into()
    }

    async fn password_matches(&self, user: &User, password: &str) -> Result<bool, AppError> {
        if self.policy.demo_password.as_deref() == Some(password) {
            return Ok(true);
        }
        self.hasher.verify(password, &user.password).await
    }
}

fn reset_page_url(frontend: &FrontendConfig) -> Result<Url, AppError> {
    let mut base = Url::parse(&frontend.url)
        .map_err(|e| AppError::ConfigError(format!("frontend.url is invalid: {}", e)))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&frontend.reset_path)
        .map_err(|e| AppError::ConfigError(format!("frontend.reset_path is invalid: {}", e)))
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
