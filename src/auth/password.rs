use tokio::task;
use tracing::warn;

use crate::error::AppError;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// bcrypt hashing on the blocking pool; the work factor would otherwise stall
/// an executor thread.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, AppError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AppError::ConfigError(format!(
                "auth.bcrypt_cost must be between {} and {}",
                MIN_COST,
                MAX_COST
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let cost = self.cost;

        task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::InternalError(format!("hashing task failed: {}", e)))?
            .map_err(|e| AppError::InternalError(format!("password hashing failed: {}", e)))
    }

    /// A stored value that is not a bcrypt hash never matches.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let outcome = task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::InternalError(format!("verification task failed: {}", e)))?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!("Stored password hash could not be parsed: {}", e);
                Ok(false)
            }
        }
    }
}
