//! Authentication module for the football management server
//!
//! Session tokens, password hashing, the login / forgot-password /
//! reset-password flows and the guard that protects every other route.

pub mod guard;
pub mod handlers;
mod password;
mod service;
mod store;
mod token;

pub use guard::{require_auth, AuthenticatedUser};
pub use password::PasswordHasher;
pub use service::{AuthPolicy, AuthService, LoginResponse, PASSWORD_RESET_DONE, RESET_EMAIL_SENT};
pub use store::CredentialStore;
pub use token::{Claims, TokenIssuer, TokenSubject};
