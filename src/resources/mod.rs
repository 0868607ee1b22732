//! Club resource endpoints: players, teams, coaches, matches, statistics and
//! the dashboard. Every scope here sits behind [`require_auth`].

pub mod coaches;
pub mod dashboard;
pub mod matches;
pub mod players;
pub mod teams;

use actix_web::middleware::from_fn;
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::auth::require_auth;
use crate::error::AppError;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .wrap(from_fn(require_auth))
            .configure(dashboard::routes),
    )
    .service(
        web::scope("/players")
            .wrap(from_fn(require_auth))
            .configure(players::routes),
    )
    .service(
        web::scope("/teams")
            .wrap(from_fn(require_auth))
            .configure(teams::routes),
    )
    .service(
        web::scope("/coaches")
            .wrap(from_fn(require_auth))
            .configure(coaches::routes),
    )
    .service(
        web::scope("/matches")
            .wrap(from_fn(require_auth))
            .configure(matches::routes),
    )
    .service(
        web::scope("/statistics")
            .wrap(from_fn(require_auth))
            .configure(dashboard::statistics_routes),
    );
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

pub(crate) fn found<T>(value: Option<T>, entity: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::NotFound(format!("{entity} not found")))
}

pub(crate) fn created(entity: &str, id: i64) -> HttpResponse {
    HttpResponse::Created().json(json!({
        "id": id,
        "message": format!("{entity} created successfully"),
    }))
}

pub(crate) fn updated(entity: &str, affected: bool) -> Result<HttpResponse, AppError> {
    if !affected {
        return Err(AppError::NotFound(format!("{entity} not found")));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": format!("{entity} updated successfully") })))
}

pub(crate) fn deleted(entity: &str, affected: bool) -> Result<HttpResponse, AppError> {
    if !affected {
        return Err(AppError::NotFound(format!("{entity} not found")));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": format!("{entity} deleted successfully") })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some("   ".into())));
        assert!(!is_blank(&Some("Arsenal".into())));
    }

    #[test]
    fn test_missing_rows_become_not_found() {
        let err = found::<i64>(None, "Team").unwrap_err();
        assert_eq!(err.public_message(), "Team not found");

        let err = deleted("Coach", false).unwrap_err();
        assert_eq!(err.public_message(), "Coach not found");

        assert_eq!(updated("Match", true).unwrap().status(), 200);
        assert_eq!(created("Player", 9).status(), 201);
    }
}
