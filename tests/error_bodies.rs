mod common;

use actix_web::{test, web, App, HttpResponse};
use chrono::Duration;
use serde::Deserialize;
use serde_json::Value;

use football_manager_server::auth::TokenSubject;

use common::context;

#[derive(Deserialize)]
struct Paging {
    page: u32,
}

async fn paged(query: web::Query<Paging>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "page": query.page }))
}

#[actix_web::test]
async fn test_non_numeric_id_is_json_not_found() {
    let ctx = context();
    let token = ctx
        .state
        .tokens
        .issue(
            &TokenSubject {
                id: 1,
                email: "coach@example.com".into(),
                role: "admin".into(),
            },
            Duration::hours(1),
        )
        .unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

    for uri in ["/api/players/abc", "/api/teams/abc/players", "/api/matches/1.5"] {
        let resp = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 404, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Route not found");
    }
}

#[actix_web::test]
async fn test_bad_query_string_is_json_validation_error() {
    let ctx = context();
    let app = test::init_service(
        App::new()
            .configure(|cfg| ctx.configure(cfg))
            .route("/paged", web::get().to(paged)),
    )
    .await;

    let ok = test::TestRequest::get().uri("/paged?page=2").send_request(&app).await;
    assert_eq!(ok.status(), 200);

    let resp = test::TestRequest::get().uri("/paged?page=two").send_request(&app).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid query string"));
}
