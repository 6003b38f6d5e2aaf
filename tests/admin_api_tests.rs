//! HTTP API integration tests
//!
//! Builds the full route table with `configure_app` over a temporary SQLite
//! database and exercises the admin, public and health endpoints.

mod common;

use std::net::SocketAddr;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use common::{DOCX_URL, PDF_URL, create_storage, test_config};
use course_portal::api::services::AppStartTime;
use course_portal::links::LocatorKind;
use course_portal::runtime::{StartupContext, configure_app};

const EMAIL: &str = "profe@uni.edu";
const PASSWORD: &str = "secret123";
const COOKIE: &str = "cp_session";

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

async fn setup(kind: LocatorKind) -> (tempfile::TempDir, StartupContext) {
    let (dir, storage) = create_storage().await;
    let ctx = StartupContext::from_parts(&test_config(kind), storage).unwrap();
    ctx.staff_service.add_user(EMAIL, PASSWORD).await.unwrap();
    (dir, ctx)
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppStartTime::now()))
                .configure(|cfg| configure_app(cfg, &$ctx)),
        )
        .await
    };
}

async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    test::read_body_json(resp).await
}

fn login_request(email: &str, password: &str, redirect_to: Option<&str>) -> TestRequest {
    let mut body = json!({ "email": email, "password": password });
    if let Some(redirect) = redirect_to {
        body["redirect_to"] = json!(redirect);
    }
    TestRequest::post()
        .uri("/api/admin/auth/login")
        .peer_addr(peer())
        .set_json(body)
}

/// 登录并返回会话 token（即 Cookie 值）
macro_rules! login {
    ($app:expr) => {{
        let resp = test::call_service(
            &$app,
            login_request(EMAIL, PASSWORD, None).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        resp.response()
            .cookies()
            .find(|c| c.name() == COOKIE)
            .expect("session cookie set")
            .value()
            .to_string()
    }};
}

// =============================================================================
// Auth
// =============================================================================

#[actix_rt::test]
async fn test_admin_routes_require_session() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);

    for uri in ["/api/admin/weeks", "/api/admin/dashboard", "/api/admin/auth/session"] {
        let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = json_body(resp).await;
        assert_eq!(body["code"], 1001);
        assert!(body["data"].is_null());
    }

    let req = TestRequest::get()
        .uri("/api/admin/weeks")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_login_sets_cookie_and_token_works() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);

    let resp = test::call_service(&app, login_request(EMAIL, PASSWORD, None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == COOKIE)
        .unwrap()
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));
    let token = cookie.value().to_string();

    let body = json_body(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["redirect_to"], "/dashboard");
    assert_eq!(body["data"]["expires_in"], 480 * 60);

    // Cookie
    let req = TestRequest::get()
        .uri("/api/admin/auth/session")
        .cookie(Cookie::new(COOKIE, token.clone()))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["email"], EMAIL);

    // Bearer
    let req = TestRequest::get()
        .uri("/api/admin/weeks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_login_failures() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);

    let resp = test::call_service(&app, login_request(EMAIL, "wrong-password", None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.response().cookies().next().is_none());
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Invalid email or password");

    let resp = test::call_service(&app, login_request("nadie@uni.edu", PASSWORD, None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, login_request("not-an-email", PASSWORD, None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_login_redirect_fallback() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);

    let cases = [
        ("/weeks/3", "/weeks/3"),
        ("//evil.example.com", "/dashboard"),
        ("https://evil.example.com", "/dashboard"),
    ];
    for (requested, expected) in cases {
        let resp =
            test::call_service(&app, login_request(EMAIL, PASSWORD, Some(requested)).to_request()).await;
        let body = json_body(resp).await;
        assert_eq!(body["data"]["redirect_to"], expected, "{requested}");
    }
}

#[actix_rt::test]
async fn test_logout_expires_cookie() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);

    let req = TestRequest::post().uri("/api/admin/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == COOKIE)
        .unwrap();
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(actix_web::cookie::time::Duration::ZERO));
}

// =============================================================================
// Weeks & resources
// =============================================================================

#[actix_rt::test]
async fn test_week_and_resource_flow() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);
    let token = login!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    // 创建周
    let req = TestRequest::post()
        .uri("/api/admin/weeks")
        .insert_header(auth.clone())
        .set_json(json!({ "titulo": "Modelo entidad-relación" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let week = json_body(resp).await["data"].clone();
    let week_id = week["id"].as_i64().unwrap();
    assert_eq!(week["numero"], 1);
    assert_eq!(week["habilitada"], false);

    // 无法解析的链接：400，不写入
    let req = TestRequest::post()
        .uri(&format!("/api/admin/weeks/{}/resources", week_id))
        .insert_header(auth.clone())
        .set_json(json!({ "nombre": "Enlace roto", "locator": "https://example.com/x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Enter a valid GitHub file link");

    // 合法链接
    let req = TestRequest::post()
        .uri(&format!("/api/admin/weeks/{}/resources", week_id))
        .insert_header(auth.clone())
        .set_json(json!({ "nombre": "Notas", "github_url": DOCX_URL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let res = json_body(resp).await["data"].clone();
    let res_id = res["id"].as_i64().unwrap();
    assert_eq!(
        res["links"]["download_url"],
        "https://raw.githubusercontent.com/o/r/main/notes.docx"
    );

    // 编辑资源
    let req = TestRequest::put()
        .uri(&format!("/api/admin/weeks/{}/resources/{}", week_id, res_id))
        .insert_header(auth.clone())
        .set_json(json!({ "nombre": "Reporte", "locator": PDF_URL }))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["links"]["preview_url"], body["data"]["links"]["download_url"]);

    // 详情
    let req = TestRequest::get()
        .uri(&format!("/api/admin/weeks/{}", week_id))
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["titulo"], "Modelo entidad-relación");
    assert_eq!(body["data"]["archivos"].as_array().unwrap().len(), 1);

    // 仪表盘
    let req = TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["semanas"], 1);
    assert_eq!(body["data"]["archivos"], 1);
    assert!(body["data"]["ultima_actualizacion"].is_string());

    // 删除周同时删除资源
    let req = TestRequest::delete()
        .uri(&format!("/api/admin/weeks/{}", week_id))
        .insert_header(auth.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&format!("/api/admin/weeks/{}", week_id))
        .insert_header(auth.clone())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = TestRequest::get()
        .uri("/api/admin/dashboard")
        .insert_header(auth)
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["archivos"], 0);
}

#[actix_rt::test]
async fn test_duplicate_week_number_conflict() {
    let (_dir, ctx) = setup(LocatorKind::Drive).await;
    let app = init_app!(ctx);
    let token = login!(app);

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = TestRequest::post()
            .uri("/api/admin/weeks")
            .cookie(Cookie::new(COOKIE, token.clone()))
            .set_json(json!({ "numero": 4, "titulo": "Semana cuatro" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
}

#[actix_rt::test]
async fn test_malformed_body_uses_envelope() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);
    let token = login!(app);

    let req = TestRequest::post()
        .uri("/api/admin/weeks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["code"], 1000);
}

// =============================================================================
// Public listing
// =============================================================================

#[actix_rt::test]
async fn test_public_listing_hides_disabled_weeks() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);
    let token = login!(app);
    let auth = ("Authorization", format!("Bearer {}", token));

    let mut ids = Vec::new();
    for titulo in ["Semana oculta", "Semana visible"] {
        let req = TestRequest::post()
            .uri("/api/admin/weeks")
            .insert_header(auth.clone())
            .set_json(json!({ "titulo": titulo }))
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let req = TestRequest::put()
        .uri(&format!("/api/admin/weeks/{}/visibility", ids[1]))
        .insert_header(auth)
        .set_json(json!({ "habilitada": true }))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["habilitada"], true);

    let req = TestRequest::get().uri("/api/public/weeks").to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    let weeks = body["data"].as_array().unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0]["titulo"], "Semana visible");
}

#[actix_rt::test]
async fn test_public_resolve() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);

    let uri = format!(
        "/api/public/resolve?url={}",
        urlencoding::encode("https://github.com/o/r/blob/main/docs/report.pdf")
    );
    let resp = test::call_service(&app, TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(
        body["data"]["download_url"],
        "https://raw.githubusercontent.com/o/r/main/docs/report.pdf"
    );

    let uri = format!(
        "/api/public/resolve?url={}",
        urlencoding::encode("https://example.com/x")
    );
    let resp = test::call_service(&app, TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/public/resolve").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Health
// =============================================================================

#[actix_rt::test]
async fn test_health_reports_storage() {
    let (_dir, ctx) = setup(LocatorKind::Github).await;
    let app = init_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["storage"]["backend"], "sqlite");

    let resp = test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(&app, TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
