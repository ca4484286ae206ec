//! 注册与登录流程集成测试

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn signup_then_login_round_trip() {
    let app = common::setup().await;

    common::signup(&app.router, "alice", "secret-pw", "admin", "able").await;

    let (code, body) = common::request(
        &app.router,
        "POST",
        "/login",
        Some(json!({"username": "alice", "password": "secret-pw"})),
    )
    .await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["role"], "admin");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn signup_stores_role_and_status_as_submitted() {
    let app = common::setup().await;

    // 角色与状态原样入库，不做服务端校验
    common::signup(&app.router, "weird", "pw-123", "made-up-role", "frozen").await;

    let (code, body) = common::request(&app.router, "GET", "/getAccount", None).await;
    assert_eq!(code, StatusCode::OK);
    let accounts = body["accounts"].as_array().expect("accounts array");
    let row = accounts
        .iter()
        .find(|a| a["username"] == "weird")
        .expect("created account listed");
    assert_eq!(row["role"], "made-up-role");
    assert_eq!(row["status"], "frozen");
    // 密码哈希不允许出现在任何列表响应里
    assert!(row.get("password").is_none());
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = common::setup().await;
    common::signup(&app.router, "alice", "pw-one", "user", "able").await;

    let (code, body) = common::request(
        &app.router,
        "POST",
        "/signup",
        Some(json!({"username": "alice", "password": "pw-two", "role": "user", "status": "able"})),
    )
    .await;

    assert_eq!(code, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username already exists.");
}

#[tokio::test]
async fn disabled_account_rejected_even_with_correct_password() {
    let app = common::setup().await;
    common::signup(&app.router, "bob", "right-pw", "user", "disable").await;

    for password in ["right-pw", "wrong-pw"] {
        let (code, body) = common::request(
            &app.router,
            "POST",
            "/login",
            Some(json!({"username": "bob", "password": password})),
        )
        .await;
        assert_eq!(code, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Account is disabled");
    }
}

#[tokio::test]
async fn wrong_password_unauthorized() {
    let app = common::setup().await;
    common::signup(&app.router, "carol", "correct", "user", "able").await;

    let (code, _) = common::request(
        &app.router,
        "POST",
        "/login",
        Some(json!({"username": "carol", "password": "incorrect"})),
    )
    .await;
    assert_eq!(code, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_account_not_found() {
    let app = common::setup().await;

    let (code, _) = common::request(
        &app.router,
        "POST",
        "/login",
        Some(json!({"username": "ghost", "password": "whatever"})),
    )
    .await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_credentials_bad_request() {
    let app = common::setup().await;

    let (code, _) =
        common::request(&app.router, "POST", "/login", Some(json!({"username": "x"}))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, _) = common::request(
        &app.router,
        "POST",
        "/signup",
        Some(json!({"username": "x", "password": ""})),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
}
