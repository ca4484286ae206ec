//! 集成测试共用装配：内存数据库 + 临时存储目录 + 完整路由

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, Set, EntityTrait};
use serde_json::Value;
use tower::ServiceExt;

use facegate::AppConfig;
use facegate::api::routes;
use facegate::api::server::AppState;
use facegate::app::AppContext;
use facegate::detection::FaceDetector;

pub struct TestApp {
    pub router: Router,
    pub db: Arc<DatabaseConnection>,
    pub storage_root: PathBuf,
    _tmp: tempfile::TempDir,
}

pub async fn setup() -> TestApp {
    setup_with_detector(None).await
}

pub async fn setup_with_detector(detector: Option<Arc<dyn FaceDetector>>) -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect test db");
    Migrator::up(&db, None).await.expect("run migrations");
    let db = Arc::new(db);

    let tmp = tempfile::tempdir().expect("temp dir");
    let storage_root = tmp.path().join("public");

    let mut config = AppConfig::default();
    config.storage.root = storage_root.clone();
    config.storage.public_base_url = "http://localhost:8888".to_string();
    config.storage.temp_dir = Some(tmp.path().join("tmp"));

    let mut context = AppContext::new(Arc::new(config), db.clone());
    if let Some(detector) = detector {
        context = context.with_detector(detector);
    }

    let router = routes::create_routes(AppState::new(Arc::new(context)));

    TestApp {
        router,
        db,
        storage_root,
        _tmp: tmp,
    }
}

/// 发送一次请求并取回 (状态码, JSON 消息体)
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

/// 直接写入一个职位，返回 id
pub async fn insert_position(db: &DatabaseConnection, name: &str) -> i32 {
    let position = entity::positions::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    entity::positions::Entity::insert(position)
        .exec(db)
        .await
        .expect("insert position")
        .last_insert_id
}

/// 直接写入一个成员，返回 id
pub async fn insert_member(
    db: &DatabaseConnection,
    account_id: Option<&str>,
    name: &str,
    position_id: i32,
) -> i32 {
    let member = entity::members::ActiveModel {
        account_id: Set(account_id.map(str::to_string)),
        name: Set(name.to_string()),
        position_id: Set(position_id),
        ..Default::default()
    };
    entity::members::Entity::insert(member)
        .exec(db)
        .await
        .expect("insert member")
        .last_insert_id
}

/// 通过 /signup 建账户
pub async fn signup(router: &Router, username: &str, password: &str, role: &str, status: &str) {
    let (code, _) = request(
        router,
        "POST",
        "/signup",
        Some(serde_json::json!({
            "username": username,
            "password": password,
            "role": role,
            "status": status,
        })),
    )
    .await;
    assert_eq!(code, StatusCode::OK, "signup {username} failed");
}

/// 生成一张可解码的小 JPEG
pub fn jpeg_fixture() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(8, 8));
    let mut out = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut out),
        image::ImageFormat::Jpeg,
    )
    .expect("encode fixture");
    out
}

/// base64 编码，带 data-URI 前缀
pub fn base64_data_uri(bytes: &[u8]) -> String {
    use base64::Engine;
    format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
