//! 出入记录集成测试

mod common;

use axum::http::StatusCode;
use sea_orm::EntityTrait;
use serde_json::json;

#[tokio::test]
async fn create_history_stores_capture() {
    let app = common::setup().await;
    common::signup(&app.router, "alice", "pw", "user", "able").await;
    let position_id = common::insert_position(app.db.as_ref(), "Engineer").await;
    let member_id =
        common::insert_member(app.db.as_ref(), Some("alice"), "Alice L", position_id).await;

    let payload = common::base64_data_uri(&common::jpeg_fixture());
    let (code, body) = common::request(
        &app.router,
        "POST",
        "/createhistories",
        Some(json!({"base64Image": payload, "member_id": member_id})),
    )
    .await;

    assert_eq!(code, StatusCode::CREATED, "body: {body}");
    let url = body["data"]["face_image"].as_str().expect("face_image");
    assert!(url.starts_with("http://localhost:8888/histories/alice/"));

    // 文件真实存在
    let dir = app.storage_root.join("histories").join("alice");
    assert_eq!(std::fs::read_dir(dir).unwrap().count(), 1);

    // enter_at 自动填充
    let row = entity::enter_histories::Entity::find()
        .one(app.db.as_ref())
        .await
        .unwrap()
        .expect("history row");
    assert_eq!(row.member_id, member_id);
}

#[tokio::test]
async fn create_history_unknown_member_writes_nothing() {
    let app = common::setup().await;

    let payload = common::base64_data_uri(&common::jpeg_fixture());
    let (code, body) = common::request(
        &app.router,
        "POST",
        "/createhistories",
        Some(json!({"base64Image": payload, "member_id": 999})),
    )
    .await;

    assert_eq!(code, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Member not found!");
    assert!(!app.storage_root.join("histories").exists());
}

#[tokio::test]
async fn delete_history_survives_missing_file() {
    let app = common::setup().await;
    common::signup(&app.router, "alice", "pw", "user", "able").await;
    let position_id = common::insert_position(app.db.as_ref(), "Engineer").await;
    let member_id =
        common::insert_member(app.db.as_ref(), Some("alice"), "Alice L", position_id).await;

    let payload = common::base64_data_uri(&common::jpeg_fixture());
    common::request(
        &app.router,
        "POST",
        "/createhistories",
        Some(json!({"base64Image": payload, "member_id": member_id})),
    )
    .await;

    let row = entity::enter_histories::Entity::find()
        .one(app.db.as_ref())
        .await
        .unwrap()
        .expect("history row");

    std::fs::remove_dir_all(app.storage_root.join("histories")).unwrap();

    let (code, body) = common::request(
        &app.router,
        "DELETE",
        &format!("/deletehistories/{}", row.id),
        None,
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["message"], "History record and image deleted successfully");

    let rows = entity::enter_histories::Entity::find()
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn history_listing_endpoints() {
    let app = common::setup().await;
    common::signup(&app.router, "alice", "pw", "user", "able").await;
    let position_id = common::insert_position(app.db.as_ref(), "Engineer").await;
    let member_id =
        common::insert_member(app.db.as_ref(), Some("alice"), "Alice L", position_id).await;

    // 空表时 404
    let (code, _) = common::request(&app.router, "GET", "/getAllHistories", None).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
    let (code, _) = common::request(&app.router, "GET", "/getHistories", None).await;
    assert_eq!(code, StatusCode::NOT_FOUND);

    let payload = common::base64_data_uri(&common::jpeg_fixture());
    common::request(
        &app.router,
        "POST",
        "/createhistories",
        Some(json!({"base64Image": payload, "member_id": member_id})),
    )
    .await;

    let (code, body) = common::request(&app.router, "GET", "/getAllHistories", None).await;
    assert_eq!(code, StatusCode::OK);
    let rows = body["data"].as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Alice L");
    assert_eq!(rows[0]["account_id"], "alice");

    let (code, body) = common::request(
        &app.router,
        "GET",
        &format!("/getHistoriesByMemberId/{member_id}"),
        None,
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    let rows = body["data"].as_array().expect("rows");
    assert_eq!(rows[0]["member_id"], member_id);
    assert_eq!(rows[0]["position_id"], position_id);

    let (code, _) =
        common::request(&app.router, "GET", "/getHistoriesByMemberId/4242", None).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_statistics_counts_today_and_importers() {
    let app = common::setup().await;
    common::signup(&app.router, "alice", "pw", "user", "able").await;
    let position_id = common::insert_position(app.db.as_ref(), "Engineer").await;
    let member_id =
        common::insert_member(app.db.as_ref(), Some("alice"), "Alice L", position_id).await;

    let payload = common::base64_data_uri(&common::jpeg_fixture());
    common::request(
        &app.router,
        "POST",
        "/createhistories",
        Some(json!({"base64Image": payload, "member_id": member_id})),
    )
    .await;

    // 闸机侧的未识别记录直接写库（member_id = -1）
    let unknown = entity::enter_histories::ActiveModel {
        member_id: sea_orm::Set(entity::enter_histories::UNKNOWN_MEMBER_ID),
        face_image: sea_orm::Set("http://localhost:8888/histories/unknown/x.jpg".to_string()),
        enter_at: sea_orm::Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    entity::enter_histories::Entity::insert(unknown)
        .exec(app.db.as_ref())
        .await
        .unwrap();

    let (code, body) = common::request(&app.router, "GET", "/hisStatistics", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["totalEntries"], 2);
    assert_eq!(body["totalImporters"], 1);

    // 未识别记录不出现在联查列表里
    let (_, body) = common::request(&app.router, "GET", "/getAllHistories", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
