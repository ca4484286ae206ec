//! 成员与职位 CRUD 集成测试

mod common;

use axum::http::StatusCode;
use sea_orm::EntityTrait;
use serde_json::json;

#[tokio::test]
async fn position_crud_cycle() {
    let app = common::setup().await;

    let (code, body) = common::request(
        &app.router,
        "POST",
        "/createpositions",
        Some(json!({"name": "Engineer"})),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    let id = body["id"].as_i64().expect("position id");

    let (code, body) = common::request(&app.router, "GET", "/getPosition", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (code, _) = common::request(
        &app.router,
        "PUT",
        &format!("/updatepositions/{id}"),
        Some(json!({"name": "Senior Engineer"})),
    )
    .await;
    assert_eq!(code, StatusCode::OK);

    let (code, body) = common::request(&app.router, "GET", "/getPosition", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Senior Engineer");

    let (code, _) = common::request(
        &app.router,
        "DELETE",
        &format!("/delpositions/{id}"),
        None,
    )
    .await;
    assert_eq!(code, StatusCode::OK);

    let (code, _) = common::request(
        &app.router,
        "DELETE",
        &format!("/delpositions/{id}"),
        None,
    )
    .await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn position_requires_name() {
    let app = common::setup().await;

    let (code, body) =
        common::request(&app.router, "POST", "/createpositions", Some(json!({}))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name is required");

    let (code, _) = common::request(
        &app.router,
        "PUT",
        "/updatepositions/1",
        Some(json!({"name": ""})),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_member_validates_and_links() {
    let app = common::setup().await;
    common::signup(&app.router, "alice", "pw", "user", "able").await;
    let position_id = common::insert_position(app.db.as_ref(), "Engineer").await;

    // 缺 name/position_id
    let (code, body) = common::request(
        &app.router,
        "POST",
        "/createmembers",
        Some(json!({"name": "No Position"})),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name and position_id are required.");

    // 指向不存在职位的外键违规
    let (code, body) = common::request(
        &app.router,
        "POST",
        "/createmembers",
        Some(json!({"name": "Bad Link", "position_id": 4242})),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid account_id or position_id.");

    // 正常创建
    let (code, body) = common::request(
        &app.router,
        "POST",
        "/createmembers",
        Some(json!({
            "account_id": "alice",
            "name": "Alice L",
            "position_id": position_id,
            "address": "12 Gate St",
            "phone_number": "555-0100",
            "email": "alice@example.com",
        })),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED, "body: {body}");
    assert_eq!(body["success"], true);
    assert!(body["member_id"].as_i64().is_some());
}

#[tokio::test]
async fn update_member_partial_fields_only() {
    let app = common::setup().await;
    let position_id = common::insert_position(app.db.as_ref(), "Engineer").await;
    let member_id = common::insert_member(app.db.as_ref(), None, "Old Name", position_id).await;

    // 空更新拒绝
    let (code, _) = common::request(
        &app.router,
        "PUT",
        &format!("/updateMember/{member_id}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    // 只更新名字，其余字段不动
    let (code, _) = common::request(
        &app.router,
        "PUT",
        &format!("/updateMember/{member_id}"),
        Some(json!({"name": "New Name"})),
    )
    .await;
    assert_eq!(code, StatusCode::OK);

    let member = entity::members::Entity::find_by_id(member_id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.name, "New Name");
    assert_eq!(member.position_id, position_id);
    assert!(member.address.is_none());

    // 不存在的成员
    let (code, _) = common::request(
        &app.router,
        "PUT",
        "/updateMember/4242",
        Some(json!({"name": "Ghost"})),
    )
    .await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}
