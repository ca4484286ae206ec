//! # 成员管理处理器

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use sea_orm::{DbErr, Set, entity::*, query::*};
use serde::Deserialize;
use serde_json::json;

use entity::{members, members::Entity as Members};

use crate::api::response;
use crate::api::server::AppState;
use crate::error::{AppError, Result};

/// 外键违反：SQLite/MySQL 的报错文本都带 FOREIGN KEY 字样
fn is_foreign_key_violation(err: &DbErr) -> bool {
    err.to_string().to_uppercase().contains("FOREIGN KEY")
}

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub account_id: Option<String>,
    pub name: Option<String>,
    pub position_id: Option<i32>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// 创建成员
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<Response> {
    let (Some(name), Some(position_id)) = (
        request.name.filter(|n| !n.is_empty()),
        request.position_id,
    ) else {
        return Err(AppError::BadRequest(
            "Name and position_id are required.".to_string(),
        ));
    };

    let member = members::ActiveModel {
        account_id: Set(request.account_id),
        name: Set(name),
        position_id: Set(position_id),
        address: Set(request.address),
        phone_number: Set(request.phone_number),
        email: Set(request.email),
        ..Default::default()
    };

    let inserted = match Members::insert(member).exec(state.db.as_ref()).await {
        Ok(result) => result,
        Err(err) if is_foreign_key_violation(&err) => {
            return Err(AppError::BadRequest(
                "Invalid account_id or position_id.".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(response::created(json!({
        "success": true,
        "message": "Member created successfully.",
        "member_id": inserted.last_insert_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub position_id: Option<i32>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl UpdateMemberRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position_id.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
    }
}

/// 部分更新成员：只更新出现的字段
pub async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<i32>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Response> {
    if request.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let member = Members::find_by_id(member_id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    let mut active: members::ActiveModel = member.into();

    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(position_id) = request.position_id {
        active.position_id = Set(position_id);
    }
    if let Some(address) = request.address {
        active.address = Set(Some(address));
    }
    if let Some(phone_number) = request.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(email) = request.email {
        active.email = Set(Some(email));
    }

    match active.update(state.db.as_ref()).await {
        Ok(_) => Ok(response::success(json!({
            "Status": "Member updated successfully",
        }))),
        Err(err) if is_foreign_key_violation(&err) => Err(AppError::BadRequest(
            "Invalid account_id or position_id.".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}
