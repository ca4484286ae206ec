//! # 职位管理处理器

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use sea_orm::{Set, entity::*, query::*};
use serde::Deserialize;
use serde_json::json;

use entity::{positions, positions::Entity as Positions};

use crate::api::response;
use crate::api::server::AppState;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub name: Option<String>,
}

/// 列出全部职位
pub async fn get_all_positions(State(state): State<AppState>) -> Result<Response> {
    let rows = Positions::find().all(state.db.as_ref()).await?;
    Ok(response::success(json!({
        "success": true,
        "data": rows,
    })))
}

/// 新建职位
pub async fn insert_position(
    State(state): State<AppState>,
    Json(request): Json<PositionRequest>,
) -> Result<Response> {
    let Some(name) = request.name.filter(|n| !n.is_empty()) else {
        return Err(AppError::BadRequest("Name is required".to_string()));
    };

    let position = positions::ActiveModel {
        name: Set(name),
        ..Default::default()
    };
    let inserted = Positions::insert(position).exec(state.db.as_ref()).await?;

    Ok(response::created(json!({
        "success": true,
        "message": "Position created successfully",
        "id": inserted.last_insert_id,
    })))
}

/// 更新职位名称
pub async fn update_position(
    State(state): State<AppState>,
    Path(position_id): Path<i32>,
    Json(request): Json<PositionRequest>,
) -> Result<Response> {
    let Some(name) = request.name.filter(|n| !n.is_empty()) else {
        return Err(AppError::BadRequest("Name is required".to_string()));
    };

    let position = Positions::find_by_id(position_id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Position not found".to_string()))?;

    let mut active: positions::ActiveModel = position.into();
    active.name = Set(name);
    active.update(state.db.as_ref()).await?;

    Ok(response::success(json!({
        "success": true,
        "message": "Position updated successfully",
    })))
}

/// 删除职位
pub async fn delete_position(
    State(state): State<AppState>,
    Path(position_id): Path<i32>,
) -> Result<Response> {
    let result = Positions::delete_by_id(position_id)
        .exec(state.db.as_ref())
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Position not found".to_string()));
    }

    Ok(response::success(json!({
        "success": true,
        "message": "Position deleted successfully",
    })))
}
