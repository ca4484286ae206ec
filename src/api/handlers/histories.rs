//! # 出入记录处理器
//!
//! 与人脸登记同构但不经过检测脚本：解码、转码 JPEG、按账户目录
//! 落盘、写 `tbl_enter_history`。

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use chrono::{NaiveTime, TimeZone, Utc};
use chrono_tz::Asia::Ho_Chi_Minh;
use sea_orm::{FromQueryResult, JoinType, Set, entity::*, query::*};
use serde::{Deserialize, Serialize};
use serde_json::json;

use entity::{
    enter_histories, enter_histories::Entity as EnterHistories, members,
    members::Entity as Members,
};

use crate::api::response;
use crate::api::server::AppState;
use crate::error::{AppError, Result};
use crate::storage::{self, ImageKind, ImageStore};

#[derive(Debug, Deserialize)]
pub struct CreateHistoryRequest {
    #[serde(rename = "base64Image")]
    pub base64_image: Option<String>,
    pub member_id: Option<i32>,
}

/// 记录一次进入事件
pub async fn create_enter_history(
    State(state): State<AppState>,
    Json(request): Json<CreateHistoryRequest>,
) -> Result<Response> {
    let (Some(base64_image), Some(member_id)) = (
        request.base64_image.filter(|s| !s.is_empty()),
        request.member_id,
    ) else {
        return Err(AppError::BadRequest(
            "Base64 image and member_id are required!".to_string(),
        ));
    };

    let member = Members::find_by_id(member_id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found!".to_string()))?;
    let account_dir = member
        .account_id
        .clone()
        .unwrap_or_else(|| "unlinked".to_string());

    let image_bytes = storage::decode_base64_image(&base64_image)?;
    let jpeg = storage::reencode_jpeg(&image_bytes)?;

    let staged = state
        .store
        .stage(
            ImageKind::History,
            &account_dir,
            &ImageStore::unique_file_name(),
            &jpeg,
        )
        .await?;

    let row = enter_histories::ActiveModel {
        member_id: Set(member_id),
        face_image: Set(staged.url().to_string()),
        enter_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    if let Err(err) = EnterHistories::insert(row).exec(state.db.as_ref()).await {
        staged.discard().await;
        return Err(err.into());
    }

    let stored = staged.commit().await?;

    Ok(response::created(json!({
        "message": "Entry history created successfully!",
        "data": {
            "member_id": member_id,
            "face_image": stored.url,
        },
    })))
}

/// 删除一条出入记录及其抓拍
pub async fn delete_histories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response> {
    let row = EnterHistories::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("History record not found".to_string()))?;

    state.store.remove_by_url(&row.face_image).await;

    EnterHistories::delete_by_id(id)
        .exec(state.db.as_ref())
        .await?;

    Ok(response::success(json!({
        "message": "History record and image deleted successfully",
    })))
}

/// 出入记录联成员的行
#[derive(Debug, Serialize, FromQueryResult)]
pub struct HistoryRow {
    pub id: i32,
    pub enter_at: chrono::NaiveDateTime,
    pub member_id: i32,
    pub face_image: String,
    pub account_id: Option<String>,
    pub name: String,
}

/// 全部出入记录（联成员姓名与账户）
pub async fn get_all_histories(State(state): State<AppState>) -> Result<Response> {
    let rows = EnterHistories::find()
        .select_only()
        .column(enter_histories::Column::Id)
        .column(enter_histories::Column::EnterAt)
        .column(enter_histories::Column::MemberId)
        .column(enter_histories::Column::FaceImage)
        .column(members::Column::AccountId)
        .column_as(members::Column::Name, "name")
        .join(JoinType::InnerJoin, enter_histories::Relation::Members.def())
        .into_model::<HistoryRow>()
        .all(state.db.as_ref())
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound("No history records found".to_string()));
    }

    Ok(response::success(json!({
        "message": "History records retrieved successfully",
        "data": rows,
    })))
}

/// 出入记录裸表，不做联查
pub async fn get_histories(State(state): State<AppState>) -> Result<Response> {
    let rows = EnterHistories::find().all(state.db.as_ref()).await?;

    if rows.is_empty() {
        return Err(AppError::NotFound("No history records found".to_string()));
    }

    Ok(response::success(json!({
        "message": "History records retrieved successfully",
        "data": rows,
    })))
}

/// 按成员查询的出入记录行
#[derive(Debug, Serialize, FromQueryResult)]
pub struct HistoryDetailRow {
    pub entry_id: i32,
    pub enter_at: chrono::NaiveDateTime,
    pub face_image: String,
    pub member_id: i32,
    pub name: String,
    pub position_id: i32,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// 某个成员的全部出入记录
pub async fn get_histories_by_member_id(
    State(state): State<AppState>,
    Path(member_id): Path<i32>,
) -> Result<Response> {
    let rows = EnterHistories::find()
        .select_only()
        .column_as(enter_histories::Column::Id, "entry_id")
        .column(enter_histories::Column::EnterAt)
        .column(enter_histories::Column::FaceImage)
        .column_as(members::Column::Id, "member_id")
        .column_as(members::Column::Name, "name")
        .column(members::Column::PositionId)
        .column(members::Column::Address)
        .column(members::Column::PhoneNumber)
        .column(members::Column::Email)
        .join(JoinType::InnerJoin, enter_histories::Relation::Members.def())
        .filter(enter_histories::Column::MemberId.eq(member_id))
        .into_model::<HistoryDetailRow>()
        .all(state.db.as_ref())
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound(
            "No history records found for this member".to_string(),
        ));
    }

    Ok(response::success(json!({
        "message": "History records retrieved successfully",
        "data": rows,
    })))
}

/// 今日出入统计
///
/// 按河内时区的自然日取窗口，统计总进入数与未识别（member_id = -1）数。
pub async fn his_statistics(State(state): State<AppState>) -> Result<Response> {
    let db = state.db.as_ref();

    let today_local = Utc::now().with_timezone(&Ho_Chi_Minh).date_naive();
    let midnight_local = today_local.and_time(NaiveTime::MIN);
    // .single() 处理本地时间在夏令时边界上的歧义
    let start_utc = Ho_Chi_Minh
        .from_local_datetime(&midnight_local)
        .single()
        .ok_or_else(|| AppError::Internal("ambiguous local midnight".to_string()))?
        .with_timezone(&Utc)
        .naive_utc();
    let end_utc = start_utc + chrono::Duration::days(1);

    let total = EnterHistories::find()
        .filter(enter_histories::Column::EnterAt.gte(start_utc))
        .filter(enter_histories::Column::EnterAt.lt(end_utc))
        .count(db)
        .await?;

    let importers = EnterHistories::find()
        .filter(enter_histories::Column::MemberId.eq(enter_histories::UNKNOWN_MEMBER_ID))
        .filter(enter_histories::Column::EnterAt.gte(start_utc))
        .filter(enter_histories::Column::EnterAt.lt(end_utc))
        .count(db)
        .await?;

    Ok(response::success(json!({
        "totalEntries": total,
        "totalImporters": importers,
    })))
}
