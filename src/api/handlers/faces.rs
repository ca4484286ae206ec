//! # 人脸登记处理器
//!
//! 注册流程：解码图片 → 调外部检测脚本 → 解析输出 → 两阶段落盘 →
//! 写 `tbl_register_faces`。删除同时清理磁盘文件，容忍文件已缺失。

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use chrono::Utc;
use sea_orm::{FromQueryResult, JoinType, Set, entity::*, query::*};
use serde::{Deserialize, Serialize};
use serde_json::json;

use entity::{
    accounts, members, members::Entity as Members, register_faces,
    register_faces::Entity as RegisterFaces,
};

use crate::api::response;
use crate::api::server::AppState;
use crate::error::{AppError, Result};
use crate::storage::{self, ImageKind, ImageStore};

/// 未绑定账户的成员落在这个目录段下
const UNLINKED_ACCOUNT_DIR: &str = "unlinked";

#[derive(Debug, Deserialize)]
pub struct RegisterFaceRequest {
    #[serde(rename = "base64Image")]
    pub base64_image: Option<String>,
    pub member_id: Option<i32>,
}

/// 登记一张人脸
pub async fn create_register_face(
    State(state): State<AppState>,
    Json(request): Json<RegisterFaceRequest>,
) -> Result<Response> {
    let (Some(base64_image), Some(member_id)) = (
        request.base64_image.filter(|s| !s.is_empty()),
        request.member_id,
    ) else {
        return Err(AppError::BadRequest(
            "Base64 image and member_id are required!".to_string(),
        ));
    };

    // 成员校验先行：成员不存在时既不写文件也不写记录
    let member = Members::find_by_id(member_id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found!".to_string()))?;
    let account_dir = member
        .account_id
        .clone()
        .unwrap_or_else(|| UNLINKED_ACCOUNT_DIR.to_string());

    let image_bytes = storage::decode_base64_image(&base64_image)?;
    let report = state.detector.detect(&image_bytes).await?;

    // 读取脚本写出的裁剪图并统一转码为 JPEG
    let original_bytes = tokio::fs::read(&report.original_path)
        .await
        .map_err(|e| AppError::Processing(format!("cropped image missing: {e}")))?;
    let processed_bytes = tokio::fs::read(&report.processed_path)
        .await
        .map_err(|e| AppError::Processing(format!("processed image missing: {e}")))?;
    let original_jpeg = storage::reencode_jpeg(&original_bytes)?;
    let processed_jpeg = storage::reencode_jpeg(&processed_bytes)?;

    // 两阶段：先写暂存名，记录落库后再改名生效
    let staged_original = state
        .store
        .stage(
            ImageKind::Upload,
            &account_dir,
            &ImageStore::unique_file_name(),
            &original_jpeg,
        )
        .await?;
    let staged_processed = match state
        .store
        .stage(
            ImageKind::Process,
            &account_dir,
            &ImageStore::unique_processed_file_name(),
            &processed_jpeg,
        )
        .await
    {
        Ok(staged) => staged,
        Err(err) => {
            staged_original.discard().await;
            return Err(err);
        }
    };

    let vector_json = serde_json::to_string(&report.original_embedding)
        .map_err(|e| AppError::Internal(format!("Failed to serialize image_vector: {e}")))?;
    let vector_process_json = serde_json::to_string(&report.processed_embedding)
        .map_err(|e| AppError::Internal(format!("Failed to serialize image_vector: {e}")))?;

    let row = register_faces::ActiveModel {
        member_id: Set(member_id),
        face_image: Set(staged_original.url().to_string()),
        face_image_process: Set(Some(staged_processed.url().to_string())),
        image_vector: Set(vector_json),
        image_vector_process: Set(Some(vector_process_json)),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let inserted = match RegisterFaces::insert(row).exec(state.db.as_ref()).await {
        Ok(result) => result,
        Err(err) => {
            staged_original.discard().await;
            staged_processed.discard().await;
            return Err(err.into());
        }
    };

    let face_image = match staged_original.commit().await {
        Ok(stored) => stored,
        Err(err) => {
            staged_processed.discard().await;
            rollback_row(&state, inserted.last_insert_id).await;
            return Err(err);
        }
    };
    let face_image_process = match staged_processed.commit().await {
        Ok(stored) => stored,
        Err(err) => {
            state.store.remove_by_url(&face_image.url).await;
            rollback_row(&state, inserted.last_insert_id).await;
            return Err(err);
        }
    };

    Ok(response::created(json!({
        "message": "Face registration created successfully!",
        "data": {
            "id": inserted.last_insert_id,
            "face_image": face_image.url,
            "face_image_process": face_image_process.url,
            "member_id": member_id,
            "account_id": member.account_id,
            "image_vector": report.original_embedding,
            "image_vector_process": report.processed_embedding,
        },
    })))
}

/// 文件生效失败时撤掉刚插入的记录，保证记录不指向不存在的文件
async fn rollback_row(state: &AppState, id: i32) {
    if let Err(e) = RegisterFaces::delete_by_id(id).exec(state.db.as_ref()).await {
        tracing::warn!("failed to roll back register face row {id}: {e}");
    }
}

#[derive(Debug, Deserialize)]
pub struct DetectFaceRequest {
    #[serde(rename = "base64Image")]
    pub base64_image: Option<String>,
}

/// 只跑检测不落库，返回脚本解析结果
pub async fn detect_face(
    State(state): State<AppState>,
    Json(request): Json<DetectFaceRequest>,
) -> Result<Response> {
    let Some(base64_image) = request.base64_image.filter(|s| !s.is_empty()) else {
        return Err(AppError::BadRequest("Base64 image is required!".to_string()));
    };

    let image_bytes = storage::decode_base64_image(&base64_image)?;
    let report = state.detector.detect(&image_bytes).await?;

    let body = serde_json::to_value(&report)
        .map_err(|e| AppError::Internal(format!("Failed to serialize report: {e}")))?;
    Ok(response::success(body))
}

/// 删除一条人脸登记
pub async fn delete_register_face(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response> {
    let row = RegisterFaces::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Face registration not found".to_string()))?;

    // 文件删除尽力而为，不影响记录删除
    state.store.remove_by_url(&row.face_image).await;
    if let Some(url) = &row.face_image_process {
        state.store.remove_by_url(url).await;
    }

    RegisterFaces::delete_by_id(id).exec(state.db.as_ref()).await?;

    Ok(response::success(json!({
        "message": "Face registration and image deleted successfully",
    })))
}

/// 按成员查全部登记图与向量
pub async fn get_image_by_id(
    State(state): State<AppState>,
    Path(member_id): Path<i32>,
) -> Result<Response> {
    let rows = RegisterFaces::find()
        .filter(register_faces::Column::MemberId.eq(member_id))
        .all(state.db.as_ref())
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound(
            "No data found for the given member_id".to_string(),
        ));
    }

    let data = rows
        .iter()
        .map(|row| -> Result<serde_json::Value> {
            let vector = row
                .vector()
                .map_err(|e| AppError::Internal(format!("Failed to process image_vector: {e}")))?;
            let vector_process = row
                .vector_process()
                .map_err(|e| AppError::Internal(format!("Failed to process image_vector: {e}")))?;
            Ok(json!({
                "id": row.id,
                "face_image_url": row.face_image,
                "image_vector": vector,
                "face_image_process": row.face_image_process,
                "image_vector_process": vector_process,
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(response::success(json!(data)))
}

/// 登记数据联账户信息的行
#[derive(Debug, Serialize, FromQueryResult)]
pub struct FaceWithAccountRow {
    pub id: i32,
    pub member_id: i32,
    pub face_image: String,
    pub image_vector: String,
    pub face_image_process: Option<String>,
    pub image_vector_process: Option<String>,
    pub username: Option<String>,
    pub status: Option<String>,
}

/// 全部登记数据联成员与账户
pub async fn get_all_data_with_username(State(state): State<AppState>) -> Result<Response> {
    let rows = RegisterFaces::find()
        .select_only()
        .column(register_faces::Column::Id)
        .column(register_faces::Column::MemberId)
        .column(register_faces::Column::FaceImage)
        .column(register_faces::Column::ImageVector)
        .column(register_faces::Column::FaceImageProcess)
        .column(register_faces::Column::ImageVectorProcess)
        .column_as(members::Column::AccountId, "username")
        .column_as(accounts::Column::Status, "status")
        .join(JoinType::LeftJoin, register_faces::Relation::Members.def())
        .join(JoinType::LeftJoin, members::Relation::Accounts.def())
        .into_model::<FaceWithAccountRow>()
        .all(state.db.as_ref())
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound(
            "No data found in the database".to_string(),
        ));
    }

    let data: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|row| {
            // 向量解析失败时记日志并置空，不让单行坏数据拖垮整个列表
            let vector: Option<Vec<f32>> = match serde_json::from_str(&row.image_vector) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Error parsing image_vector for ID {}: {e}", row.id);
                    None
                }
            };
            json!({
                "id": row.id,
                "member_id": row.member_id,
                "status": row.status,
                "username": row.username,
                "face_image_url": row.face_image,
                "image_vector": vector,
                "face_image_process": row.face_image_process,
                "image_vector_process": row.image_vector_process,
            })
        })
        .collect();

    Ok(response::success(json!(data)))
}

/// 人脸登记统计：已登记/未登记成员数
pub async fn get_face_registration_stats(State(state): State<AppState>) -> Result<Response> {
    let db = state.db.as_ref();

    let registered: Vec<i32> = Members::find()
        .select_only()
        .column(members::Column::Id)
        .distinct()
        .join(JoinType::InnerJoin, members::Relation::RegisterFaces.def())
        .into_tuple()
        .all(db)
        .await?;

    let total = Members::find().count(db).await?;
    let registered_count = registered.len() as u64;

    Ok(response::success(json!({
        "success": true,
        "data": {
            "registeredCount": registered_count,
            "notRegisteredCount": total.saturating_sub(registered_count),
        },
    })))
}
