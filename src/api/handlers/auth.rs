//! # 认证处理器
//!
//! 登录签发 JWT，注册做唯一性检查并哈希密码

use axum::Json;
use axum::extract::State;
use axum::response::Response;
use bcrypt::{DEFAULT_COST, hash, verify};
use sea_orm::{Set, entity::*, query::*};
use serde::Deserialize;
use serde_json::json;

use entity::{accounts, accounts::Entity as Accounts};

use crate::api::response;
use crate::api::server::AppState;
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// 登录
///
/// 停用账户无论密码对错都拒绝；成功时签发带用户名与角色的限时令牌。
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response> {
    let (username, password) = match (request.username, request.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(AppError::BadRequest(
                "Username and password are required".to_string(),
            ));
        }
    };

    let account = Accounts::find_by_id(&username)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    if !account.is_enabled() {
        return Err(AppError::Forbidden("Account is disabled".to_string()));
    }

    let matches = verify(&password, &account.password)
        .map_err(|e| AppError::Internal(format!("Error comparing passwords: {e}")))?;
    if !matches {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let token = state.jwt.generate_token(&account.username, &account.role)?;

    Ok(response::success(json!({
        "status": "success",
        "token": token,
        "role": account.role,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
}

/// 注册新账户
///
/// 角色与状态按调用方提交原样入库，不做服务端默认值或取值校验。
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Response> {
    let (username, password) = match (request.username, request.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(AppError::BadRequest(
                "Username and password are required".to_string(),
            ));
        }
    };
    let (Some(role), Some(status)) = (request.role, request.status) else {
        return Err(AppError::BadRequest(
            "Role and status are required".to_string(),
        ));
    };

    let existing = Accounts::find_by_id(&username)
        .one(state.db.as_ref())
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Username already exists.".to_string()));
    }

    let hashed = hash(&password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Error hashing password: {e}")))?;

    let account = accounts::ActiveModel {
        username: Set(username.clone()),
        password: Set(hashed),
        role: Set(role),
        status: Set(status),
        email: Set(request.email),
    };

    Accounts::insert(account).exec(state.db.as_ref()).await?;

    Ok(response::success(json!({
        "status": "success",
        "message": "Successfully created account!",
        "username": username,
    })))
}
