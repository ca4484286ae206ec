//! # 账户管理处理器

use axum::extract::{Path, Query, State};
use axum::response::Response;
use bcrypt::{DEFAULT_COST, hash};
use sea_orm::{Condition, FromQueryResult, JoinType, Set, entity::*, query::*};
use serde::{Deserialize, Serialize};
use serde_json::json;

use entity::{accounts, accounts::Entity as Accounts, members, positions};

use crate::api::response;
use crate::api::server::AppState;
use crate::error::{AppError, Result};

/// 账户、成员、职位三表联查的行
#[derive(Debug, Serialize, FromQueryResult)]
pub struct AccountInfoRow {
    pub username: String,
    pub role: String,
    pub status: String,
    pub id: i32,
    pub member_name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub position_name: String,
}

fn account_info_query() -> Select<Accounts> {
    Accounts::find()
        .select_only()
        .column(accounts::Column::Username)
        .column(accounts::Column::Role)
        .column(accounts::Column::Status)
        .column_as(members::Column::Id, "id")
        .column_as(members::Column::Name, "member_name")
        .column(members::Column::Address)
        .column(members::Column::PhoneNumber)
        .column_as(members::Column::Email, "email")
        .column_as(positions::Column::Name, "position_name")
        .join(JoinType::InnerJoin, accounts::Relation::Members.def())
        .join(JoinType::InnerJoin, members::Relation::Positions.def())
}

/// 列出全部账户
pub async fn get_account(State(state): State<AppState>) -> Result<Response> {
    let accounts = Accounts::find().all(state.db.as_ref()).await?;
    Ok(response::success(json!({
        "Status": "Success",
        "accounts": accounts,
    })))
}

/// 账户+成员+职位联查
pub async fn get_all_infor_acc(State(state): State<AppState>) -> Result<Response> {
    let rows = account_info_query()
        .into_model::<AccountInfoRow>()
        .all(state.db.as_ref())
        .await?;

    Ok(response::success(json!({
        "Status": "Success",
        "accountsInfo": rows,
    })))
}

/// 按用户名联查单个账户
pub async fn get_account_by_id(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Response> {
    let row = account_info_query()
        .filter(accounts::Column::Username.eq(&account_id))
        .into_model::<AccountInfoRow>()
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(response::success(json!({
        "Status": "Success",
        "accountInfo": row,
    })))
}

/// 部分更新请求：只更新出现的字段
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub status: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

/// 按用户名部分更新账户
///
/// 密码在入库前做 bcrypt 哈希；没有任何可识别字段时直接拒绝，
/// 不触发任何存储变更。
pub async fn update_account_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
    axum::Json(request): axum::Json<UpdateAccountRequest>,
) -> Result<Response> {
    if request.status.is_none() && request.role.is_none() && request.password.is_none() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let account = Accounts::find_by_id(&username)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    let mut active: accounts::ActiveModel = account.into();

    if let Some(status) = request.status {
        active.status = Set(status);
    }
    if let Some(role) = request.role {
        active.role = Set(role);
    }
    if let Some(password) = request.password {
        let hashed = hash(&password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;
        active.password = Set(hashed);
    }

    active.update(state.db.as_ref()).await?;

    Ok(response::success(json!({
        "Status": "Account updated successfully",
    })))
}

/// 过滤查询参数
#[derive(Debug, Deserialize)]
pub struct AccountFilterQuery {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// 过滤查询结果行（不含密码哈希）
#[derive(Debug, Serialize, FromQueryResult)]
pub struct AccountFilterRow {
    pub username: String,
    pub role: String,
    pub status: String,
    pub email: Option<String>,
    pub member_id: i32,
    pub member_name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub member_email: Option<String>,
    pub position_name: Option<String>,
}

/// 按用户名/邮箱/角色过滤账户
///
/// 提供的条件以 OR 组合（沿用既有行为，见 DESIGN.md），至少要给一个。
pub async fn get_acc_by_filter(
    State(state): State<AppState>,
    Query(query): Query<AccountFilterQuery>,
) -> Result<Response> {
    if query.username.is_none() && query.email.is_none() && query.role.is_none() {
        return Err(AppError::BadRequest(
            "Please provide username, email, or role to search.".to_string(),
        ));
    }

    let mut condition = Condition::any();
    if let Some(username) = &query.username {
        condition = condition.add(accounts::Column::Username.eq(username));
    }
    if let Some(email) = &query.email {
        condition = condition.add(accounts::Column::Email.eq(email));
    }
    if let Some(role) = &query.role {
        condition = condition.add(accounts::Column::Role.eq(role));
    }

    let rows = Accounts::find()
        .select_only()
        .column(accounts::Column::Username)
        .column(accounts::Column::Role)
        .column(accounts::Column::Status)
        .column(accounts::Column::Email)
        .column_as(members::Column::Id, "member_id")
        .column_as(members::Column::Name, "member_name")
        .column(members::Column::Address)
        .column(members::Column::PhoneNumber)
        .column_as(members::Column::Email, "member_email")
        .column_as(positions::Column::Name, "position_name")
        .join(JoinType::InnerJoin, accounts::Relation::Members.def())
        .join(JoinType::LeftJoin, members::Relation::Positions.def())
        .filter(condition)
        .into_model::<AccountFilterRow>()
        .all(state.db.as_ref())
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound("Account not found".to_string()));
    }

    Ok(response::success(json!(rows)))
}

/// 账户统计：总数、启用数、已登记人脸的账户数
pub async fn acc_statistics(State(state): State<AppState>) -> Result<Response> {
    let db = state.db.as_ref();

    let total = Accounts::find().count(db).await?;

    let enabled = Accounts::find()
        .filter(accounts::Column::Status.eq(accounts::STATUS_ENABLED))
        .count(db)
        .await?;

    let registered: Vec<String> = Accounts::find()
        .select_only()
        .column(accounts::Column::Username)
        .distinct()
        .join(JoinType::InnerJoin, accounts::Relation::Members.def())
        .join(JoinType::InnerJoin, members::Relation::RegisterFaces.def())
        .into_tuple()
        .all(db)
        .await?;

    Ok(response::success(json!({
        "totalAccounts": total,
        "enabledAccounts": enabled,
        "registeredFaceAccounts": registered.len(),
    })))
}
