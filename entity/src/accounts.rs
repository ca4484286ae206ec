//! # 账户实体定义
//!
//! `tbl_account` 登录账户表的 Sea-ORM 实体模型

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 账户状态：启用值，其余一律视为停用
pub const STATUS_ENABLED: &str = "able";

/// 账户实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tbl_account")]
pub struct Model {
    /// 用户名即主键，由调用方提供
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    /// bcrypt 哈希，序列化时不输出
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub status: String,
    pub email: Option<String>,
}

impl Model {
    /// 账户是否处于启用状态
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.status == STATUS_ENABLED
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::members::Entity")]
    Members,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
