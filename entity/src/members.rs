//! # 成员实体定义
//!
//! `tbl_member` 受控人员表的 Sea-ORM 实体模型

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 成员实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tbl_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 关联账户用户名，可为空（未绑定登录账户的人员）
    pub account_id: Option<String>,
    pub name: String,
    pub position_id: i32,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Username"
    )]
    Accounts,
    #[sea_orm(
        belongs_to = "super::positions::Entity",
        from = "Column::PositionId",
        to = "super::positions::Column::Id"
    )]
    Positions,
    #[sea_orm(has_many = "super::register_faces::Entity")]
    RegisterFaces,
    #[sea_orm(has_many = "super::enter_histories::Entity")]
    EnterHistories,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::positions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Positions.def()
    }
}

impl Related<super::register_faces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RegisterFaces.def()
    }
}

impl Related<super::enter_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnterHistories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
