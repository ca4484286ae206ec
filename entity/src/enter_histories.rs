//! # 进入记录实体定义
//!
//! `tbl_enter_history` 出入事件表的 Sea-ORM 实体模型。
//! `member_id` 不带外键：闸机侧会以 -1 记录未识别人员。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 未识别人员的哨兵 member_id
pub const UNKNOWN_MEMBER_ID: i32 = -1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tbl_enter_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub member_id: i32,
    pub face_image: String,
    pub enter_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id"
    )]
    Members,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
