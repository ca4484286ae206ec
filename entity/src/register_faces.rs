//! # 注册人脸实体定义
//!
//! `tbl_register_faces` 人脸登记表的 Sea-ORM 实体模型。
//! `image_vector` / `image_vector_process` 以 JSON 文本保存定长浮点数组。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tbl_register_faces")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub member_id: i32,
    /// 原始人脸图片的公开 URL
    pub face_image: String,
    /// 处理后人脸图片的公开 URL
    pub face_image_process: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub image_vector: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_vector_process: Option<String>,
    pub created_at: DateTime,
}

impl Model {
    /// 反序列化存储的向量文本
    pub fn vector(&self) -> Result<Vec<f32>, serde_json::Error> {
        serde_json::from_str(&self.image_vector)
    }

    /// 反序列化处理后向量文本（缺失时为 `None`）
    pub fn vector_process(&self) -> Result<Option<Vec<f32>>, serde_json::Error> {
        self.image_vector_process
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }
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
