//! # 统一错误处理
//!
//! 全应用共用的错误类型与 `Result` 别名。所有处理器直接返回
//! `AppError`，由 `IntoResponse` 统一转换为 HTTP 状态码和 JSON 消息体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 全应用统一 `Result` 类型
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// 应用错误分类
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求缺少必填字段或字段非法
    #[error("{0}")]
    BadRequest(String),

    /// 凭证校验失败
    #[error("{0}")]
    Unauthorized(String),

    /// 账户被停用等权限拒绝
    #[error("{0}")]
    Forbidden(String),

    /// 目标记录不存在
    #[error("{0}")]
    NotFound(String),

    /// 唯一性冲突（如用户名重复）
    #[error("{0}")]
    Conflict(String),

    /// 外部检测进程失败或输出无法解析
    #[error("{0}")]
    Processing(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// 对应的 HTTP 状态码
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Processing(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 机器可读的错误码
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Processing(_) => "PROCESSING_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 服务端错误不向客户端泄露细节
        let message = if status.is_server_error() {
            tracing::error!("request failed: {self}");
            match &self {
                Self::Processing(msg) => msg.clone(),
                _ => "Internal Server Error".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = json!({
            "message": message,
            "code": self.code(),
        });

        (status, Json(body)).into_response()
    }
}
