//! # API 响应辅助
//!
//! 处理器的成功出口。沿用各端点既有的 JSON 消息体形状，
//! 这里只统一状态码的落点。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

/// 200 OK
pub fn success(data: Value) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// 201 Created
pub fn created(data: Value) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}
