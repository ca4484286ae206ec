//! # HTTP API
//!
//! Axum 服务器、路由与各资源处理器

pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;

pub use server::{ApiServer, AppState};
