//! # 处理器模块

pub mod accounts;
pub mod auth;
pub mod faces;
pub mod histories;
pub mod members;
pub mod positions;
