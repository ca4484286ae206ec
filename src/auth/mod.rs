//! # 认证模块
//!
//! 密码哈希由 bcrypt 承担（在账户处理器内调用），这里提供 JWT 管理。

mod jwt;

pub use jwt::{JwtClaims, JwtManager};
