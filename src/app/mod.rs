//! # 应用装配

mod context;

pub use context::AppContext;
