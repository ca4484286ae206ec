//! # 配置管理模块
//!
//! 处理应用配置加载、验证和管理

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, DatabaseConfig, DetectionConfig, ServerConfig, StorageConfig,
};

use std::env;
use std::path::Path;

use crate::error::{AppError, Result};

/// 加载配置文件
///
/// 按 `RUST_ENV` 选择 `config/config.{env}.toml`，随后套用环境变量覆盖并验证。
pub fn load_config() -> Result<AppConfig> {
    let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    let config_file = format!("config/config.{env_name}.toml");

    let mut config = if Path::new(&config_file).exists() {
        let config_content = std::fs::read_to_string(&config_file)?;
        toml::from_str(&config_content)
            .map_err(|e| AppError::Internal(format!("解析配置文件失败 {config_file}: {e}")))?
    } else {
        tracing::warn!("配置文件不存在: {config_file}，使用默认配置");
        AppConfig::default()
    };

    apply_env_overrides(&mut config);
    config.validate().map_err(AppError::Internal)?;

    Ok(config)
}

/// 环境变量覆盖：密钥等敏感值不写入配置文件
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = env::var("DATABASE_URL") {
        config.database.url = url;
    }
    if let Ok(secret) = env::var("FACEGATE_JWT_SECRET") {
        config.auth.jwt_secret = secret;
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_database_url_rejected() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn sample_toml_parses() {
        let toml_src = r#"
            [server]
            bind_address = "0.0.0.0"
            port = 8888

            [database]
            url = "sqlite://data/facegate.db"

            [auth]
            jwt_secret = "dev-secret"
            jwt_expires_in = 3600

            [storage]
            root = "public"
            public_base_url = "http://localhost:8888"

            [detection]
            program = "python3"
            script = "model/face_crop.py"
        "#;
        let config: AppConfig = toml::from_str(toml_src).expect("parse sample config");
        assert_eq!(config.server.port, 8888);
        assert_eq!(config.detection.program, "python3");
        assert!(config.detection.timeout_seconds.is_none());
        assert!(config.validate().is_ok());
    }
}
