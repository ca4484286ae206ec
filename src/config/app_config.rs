//! # 应用配置结构定义

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 应用主配置结构
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 认证配置
    #[serde(default)]
    pub auth: AuthConfig,
    /// 图片存储配置
    #[serde(default)]
    pub storage: StorageConfig,
    /// 人脸检测子进程配置
    #[serde(default)]
    pub detection: DetectionConfig,
}

/// HTTP 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub bind_address: String,
    /// 监听端口
    pub port: u16,
    /// 是否启用CORS
    pub enable_cors: bool,
    /// 允许的CORS源地址
    pub cors_origins: Vec<String>,
    /// 最大请求体大小（字节），图片以 base64 传输所以放宽
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8888,
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            max_request_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 连接URL
    pub url: String,
    /// 连接池最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/facegate.db".to_string(),
            max_connections: 10,
        }
    }
}

/// 认证配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT 签名密钥
    pub jwt_secret: String,
    /// 访问令牌有效期（秒）
    pub jwt_expires_in: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me".to_string(),
            jwt_expires_in: 3600,
        }
    }
}

/// 图片存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 存储根目录，其下为 uploads/ process/ histories/ 三类子目录
    pub root: PathBuf,
    /// 拼接公开图片 URL 用的基地址
    pub public_base_url: String,
    /// 临时文件目录，缺省用系统临时目录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            public_base_url: "http://localhost:8888".to_string(),
            temp_dir: None,
        }
    }
}

/// 人脸检测子进程配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// 解释器（如 python3）
    pub program: String,
    /// 检测脚本路径，作为第一个参数传入
    pub script: PathBuf,
    /// 传给解释器的额外参数，位于脚本路径之前
    #[serde(default)]
    pub args: Vec<String>,
    /// 等待子进程退出的超时（秒）。缺省不设超时，保持阻塞等待。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            script: PathBuf::from("model/face_crop.py"),
            args: Vec::new(),
            timeout_seconds: None,
        }
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err(format!("无效的服务器端口: {}", self.server.port));
        }

        if self.database.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }

        if self.auth.jwt_secret.is_empty() {
            return Err("auth.jwt_secret cannot be empty".to_string());
        }
        if self.auth.jwt_expires_in <= 0 {
            return Err("auth.jwt_expires_in must be positive".to_string());
        }

        if self.storage.public_base_url.is_empty() {
            return Err("storage.public_base_url cannot be empty".to_string());
        }

        if self.detection.program.is_empty() {
            return Err("detection.program cannot be empty".to_string());
        }

        Ok(())
    }
}
