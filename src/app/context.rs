//! 应用上下文（DI 容器）
//!
//! 统一持有跨模块共享的服务实例，便于在测试中注入替身实现。
//! 数据库句柄在启动时显式构造注入，不依赖任何模块级全局状态。

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::JwtManager;
use crate::config::AppConfig;
use crate::detection::{FaceDetector, ScriptDetector};
use crate::storage::ImageStore;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub db: Arc<DatabaseConnection>,
    pub jwt: Arc<JwtManager>,
    pub detector: Arc<dyn FaceDetector>,
    pub store: Arc<ImageStore>,
}

impl AppContext {
    /// 用生产实现装配上下文
    #[must_use]
    pub fn new(config: Arc<AppConfig>, db: Arc<DatabaseConnection>) -> Self {
        let jwt = Arc::new(JwtManager::new(&config.auth));
        let detector: Arc<dyn FaceDetector> = Arc::new(ScriptDetector::new(
            config.detection.clone(),
            config.storage.temp_dir.clone(),
        ));
        let store = Arc::new(ImageStore::new(&config.storage));

        Self {
            config,
            db,
            jwt,
            detector,
            store,
        }
    }

    /// 注入替身检测实现（测试用）
    #[must_use]
    pub fn with_detector(mut self, detector: Arc<dyn FaceDetector>) -> Self {
        self.detector = detector;
        self
    }
}
