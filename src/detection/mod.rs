//! # 人脸检测集成
//!
//! 检测与特征提取由外部脚本完成，这里只定义窄接口：
//! 提交图像字节，得到结构化检测结果或失败。

mod script;

pub use script::ScriptDetector;

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;

/// 外部检测进程的解析结果
///
/// 路径指向脚本在本地磁盘写出的裁剪图；向量为定长浮点数组，
/// 维度由脚本侧模型决定。
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub original_path: PathBuf,
    pub processed_path: PathBuf,
    pub original_embedding: Vec<f32>,
    pub processed_embedding: Vec<f32>,
}

/// 人脸检测能力的窄接口
///
/// 生产实现为 [`ScriptDetector`]；测试中可注入替身。
#[async_trait::async_trait]
pub trait FaceDetector: Send + Sync {
    /// 对一张图像执行检测与特征提取
    async fn detect(&self, image: &[u8]) -> Result<DetectionReport>;
}
