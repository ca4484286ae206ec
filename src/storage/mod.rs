//! # 图片存储
//!
//! 按账户目录存放 JPEG 图片：`uploads/`（注册原图）、`process/`
//! （处理后图）、`histories/`（出入抓拍）。写入采用两阶段：先写
//! 暂存名，数据库记录落库后再改名生效，避免出现指向不存在文件的
//! 数据库行。删除容忍文件已缺失，只记日志。

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};

/// 图片类别，对应存储根目录下的固定子目录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// 注册原图
    Upload,
    /// 检测脚本处理后的图
    Process,
    /// 出入记录抓拍
    History,
}

impl ImageKind {
    /// 子目录名，同时也是公开 URL 的前缀段
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Upload => "uploads",
            Self::Process => "process",
            Self::History => "histories",
        }
    }

    fn from_dir(dir: &str) -> Option<Self> {
        match dir {
            "uploads" => Some(Self::Upload),
            "process" => Some(Self::Process),
            "histories" => Some(Self::History),
            _ => None,
        }
    }
}

/// 已落盘并生效的图片
#[derive(Debug)]
pub struct StoredImage {
    pub url: String,
    pub path: PathBuf,
}

/// 两阶段写入的中间态：文件已写到暂存名，尚未改名生效
#[derive(Debug)]
pub struct StagedImage {
    staging_path: PathBuf,
    final_path: PathBuf,
    url: String,
}

impl StagedImage {
    /// 生效后的公开 URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 改名生效
    pub async fn commit(self) -> Result<StoredImage> {
        tokio::fs::rename(&self.staging_path, &self.final_path).await?;
        Ok(StoredImage {
            url: self.url,
            path: self.final_path,
        })
    }

    /// 放弃写入，尽力删除暂存文件
    pub async fn discard(self) {
        if let Err(e) = tokio::fs::remove_file(&self.staging_path).await {
            tracing::warn!(
                "failed to remove staging file {}: {e}",
                self.staging_path.display()
            );
        }
    }
}

/// 图片存储句柄
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: config.root.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 生成 `{uuid}.jpg` 形式的唯一文件名
    #[must_use]
    pub fn unique_file_name() -> String {
        format!("{}.jpg", Uuid::new_v4())
    }

    /// 处理后图片的文件名带 `processed_` 前缀
    #[must_use]
    pub fn unique_processed_file_name() -> String {
        format!("processed_{}.jpg", Uuid::new_v4())
    }

    /// 拼接公开 URL
    #[must_use]
    pub fn url_for(&self, kind: ImageKind, account: &str, file_name: &str) -> String {
        format!("{}/{}/{account}/{file_name}", self.public_base_url, kind.dir())
    }

    fn dir_for(&self, kind: ImageKind, account: &str) -> PathBuf {
        self.root.join(kind.dir()).join(account)
    }

    /// 第一阶段：写入暂存名
    pub async fn stage(
        &self,
        kind: ImageKind,
        account: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StagedImage> {
        let dir = self.dir_for(kind, account);
        tokio::fs::create_dir_all(&dir).await?;

        let final_path = dir.join(file_name);
        let staging_path = dir.join(format!(".{file_name}.staging"));
        tokio::fs::write(&staging_path, bytes).await?;

        Ok(StagedImage {
            staging_path,
            final_path,
            url: self.url_for(kind, account, file_name),
        })
    }

    /// 从存储的公开 URL 还原磁盘路径
    ///
    /// 期望末三段为 `{kind}/{account}/{file}`；其余形式返回 `None`。
    #[must_use]
    pub fn locate(&self, url: &str) -> Option<PathBuf> {
        let parsed = url::Url::parse(url).ok()?;
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        if segments.len() < 3 {
            return None;
        }
        let n = segments.len();
        let kind = ImageKind::from_dir(segments[n - 3])?;
        let account = segments[n - 2];
        let file = segments[n - 1];
        if !is_safe_segment(account) || !is_safe_segment(file) {
            return None;
        }
        Some(self.dir_for(kind, account).join(file))
    }

    /// 按 URL 尽力删除文件：文件缺失或 URL 不可解析都不是错误
    pub async fn remove_by_url(&self, url: &str) {
        let Some(path) = self.locate(url) else {
            tracing::warn!("could not resolve stored image url: {url}");
            return;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::info!("deleted image: {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("image not found at: {}", path.display());
            }
            Err(e) => tracing::warn!("error deleting image file {}: {e}", path.display()),
        }
    }
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != ".."
        && !segment.contains('/')
        && !segment.contains('\\')
}

/// 解码 base64 图片负载，容忍 `data:image/...;base64,` 前缀
pub fn decode_base64_image(payload: &str) -> Result<Vec<u8>> {
    let data = payload
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,").map(|(_, tail)| tail))
        .unwrap_or(payload);

    BASE64
        .decode(data.trim())
        .map_err(|_| AppError::BadRequest("Invalid base64 image payload".to_string()))
}

/// 统一转码为 JPEG
pub fn reencode_jpeg(bytes: &[u8]) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)
        .map_err(|_| AppError::BadRequest("Invalid image data".to_string()))?;

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Jpeg)
        .map_err(|e| AppError::Internal(format!("jpeg encode failed: {e}")))?;
    Ok(out)
}
