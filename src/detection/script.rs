//! # 外部检测脚本调用
//!
//! 把图像写入唯一命名的临时文件，以文件路径为参数调起检测脚本，
//! 等待退出后按固定文本标记解析标准输出。

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use regex::Regex;
use tokio::process::Command;
use uuid::Uuid;

use super::{DetectionReport, FaceDetector};
use crate::config::DetectionConfig;
use crate::error::{AppError, Result};

/// 解析失败时返回的固定消息
const PARSE_FAILURE: &str = "face not processed correctly";

/// 调用外部脚本的检测实现
pub struct ScriptDetector {
    config: DetectionConfig,
    temp_dir: PathBuf,
}

impl ScriptDetector {
    #[must_use]
    pub fn new(config: DetectionConfig, temp_dir: Option<PathBuf>) -> Self {
        let temp_dir = temp_dir.unwrap_or_else(std::env::temp_dir);
        Self { config, temp_dir }
    }

    /// 生成唯一命名的临时文件路径
    fn temp_image_path(&self) -> PathBuf {
        self.temp_dir.join(format!("face-{}.jpg", Uuid::new_v4()))
    }

    /// 运行脚本并收集输出
    async fn run_script(&self, image_path: &Path) -> Result<std::process::Output> {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .arg(&self.config.script)
            .arg(image_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = match self.config.timeout_seconds {
            Some(secs) => tokio::time::timeout(Duration::from_secs(secs), command.output())
                .await
                .map_err(|_| {
                    AppError::Processing(format!("face detection timed out after {secs}s"))
                })?,
            // 缺省不设超时：与被替换实现一致，阻塞等待脚本退出
            None => command.output().await,
        }
        .map_err(|e| AppError::Processing(format!("failed to run face detection script: {e}")))?;

        Ok(output)
    }
}

#[async_trait::async_trait]
impl FaceDetector for ScriptDetector {
    async fn detect(&self, image: &[u8]) -> Result<DetectionReport> {
        let temp_path = self.temp_image_path();
        tokio::fs::write(&temp_path, image).await?;

        let result = self.run_script(&temp_path).await;

        // 无论成败都尝试清理临时文件
        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            tracing::warn!("failed to remove temp image {}: {e}", temp_path.display());
        }

        let output = result?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::warn!("face detection stderr: {}", stderr.trim());
        }

        if !output.status.success() {
            return Err(AppError::Processing(format!(
                "face detection process exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_report(&stdout)
    }
}

/// 按固定标记解析脚本标准输出
///
/// 期望四行：`Original path:` / `Processed path:` /
/// `Original embedding:` / `Processed embedding:`，任一缺失即失败。
pub fn parse_report(stdout: &str) -> Result<DetectionReport> {
    let original_path = capture(stdout, r"Original path:\s*([^\r\n]+)")?;
    let processed_path = capture(stdout, r"Processed path:\s*([^\r\n]+)")?;
    let original_embedding = capture_vector(stdout, r"Original embedding:\s*(\[[^\r\n]*\])")?;
    let processed_embedding = capture_vector(stdout, r"Processed embedding:\s*(\[[^\r\n]*\])")?;

    Ok(DetectionReport {
        original_path: PathBuf::from(original_path.trim()),
        processed_path: PathBuf::from(processed_path.trim()),
        original_embedding,
        processed_embedding,
    })
}

fn capture(stdout: &str, pattern: &str) -> Result<String> {
    let re = Regex::new(pattern).map_err(|e| AppError::Internal(e.to_string()))?;
    re.captures(stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| AppError::Processing(PARSE_FAILURE.to_string()))
}

fn capture_vector(stdout: &str, pattern: &str) -> Result<Vec<f32>> {
    let raw = capture(stdout, pattern)?;
    serde_json::from_str(&raw).map_err(|_| AppError::Processing(PARSE_FAILURE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_report, PARSE_FAILURE};
    use crate::error::AppError;

    fn full_output() -> String {
        let embedding: Vec<String> = (0..128).map(|i| format!("{:.6}", f64::from(i) / 128.0)).collect();
        let embedding = format!("[{}]", embedding.join(", "));
        format!(
            "Processing image: /tmp/face-x.jpg\n\
             Original face saved to: /tmp/original_cropped_face.jpg\n\
             Processed face saved to: /tmp/processed_face.jpg\n\
             Original embedding: {embedding}\n\
             Processed embedding: {embedding}\n\
             Original path: /tmp/original_cropped_face.jpg\n\
             Processed path: /tmp/processed_face.jpg\n"
        )
    }

    #[test]
    fn parses_complete_output() {
        let report = parse_report(&full_output()).expect("full output parses");
        assert_eq!(
            report.original_path.to_str().unwrap(),
            "/tmp/original_cropped_face.jpg"
        );
        assert_eq!(
            report.processed_path.to_str().unwrap(),
            "/tmp/processed_face.jpg"
        );
        assert_eq!(report.original_embedding.len(), 128);
        assert_eq!(report.processed_embedding.len(), 128);
    }

    #[test]
    fn missing_marker_is_processing_error() {
        let without_path = full_output().replace("Original path:", "Original bath:");
        match parse_report(&without_path) {
            Err(AppError::Processing(msg)) => assert_eq!(msg, PARSE_FAILURE),
            other => panic!("expected processing error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_embedding_is_processing_error() {
        let broken = full_output().replace("Original embedding: [", "Original embedding: [oops, ");
        match parse_report(&broken) {
            Err(AppError::Processing(msg)) => assert_eq!(msg, PARSE_FAILURE),
            other => panic!("expected processing error, got {other:?}"),
        }
    }

    #[test]
    fn detection_failure_line_does_not_parse() {
        let stdout = "Face not detected or error occurred.\n";
        assert!(parse_report(stdout).is_err());
    }
}
