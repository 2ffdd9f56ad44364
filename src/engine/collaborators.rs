// ==========================================
// 供热信访工单识别系统 - 外部协作方接口
// ==========================================
// 职责: 图片预处理 / OCR 识别 两个外部协作方的 trait 定义 + 默认实现
// 约定:
// - 协作方失败以 IntakeError 返回，由编排器转为单条失败记录
// - OCR 协作方返回的降级描述（如缺少语言包）按普通文本交回，不在此识别
// ==========================================

use crate::intake::error::{IntakeError, IntakeResult};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// 默认支持的图片扩展名
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

// ==========================================
// 协作方 Trait
// ==========================================

/// 图片预处理协作方: 图片引用 → 图片字节
#[async_trait]
pub trait ImagePreprocessor: Send + Sync {
    async fn preprocess(&self, source_ref: &str) -> IntakeResult<Vec<u8>>;
}

/// OCR 协作方: 图片字节 → 文本
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> IntakeResult<String>;

    /// 是否允许多个任务同时调用同一实例（默认否，批处理退化为顺序执行）
    fn supports_concurrent_use(&self) -> bool {
        false
    }
}

// ==========================================
// FileImagePreprocessor - 读取本地图片文件
// ==========================================
#[derive(Debug, Clone)]
pub struct FileImagePreprocessor {
    extensions: Vec<String>,
}

impl Default for FileImagePreprocessor {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl FileImagePreprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加允许的扩展名（不含点，大小写不敏感）
    pub fn with_extension(mut self, extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
        self
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn check_extension(&self, path: &Path) -> IntakeResult<()> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        if self.extensions.contains(&ext) {
            Ok(())
        } else {
            Err(IntakeError::UnsupportedFormat(
                path.display().to_string(),
                self.extensions.join("/"),
            ))
        }
    }
}

#[async_trait]
impl ImagePreprocessor for FileImagePreprocessor {
    async fn preprocess(&self, source_ref: &str) -> IntakeResult<Vec<u8>> {
        let path = Path::new(source_ref);
        self.check_extension(path)?;

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IntakeError::FileNotFound(source_ref.to_string()),
            _ => IntakeError::FileReadError(format!("{}: {}", source_ref, e)),
        })?;

        if bytes.is_empty() {
            return Err(IntakeError::PreprocessError {
                source_ref: source_ref.to_string(),
                message: "文件内容为空".to_string(),
            });
        }

        debug!(source_ref, bytes = bytes.len(), "图片读取完成");
        Ok(bytes)
    }
}

// ==========================================
// TranscriptOcrEngine - 已识别文本直通
// ==========================================
// 用途: 输入已是 OCR 转写文本（UTF-8），无需识别引擎即可跑通流水线
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptOcrEngine;

#[async_trait]
impl OcrEngine for TranscriptOcrEngine {
    async fn recognize(&self, image: &[u8]) -> IntakeResult<String> {
        Ok(String::from_utf8_lossy(image).into_owned())
    }

    fn supports_concurrent_use(&self) -> bool {
        true
    }
}

// ==========================================
// 闭包适配器
// ==========================================

/// 同步闭包 → ImagePreprocessor
pub struct FnPreprocessor<F> {
    f: F,
}

impl<F> FnPreprocessor<F>
where
    F: Fn(&str) -> IntakeResult<Vec<u8>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> ImagePreprocessor for FnPreprocessor<F>
where
    F: Fn(&str) -> IntakeResult<Vec<u8>> + Send + Sync,
{
    async fn preprocess(&self, source_ref: &str) -> IntakeResult<Vec<u8>> {
        (self.f)(source_ref)
    }
}

/// 同步闭包 → OcrEngine
pub struct FnOcrEngine<F> {
    f: F,
    concurrent: bool,
}

impl<F> FnOcrEngine<F>
where
    F: Fn(&[u8]) -> IntakeResult<String> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f, concurrent: false }
    }

    /// 声明闭包可被并发调用
    pub fn concurrent(mut self) -> Self {
        self.concurrent = true;
        self
    }
}

#[async_trait]
impl<F> OcrEngine for FnOcrEngine<F>
where
    F: Fn(&[u8]) -> IntakeResult<String> + Send + Sync,
{
    async fn recognize(&self, image: &[u8]) -> IntakeResult<String> {
        (self.f)(image)
    }

    fn supports_concurrent_use(&self) -> bool {
        self.concurrent
    }
}
