// ==========================================
// 供热信访工单识别系统 - 识别流水线错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 预处理/OCR 协作方失败、配置读取失败、单条处理异常
// ==========================================

use thiserror::Error;

/// 识别流水线错误类型
#[derive(Error, Debug)]
pub enum IntakeError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("图片格式不支持: {0}（仅支持 {1}）")]
    UnsupportedFormat(String, String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 协作方错误 =====
    #[error("图片预处理失败 ({source_ref}): {message}")]
    PreprocessError { source_ref: String, message: String },

    #[error("OCR识别失败: {0}")]
    OcrError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ConfigParseError(String),

    // ===== 处理异常 =====
    #[error("处理过程发生异常: {0}")]
    ItemPanicked(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IntakeError::FileNotFound(err.to_string()),
            _ => IntakeError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        IntakeError::ConfigParseError(err.to_string())
    }
}

/// Result 类型别名
pub type IntakeResult<T> = Result<T, IntakeError>;
