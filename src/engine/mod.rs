// ==========================================
// 供热信访工单识别系统 - 批处理引擎层
// ==========================================
// 职责: 外部协作方接口、事件输出、取消标志、批处理编排
// 红线: 单条失败隔离；批处理永不整体失败
// ==========================================

pub mod cancel;
pub mod collaborators;
pub mod events;
pub mod orchestrator;

// 重导出核心类型
pub use cancel::CancellationFlag;
pub use collaborators::{
    FileImagePreprocessor, FnOcrEngine, FnPreprocessor, ImagePreprocessor, OcrEngine,
    TranscriptOcrEngine, DEFAULT_IMAGE_EXTENSIONS,
};
pub use events::{BatchEventSink, BatchProgress, CallbackEventSink, NoOpEventSink};
pub use orchestrator::{BatchOrchestrator, BatchSummary};
