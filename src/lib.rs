// ==========================================
// 供热信访工单识别系统 - 核心库
// ==========================================
// 输入: 信访工单扫描件（经外部预处理 + OCR 得到文本）
// 输出: 结构化工单（工单号/姓名/电话/日期/诉求内容/分类/供热区域）
// 技术栈: Rust + SQLite（小区目录只读）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 关键词配置、批处理选项
pub mod config;

// 识别流水线层 - 规范化/抽取/分类/校验
pub mod intake;

// 区域匹配层 - 小区目录 + 相似度
pub mod resolver;

// 数据仓储层 - 目录来源
pub mod repository;

// 引擎层 - 协作方接口 + 批处理编排
pub mod engine;

// 数据库基础设施（只读连接初始化）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ComplaintRecord, ExtractedFields, LocationEntry, ProcessStatus, AREA_UNKNOWN, CATEGORY_NONE,
    PHONE_SENTINEL,
};

// 配置
pub use config::{BatchOptions, ConfigManager, KeywordConfig};

// 流水线
pub use intake::{classify, extract, normalize, ComplaintParser, IntakeError, IntakeResult};

// 区域匹配
pub use resolver::{resolve, LocationCatalog};

// 仓储
pub use repository::{LocationCatalogRepository, RepositoryError, RepositoryResult};

// 引擎
pub use engine::{
    BatchEventSink, BatchOrchestrator, BatchProgress, BatchSummary, CancellationFlag,
    ImagePreprocessor, OcrEngine,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "供热信访工单识别系统";
