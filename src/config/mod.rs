// ==========================================
// 供热信访工单识别系统 - 配置层
// ==========================================
// 职责: 关键词配置（只读加载）、批处理选项
// 存储: config.json（由外部应用维护）
// ==========================================

pub mod batch_options;
pub mod config_manager;
pub mod keyword_config;
pub mod ordered_map;

// 重导出核心类型
pub use batch_options::BatchOptions;
pub use config_manager::ConfigManager;
pub use keyword_config::KeywordConfig;
pub use ordered_map::OrderedMap;
