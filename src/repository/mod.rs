// ==========================================
// 供热信访工单识别系统 - 数据仓储层
// ==========================================
// 职责: 小区目录来源（heating.db / CSV），屏蔽存储细节
// 红线: 只读；Repository 不含匹配逻辑
// ==========================================

pub mod catalog_csv;
pub mod catalog_repo;
pub mod error;

// 重导出核心仓储
pub use catalog_csv::load_entries_from_csv;
pub use catalog_repo::{load_catalog_file, LocationCatalogRepository};
pub use error::{RepositoryError, RepositoryResult};
