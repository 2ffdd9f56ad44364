// ==========================================
// 供热信访工单识别系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含抽取/匹配逻辑
// ==========================================

pub mod catalog;
pub mod complaint;
pub mod types;

// 重导出核心类型
pub use catalog::LocationEntry;
pub use complaint::{ComplaintRecord, ExtractedFields};
pub use types::{ProcessStatus, AREA_UNKNOWN, CATEGORY_NONE, PHONE_SENTINEL};
