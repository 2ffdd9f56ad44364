// ==========================================
// 供热信访工单识别系统 - 供热区域匹配层
// ==========================================
// 职责: 小区目录索引构建 + 诉求内容 → 供热区域
// 红线: 目录批处理期间只读，匹配永不失败（兜底 "未知"）
// ==========================================

pub mod heating_area_resolver;
pub mod location_catalog;
pub mod similarity;

pub use heating_area_resolver::{
    resolve, HeatingAreaResolver, BUILDING_TIER_THRESHOLD, LOCATION_TIER_THRESHOLD,
};
pub use location_catalog::{CatalogKey, LocationCatalog, NAME_SUFFIXES};
pub use similarity::{jaccard, normalize_for_match};
