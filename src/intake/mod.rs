// ==========================================
// 供热信访工单识别系统 - 识别流水线层
// ==========================================
// 职责: OCR 文本 → 结构化信访工单
// 流程: 规范化 → 字段抽取 → 分类 → 区域匹配 → 格式校验
// 红线: 流水线各步骤纯计算、永不失败；失败只来自外部协作方
// ==========================================

pub mod classifier;
pub mod complaint_parser;
pub mod error;
pub mod extraction_rules;
pub mod field_extractor;
pub mod text_normalizer;
pub mod validator;

// 重导出核心类型
pub use classifier::{classify, ComplaintClassifier};
pub use complaint_parser::ComplaintParser;
pub use error::{IntakeError, IntakeResult};
pub use field_extractor::{extract, FieldExtractor};
pub use text_normalizer::normalize;
pub use validator::{FieldValidator, INVALID_PHONE_NOTE, INVALID_WORK_ORDER_NOTE};
