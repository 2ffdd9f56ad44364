// ==========================================
// 供热信访工单识别系统 - 信访工单领域模型
// ==========================================
// 职责: 单张图片处理结果（ComplaintRecord）+ 抽取中间结构（ExtractedFields）
// 红线:
// - status = Failed  ⇒ category/heating_area 为 None，error_message 非空
// - status = Success ⇒ category/heating_area 必有值（哨兵兜底，不留空）
// ==========================================

use crate::domain::types::ProcessStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// ExtractedFields - 字段抽取结果
// ==========================================
// 用途: 抽取器输出（OCR 文本 → 此结构）
// 约定: 空字符串表示"未抽取到"；phone 未命中时为 "****"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub work_order_id: String, // 工单号
    pub name: String,          // 姓名
    pub phone: String,         // 电话（未命中 → "****"）
    pub body: String,          // 诉求内容（已二次规范化）
    pub created_at: String,    // 来件日期（YYYY-MM-DD HH:MM，不做日历校验）
}

// ==========================================
// ComplaintRecord - 信访工单记录
// ==========================================
// 生命周期: 批处理编排器逐条创建，上报后不再修改
// 例外: 外部编辑器可改写 body，随后调用解析器重算 heating_area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    // ===== 抽取字段 =====
    pub work_order_id: String,
    pub name: String,
    pub phone: String,
    pub body: String,
    pub created_at: String,

    // ===== 派生字段 =====
    pub category: Option<String>,     // 分类（未命中 → "无"）
    pub heating_area: Option<String>, // 所属供热区域（未命中 → "未知"）

    // ===== 元信息 =====
    pub source_ref: String, // 原始图片路径
    pub status: ProcessStatus,
    pub error_message: Option<String>,
}

impl ComplaintRecord {
    /// 创建待处理记录
    pub fn pending(source_ref: impl Into<String>) -> Self {
        Self {
            work_order_id: String::new(),
            name: String::new(),
            phone: String::new(),
            body: String::new(),
            created_at: String::new(),
            category: None,
            heating_area: None,
            source_ref: source_ref.into(),
            status: ProcessStatus::Pending,
            error_message: None,
        }
    }

    /// 创建失败记录
    ///
    /// 派生字段保持缺省；空错误信息会被替换为通用描述，保证 error_message 非空
    pub fn failed(source_ref: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "处理失败（未知原因）".to_string()
        } else {
            message
        };

        Self {
            status: ProcessStatus::Failed,
            error_message: Some(message),
            ..Self::pending(source_ref)
        }
    }

    /// 由抽取结果 + 派生字段构造成功记录
    ///
    /// # 参数
    /// - fields: 抽取结果
    /// - category: 分类结果（已含 "无" 兜底）
    /// - heating_area: 区域结果（已含 "未知" 兜底）
    /// - validation_notes: 校验提示（非空时写入 error_message，但状态仍为成功）
    pub fn success(
        source_ref: impl Into<String>,
        fields: ExtractedFields,
        category: String,
        heating_area: String,
        validation_notes: &[String],
    ) -> Self {
        let error_message = if validation_notes.is_empty() {
            None
        } else {
            Some(validation_notes.join("; "))
        };

        Self {
            work_order_id: fields.work_order_id,
            name: fields.name,
            phone: fields.phone,
            body: fields.body,
            created_at: fields.created_at,
            category: Some(category),
            heating_area: Some(heating_area),
            source_ref: source_ref.into(),
            status: ProcessStatus::Success,
            error_message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ProcessStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == ProcessStatus::Failed
    }
}
