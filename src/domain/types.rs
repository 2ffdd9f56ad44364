// ==========================================
// 供热信访工单识别系统 - 领域类型定义
// ==========================================
// 职责: 处理状态枚举 + 保留哨兵值
// 红线: 哨兵值表示"有意缺省"，与空字符串（未抽取到）区分
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 电话缺失/脱敏哨兵
pub const PHONE_SENTINEL: &str = "****";

/// 分类未命中哨兵（"无"）
pub const CATEGORY_NONE: &str = "无";

/// 供热区域未匹配哨兵（"未知"）
pub const AREA_UNKNOWN: &str = "未知";

// ==========================================
// 处理状态 (Process Status)
// ==========================================
// 序列化格式: 与原表格列一致的中文值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProcessStatus {
    #[default]
    #[serde(rename = "待处理")]
    Pending, // 已创建，尚未处理
    #[serde(rename = "成功")]
    Success, // 流水线跑通（可能附带校验提示）
    #[serde(rename = "失败")]
    Failed, // 预处理/OCR/流水线异常
}

impl ProcessStatus {
    /// 中文展示值
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Pending => "待处理",
            ProcessStatus::Success => "成功",
            ProcessStatus::Failed => "失败",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProcessStatus::Pending)
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_status_serde_uses_chinese_labels() {
        let json = serde_json::to_string(&ProcessStatus::Success).unwrap();
        assert_eq!(json, "\"成功\"");

        let parsed: ProcessStatus = serde_json::from_str("\"失败\"").unwrap();
        assert_eq!(parsed, ProcessStatus::Failed);
    }

    #[test]
    fn test_process_status_terminal() {
        assert!(!ProcessStatus::Pending.is_terminal());
        assert!(ProcessStatus::Success.is_terminal());
        assert!(ProcessStatus::Failed.is_terminal());
        assert_eq!(ProcessStatus::default(), ProcessStatus::Pending);
    }
}
