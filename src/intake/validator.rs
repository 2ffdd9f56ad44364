// ==========================================
// 供热信访工单识别系统 - 字段格式校验
// ==========================================
// 职责: 工单号/电话格式校验，输出校验提示
// 红线: 校验失败只写提示，不改变"成功"状态（宽松策略）
// ==========================================

use crate::domain::complaint::ExtractedFields;
use once_cell::sync::Lazy;
use regex::Regex;

/// 校验提示文案
pub const INVALID_WORK_ORDER_NOTE: &str = "工单号格式不正确";
pub const INVALID_PHONE_NOTE: &str = "电话号码格式不正确";

static WORK_ORDER_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("WORK_ORDER_FORMAT 正则非法"));

static MOBILE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("MOBILE_FORMAT 正则非法"));

static LANDLINE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,4}-[0-9]{7,8}$").expect("LANDLINE_FORMAT 正则非法"));

pub struct FieldValidator;

impl FieldValidator {
    pub fn is_valid_work_order_id(&self, work_order_id: &str) -> bool {
        WORK_ORDER_FORMAT.is_match(work_order_id)
    }

    /// "****" 哨兵不是合法号码
    pub fn is_valid_phone(&self, phone: &str) -> bool {
        MOBILE_FORMAT.is_match(phone) || LANDLINE_FORMAT.is_match(phone)
    }

    /// 返回全部校验提示（按 工单号、电话 顺序）
    pub fn validate(&self, fields: &ExtractedFields) -> Vec<String> {
        let mut notes = Vec::new();

        if !self.is_valid_work_order_id(&fields.work_order_id) {
            notes.push(INVALID_WORK_ORDER_NOTE.to_string());
        }

        if !self.is_valid_phone(&fields.phone) {
            notes.push(INVALID_PHONE_NOTE.to_string());
        }

        notes
    }
}
