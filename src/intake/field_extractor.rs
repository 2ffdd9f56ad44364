// ==========================================
// 供热信访工单识别系统 - 字段抽取器
// ==========================================
// 职责: 规范化文本 → 工单号/姓名/电话/来件日期/诉求内容
// 规则: 见 extraction_rules.rs（每字段一张有序规则表）
// 约定: 抽取永不失败，未命中即空字符串；电话未命中为 "****"
// ==========================================

use crate::domain::complaint::ExtractedFields;
use crate::domain::types::PHONE_SENTINEL;
use crate::intake::extraction_rules::{
    first_match, FieldRule, BODY_LABEL, DATE_RULES, NAME_RULES, PHONE_RULES, WORK_ORDER_RULES,
};
use crate::intake::text_normalizer::normalize;
use regex::Regex;
use tracing::debug;

pub struct FieldExtractor;

impl FieldExtractor {
    /// 从规范化后的 OCR 文本中抽取全部字段
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let work_order_id = self.extract_work_order_id(text);
        let name = self.extract_name(text);
        let phone = self.extract_phone(text);
        let created_at = self.extract_created_at(text);
        let body = self.extract_body(text, &work_order_id, &name, &phone);

        ExtractedFields {
            work_order_id,
            name,
            phone,
            body,
            created_at,
        }
    }

    pub fn extract_work_order_id(&self, text: &str) -> String {
        run_rules("work_order_id", &WORK_ORDER_RULES, text).unwrap_or_default()
    }

    pub fn extract_name(&self, text: &str) -> String {
        run_rules("name", &NAME_RULES, text).unwrap_or_default()
    }

    /// 未命中返回 "****"（区分"无/脱敏"与抽取缺陷）
    pub fn extract_phone(&self, text: &str) -> String {
        run_rules("phone", &PHONE_RULES, text).unwrap_or_else(|| PHONE_SENTINEL.to_string())
    }

    pub fn extract_created_at(&self, text: &str) -> String {
        run_rules("created_at", &DATE_RULES, text).unwrap_or_default()
    }

    /// 抽取诉求内容
    ///
    /// 1. 优先取 "诉求内容：" 标签之后的全部文本
    /// 2. 否则取全文，剔除已抽取的工单号/姓名/电话（电话为 "****" 时不剔除）
    ///
    /// 姓名只在带 "姓名" 标签处剔除：兜底规则取到的裸汉字往往是地点的开头
    ///
    /// 结果总是再规范化一次并去除首尾空白
    pub fn extract_body(&self, text: &str, work_order_id: &str, name: &str, phone: &str) -> String {
        if let Some(labeled) = BODY_LABEL
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
        {
            debug!(rule = "labeled", "诉求内容命中标签");
            return normalize(labeled).trim().to_string();
        }

        let mut body = text.trim().to_string();
        body = strip_value(&body, r"工单(?:编号|号码|号)?\s*[:：]?\s*", work_order_id, Label::Optional);
        body = strip_value(&body, r"姓名\s*[:：]?\s*", name, Label::Required);
        if phone != PHONE_SENTINEL {
            body = strip_value(
                &body,
                r"(?:联系电话|电话|手机号码|手机)\s*[:：]?\s*",
                phone,
                Label::Optional,
            );
        }

        debug!(rule = "fallback_full_text", "诉求内容取全文剔除字段");
        normalize(&body).trim().to_string()
    }
}

/// 规则表求值并记录命中规则
fn run_rules(field: &'static str, rules: &[FieldRule], text: &str) -> Option<String> {
    let hit = first_match(rules, text);
    match &hit {
        Some(m) => debug!(field, rule = m.rule, value = %m.value, "字段命中"),
        None => debug!(field, "字段未命中"),
    }
    hit.map(|m| m.value)
}

/// 剔除字段值时标签是否必须出现
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Optional,
    Required,
}

/// 剔除 "标签 + 值"，值为空时原样返回
fn strip_value(text: &str, label_pattern: &str, value: &str, label: Label) -> String {
    if value.is_empty() {
        return text.to_string();
    }

    let quantifier = match label {
        Label::Optional => "?",
        Label::Required => "",
    };
    let pattern = format!("(?:{}){}{}", label_pattern, quantifier, regex::escape(value));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        // 值已转义，理论上不会失败；失败时只在标签可选时退化为纯文本替换
        Err(_) if label == Label::Optional => text.replace(value, ""),
        Err(_) => text.to_string(),
    }
}

/// 便捷函数：抽取全部字段
pub fn extract(text: &str) -> ExtractedFields {
    FieldExtractor.extract(text)
}
