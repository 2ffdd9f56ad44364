// ==========================================
// 供热信访工单识别系统 - 字段抽取规则表
// ==========================================
// 职责: 每个字段一张有序规则表（正则 + 取值函数），自上而下短路求值
// 约定:
// - 规则顺序即优先级，首个产出值的规则胜出
// - 取值函数返回 None 表示"此处匹配不算数"，从捕获组末尾起继续寻找同一规则的下一处匹配
//   （边界字符可能被下一处匹配复用，例如被拒绝的手机号与其后工单号之间的单个空格）
// - 正则均为编译期常量，构造失败属于程序错误
// ==========================================

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// 字段抽取规则
pub struct FieldRule {
    pub name: &'static str,
    pattern: Regex,
    finish: fn(&Captures<'_>) -> Option<String>,
}

/// 规则命中结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: &'static str,
    pub value: String,
}

impl FieldRule {
    fn new(name: &'static str, pattern: &str, finish: fn(&Captures<'_>) -> Option<String>) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern)
                .unwrap_or_else(|e| panic!("抽取规则 {} 正则非法: {}", name, e)),
            finish,
        }
    }

    /// 在文本中按出现顺序寻找第一个被取值函数接受的匹配
    pub fn apply(&self, text: &str) -> Option<RuleMatch> {
        let mut start = 0;
        while start <= text.len() {
            let caps = self.pattern.captures_at(text, start)?;
            if let Some(value) = (self.finish)(&caps) {
                return Some(RuleMatch {
                    rule: self.name,
                    value,
                });
            }

            let whole = caps.get(0)?;
            let resume = caps.get(1).map_or(whole.end(), |m| m.end());
            start = if resume > whole.start() {
                resume
            } else {
                next_char_boundary(text, whole.start())
            };
        }
        None
    }
}

/// pos 之后下一个字符边界；已在末尾时返回 len + 1
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| pos + c.len_utf8())
}

/// 规则表短路求值：返回第一条命中的规则
pub fn first_match(rules: &[FieldRule], text: &str) -> Option<RuleMatch> {
    rules.iter().find_map(|rule| rule.apply(text))
}

// ==========================================
// 标签词
// ==========================================

/// 表单上出现的字段标签（用于姓名截断 / 裸汉字姓名过滤）
pub const FIELD_LABELS: &[&str] = &[
    "工单编号", "工单号码", "工单号", "工单", "姓名", "联系电话", "电话", "手机", "联系人",
    "诉求内容", "投诉内容", "反映内容", "来电内容", "来件日期", "来电时间", "日期", "地址",
];

// ==========================================
// 工单号
// ==========================================
pub static WORK_ORDER_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        // 1. 固定前缀工单号: DH + 17 位数字
        FieldRule::new("fixed_prefix", r"(?i)(DH[0-9]{17})(?:[^0-9]|$)", group_upper),
        // 2. 带标签: 工单号：XXXX
        FieldRule::new(
            "labeled",
            r"工单(?:编号|号码|号)?\s*[:：]?\s*([A-Za-z0-9]{4,})",
            group_upper,
        ),
        // 3. 固定前缀工单号，容忍 OCR 插入的空白
        FieldRule::new(
            "fixed_prefix_noisy",
            r"(?i)(D\s*H(?:\s*[0-9]){17})(?:[^0-9]|$)",
            group_compact_upper,
        ),
        // 4. 兜底: 可选字母前缀 + 8 位以上数字（跳过手机号形态）
        FieldRule::new(
            "generic_digits",
            r"(?:^|[^A-Za-z0-9])([A-Za-z]?[0-9]{8,})(?:[^0-9]|$)",
            group_unless_mobile,
        ),
    ]
});

// ==========================================
// 姓名
// ==========================================
pub static NAME_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        // 1. 带标签: 姓名：张三（遇到空白/标点/数字/下一个标签即截断）
        FieldRule::new(
            "labeled",
            r"姓名\s*[:：]?\s*([\p{Han}A-Za-z·]+?)(?:\s|[0-9]|[:：,，;；。、]|电话|手机|联系|工单|诉求|投诉|反映|来件|来电|日期|地址|$)",
            group_trimmed,
        ),
        // 2. 兜底: 2~4 个连续汉字（跳过表单标签）
        FieldRule::new("bare_han", r"(\p{Han}{2,4})", group_unless_label),
    ]
});

// ==========================================
// 电话
// ==========================================
pub static PHONE_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        // 1. 11 位手机号（1[3-9] 开头，前后不能紧贴数字）
        FieldRule::new(
            "mobile",
            r"(?:^|[^0-9])(1[3-9][0-9]{9})(?:[^0-9]|$)",
            group_trimmed,
        ),
        // 2. 区号-座机号
        FieldRule::new(
            "landline",
            r"(?:^|[^0-9])([0-9]{3,4}-[0-9]{7,8})(?:[^0-9]|$)",
            group_trimmed,
        ),
    ]
});

// ==========================================
// 来件日期
// ==========================================
// 统一输出 YYYY-MM-DD HH:MM；无时间部分补 00:00
// 不做日历校验：13 月 / 32 日按原样接受
pub static DATE_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        // 1. 2025-10-13 12:38 / 2025/10/13 12:38 / 2025.10.13 12:38
        FieldRule::new(
            "iso_datetime",
            r"([0-9]{4})\s*[-/.]\s*([0-9]{1,2})\s*[-/.]\s*([0-9]{1,2})\s*(?:日|[Tt])?\s*([0-9]{1,2})\s*[:：]\s*([0-9]{2})",
            datetime_from_groups,
        ),
        // 2. 2025年10月13日 12:38
        FieldRule::new(
            "cn_datetime",
            r"([0-9]{4})\s*年\s*([0-9]{1,2})\s*月\s*([0-9]{1,2})\s*[日号]?\s*([0-9]{1,2})\s*[:：时点]\s*([0-9]{2})",
            datetime_from_groups,
        ),
        // 3. OCR 把 年/月/日 识别成形近字或拉丁字母: 2025F10A13H 12:38
        FieldRule::new(
            "ocr_substituted_datetime",
            r"([0-9]{4})\s*[年午牛干FfEeVv]\s*([0-9]{1,2})\s*[月用目AaBbHhJj]\s*([0-9]{1,2})\s*[日曰目口HhBbEeOo]?\s*([0-9]{1,2})\s*[:：.时]\s*([0-9]{2})",
            datetime_from_groups,
        ),
        // 4. 仅日期: 2025-10-13
        FieldRule::new(
            "iso_date",
            r"(?:^|[^0-9])([0-9]{4})[-/.]([0-9]{1,2})[-/.]([0-9]{1,2})(?:[^0-9]|$)",
            date_from_groups,
        ),
        // 5. 仅日期（中文或 OCR 形近替换）: 2025年10月13日 / 2025F10A13
        FieldRule::new(
            "cn_or_ocr_date",
            r"([0-9]{4})\s*[年午牛干FfEeVv]\s*([0-9]{1,2})\s*[月用目AaBbHhJj]\s*([0-9]{1,2})",
            date_from_groups,
        ),
        // 6. 两位年份: 25-10-13 / 25/10/13
        FieldRule::new(
            "short_year_date",
            r"(?:^|[^0-9])([0-9]{2})[-/]([0-9]{1,2})[-/]([0-9]{1,2})(?:[^0-9]|$)",
            short_year_date_from_groups,
        ),
    ]
});

// ==========================================
// 诉求内容标签
// ==========================================
// 标签之后的全部剩余文本即诉求内容
pub static BODY_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:诉求内容|投诉内容|反映内容|来电内容|反映问题)\s*[:：]\s*([\s\S]*)")
        .expect("BODY_LABEL 正则非法")
});

// 手机号完整形态（工单号兜底规则用来排除手机号）
static MOBILE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("MOBILE_SHAPE 正则非法"));

// ==========================================
// 取值函数
// ==========================================

fn group(caps: &Captures<'_>, idx: usize) -> Option<String> {
    caps.get(idx)
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

fn group_trimmed(caps: &Captures<'_>) -> Option<String> {
    group(caps, 1)
}

fn group_upper(caps: &Captures<'_>) -> Option<String> {
    group(caps, 1).map(|v| v.to_uppercase())
}

fn group_compact_upper(caps: &Captures<'_>) -> Option<String> {
    group(caps, 1).map(|v| {
        v.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase()
    })
}

fn group_unless_mobile(caps: &Captures<'_>) -> Option<String> {
    group_upper(caps).filter(|v| !MOBILE_SHAPE.is_match(v))
}

fn group_unless_label(caps: &Captures<'_>) -> Option<String> {
    group(caps, 1).filter(|v| !FIELD_LABELS.iter().any(|label| v.contains(label)))
}

fn datetime_from_groups(caps: &Captures<'_>) -> Option<String> {
    Some(format_date_time(
        &group(caps, 1)?,
        &group(caps, 2)?,
        &group(caps, 3)?,
        &group(caps, 4)?,
        &group(caps, 5)?,
    ))
}

fn date_from_groups(caps: &Captures<'_>) -> Option<String> {
    Some(format_date_time(
        &group(caps, 1)?,
        &group(caps, 2)?,
        &group(caps, 3)?,
        "0",
        "00",
    ))
}

fn short_year_date_from_groups(caps: &Captures<'_>) -> Option<String> {
    let year = format!("20{}", group(caps, 1)?);
    Some(format_date_time(
        &year,
        &group(caps, 2)?,
        &group(caps, 3)?,
        "0",
        "00",
    ))
}

/// 组装 YYYY-MM-DD HH:MM（月/日/时左补零，不做取值范围校验）
pub fn format_date_time(year: &str, month: &str, day: &str, hour: &str, minute: &str) -> String {
    format!(
        "{}-{:0>2}-{:0>2} {:0>2}:{:0>2}",
        year, month, day, hour, minute
    )
}
