// ==========================================
// 供热信访工单识别系统 - 名称相似度
// ==========================================
// 规范化: 合并空白 → 去首尾 → 仅保留 汉字/数字/空格 → 小写
// 相似度: 字符集合 Jaccard = |交集| / |并集|
// 说明: 对 OCR 错字、语序颠倒宽容；不是编辑距离，阈值按此口径标定
// ==========================================

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN 正则非法"));

static NON_MATCHABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{Han}0-9 ]").expect("NON_MATCHABLE 正则非法"));

/// 匹配用规范化形式
pub fn normalize_for_match(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text.trim(), " ");
    NON_MATCHABLE
        .replace_all(&collapsed, "")
        .trim()
        .to_lowercase()
}

/// 字符集合 Jaccard 系数
///
/// 任一为空 → 0；无交集 → 0
pub fn jaccard(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<char> = a.chars().collect();
    let set_b: HashSet<char> = b.chars().collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
