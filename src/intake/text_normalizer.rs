// ==========================================
// 供热信访工单识别系统 - OCR 文本规范化
// ==========================================
// 职责:
// 1. 删除夹在两个汉字之间的空白（OCR 常在汉字间插入空格）
// 2. 连续空行合并为单个换行
// 顺序: 先处理汉字间空白，再处理空行；两步均迭代到不动点
// 性质: 纯函数、幂等 normalize(normalize(x)) == normalize(x)
// ==========================================

use once_cell::sync::Lazy;
use regex::Regex;

// 汉字 + 行内空白（不跨行）+ 汉字
static HAN_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{Han})[^\S\r\n]+(\p{Han})").expect("HAN_GAP 正则非法"));

// 两个及以上的（仅含空白的）换行
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n[^\S\r\n]*){2,}").expect("BLANK_LINES 正则非法"));

/// 规范化 OCR 文本
pub fn normalize(text: &str) -> String {
    let collapsed = replace_until_stable(text, &HAN_GAP, "$1$2");
    replace_until_stable(&collapsed, &BLANK_LINES, "\n")
}

/// 重复替换直到文本不再变化
///
/// 非重叠匹配会漏掉 "中 文 字" 中的第二个空白，所以需要迭代；
/// 每轮替换都会严格缩短文本，循环必然终止
fn replace_until_stable(text: &str, pattern: &Regex, replacement: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = pattern.replace_all(&current, replacement).into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}
