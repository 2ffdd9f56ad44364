// ==========================================
// 供热信访工单识别系统 - 诉求分类器
// ==========================================
// 规则（首个命中即返回，顺序 = 配置声明顺序）:
// 1. 关键词 → 分类 表：关键词是诉求内容的子串
// 2. 分类 → 关键词列表 表：任一关键词是子串
// 3. 均未命中 → "无"
// ==========================================

use crate::config::KeywordConfig;
use crate::domain::types::CATEGORY_NONE;
use tracing::debug;

pub struct ComplaintClassifier;

impl ComplaintClassifier {
    pub fn classify(&self, body: &str, config: &KeywordConfig) -> String {
        if let Some((keyword, category)) = config
            .keyword_to_category
            .iter()
            .find(|(keyword, _)| is_hit(body, keyword))
        {
            debug!(keyword, category = %category, "关键词表命中");
            return category.clone();
        }

        if let Some((category, keyword)) = config.category_to_keywords.iter().find_map(|(category, keywords)| {
            keywords
                .iter()
                .find(|k| is_hit(body, k))
                .map(|k| (category, k))
        }) {
            debug!(keyword = %keyword, category, "分类关键词列表命中");
            return category.to_string();
        }

        CATEGORY_NONE.to_string()
    }
}

// 空关键词视为无效配置，不参与匹配
fn is_hit(body: &str, keyword: &str) -> bool {
    !keyword.is_empty() && body.contains(keyword)
}

/// 便捷函数
pub fn classify(body: &str, config: &KeywordConfig) -> String {
    ComplaintClassifier.classify(body, config)
}
