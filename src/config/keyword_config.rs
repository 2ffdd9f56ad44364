// ==========================================
// 供热信访工单识别系统 - 关键词配置
// ==========================================
// 职责: 关键词 → 分类 / 分类 → 关键词列表 两张有序表
// 所有权: 由外部应用持有，批处理期间只读；导入新表时整体替换
// 兼容: 旧版 config.json 的 PascalCase 键名（KeywordToCategoryMap 等）
// ==========================================

use crate::config::ordered_map::OrderedMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// 关键词 → 分类（首个命中即返回）
    #[serde(default, alias = "KeywordToCategoryMap", alias = "keywordToCategory")]
    pub keyword_to_category: OrderedMap<String>,

    /// 分类 → 关键词列表（第一张表未命中时使用）
    #[serde(default, alias = "CategoryToKeywordsMap", alias = "categoryToKeywords")]
    pub category_to_keywords: OrderedMap<Vec<String>>,

    /// 小区名称 → 供热区域（旧版扁平映射，可作为目录来源）
    #[serde(default, alias = "CommunityToAreaMap", alias = "communityToArea")]
    pub community_to_area: OrderedMap<String>,
}

impl KeywordConfig {
    /// 空配置（分类恒为 "无"）
    pub fn empty() -> Self {
        Self {
            keyword_to_category: OrderedMap::new(),
            category_to_keywords: OrderedMap::new(),
            community_to_area: OrderedMap::new(),
        }
    }

    /// 仅由关键词表构造
    pub fn from_keyword_pairs<K, C>(pairs: impl IntoIterator<Item = (K, C)>) -> Self
    where
        K: Into<String>,
        C: Into<String>,
    {
        Self {
            keyword_to_category: pairs.into_iter().map(|(k, c)| (k, c.into())).collect(),
            ..Self::empty()
        }
    }

    /// 追加分类关键词列表（保持声明顺序）
    pub fn with_category_keywords(mut self, category: impl Into<String>, keywords: &[&str]) -> Self {
        self.category_to_keywords
            .insert(category, keywords.iter().map(|k| k.to_string()).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keyword_to_category.is_empty() && self.category_to_keywords.is_empty()
    }
}

impl Default for KeywordConfig {
    /// 内置默认表
    fn default() -> Self {
        Self::from_keyword_pairs([
            ("不热", "质量问题"),
            ("维修", "维修问题"),
            ("漏水", "维修问题"),
            ("故障", "维修问题"),
        ])
        .with_category_keywords("质量问题", &["不热", "冰凉", "18", "温乎"])
        .with_category_keywords("维修问题", &["管道", "地暖", "漏水", "爆管"])
        .with_category_keywords("政策咨询", &["退费", "收费", "缴费", "标准"])
        .with_category_keywords("服务问题", &["态度", "不接", "没人接", "骂人"])
    }
}
