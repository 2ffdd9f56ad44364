// ==========================================
// 供热信访工单识别系统 - 小区目录（匹配索引）
// ==========================================
// 职责: 目录三元组 → 名称变体 → 供热区域 的扁平映射 + 两级匹配表
// 构建时机: 每次加载目录构建一次，批处理期间只读共享
// 变体规则:
// - 原名 / 小写 / 去空格 / 匹配规范化形式
// - 后缀剥离、常见后缀补全（小区、花园、苑、楼 ...）
// - 楼栋名 ≥2 字时额外生成 楼栋名、小区名+楼栋名
// 冲突: 同一变体对应多个区域时先写者胜
// ==========================================

use crate::config::OrderedMap;
use crate::domain::catalog::LocationEntry;
use crate::resolver::similarity::normalize_for_match;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// 常见小区/楼栋后缀
pub const NAME_SUFFIXES: [&str; 11] = [
    "小区", "花园", "家园", "苑", "庄", "园", "公寓", "大厦", "楼", "栋", "座",
];

/// 匹配表中的一个名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogKey {
    pub key: String,        // 变体原文（用于原文包含判断）
    pub normalized: String, // 匹配规范化形式（用于规范化包含与相似度）
    pub area: String,       // 供热区域
}

impl CatalogKey {
    pub fn char_len(&self) -> usize {
        self.key.chars().count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    variant_to_area: HashMap<String, String>,
    location_tier: Vec<CatalogKey>,
    building_tier: Vec<CatalogKey>,
    entry_count: usize,
}

impl LocationCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 由目录三元组构建（小区名或区域为空的条目被跳过）
    pub fn from_entries(entries: impl IntoIterator<Item = LocationEntry>) -> Self {
        let mut builder = CatalogBuilder::default();
        let mut entry_count = 0usize;
        let mut skipped = 0usize;

        for entry in entries {
            if !entry.is_usable() {
                skipped += 1;
                continue;
            }
            builder.add_entry(&entry);
            entry_count += 1;
        }

        let catalog = builder.finish(entry_count);
        info!(
            entries = catalog.entry_count,
            skipped,
            variants = catalog.variant_count(),
            location_keys = catalog.location_tier.len(),
            building_keys = catalog.building_tier.len(),
            "小区目录构建完成"
        );
        catalog
    }

    /// 由旧版 小区名称 → 供热区域 扁平映射构建（无楼栋信息）
    pub fn from_community_map(map: &OrderedMap<String>) -> Self {
        Self::from_entries(
            map.iter()
                .map(|(community, area)| LocationEntry::new(community, "", area.as_str())),
        )
    }

    /// 有效目录条目数
    pub fn len(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    pub fn variant_count(&self) -> usize {
        self.variant_to_area.len()
    }

    /// 变体精确查找
    pub fn area_for_variant(&self, variant: &str) -> Option<&str> {
        self.variant_to_area.get(variant).map(String::as_str)
    }

    /// 小区级匹配表（按名称长度降序）
    pub fn location_tier(&self) -> &[CatalogKey] {
        &self.location_tier
    }

    /// 楼栋级匹配表（按名称长度降序）
    pub fn building_tier(&self) -> &[CatalogKey] {
        &self.building_tier
    }
}

#[derive(Default)]
struct CatalogBuilder {
    variant_to_area: HashMap<String, String>,
    location_keys: Vec<String>,
    building_keys: Vec<String>,
}

#[derive(Clone, Copy)]
enum Tier {
    Location,
    Building,
}

impl CatalogBuilder {
    fn add_entry(&mut self, entry: &LocationEntry) {
        let location = entry.location_name.trim();
        let area = entry.area_name.trim();

        for variant in name_variants(location).into_iter().chain(suffix_variants(location)) {
            self.register(variant, area, Tier::Location);
        }

        if !entry.has_matchable_building() {
            return;
        }

        let building = entry.building_name.trim();
        for variant in name_variants(building).into_iter().chain(suffix_variants(building)) {
            self.register(variant, area, Tier::Building);
        }

        let combined = format!("{}{}", location, building);
        for variant in name_variants(&combined) {
            self.register(variant, area, Tier::Location);
        }
    }

    fn register(&mut self, variant: String, area: &str, tier: Tier) {
        if variant.is_empty() {
            return;
        }

        if let Some(existing) = self.variant_to_area.get(&variant) {
            if existing != area {
                debug!(variant = %variant, kept = %existing, dropped = %area, "名称变体冲突，保留先写入的区域");
            }
        } else {
            self.variant_to_area.insert(variant.clone(), area.to_string());
        }

        match tier {
            Tier::Location => self.location_keys.push(variant),
            Tier::Building => self.building_keys.push(variant),
        }
    }

    fn finish(self, entry_count: usize) -> LocationCatalog {
        let location_tier = build_tier(&self.location_keys, &self.variant_to_area);
        let building_tier = build_tier(&self.building_keys, &self.variant_to_area);

        LocationCatalog {
            variant_to_area: self.variant_to_area,
            location_tier,
            building_tier,
            entry_count,
        }
    }
}

/// 去重（按规范化形式，先到先得）后按长度降序稳定排序
fn build_tier(keys: &[String], variant_to_area: &HashMap<String, String>) -> Vec<CatalogKey> {
    let mut seen = HashSet::new();
    let mut tier = Vec::new();

    for key in keys {
        let normalized = normalize_for_match(key);
        let dedup_key = if normalized.is_empty() {
            key.clone()
        } else {
            normalized.clone()
        };
        if !seen.insert(dedup_key) {
            continue;
        }

        if let Some(area) = variant_to_area.get(key) {
            tier.push(CatalogKey {
                key: key.clone(),
                normalized,
                area: area.clone(),
            });
        }
    }

    tier.sort_by(|a, b| b.char_len().cmp(&a.char_len()));
    tier
}

/// 原名 / 小写 / 去空格 / 规范化
fn name_variants(name: &str) -> Vec<String> {
    let candidates = [
        name.to_string(),
        name.to_lowercase(),
        name.chars().filter(|c| !c.is_whitespace()).collect::<String>(),
        normalize_for_match(name),
    ];

    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

/// 后缀剥离（剩余 ≥2 字）与后缀补全（原名 >2 字且不以该后缀结尾）
fn suffix_variants(name: &str) -> Vec<String> {
    let name_len = name.chars().count();
    let mut variants = Vec::new();

    for suffix in NAME_SUFFIXES {
        match name.strip_suffix(suffix) {
            Some(stripped) => {
                let stripped = stripped.trim();
                if stripped.chars().count() >= 2 {
                    variants.push(stripped.to_string());
                }
            }
            None if name_len > 2 => variants.push(format!("{}{}", name, suffix)),
            None => {}
        }
    }
    variants
}
