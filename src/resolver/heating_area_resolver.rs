// ==========================================
// 供热信访工单识别系统 - 供热区域匹配器
// ==========================================
// 匹配顺序（首个命中即返回，表内长名优先）:
// 1. 小区级: 原文包含 → 规范化包含 → 反向包含 → 相似度 ≥ 0.6
// 2. 楼栋级: 同上，相似度 ≥ 0.7（楼栋名短，歧义大）
// 3. 均未命中 → "未知"
// 纯函数: 诉求内容被编辑后可直接重算，无需重建目录
// ==========================================

use crate::domain::types::AREA_UNKNOWN;
use crate::resolver::location_catalog::{CatalogKey, LocationCatalog};
use crate::resolver::similarity::{jaccard, normalize_for_match};
use tracing::debug;

/// 小区级相似度阈值（含边界）
pub const LOCATION_TIER_THRESHOLD: f64 = 0.6;

/// 楼栋级相似度阈值（含边界）
pub const BUILDING_TIER_THRESHOLD: f64 = 0.7;

// 反向包含要求诉求内容至少 2 字，避免单字命中
const MIN_REVERSE_CONTAINS_LEN: usize = 2;

/// 命中方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Contains,
    NormalizedContains,
    ReverseContains,
    Similar(f64),
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Contains => "contains",
            MatchKind::NormalizedContains => "normalized_contains",
            MatchKind::ReverseContains => "reverse_contains",
            MatchKind::Similar(_) => "similar",
        }
    }

    /// 包含类命中记为 1.0
    pub fn score(&self) -> f64 {
        match self {
            MatchKind::Similar(score) => *score,
            _ => 1.0,
        }
    }
}

pub struct HeatingAreaResolver;

impl HeatingAreaResolver {
    pub fn resolve(&self, body: &str, catalog: &LocationCatalog) -> String {
        let body = body.trim();
        if body.is_empty() || catalog.is_empty() {
            return AREA_UNKNOWN.to_string();
        }

        let processed = normalize_for_match(body);
        let tiers = [
            ("location", catalog.location_tier(), LOCATION_TIER_THRESHOLD),
            ("building", catalog.building_tier(), BUILDING_TIER_THRESHOLD),
        ];

        for (tier, keys, threshold) in tiers {
            if let Some((hit, kind)) = match_tier(body, &processed, keys, threshold) {
                debug!(
                    tier,
                    key = %hit.key,
                    kind = kind.as_str(),
                    score = kind.score(),
                    area = %hit.area,
                    "供热区域命中"
                );
                return hit.area.clone();
            }
        }

        debug!(body_len = body.chars().count(), "供热区域未命中");
        AREA_UNKNOWN.to_string()
    }
}

fn match_tier<'a>(
    body: &str,
    processed: &str,
    keys: &'a [CatalogKey],
    threshold: f64,
) -> Option<(&'a CatalogKey, MatchKind)> {
    keys.iter()
        .find_map(|key| match_key(body, processed, key, threshold).map(|kind| (key, kind)))
}

fn match_key(body: &str, processed: &str, key: &CatalogKey, threshold: f64) -> Option<MatchKind> {
    if body.contains(key.key.as_str()) {
        return Some(MatchKind::Contains);
    }

    if key.normalized.is_empty() {
        return None;
    }

    if processed.contains(key.normalized.as_str()) {
        return Some(MatchKind::NormalizedContains);
    }

    if processed.chars().count() >= MIN_REVERSE_CONTAINS_LEN && key.normalized.contains(processed) {
        return Some(MatchKind::ReverseContains);
    }

    let score = jaccard(&key.normalized, processed);
    // 边界值必须命中：恰好 60%（小区级）/ 70%（楼栋级）重合算匹配，不能改成 >
    (score >= threshold).then_some(MatchKind::Similar(score))
}

/// 便捷函数
pub fn resolve(body: &str, catalog: &LocationCatalog) -> String {
    HeatingAreaResolver.resolve(body, catalog)
}
