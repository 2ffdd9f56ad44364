// ==========================================
// 供热信访工单识别系统 - 小区目录条目
// ==========================================
// 对齐: heating.db t_Residential ⋈ t_HeatingArea
// 用途: 目录仓储读出，区域匹配器只读消费
// ==========================================

use serde::{Deserialize, Serialize};

/// 小区/楼栋 → 供热区域 三元组
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationEntry {
    pub location_name: String, // 小区名称（ResidentialName）
    pub building_name: String, // 楼栋名称（BuildingName，可为空）
    pub area_name: String,     // 供热区域（HeatingAreaName）
}

impl LocationEntry {
    pub fn new(
        location_name: impl Into<String>,
        building_name: impl Into<String>,
        area_name: impl Into<String>,
    ) -> Self {
        Self {
            location_name: location_name.into(),
            building_name: building_name.into(),
            area_name: area_name.into(),
        }
    }

    /// 小区名称和区域均非空才可参与匹配
    pub fn is_usable(&self) -> bool {
        !self.location_name.trim().is_empty() && !self.area_name.trim().is_empty()
    }

    /// 楼栋名称至少 2 个字符才参与匹配（过短歧义大）
    pub fn has_matchable_building(&self) -> bool {
        self.building_name.chars().count() >= 2
    }
}
