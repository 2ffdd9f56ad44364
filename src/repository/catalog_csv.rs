// ==========================================
// 供热信访工单识别系统 - 小区目录 CSV 来源
// ==========================================
// 表头: 小区名称,楼栋名称,供热区域（楼栋名称可缺省）
// 兼容: 英文列名 ResidentialName / BuildingName / HeatingAreaName
//       及 location_name / building_name / area_name
// ==========================================

use crate::domain::catalog::LocationEntry;
use crate::repository::error::{RepositoryError, RepositoryResult};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

const LOCATION_HEADERS: &[&str] = &["小区名称", "ResidentialName", "location_name", "location"];
const BUILDING_HEADERS: &[&str] = &["楼栋名称", "BuildingName", "building_name", "building"];
const AREA_HEADERS: &[&str] = &["供热区域", "HeatingAreaName", "area_name", "area"];

/// 读取 CSV 目录文件
pub fn load_entries_from_csv(path: &Path) -> RepositoryResult<Vec<LocationEntry>> {
    let file = File::open(path).map_err(|e| RepositoryError::FileReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let location_idx = find_column(&headers, LOCATION_HEADERS)
        .ok_or_else(|| RepositoryError::MissingColumn(LOCATION_HEADERS[0].to_string()))?;
    let area_idx = find_column(&headers, AREA_HEADERS)
        .ok_or_else(|| RepositoryError::MissingColumn(AREA_HEADERS[0].to_string()))?;
    let building_idx = find_column(&headers, BUILDING_HEADERS);

    let mut entries = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

        let entry = LocationEntry::new(
            cell(location_idx),
            building_idx.map(cell).unwrap_or(""),
            cell(area_idx),
        );

        // 跳过空白行与缺少关键列的行
        if !entry.is_usable() {
            if record.iter().any(|v| !v.trim().is_empty()) {
                warn!(row = row_idx + 2, "目录行缺少小区名称或供热区域，已跳过");
            }
            continue;
        }
        entries.push(entry);
    }

    info!(path = %path.display(), rows = entries.len(), "CSV 小区目录读取完成");
    Ok(entries)
}

fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().trim_start_matches('\u{feff}');
        candidates.iter().any(|c| h.eq_ignore_ascii_case(c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_chinese_headers() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "小区名称,楼栋名称,供热区域").unwrap();
        writeln!(file, "阳光花园,3号楼,城东供热区").unwrap();
        writeln!(file, "幸福里,,城北供热区").unwrap();
        writeln!(file, ",,").unwrap();

        let entries = load_entries_from_csv(file.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                LocationEntry::new("阳光花园", "3号楼", "城东供热区"),
                LocationEntry::new("幸福里", "", "城北供热区"),
            ]
        );
    }

    #[test]
    fn test_load_english_headers_without_building() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ResidentialName,HeatingAreaName").unwrap();
        writeln!(file, " 翠湖小区 , 城南供热区 ").unwrap();

        let entries = load_entries_from_csv(file.path()).unwrap();
        assert_eq!(entries, vec![LocationEntry::new("翠湖小区", "", "城南供热区")]);
    }

    #[test]
    fn test_missing_area_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "小区名称,楼栋名称").unwrap();
        writeln!(file, "阳光花园,3号楼").unwrap();

        assert!(matches!(
            load_entries_from_csv(file.path()),
            Err(RepositoryError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_entries_from_csv(Path::new("/nonexistent/catalog.csv")),
            Err(RepositoryError::FileReadError { .. })
        ));
    }
}
