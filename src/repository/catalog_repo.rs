// ==========================================
// 供热信访工单识别系统 - 小区目录仓储（SQLite）
// ==========================================
// 数据源: heating.db（外部应用维护）
// 查询: t_Residential ⋈ t_HeatingArea → (小区名称, 楼栋名称, 供热区域)
// 红线: 只读，不含匹配逻辑
// ==========================================

use crate::db::{configure_sqlite_connection, missing_catalog_tables, open_sqlite_connection};
use crate::domain::catalog::LocationEntry;
use crate::repository::catalog_csv::load_entries_from_csv;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::resolver::LocationCatalog;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const LOAD_ENTRIES_SQL: &str = r#"
    SELECT r.ResidentialName, r.BuildingName, ha.HeatingAreaName
    FROM t_Residential r
    JOIN t_HeatingArea ha ON r.HeatingAreaId = ha.Id
    GROUP BY r.ResidentialName, r.BuildingName, ha.HeatingAreaName
    ORDER BY LENGTH(r.ResidentialName) DESC, r.ResidentialName, r.BuildingName
"#;

// ==========================================
// LocationCatalogRepository - 小区目录仓储
// ==========================================
pub struct LocationCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LocationCatalogRepository {
    /// 以只读方式打开目录库
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取全部目录条目（小区名称按长度降序）
    pub fn load_entries(&self) -> RepositoryResult<Vec<LocationEntry>> {
        let conn = self.get_conn()?;

        let missing = missing_catalog_tables(&conn)?;
        if !missing.is_empty() {
            return Err(RepositoryError::TableNotFound(missing.join(", ")));
        }

        let mut stmt = conn.prepare(LOAD_ENTRIES_SQL)?;
        let entries = stmt
            .query_map([], |row| {
                let location: Option<String> = row.get(0)?;
                let building: Option<String> = row.get(1)?;
                let area: Option<String> = row.get(2)?;
                Ok(LocationEntry::new(
                    location.unwrap_or_default().trim(),
                    building.unwrap_or_default().trim(),
                    area.unwrap_or_default().trim(),
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        info!(rows = entries.len(), "小区目录读取完成");
        Ok(entries)
    }

    /// 读取并构建匹配目录
    pub fn load_catalog(&self) -> RepositoryResult<LocationCatalog> {
        Ok(LocationCatalog::from_entries(self.load_entries()?))
    }
}

/// 按扩展名选择目录来源: .csv → CSV，其余按 SQLite 库处理
pub fn load_catalog_file(path: &Path) -> RepositoryResult<LocationCatalog> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let entries = if is_csv {
        load_entries_from_csv(path)?
    } else {
        let db_path = path.to_str().ok_or_else(|| {
            RepositoryError::InternalError(format!("路径不是合法 UTF-8: {}", path.display()))
        })?;
        LocationCatalogRepository::new(db_path)?.load_entries()?
    };

    Ok(LocationCatalog::from_entries(entries))
}
