// ==========================================
// 供热信访工单识别系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 目录库（heating.db）由外部应用维护，本系统只读
// - 统一 busy_timeout，外部应用写库时减少偶发 busy 错误
// ==========================================

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 目录查询依赖的数据表
pub const CATALOG_TABLES: [&str; 2] = ["t_Residential", "t_HeatingArea"];

/// 配置 SQLite 连接的统一 PRAGMA
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 以只读方式打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 数据表是否存在
pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1",
            [table],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);
    Ok(found)
}

/// 返回缺失的目录表（空表示齐全）
pub fn missing_catalog_tables(conn: &Connection) -> rusqlite::Result<Vec<&'static str>> {
    let mut missing = Vec::new();
    for table in CATALOG_TABLES {
        if !table_exists(conn, table)? {
            missing.push(table);
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_catalog_tables() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(missing_catalog_tables(&conn).unwrap(), CATALOG_TABLES.to_vec());

        conn.execute_batch("CREATE TABLE t_HeatingArea (Id INTEGER PRIMARY KEY, HeatingAreaName TEXT);")
            .unwrap();
        assert_eq!(missing_catalog_tables(&conn).unwrap(), vec!["t_Residential"]);
    }
}
