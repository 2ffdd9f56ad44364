// ==========================================
// 小区目录仓储集成测试
// ==========================================
// 场景: heating.db 读取 → 目录构建 → 区域匹配；CSV 来源；按扩展名分派
// ==========================================


use heating_complaint_ocr::config::KeywordConfig;
use heating_complaint_ocr::repository::{
    load_catalog_file, load_entries_from_csv, LocationCatalogRepository, RepositoryError,
};
use heating_complaint_ocr::resolver::{resolve, LocationCatalog};
use heating_complaint_ocr::LocationEntry;
use rusqlite::Connection;
use std::path::Path;
use test_helpers::{create_test_catalog_db, init_catalog_schema, seed_catalog, write_catalog_csv};

#[test]
fn test_load_entries_from_sqlite() {
    let (_temp_file, db_path) = create_test_catalog_db().unwrap();
    let repo = LocationCatalogRepository::new(&db_path).unwrap();

    let entries = repo.load_entries().unwrap();
    assert_eq!(entries.len(), 3);
    // 小区名称按长度降序
    assert_eq!(entries[2], LocationEntry::new("幸福里", "", "城北供热区"));
    assert!(entries.contains(&LocationEntry::new("阳光花园", "3号楼", "城东供热区")));
    assert!(entries.contains(&LocationEntry::new("翠湖小区", "望湖苑", "城南供热区")));
}

#[test]
fn test_sqlite_catalog_resolves_bodies() {
    let (_temp_file, db_path) = create_test_catalog_db().unwrap();
    let catalog = LocationCatalogRepository::new(&db_path)
        .unwrap()
        .load_catalog()
        .unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(resolve("阳光花园3号楼暖气不热", &catalog), "城东供热区");
    assert_eq!(resolve("幸福里这边暖气冰凉", &catalog), "城北供热区");
    // 只提楼栋名 → 楼栋级命中
    assert_eq!(resolve("望湖苑二单元暖气不热", &catalog), "城南供热区");
    assert_eq!(resolve("暖气不热", &catalog), "未知");
}

#[test]
fn test_duplicate_rows_deduplicated() {
    let (_temp_file, db_path) = create_test_catalog_db().unwrap();
    {
        let conn = Connection::open(&db_path).unwrap();
        seed_catalog(&conn, &[("幸福里", "", "城北供热区")]).unwrap();
    }

    let entries = LocationCatalogRepository::new(&db_path)
        .unwrap()
        .load_entries()
        .unwrap();
    assert_eq!(entries.len(), 3);
}

#[test]
fn test_empty_database_gives_empty_catalog() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    {
        let conn = Connection::open(&db_path).unwrap();
        init_catalog_schema(&conn).unwrap();
    }

    let catalog = LocationCatalogRepository::new(&db_path)
        .unwrap()
        .load_catalog()
        .unwrap();
    assert!(catalog.is_empty());
    assert_eq!(resolve("阳光花园暖气不热", &catalog), "未知");
}

#[test]
fn test_database_without_catalog_tables() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch("CREATE TABLE other (id INTEGER);").unwrap();
    }

    let result = LocationCatalogRepository::new(&db_path).unwrap().load_entries();
    match result {
        Err(RepositoryError::TableNotFound(tables)) => {
            assert!(tables.contains("t_Residential"));
            assert!(tables.contains("t_HeatingArea"));
        }
        other => panic!("期望 TableNotFound，实际 {:?}", other),
    }
}

#[test]
fn test_csv_catalog_matches_sqlite_catalog() {
    let csv = write_catalog_csv(
        "小区名称,楼栋名称,供热区域",
        &[
            "阳光花园,3号楼,城东供热区",
            "幸福里,,城北供热区",
            "翠湖小区,望湖苑,城南供热区",
        ],
    )
    .unwrap();

    let entries = load_entries_from_csv(csv.path()).unwrap();
    assert_eq!(entries.len(), 3);

    let catalog = load_catalog_file(csv.path()).unwrap();
    assert_eq!(resolve("望湖苑二单元暖气不热", &catalog), "城南供热区");
    assert_eq!(resolve("阳光花园3号楼暖气不热", &catalog), "城东供热区");
}

#[test]
fn test_load_catalog_file_dispatches_on_extension() {
    let (_temp_file, db_path) = create_test_catalog_db().unwrap();
    let catalog = load_catalog_file(Path::new(&db_path)).unwrap();
    assert_eq!(catalog.len(), 3);

    assert!(load_catalog_file(Path::new("/nonexistent/catalog.csv")).is_err());
    assert!(matches!(
        load_catalog_file(Path::new("/nonexistent/heating.db")),
        Err(RepositoryError::DatabaseConnectionError(_))
    ));
}

#[test]
fn test_catalog_from_legacy_community_map() {
    let config: KeywordConfig = serde_json::from_str(
        r#"{"CommunityToAreaMap": {"幸福里": "城北供热区", "阳光花园": "城东供热区"}}"#,
    )
    .unwrap();

    let catalog = LocationCatalog::from_community_map(&config.community_to_area);
    assert_eq!(catalog.len(), 2);
    assert_eq!(resolve("阳光花园暖气不热", &catalog), "城东供热区");
}
