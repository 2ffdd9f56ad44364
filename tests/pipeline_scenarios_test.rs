// ==========================================
// 识别流水线场景测试
// ==========================================
// 场景: 完整工单往返、电话哨兵、规范化幂等、规则优先级、
//       分类顺序、区域阈值边界、空目录、诉求编辑后重算
// ==========================================

use heating_complaint_ocr::config::{ConfigManager, KeywordConfig};
use heating_complaint_ocr::intake::{classify, extract, normalize, ComplaintParser};
use heating_complaint_ocr::resolver::{
    jaccard, resolve, LocationCatalog, BUILDING_TIER_THRESHOLD, LOCATION_TIER_THRESHOLD,
};
use heating_complaint_ocr::{LocationEntry, ProcessStatus};
use std::io::Write;
use tempfile::NamedTempFile;

fn catalog_of(entries: &[(&str, &str, &str)]) -> LocationCatalog {
    LocationCatalog::from_entries(
        entries
            .iter()
            .map(|(l, b, a)| LocationEntry::new(*l, *b, *a)),
    )
}

// ==========================================
// 完整往返
// ==========================================

#[test]
fn test_round_trip_scenario() {
    let config = KeywordConfig::from_keyword_pairs([("不热", "质量问题")]);
    let catalog = LocationCatalog::empty();
    let parser = ComplaintParser::new(&config, &catalog);

    let record = parser.parse(
        "工单号：DH12345678901234567 姓名：张三 电话：13812345678 诉求内容：小区不热",
        "scan_01.png",
    );

    assert_eq!(record.status, ProcessStatus::Success);
    assert_eq!(record.work_order_id, "DH12345678901234567");
    assert_eq!(record.name, "张三");
    assert_eq!(record.phone, "13812345678");
    assert_eq!(record.category.as_deref(), Some("质量问题"));
    assert_eq!(record.heating_area.as_deref(), Some("未知"));
}

#[test]
fn test_record_serializes_with_chinese_status() {
    let config = KeywordConfig::default();
    let catalog = LocationCatalog::empty();
    let record = ComplaintParser::new(&config, &catalog).parse("诉求内容：不热", "scan_02.png");

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["status"], "成功");
    assert_eq!(json["phone"], "****");
    assert_eq!(json["category"], "质量问题");
}

// ==========================================
// 电话哨兵
// ==========================================

#[test]
fn test_phone_sentinel_never_stripped_from_body() {
    let fields = extract(&normalize(
        "工单号：DH12345678901234567 姓名：李四 诉求内容：电话****无法接通，暖气不热",
    ));
    assert_eq!(fields.phone, "****");
    assert_eq!(fields.body, "电话****无法接通，暖气不热");

    // 无 诉求内容 标签时取全文，"****" 同样保留
    let fields = extract(&normalize(
        "工单号：DH12345678901234567 姓名：李四 电话：**** 暖气不热",
    ));
    assert_eq!(fields.phone, "****");
    assert!(fields.body.contains("****"));
    assert!(fields.body.contains("暖气不热"));
    assert!(!fields.body.contains("DH12345678901234567"));
}

#[test]
fn test_unlabeled_transcript_keeps_location_in_body() {
    let config = KeywordConfig::default();
    let catalog = catalog_of(&[("幸福里小区", "", "城北供热区")]);
    let parser = ComplaintParser::new(&config, &catalog);

    let record = parser.parse(
        "工单号：DH12345678901234567 电话：13812345678\n幸福里小区暖气不热",
        "scan_04.png",
    );

    assert_eq!(record.status, ProcessStatus::Success);
    assert_eq!(record.body, "幸福里小区暖气不热");
    assert_eq!(record.heating_area.as_deref(), Some("城北供热区"));
}

#[test]
fn test_work_order_found_after_leading_mobile() {
    let fields = extract(&normalize("13812345678 A20251013001 暖气不热"));
    assert_eq!(fields.work_order_id, "A20251013001");
    assert_eq!(fields.phone, "13812345678");
}

// ==========================================
// 规范化 / 抽取
// ==========================================

#[test]
fn test_normalize_is_idempotent() {
    let samples = [
        "",
        "   ",
        "供 热 不 热",
        "工单号：DH123\n\n\n姓名：张 三\r\n\r\n诉求内容：暖气 不热",
        "a  b\t\tc",
        "阳光\u{3000}花园",
    ];

    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "input = {:?}", s);
    }
}

#[test]
fn test_earliest_rule_tier_wins() {
    // 带标签的工单号出现在前，但固定前缀规则优先级更高
    let fields = extract(&normalize("工单号：AB12345 备注 DH12345678901234567"));
    assert_eq!(fields.work_order_id, "DH12345678901234567");

    let fields = extract(&normalize("工单号：AB12345 诉求内容：不热"));
    assert_eq!(fields.work_order_id, "AB12345");
}

#[test]
fn test_extraction_is_deterministic() {
    let text = normalize("工单号：DH12345678901234567 姓名：张三 电话：0431-81234567 来件日期：2024年1月5日 诉求内容：不热");
    let first = extract(&text);
    for _ in 0..3 {
        assert_eq!(extract(&text), first);
    }
    assert_eq!(first.phone, "0431-81234567");
}

// ==========================================
// 分类
// ==========================================

#[test]
fn test_classifier_follows_config_file_order() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "KeywordToCategoryMap": {{"漏水": "维修问题", "不热": "质量问题"}},
            "CategoryToKeywordsMap": {{"服务问题": ["态度"]}}
        }}"#
    )
    .unwrap();

    let config = ConfigManager::new(file.path()).load_keyword_config();
    assert_eq!(classify("暖气不热，家里还漏水", &config), "维修问题");
    assert_eq!(classify("客服态度差", &config), "服务问题");
    assert_eq!(classify("咨询开栓时间", &config), "无");
}

// ==========================================
// 区域匹配
// ==========================================

#[test]
fn test_threshold_constants() {
    assert_eq!(LOCATION_TIER_THRESHOLD, 0.6);
    assert_eq!(BUILDING_TIER_THRESHOLD, 0.7);
    assert_eq!(jaccard("甲乙丙", "丙乙甲丁戊"), 0.6);
}

#[test]
fn test_location_tier_boundary() {
    let catalog = catalog_of(&[("甲乙丙", "", "城东供热区")]);
    assert_eq!(resolve("丙乙甲丁戊", &catalog), "城东供热区");

    let catalog = catalog_of(&[("一二三四五六七八九十", "", "城东供热区")]);
    assert_eq!(resolve("十九八七六五四三二一子丑寅卯辰巳午", &catalog), "未知");
}

#[test]
fn test_building_tier_boundary() {
    let catalog = catalog_of(&[("子丑寅卯", "赵钱孙李周吴郑", "城西供热区")]);
    assert_eq!(resolve("郑吴周李孙钱赵甲乙丙", &catalog), "城西供热区");

    let catalog = catalog_of(&[("子丑寅卯", "赵钱孙李周吴郑王冯", "城西供热区")]);
    assert_eq!(resolve("冯王郑吴周李孙钱赵甲乙丙丁", &catalog), "未知");
}

#[test]
fn test_empty_catalog_always_unknown() {
    let catalog = LocationCatalog::empty();
    for body in ["", "阳光花园暖气不热", "幸福里", "甲乙丙"] {
        assert_eq!(resolve(body, &catalog), "未知");
    }
}

#[test]
fn test_body_edit_recomputes_area() {
    let config = KeywordConfig::default();
    let catalog = catalog_of(&[("阳光花园", "3号楼", "城东供热区"), ("幸福里", "", "城北供热区")]);
    let parser = ComplaintParser::new(&config, &catalog);

    let mut record = parser.parse(
        "工单号：DH12345678901234567 电话：13812345678 诉求内容：幸福里暖气不热",
        "scan_03.png",
    );
    assert_eq!(record.heating_area.as_deref(), Some("城北供热区"));

    parser.apply_body_edit(&mut record, "阳光花园3号楼暖气不热");
    assert_eq!(record.heating_area.as_deref(), Some("城东供热区"));
    assert_eq!(record.category.as_deref(), Some("质量问题"));
    assert_eq!(record.status, ProcessStatus::Success);

    // 纯函数: 同一内容重复计算结果一致
    parser.apply_body_edit(&mut record, "阳光花园3号楼暖气不热");
    assert_eq!(record.heating_area.as_deref(), Some("城东供热区"));
}
