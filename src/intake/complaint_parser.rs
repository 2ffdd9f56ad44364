// ==========================================
// 供热信访工单识别系统 - 单条工单解析流水线
// ==========================================
// 流程: OCR 文本 → 规范化 → 字段抽取 → 分类 → 区域匹配 → 格式校验 → 成功记录
// 依赖: KeywordConfig / LocationCatalog 只读借用（批处理期间不可替换）
// 编辑: 外部改写诉求内容后调用 apply_body_edit 只重算供热区域
// ==========================================

use crate::config::KeywordConfig;
use crate::domain::complaint::ComplaintRecord;
use crate::intake::classifier::ComplaintClassifier;
use crate::intake::field_extractor::FieldExtractor;
use crate::intake::text_normalizer::normalize;
use crate::intake::validator::FieldValidator;
use crate::resolver::{HeatingAreaResolver, LocationCatalog};
use tracing::debug;

pub struct ComplaintParser<'a> {
    config: &'a KeywordConfig,
    catalog: &'a LocationCatalog,
    extractor: FieldExtractor,
    classifier: ComplaintClassifier,
    resolver: HeatingAreaResolver,
    validator: FieldValidator,
}

impl<'a> ComplaintParser<'a> {
    /// 创建解析器
    ///
    /// # 参数
    /// - config: 关键词配置
    /// - catalog: 小区目录
    pub fn new(config: &'a KeywordConfig, catalog: &'a LocationCatalog) -> Self {
        Self {
            config,
            catalog,
            extractor: FieldExtractor,
            classifier: ComplaintClassifier,
            resolver: HeatingAreaResolver,
            validator: FieldValidator,
        }
    }

    /// 解析一份 OCR 文本
    ///
    /// OCR 协作方返回的错误描述也按普通文本处理，抽取不到内容时各字段为空
    pub fn parse(&self, ocr_text: &str, source_ref: &str) -> ComplaintRecord {
        let text = normalize(ocr_text);
        let fields = self.extractor.extract(&text);

        let category = self.classifier.classify(&fields.body, self.config);
        let heating_area = self.resolver.resolve(&fields.body, self.catalog);
        let notes = self.validator.validate(&fields);

        debug!(
            source_ref,
            work_order_id = %fields.work_order_id,
            category = %category,
            heating_area = %heating_area,
            notes = notes.len(),
            "工单解析完成"
        );

        ComplaintRecord::success(source_ref, fields, category, heating_area, &notes)
    }

    /// 外部编辑诉求内容后重算供热区域（不重新抽取、不重新分类）
    pub fn apply_body_edit(&self, record: &mut ComplaintRecord, new_body: &str) {
        record.body = new_body.to_string();
        let heating_area = self.resolver.resolve(&record.body, self.catalog);
        debug!(
            source_ref = %record.source_ref,
            heating_area = %heating_area,
            "诉求内容已编辑，重算供热区域"
        );
        record.heating_area = Some(heating_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::LocationEntry;
    use crate::domain::types::ProcessStatus;

    fn catalog() -> LocationCatalog {
        LocationCatalog::from_entries(vec![
            LocationEntry::new("阳光花园", "3号楼", "城东供热区"),
            LocationEntry::new("幸福里", "", "城北供热区"),
        ])
    }

    #[test]
    fn test_parse_round_trip() {
        let config = KeywordConfig::from_keyword_pairs([("不热", "质量问题")]);
        let catalog = catalog();
        let parser = ComplaintParser::new(&config, &catalog);

        let record = parser.parse(
            "工单号：DH12345678901234567 姓名：张三 电话：13812345678 诉求内容：小区不热",
            "scan_01.png",
        );

        assert_eq!(record.status, ProcessStatus::Success);
        assert_eq!(record.work_order_id, "DH12345678901234567");
        assert_eq!(record.name, "张三");
        assert_eq!(record.phone, "13812345678");
        assert_eq!(record.body, "小区不热");
        assert_eq!(record.category.as_deref(), Some("质量问题"));
        assert_eq!(record.heating_area.as_deref(), Some("未知"));
        assert_eq!(record.source_ref, "scan_01.png");
        assert_eq!(record.error_message, None);
    }

    #[test]
    fn test_validation_notes_keep_success() {
        let config = KeywordConfig::default();
        let catalog = catalog();
        let parser = ComplaintParser::new(&config, &catalog);

        let record = parser.parse("诉求内容：幸福里暖气不热", "scan_02.png");

        assert_eq!(record.status, ProcessStatus::Success);
        assert_eq!(record.phone, "****");
        assert_eq!(record.heating_area.as_deref(), Some("城北供热区"));
        assert_eq!(
            record.error_message.as_deref(),
            Some("工单号格式不正确; 电话号码格式不正确")
        );
    }

    #[test]
    fn test_ocr_error_string_is_plain_text() {
        let config = KeywordConfig::default();
        let catalog = catalog();
        let parser = ComplaintParser::new(&config, &catalog);

        let record = parser.parse("Error: tessdata not found", "scan_03.png");

        assert_eq!(record.status, ProcessStatus::Success);
        assert_eq!(record.category.as_deref(), Some("无"));
        assert_eq!(record.heating_area.as_deref(), Some("未知"));
    }

    #[test]
    fn test_body_edit_recomputes_area_only() {
        let config = KeywordConfig::default();
        let catalog = catalog();
        let parser = ComplaintParser::new(&config, &catalog);

        let mut record = parser.parse("诉求内容：家里暖气不热", "scan_04.png");
        assert_eq!(record.heating_area.as_deref(), Some("未知"));
        let category = record.category.clone();

        parser.apply_body_edit(&mut record, "阳光花园3号楼暖气不热");
        assert_eq!(record.body, "阳光花园3号楼暖气不热");
        assert_eq!(record.heating_area.as_deref(), Some("城东供热区"));
        assert_eq!(record.category, category);
    }
}
