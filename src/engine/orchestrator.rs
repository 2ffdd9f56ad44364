// ==========================================
// 供热信访工单识别系统 - 批处理编排器
// ==========================================
// 流程（每个输入）: 预处理 → OCR → 解析流水线 → 上报记录 → 上报进度
// 红线:
// - 单条失败（含 panic）只产生一条失败记录，绝不中断批处理
// - 每个输入恰好上报一次；进度严格递增，最终等于已上报条数
// - 取消只在条目边界生效；取消后不再有任何上报
// 并发: OCR 协作方声明可并发时按 BatchOptions.workers 并行，否则顺序
// ==========================================

use crate::config::{BatchOptions, KeywordConfig};
use crate::domain::complaint::ComplaintRecord;
use crate::domain::types::ProcessStatus;
use crate::engine::cancel::CancellationFlag;
use crate::engine::collaborators::{ImagePreprocessor, OcrEngine};
use crate::engine::events::{BatchEventSink, BatchProgress};
use crate::intake::complaint_parser::ComplaintParser;
use crate::intake::error::IntakeError;
use crate::resolver::LocationCatalog;
use chrono::{DateTime, Utc};
use futures::future::{self, FutureExt};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// BatchSummary - 批处理汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub total: usize,     // 输入数
    pub succeeded: usize, // 已上报的成功记录
    pub failed: usize,    // 已上报的失败记录
    pub cancelled: bool,  // 是否因取消而提前结束
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchSummary {
    /// 已上报条数
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}

// ==========================================
// BatchOrchestrator - 批处理编排器
// ==========================================
pub struct BatchOrchestrator<P, O>
where
    P: ImagePreprocessor,
    O: OcrEngine,
{
    preprocessor: Arc<P>,
    ocr: Arc<O>,
    options: BatchOptions,
}

impl<P, O> BatchOrchestrator<P, O>
where
    P: ImagePreprocessor,
    O: OcrEngine,
{
    /// 创建新的编排器实例（默认顺序处理）
    ///
    /// # 参数
    /// - preprocessor: 图片预处理协作方
    /// - ocr: OCR 协作方
    pub fn new(preprocessor: Arc<P>, ocr: Arc<O>) -> Self {
        Self {
            preprocessor,
            ocr,
            options: BatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// 实际并发数（OCR 协作方不可并发时恒为 1）
    pub fn effective_workers(&self) -> usize {
        if self.ocr.supports_concurrent_use() {
            self.options.workers.max(1)
        } else {
            1
        }
    }

    /// 执行一批识别
    ///
    /// # 参数
    /// - inputs: 图片引用（按输入顺序）
    /// - config / catalog: 本批次只读共享
    /// - sink: 记录与进度接收方
    /// - cancel: 协作式取消标志
    ///
    /// # 返回
    /// 批处理汇总（批处理本身不会失败）
    #[instrument(skip_all, fields(total = inputs.len()))]
    pub async fn run_batch(
        &self,
        inputs: &[String],
        config: &KeywordConfig,
        catalog: &LocationCatalog,
        sink: &dyn BatchEventSink,
        cancel: &CancellationFlag,
    ) -> BatchSummary {
        let batch_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let total = inputs.len();
        let workers = self.effective_workers();

        if workers < self.options.workers {
            info!(requested = self.options.workers, "OCR 协作方不支持并发调用，改为顺序处理");
        }
        info!(batch_id = %batch_id, total, workers, "批处理开始");

        let parser = ComplaintParser::new(config, catalog);
        let parser = &parser;

        // 取消检查点 1: 开始下一条之前
        let mut records = stream::iter(inputs.iter())
            .take_while(move |_| future::ready(!cancel.is_cancelled()))
            .map(move |source_ref| self.process_item(source_ref, parser))
            .buffer_unordered(workers);

        let mut completed = 0usize;
        let mut succeeded = 0usize;
        let mut failed = 0usize;

        while let Some(record) = records.next().await {
            // 取消检查点 2: 上报之前（已完成但未上报的条目丢弃）
            if cancel.is_cancelled() {
                break;
            }

            match record.status {
                ProcessStatus::Failed => failed += 1,
                _ => succeeded += 1,
            }
            completed += 1;

            sink.on_item(record);
            sink.on_progress(BatchProgress { completed, total });
        }

        let summary = BatchSummary {
            batch_id,
            total,
            succeeded,
            failed,
            cancelled: completed < total && cancel.is_cancelled(),
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            batch_id = %summary.batch_id,
            succeeded,
            failed,
            cancelled = summary.cancelled,
            elapsed_ms = (summary.finished_at - summary.started_at).num_milliseconds(),
            "批处理结束"
        );
        summary
    }

    /// 处理单个输入，任何错误或 panic 都转为失败记录
    async fn process_item(&self, source_ref: &str, parser: &ComplaintParser<'_>) -> ComplaintRecord {
        let work = async {
            let image = self.preprocessor.preprocess(source_ref).await?;
            let text = self.ocr.recognize(&image).await?;
            Ok::<_, IntakeError>(parser.parse(&text, source_ref))
        };

        let error = match AssertUnwindSafe(work).catch_unwind().await {
            Ok(Ok(record)) => return record,
            Ok(Err(e)) => e,
            Err(payload) => IntakeError::ItemPanicked(panic_message(payload.as_ref())),
        };

        warn!(source_ref, error = %error, "单条处理失败");
        ComplaintRecord::failed(source_ref, error.to_string())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "未知异常".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::collaborators::{FnOcrEngine, FnPreprocessor, TranscriptOcrEngine};
    use crate::engine::events::NoOpEventSink;
    use crate::intake::error::IntakeResult;

    fn echo_preprocessor() -> Arc<FnPreprocessor<impl Fn(&str) -> IntakeResult<Vec<u8>> + Send + Sync>> {
        Arc::new(FnPreprocessor::new(|source_ref: &str| {
            Ok(source_ref.as_bytes().to_vec())
        }))
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let orchestrator = BatchOrchestrator::new(echo_preprocessor(), Arc::new(TranscriptOcrEngine));
        let summary = orchestrator
            .run_batch(
                &[],
                &KeywordConfig::default(),
                &LocationCatalog::empty(),
                &NoOpEventSink,
                &CancellationFlag::new(),
            )
            .await;

        assert_eq!(summary.total, 0);
        assert_eq!(summary.processed(), 0);
        assert!(!summary.cancelled);
    }

    #[tokio::test]
    async fn test_panic_becomes_failed_record() {
        let ocr = FnOcrEngine::new(|bytes: &[u8]| {
            if bytes == "boom".as_bytes() {
                panic!("引擎崩溃");
            }
            Ok(String::from_utf8_lossy(bytes).into_owned())
        });
        let orchestrator = BatchOrchestrator::new(echo_preprocessor(), Arc::new(ocr));

        let record = orchestrator
            .process_item(
                "boom",
                &ComplaintParser::new(&KeywordConfig::default(), &LocationCatalog::empty()),
            )
            .await;

        assert_eq!(record.status, ProcessStatus::Failed);
        assert_eq!(record.source_ref, "boom");
        assert!(record.error_message.unwrap().contains("引擎崩溃"));
    }

    #[test]
    fn test_effective_workers_respects_engine() {
        let serial = BatchOrchestrator::new(
            echo_preprocessor(),
            Arc::new(FnOcrEngine::new(|_: &[u8]| Ok(String::new()))),
        )
        .with_options(BatchOptions::with_workers(4));
        assert_eq!(serial.effective_workers(), 1);

        let parallel = BatchOrchestrator::new(echo_preprocessor(), Arc::new(TranscriptOcrEngine))
            .with_options(BatchOptions::with_workers(4));
        assert_eq!(parallel.effective_workers(), 4);
    }
}
