// ==========================================
// 供热信访工单识别系统 - 命令行入口
// ==========================================
// 用法:
//   heating-complaint-ocr <config.json> <catalog.db|catalog.csv> <inputs...>
//
// 输入为图片文件或已转写的 .txt 文本（默认 OCR 协作方按 UTF-8 文本直通）
// 输出: stdout 每行一条 JSON 记录；stderr 输出批处理汇总
// 环境变量: RUST_LOG（日志级别）、HEATING_OCR_LOG_FORMAT（text/json）、HEATING_OCR_WORKERS（并发数）
// ==========================================

use anyhow::{bail, Context};
use heating_complaint_ocr::config::{BatchOptions, ConfigManager};
use heating_complaint_ocr::engine::{
    BatchOrchestrator, CallbackEventSink, CancellationFlag, FileImagePreprocessor,
    TranscriptOcrEngine,
};
use heating_complaint_ocr::repository::load_catalog_file;
use heating_complaint_ocr::{logging, ComplaintRecord, APP_NAME, VERSION};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("用法: heating-complaint-ocr <config.json> <catalog.db|catalog.csv> <inputs...>");
    }

    tracing::info!(version = VERSION, "{} 启动", APP_NAME);

    let config = ConfigManager::new(&args[0]).load_keyword_config();
    let catalog = load_catalog_file(Path::new(&args[1]))
        .with_context(|| format!("小区目录加载失败: {}", args[1]))?;
    let inputs = &args[2..];

    let preprocessor = FileImagePreprocessor::new().with_extension("txt");
    let orchestrator = BatchOrchestrator::new(Arc::new(preprocessor), Arc::new(TranscriptOcrEngine))
        .with_options(BatchOptions::from_env());

    let cancel = CancellationFlag::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("收到中断信号，停止处理剩余条目");
            ctrl_c.cancel();
        }
    });

    let sink = CallbackEventSink::new(
        |record: ComplaintRecord| {
            let line = match serde_json::to_string(&record) {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!(source_ref = %record.source_ref, error = %e, "记录序列化失败");
                    return;
                }
            };
            let mut out = std::io::stdout().lock();
            if let Err(e) = writeln!(out, "{}", line) {
                tracing::error!(error = %e, "记录输出失败");
            }
        },
        |progress| {
            tracing::info!(
                completed = progress.completed,
                total = progress.total,
                percent = progress.percent(),
                "处理进度"
            );
        },
    );

    let summary = orchestrator
        .run_batch(inputs, &config, &catalog, &sink, &cancel)
        .await;

    eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
