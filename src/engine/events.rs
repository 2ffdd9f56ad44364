// ==========================================
// 供热信访工单识别系统 - 批处理事件输出
// ==========================================
// 职责: 逐条记录上报 + 进度上报（下游为表格展示 / 导出）
// 约定:
// - on_item 每个输入恰好一次（取消后未开始的输入不上报）
// - on_progress 紧随 on_item，completed 严格递增
// ==========================================

use crate::domain::complaint::ComplaintRecord;
use serde::{Deserialize, Serialize};

/// 进度快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

impl BatchProgress {
    /// 完成百分比（0-100）
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed.min(self.total) * 100) / self.total) as u8
    }
}

/// 批处理事件接收方 Trait
pub trait BatchEventSink: Send + Sync {
    /// 单条记录完成
    fn on_item(&self, record: ComplaintRecord);

    /// 进度更新
    fn on_progress(&self, progress: BatchProgress);
}

/// 空操作接收方
#[derive(Debug, Clone, Default)]
pub struct NoOpEventSink;

impl BatchEventSink for NoOpEventSink {
    fn on_item(&self, record: ComplaintRecord) {
        tracing::debug!(source_ref = %record.source_ref, status = %record.status, "NoOpEventSink: 丢弃记录");
    }

    fn on_progress(&self, _progress: BatchProgress) {}
}

/// 闭包接收方
pub struct CallbackEventSink<I, P> {
    on_item: I,
    on_progress: P,
}

impl<I, P> CallbackEventSink<I, P>
where
    I: Fn(ComplaintRecord) + Send + Sync,
    P: Fn(BatchProgress) + Send + Sync,
{
    pub fn new(on_item: I, on_progress: P) -> Self {
        Self {
            on_item,
            on_progress,
        }
    }
}

impl<I, P> BatchEventSink for CallbackEventSink<I, P>
where
    I: Fn(ComplaintRecord) + Send + Sync,
    P: Fn(BatchProgress) + Send + Sync,
{
    fn on_item(&self, record: ComplaintRecord) {
        (self.on_item)(record)
    }

    fn on_progress(&self, progress: BatchProgress) {
        (self.on_progress)(progress)
    }
}
