// ==========================================
// 供热信访工单识别系统 - 批处理选项
// ==========================================
// 环境变量:
// - HEATING_OCR_WORKERS: 并发处理的图片数（默认 1，即顺序处理）
// ==========================================

/// 并发数环境变量
pub const WORKERS_ENV: &str = "HEATING_OCR_WORKERS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// 同时处理的图片数（≥1）
    pub workers: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl BatchOptions {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// 从环境变量读取，缺失或非法时为顺序处理
    pub fn from_env() -> Self {
        std::env::var(WORKERS_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .map(Self::with_workers)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workers_clamped_to_one() {
        assert_eq!(BatchOptions::with_workers(0).workers, 1);
        assert_eq!(BatchOptions::with_workers(4).workers, 4);
        assert_eq!(BatchOptions::sequential().workers, 1);
    }
}
