// ==========================================
// 供热信访工单识别系统 - 配置管理器
// ==========================================
// 职责: 从 config.json 读取关键词配置（只读）
// 策略: 文件缺失/损坏时回退内置默认表，不阻断处理
// 红线: 不负责配置写回（由外部应用管理）
// ==========================================

use crate::config::keyword_config::KeywordConfig;
use crate::intake::error::{IntakeError, IntakeResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - config_path: 关键词配置文件路径
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// 严格读取关键词配置
    ///
    /// # 返回
    /// - Ok(KeywordConfig): 解析成功
    /// - Err(ConfigReadError): 文件缺失或读取失败
    /// - Err(ConfigParseError): JSON 格式错误
    pub fn try_load_keyword_config(&self) -> IntakeResult<KeywordConfig> {
        let path_str = self.config_path.display().to_string();
        let json = std::fs::read_to_string(&self.config_path).map_err(|e| {
            IntakeError::ConfigReadError {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;

        let config: KeywordConfig = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// 宽松读取关键词配置
    ///
    /// - 文件不存在 → 默认配置
    /// - 读取/解析失败 → 记录告警后使用默认配置
    pub fn load_keyword_config(&self) -> KeywordConfig {
        if !self.config_path.exists() {
            info!(path = %self.config_path.display(), "配置文件不存在，使用默认关键词配置");
            return KeywordConfig::default();
        }

        match self.try_load_keyword_config() {
            Ok(config) => {
                info!(
                    path = %self.config_path.display(),
                    keywords = config.keyword_to_category.len(),
                    categories = config.category_to_keywords.len(),
                    communities = config.community_to_area.len(),
                    "关键词配置加载完成"
                );
                config
            }
            Err(e) => {
                warn!(path = %self.config_path.display(), error = %e, "关键词配置加载失败，使用默认配置");
                KeywordConfig::default()
            }
        }
    }
}
