//! 应用配置模块
//!
//! 配置只读：默认值 -> config.json 中的对应段 -> 命令行参数。

use crate::core::SyncConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";

/// 默认配置目录
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("wallsync"))
        .unwrap_or_else(|| PathBuf::from(".wallsync"))
}

/// 读取 config.json 中的某一段，文件缺失或格式错误时返回 None
pub(crate) fn load_section<T: DeserializeOwned>(config_dir: &Path, section: &str) -> Option<T> {
    let config_file = config_dir.join(CONFIG_FILE);
    let content = fs::read_to_string(&config_file).ok()?;

    let config = match serde_json::from_str::<serde_json::Value>(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("配置文件格式错误，使用默认值: {:?}: {}", config_file, e);
            return None;
        }
    };

    let value = config.get(section)?.clone();
    serde_json::from_value::<T>(value)
        .inspect_err(|e| tracing::warn!("配置段 {} 无效，使用默认值: {}", section, e))
        .ok()
}

impl SyncConfig {
    /// 从配置文件加载同步配置
    pub fn load(config_dir: &Path) -> Self {
        load_section(config_dir, "sync").unwrap_or_default()
    }
}
