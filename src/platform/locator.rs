use super::CacheLocator;
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

/// 内容分发管理器的包目录名
const PACKAGE_PATTERN: &str = r"^Microsoft\.Windows\.ContentDeliveryManager_\w*";

/// 在 `%LOCALAPPDATA%\Packages` 下查找 Windows 聚焦图片缓存
pub struct ContentDeliveryLocator {
    packages_dir: Option<PathBuf>,
}

impl ContentDeliveryLocator {
    pub fn new() -> Self {
        Self {
            packages_dir: dirs::data_local_dir().map(|p| p.join("Packages")),
        }
    }

    /// 指定 Packages 目录
    pub fn with_packages_dir(packages_dir: impl Into<PathBuf>) -> Self {
        Self {
            packages_dir: Some(packages_dir.into()),
        }
    }
}

impl Default for ContentDeliveryLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheLocator for ContentDeliveryLocator {
    async fn locate(&self) -> Result<PathBuf> {
        let packages_dir = self
            .packages_dir
            .clone()
            .ok_or_else(|| SyncError::CacheNotFound {
                searched: PathBuf::from("%LOCALAPPDATA%\\Packages"),
            })?;
        let not_found = || SyncError::CacheNotFound {
            searched: packages_dir.clone(),
        };

        let regex = Regex::new(PACKAGE_PATTERN).map_err(|e| SyncError::InvalidConfig(e.to_string()))?;

        let mut entries = fs::read_dir(&packages_dir).await.map_err(|e| {
            debug!("读取 Packages 目录失败: {}", e);
            not_found()
        })?;

        let mut candidates = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SyncError::io(&packages_dir, e))?
        {
            if let Some(name) = entry.file_name().to_str() {
                if regex.is_match(name) {
                    candidates.push(entry.path().join("LocalState").join("Assets"));
                }
            }
        }
        candidates.sort();

        for candidate in candidates {
            match fs::metadata(&candidate).await {
                Ok(meta) if meta.is_dir() => {
                    info!("找到锁屏图片缓存目录: {:?}", candidate);
                    return Ok(candidate);
                }
                _ => debug!("候选目录不可用: {:?}", candidate),
            }
        }

        Err(not_found())
    }

    fn name(&self) -> &str {
        "content-delivery"
    }
}

/// 直接使用给定目录（命令行 --source 或测试）
pub struct FixedLocator {
    path: PathBuf,
}

impl FixedLocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CacheLocator for FixedLocator {
    async fn locate(&self) -> Result<PathBuf> {
        Ok(self.path.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
