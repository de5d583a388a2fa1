use crate::core::record::{Catalog, FileRecord};
use crate::core::validator::is_staging_name;
use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// 文件扫描器配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    /// 最小文件大小（KB，含）
    #[serde(default)]
    pub size_min_kb: f64,
    /// 最大文件大小（KB，含）
    #[serde(default = "default_size_max_kb")]
    pub size_max_kb: f64,
}

fn default_size_max_kb() -> f64 {
    1600.0 // 锁屏图片通常不超过 1.6MB
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            size_min_kb: 0.0,
            size_max_kb: default_size_max_kb(),
        }
    }
}

impl ScanConfig {
    /// 大小是否落在范围内（两端都包含）
    pub fn accepts(&self, size_kb: f64) -> bool {
        self.size_min_kb <= size_kb && size_kb <= self.size_max_kb
    }

    pub fn validate(&self) -> Result<()> {
        if self.size_min_kb < 0.0 || self.size_max_kb < 0.0 {
            return Err(SyncError::InvalidConfig("文件大小范围不能为负数".to_string()));
        }
        if self.size_min_kb > self.size_max_kb {
            return Err(SyncError::InvalidConfig(format!(
                "最小文件大小 {}KB 大于最大文件大小 {}KB",
                self.size_min_kb, self.size_max_kb
            )));
        }
        Ok(())
    }
}

/// 目录扫描器（不递归）
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner {
    config: ScanConfig,
}

impl DirectoryScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// 扫描目录，返回大小范围内的文件
    pub async fn scan(&self, directory: &Path) -> Result<Catalog> {
        let directory = directory.to_path_buf();
        let config = self.config;

        info!("开始扫描目录: {:?}", directory);

        // 使用 spawn_blocking 避免阻塞 async runtime
        let dir_for_task = directory.clone();
        tokio::task::spawn_blocking(move || scan_blocking(&dir_for_task, &config))
            .await
            .map_err(|e| SyncError::io(directory, std::io::Error::other(e)))?
    }
}

fn scan_blocking(directory: &Path, config: &ScanConfig) -> Result<Catalog> {
    // 先确认目录本身可列出
    std::fs::read_dir(directory).map_err(|source| SyncError::DirectoryNotFound {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut catalog = Catalog::new();
    let mut excluded_count = 0;
    let mut skipped_count = 0;

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let record = match entry
            .map_err(|e| unavailable(e.path().unwrap_or(directory).to_path_buf(), e.into()))
            .and_then(|entry| read_record(directory, &entry))
        {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                warn!("跳过条目: {}", e);
                skipped_count += 1;
                continue;
            }
        };

        if !config.accepts(record.size_kb()) {
            debug!("大小不在范围内: {} ({:.1}KB)", record.name(), record.size_kb());
            excluded_count += 1;
            continue;
        }

        catalog.insert(record.name().to_string(), record);
    }

    info!(
        "扫描完成: {} 个文件, {} 个被排除, {} 个不可用",
        catalog.len(),
        excluded_count,
        skipped_count
    );

    Ok(catalog)
}

/// 读取单个条目；目录、非 UTF-8 文件名和复制中断留下的临时文件返回 None
fn read_record(directory: &Path, entry: &walkdir::DirEntry) -> Result<Option<FileRecord>> {
    if entry.file_name().to_str().is_some_and(is_staging_name) {
        debug!("跳过临时文件: {:?}", entry.path());
        return Ok(None);
    }

    let metadata = entry
        .metadata()
        .map_err(|e| unavailable(entry.path().to_path_buf(), e.into()))?;

    if metadata.is_dir() {
        return Ok(None);
    }

    let Some(name) = entry.file_name().to_str() else {
        warn!("文件名不是有效的 UTF-8，跳过: {:?}", entry.path());
        return Ok(None);
    };

    Ok(Some(FileRecord::from_metadata(directory, name, &metadata)))
}

fn unavailable(path: PathBuf, source: std::io::Error) -> SyncError {
    SyncError::EntryUnavailable { path, source }
}
