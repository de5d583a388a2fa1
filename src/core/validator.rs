//! 复制并校验单个图片

use crate::core::record::FileRecord;
use crate::error::{Result, SyncError};
use crate::platform::ImageProbe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// 复制后统一追加的扩展名
pub const COPY_EXTENSION: &str = "jpg";

/// 校验通过前复制文件使用的后缀
pub const STAGING_SUFFIX: &str = ".part";

/// 是否为复制中途留下的临时文件（`.<name>.jpg.part`）
pub fn is_staging_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(STAGING_SUFFIX)
}

/// 校验配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateConfig {
    /// 期望宽度（像素）
    #[serde(default = "default_width")]
    pub expected_width: u32,
    /// 期望高度（像素）
    #[serde(default = "default_height")]
    pub expected_height: u32,
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            expected_width: default_width(),
            expected_height: default_height(),
        }
    }
}

impl ValidateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.expected_width == 0 || self.expected_height == 0 {
            return Err(SyncError::InvalidConfig("期望尺寸不能为 0".to_string()));
        }
        Ok(())
    }
}

/// 单个文件的校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// 尺寸符合，文件已保存到目标目录
    Accepted { path: PathBuf },
    /// 尺寸不符，复制的文件已删除
    RejectedDimensionMismatch { width: u32, height: u32 },
}

/// 复制 + 尺寸校验
pub struct CopyValidator {
    config: ValidateConfig,
    probe: Arc<dyn ImageProbe>,
}

impl CopyValidator {
    pub fn new(config: ValidateConfig, probe: Arc<dyn ImageProbe>) -> Self {
        Self { config, probe }
    }

    /// 目标文件名：原文件名 + ".jpg"
    pub fn target_path(record: &FileRecord, dest_dir: &Path) -> PathBuf {
        dest_dir.join(format!("{}.{}", record.name(), COPY_EXTENSION))
    }

    fn staging_path(record: &FileRecord, dest_dir: &Path) -> PathBuf {
        dest_dir.join(format!(".{}.{}{}", record.name(), COPY_EXTENSION, STAGING_SUFFIX))
    }

    /// 复制到临时文件，校验尺寸，通过后再重命名为最终文件名。
    ///
    /// 无论结果如何，目标目录里都不会留下临时文件或不合格的图片。
    pub async fn copy_and_validate(&self, record: &FileRecord, dest_dir: &Path) -> Result<CopyOutcome> {
        let target = Self::target_path(record, dest_dir);
        let staging = Self::staging_path(record, dest_dir);

        // 任何提前返回都会清理临时文件；重命名成功后文件已不存在，删除失败可忽略
        let _cleanup = scopeguard::guard(staging.clone(), |path| {
            let _ = std::fs::remove_file(&path);
        });

        debug!("复制: {:?} -> {:?}", record.path(), staging);
        copy_preserving_mtime(record.path(), &staging).await?;

        let (width, height) = self.probe.dimensions(&staging).await?;
        if (width, height) != (self.config.expected_width, self.config.expected_height) {
            debug!(
                "尺寸不符: {} 为 {}x{}，期望 {}x{}",
                record.name(),
                width,
                height,
                self.config.expected_width,
                self.config.expected_height
            );
            return Ok(CopyOutcome::RejectedDimensionMismatch { width, height });
        }

        fs::rename(&staging, &target)
            .await
            .map_err(|e| SyncError::io(&target, e))?;
        info!("已保存: {:?}", target);

        Ok(CopyOutcome::Accepted { path: target })
    }
}

/// 复制文件内容和权限，并保留源文件的修改时间
async fn copy_preserving_mtime(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from).await.map_err(|e| source_error(from, e))?;
    fs::copy(from, to).await.map_err(|e| source_error(from, e))?;

    if let Ok(modified) = metadata.modified() {
        let file = std::fs::File::options()
            .write(true)
            .open(to)
            .map_err(|e| SyncError::io(to, e))?;
        file.set_modified(modified).map_err(|e| SyncError::io(to, e))?;
    }

    Ok(())
}

fn source_error(path: &Path, source: std::io::Error) -> SyncError {
    if source.kind() == std::io::ErrorKind::NotFound {
        SyncError::EntryUnavailable {
            path: path.to_path_buf(),
            source,
        }
    } else {
        SyncError::io(path, source)
    }
}
