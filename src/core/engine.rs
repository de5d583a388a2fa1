use crate::core::record::FileRecord;
use crate::core::scanner::{DirectoryScanner, ScanConfig};
use crate::core::timestamp;
use crate::core::validator::{CopyOutcome, CopyValidator, ValidateConfig};
use crate::error::{Result, SyncError};
use crate::platform::ImageProbe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 同步配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    /// 扫描配置
    #[serde(flatten)]
    pub scan_config: ScanConfig,
    /// 校验配置
    #[serde(flatten)]
    pub validate_config: ValidateConfig,
    /// 是否自动创建目标目录
    #[serde(default)]
    pub create_dest_dir: bool,
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        self.scan_config.validate()?;
        self.validate_config.validate()
    }
}

/// 一次复制的统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub destination: PathBuf,
    /// 尝试复制的文件数（含被拒绝的）
    pub attempted: u32,
    /// 尺寸符合并保留的文件数
    pub accepted: u32,
    /// 尺寸不符被删除的文件数
    pub rejected: u32,
    /// 复制或解码失败的文件数
    pub failed: u32,
    pub errors: Vec<String>,
}

/// 同步报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SyncReport {
    /// 目标目录已包含最新图片，未做任何复制
    UpToDate { destination: PathBuf },
    Synced(SyncSummary),
}

impl SyncReport {
    /// 尝试复制的文件数
    pub fn attempted(&self) -> u32 {
        match self {
            SyncReport::UpToDate { .. } => 0,
            SyncReport::Synced(summary) => summary.attempted,
        }
    }

    pub fn destination(&self) -> &Path {
        match self {
            SyncReport::UpToDate { destination } => destination,
            SyncReport::Synced(summary) => &summary.destination,
        }
    }
}

/// 增量同步引擎：比较两边最新时间戳，只复制比目标目录更新的文件
pub struct SyncEngine {
    scanner: DirectoryScanner,
    validator: CopyValidator,
    create_dest_dir: bool,
}

impl SyncEngine {
    pub fn new(probe: Arc<dyn ImageProbe>) -> Self {
        Self::with_config(SyncConfig::default(), probe)
    }

    pub fn with_config(config: SyncConfig, probe: Arc<dyn ImageProbe>) -> Self {
        Self {
            scanner: DirectoryScanner::new(config.scan_config),
            validator: CopyValidator::new(config.validate_config, probe),
            create_dest_dir: config.create_dest_dir,
        }
    }

    pub async fn sync(&self, source_dir: &Path, dest_dir: &Path) -> Result<SyncReport> {
        info!("开始同步: {:?} -> {:?}", source_dir, dest_dir);

        // 源目录扫描成功前不创建或写入目标目录，扫描失败无需清理
        let source_catalog = self.scanner.scan(source_dir).await?;

        if self.create_dest_dir {
            tokio::fs::create_dir_all(dest_dir)
                .await
                .map_err(|source| SyncError::DirectoryNotFound {
                    path: dest_dir.to_path_buf(),
                    source,
                })?;
        }

        let dest_catalog = self.scanner.scan(dest_dir).await?;

        let t_source = timestamp::newest(&source_catalog);
        let t_dest = timestamp::newest(&dest_catalog);
        debug!("最新时间戳: 源 {}, 目标 {}", t_source, t_dest);

        if t_source <= t_dest {
            info!("目标目录已是最新");
            return Ok(SyncReport::UpToDate {
                destination: dest_dir.to_path_buf(),
            });
        }

        let mut pending: Vec<&FileRecord> = source_catalog
            .values()
            .filter(|record| record.modified_at() > t_dest)
            .collect();
        pending.sort_by(|a, b| {
            a.modified_at()
                .cmp(&b.modified_at())
                .then_with(|| a.name().cmp(b.name()))
        });

        info!("需要复制 {} 个文件", pending.len());

        let mut summary = SyncSummary {
            destination: dest_dir.to_path_buf(),
            ..Default::default()
        };

        // 每个文件独立处理，单个失败不影响其他文件
        for record in pending {
            summary.attempted += 1;
            match self.validator.copy_and_validate(record, dest_dir).await {
                Ok(CopyOutcome::Accepted { .. }) => summary.accepted += 1,
                Ok(CopyOutcome::RejectedDimensionMismatch { width, height }) => {
                    debug!("已丢弃 {} ({}x{})", record.name(), width, height);
                    summary.rejected += 1;
                }
                Err(e) if e.is_per_file() => {
                    warn!("处理文件失败: {}", e);
                    summary.failed += 1;
                    summary.errors.push(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "同步完成: 尝试 {} 个, 保存 {} 个, 丢弃 {} 个, 失败 {} 个",
            summary.attempted, summary.accepted, summary.rejected, summary.failed
        );

        Ok(SyncReport::Synced(summary))
    }
}
