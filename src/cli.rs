use crate::core::SyncConfig;
use clap::Parser;
use std::path::PathBuf;

/// 把 Windows 聚焦锁屏图片增量复制到指定目录
#[derive(Debug, Parser)]
#[command(name = "wallsync", version)]
#[command(about = "Copy new Windows lockscreen images into a folder of your choice")]
pub struct Cli {
    /// Destination directory (prompted for when omitted)
    pub destination: Option<PathBuf>,

    /// Source directory, overrides the lockscreen cache lookup
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Minimum file size in KB (inclusive)
    #[arg(long)]
    pub min_kb: Option<f64>,

    /// Maximum file size in KB (inclusive)
    #[arg(long)]
    pub max_kb: Option<f64>,

    /// Expected image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Expected image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Create the destination directory if it does not exist
    #[arg(long)]
    pub create: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also log to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory holding config.json and app.log
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    pub fn apply(&self, mut config: SyncConfig) -> SyncConfig {
        if let Some(min) = self.min_kb {
            config.scan_config.size_min_kb = min;
        }
        if let Some(max) = self.max_kb {
            config.scan_config.size_max_kb = max;
        }
        if let Some(width) = self.width {
            config.validate_config.expected_width = width;
        }
        if let Some(height) = self.height {
            config.validate_config.expected_height = height;
        }
        if self.create {
            config.create_dest_dir = true;
        }
        config
    }
}
