//! 外部能力接口：缓存目录定位、目标目录选择、图片尺寸读取
//!
//! 同步逻辑只依赖这些 trait，测试时可以替换成固定实现。

pub mod locator;
pub mod probe;
pub mod prompt;

use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use locator::{ContentDeliveryLocator, FixedLocator};
pub use probe::ImageCrateProbe;
pub use prompt::{FixedPrompt, TerminalPrompt};

/// 定位系统管理的锁屏图片缓存目录
#[async_trait]
pub trait CacheLocator: Send + Sync {
    /// 返回唯一的缓存目录，找不到时返回 `CacheNotFound`
    async fn locate(&self) -> Result<PathBuf>;

    /// 获取定位器名称（用于日志）
    fn name(&self) -> &str;
}

/// 交互式选择目标目录
pub trait DirectoryPrompt {
    /// 用户取消时返回 `PromptCancelled`
    fn prompt(&self) -> Result<PathBuf>;
}

/// 读取图片像素尺寸
#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// 返回 (宽, 高)
    async fn dimensions(&self, path: &Path) -> Result<(u32, u32)>;
}
