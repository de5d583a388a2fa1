use super::ImageProbe;
use crate::error::{Result, SyncError};
use async_trait::async_trait;
use image::ImageReader;
use std::path::Path;

/// 基于 `image` crate 读取图片头部尺寸
///
/// 按文件内容识别格式，不看扩展名：缓存里的文件没有扩展名，
/// 复制后统一加的 `.jpg` 也不一定是真实格式。
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateProbe;

impl ImageCrateProbe {
    fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
        let decode_err = |source: image::ImageError| SyncError::ImageDecode {
            path: path.to_path_buf(),
            source,
        };

        // 读取器在返回前被消费，文件句柄随之关闭
        ImageReader::open(path)
            .map_err(|e| SyncError::io(path, e))?
            .with_guessed_format()
            .map_err(|e| SyncError::io(path, e))?
            .into_dimensions()
            .map_err(decode_err)
    }
}

#[async_trait]
impl ImageProbe for ImageCrateProbe {
    async fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::read_dimensions(&path))
            .await
            .map_err(|e| SyncError::io("<image probe>", std::io::Error::other(e)))?
    }
}
