//! 错误类型

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    /// 目录不存在或无法列出（整次同步失败）
    #[error("无法访问目录 {}: {source}", .path.display())]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 列出目录后文件消失（只影响该条目）
    #[error("文件已不可用 {}: {source}", .path.display())]
    EntryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 复制后的内容不是可解码的图片
    #[error("无法解码图片 {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("未找到 Windows 内容分发缓存目录（已搜索 {}）", .searched.display())]
    CacheNotFound { searched: PathBuf },

    #[error("未选择目标目录")]
    PromptCancelled,

    #[error("文件操作失败 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

impl SyncError {
    /// 给用户的补救提示（只有致命错误才有）
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SyncError::CacheNotFound { .. } => {
                Some("请检查是否已启用锁屏图片（Windows 聚焦）")
            }
            SyncError::DirectoryNotFound { .. } => {
                Some("请确认目录存在且可读；目标目录不存在时可加 --create 自动创建")
            }
            SyncError::PromptCancelled => Some("也可以直接在命令行参数中指定目标目录"),
            _ => None,
        }
    }

    /// 是否只影响单个文件
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            SyncError::EntryUnavailable { .. } | SyncError::ImageDecode { .. } | SyncError::Io { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_only_for_fatal_errors() {
        let cache = SyncError::CacheNotFound {
            searched: PathBuf::from("C:/Packages"),
        };
        assert!(cache.hint().unwrap().contains("锁屏图片"));
        assert!(!cache.is_per_file());

        let gone = SyncError::EntryUnavailable {
            path: PathBuf::from("a"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(gone.hint().is_none());
        assert!(gone.is_per_file());
    }
}
