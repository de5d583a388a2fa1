//! 文件快照

use serde::Serialize;
use std::collections::HashMap;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 一次扫描的结果：文件名 -> 文件记录
pub type Catalog = HashMap<String, FileRecord>;

/// 某个文件在扫描时刻的快照，构造后不再刷新
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    path: PathBuf,
    name: String,
    size_kb: f64,
    /// 毫秒级 Unix 时间戳
    modified_at: i64,
    created_at: i64,
}

impl FileRecord {
    /// 由目录、文件名和元数据构造记录
    pub fn from_metadata(directory: &Path, name: &str, metadata: &Metadata) -> Self {
        let modified_at = metadata.modified().map(to_millis).unwrap_or(0);
        // 部分文件系统不支持创建时间，退回到修改时间
        let created_at = metadata.created().map(to_millis).unwrap_or(modified_at);

        Self {
            path: directory.join(name),
            name: name.to_string(),
            size_kb: bytes_to_kb(metadata.len()),
            modified_at,
            created_at,
        }
    }

    #[cfg(test)]
    pub(crate) fn synthetic(directory: &Path, name: &str, size_kb: f64, modified_at: i64) -> Self {
        Self {
            path: directory.join(name),
            name: name.to_string(),
            size_kb,
            modified_at,
            created_at: modified_at,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_kb(&self) -> f64 {
        self.size_kb
    }

    pub fn modified_at(&self) -> i64 {
        self.modified_at
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}

/// 字节数换算为 KB（按 1000 计）
pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1000.0
}

pub(crate) fn to_millis(time: SystemTime) -> i64 {
    chrono::DateTime::<chrono::Utc>::from(time).timestamp_millis()
}
