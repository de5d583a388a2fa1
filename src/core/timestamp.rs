use crate::core::record::Catalog;

/// 空目录的时间戳，早于任何真实文件
pub const EPOCH_ZERO: i64 = 0;

/// 目录中最新的修改时间，作为增量同步的水位线
pub fn newest(catalog: &Catalog) -> i64 {
    catalog
        .values()
        .map(|record| record.modified_at())
        .max()
        .unwrap_or(EPOCH_ZERO)
}
