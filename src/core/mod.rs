pub mod engine;
pub mod record;
pub mod scanner;
pub mod timestamp;
pub mod validator;

pub use engine::{SyncConfig, SyncEngine, SyncReport, SyncSummary};
pub use record::{Catalog, FileRecord};
pub use scanner::{DirectoryScanner, ScanConfig};
pub use timestamp::{newest, EPOCH_ZERO};
pub use validator::{CopyOutcome, CopyValidator, ValidateConfig};
