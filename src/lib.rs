pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod platform;

pub use crate::core::{SyncConfig, SyncEngine, SyncReport};
pub use crate::error::{Result, SyncError};
