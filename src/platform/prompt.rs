use super::DirectoryPrompt;
use crate::error::{Result, SyncError};
use dialoguer::Input;
use std::path::PathBuf;

/// 在终端中询问目标目录
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl DirectoryPrompt for TerminalPrompt {
    fn prompt(&self) -> Result<PathBuf> {
        let input: String = Input::new()
            .with_prompt("图片保存目录")
            .allow_empty(true)
            .interact_text()
            .map_err(|_| SyncError::PromptCancelled)?;

        let input = input.trim();
        if input.is_empty() {
            return Err(SyncError::PromptCancelled);
        }

        Ok(PathBuf::from(input))
    }
}

/// 返回预设结果，无需终端
#[derive(Debug, Default)]
pub struct FixedPrompt(pub Option<PathBuf>);

impl DirectoryPrompt for FixedPrompt {
    fn prompt(&self) -> Result<PathBuf> {
        self.0.clone().ok_or(SyncError::PromptCancelled)
    }
}
