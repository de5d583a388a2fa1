use crate::core::{SyncConfig, SyncEngine, SyncReport};
use crate::error::Result;
use crate::platform::{CacheLocator, DirectoryPrompt, ImageProbe};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// 一次同步需要的输入
#[derive(Debug, Clone, Default)]
pub struct SyncRequest {
    /// 目标目录；为空时询问用户
    pub destination: Option<PathBuf>,
    pub config: SyncConfig,
}

/// 定位缓存目录、确定目标目录，然后执行同步
pub async fn run_sync(
    request: SyncRequest,
    locator: &dyn CacheLocator,
    prompt: &dyn DirectoryPrompt,
    probe: Arc<dyn ImageProbe>,
) -> Result<SyncReport> {
    request.config.validate()?;

    let source_dir = locator.locate().await?;
    info!("缓存目录 ({}): {:?}", locator.name(), source_dir);

    let dest_dir = match request.destination {
        Some(dir) => dir,
        None => prompt.prompt()?,
    };

    SyncEngine::with_config(request.config, probe)
        .sync(&source_dir, &dest_dir)
        .await
}

/// 生成给用户看的结果
pub fn render_report(report: &SyncReport, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    }

    match report {
        SyncReport::UpToDate { destination } => format!(
            "最新的图片已经复制过了！\n图片位于 '{}'",
            destination.display()
        ),
        SyncReport::Synced(summary) => {
            let mut out = format!(
                "已将 {} 张新图片保存到 '{}'\n尝试 {} 个, 保存 {} 个, 尺寸不符 {} 个, 失败 {} 个",
                summary.accepted,
                summary.destination.display(),
                summary.attempted,
                summary.accepted,
                summary.rejected,
                summary.failed
            );
            for error in &summary.errors {
                out.push_str("\n  ");
                out.push_str(error);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SyncSummary;
    use crate::error::SyncError;
    use crate::platform::{FixedLocator, FixedPrompt, ImageCrateProbe};

    struct NoCache;

    #[async_trait::async_trait]
    impl CacheLocator for NoCache {
        async fn locate(&self) -> Result<PathBuf> {
            Err(SyncError::CacheNotFound {
                searched: PathBuf::from("Packages"),
            })
        }

        fn name(&self) -> &str {
            "none"
        }
    }

    #[tokio::test]
    async fn test_prompt_used_when_no_destination() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();

        let report = run_sync(
            SyncRequest::default(),
            &FixedLocator::new(src.path()),
            &FixedPrompt(Some(dest.path().to_path_buf())),
            Arc::new(ImageCrateProbe),
        )
        .await
        .unwrap();

        assert_eq!(report.destination(), dest.path());
    }

    #[tokio::test]
    async fn test_cancelled_prompt_aborts() {
        let src = tempfile::tempdir().unwrap();

        let err = run_sync(
            SyncRequest::default(),
            &FixedLocator::new(src.path()),
            &FixedPrompt(None),
            Arc::new(ImageCrateProbe),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SyncError::PromptCancelled));
    }

    #[tokio::test]
    async fn test_cache_not_found_aborts_before_prompt() {
        let err = run_sync(
            SyncRequest::default(),
            &NoCache,
            &FixedPrompt(None),
            Arc::new(ImageCrateProbe),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SyncError::CacheNotFound { .. }));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut request = SyncRequest::default();
        request.config.scan_config.size_min_kb = 2000.0;

        let err = run_sync(
            request,
            &NoCache,
            &FixedPrompt(None),
            Arc::new(ImageCrateProbe),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SyncError::InvalidConfig(_)));
    }

    #[test]
    fn test_render_up_to_date_mentions_destination() {
        let text = render_report(
            &SyncReport::UpToDate {
                destination: PathBuf::from("/pics"),
            },
            false,
        );
        assert!(text.contains("/pics"));
    }

    #[test]
    fn test_render_synced_lists_errors() {
        let report = SyncReport::Synced(SyncSummary {
            destination: PathBuf::from("/pics"),
            attempted: 3,
            accepted: 1,
            rejected: 1,
            failed: 1,
            errors: vec!["无法解码图片 x".to_string()],
        });

        let text = render_report(&report, false);
        assert!(text.contains("尝试 3 个"));
        assert!(text.contains("无法解码图片 x"));

        let json = render_report(&report, true);
        assert!(json.contains("\"status\": \"synced\""));
    }
}
