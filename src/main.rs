use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use wallsync_lib::cli::Cli;
use wallsync_lib::commands::sync::{render_report, run_sync, SyncRequest};
use wallsync_lib::config::default_config_dir;
use wallsync_lib::logging::{LogConfig, SizeRotatingWriter};
use wallsync_lib::platform::{
    CacheLocator, ContentDeliveryLocator, FixedLocator, ImageCrateProbe, TerminalPrompt,
};
use wallsync_lib::{SyncConfig, SyncError};

/// 初始化日志系统
fn init_logging(config_dir: &Path, verbose: bool) {
    let config = LogConfig::load(config_dir);

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(config.tracing_level().into())
        .from_env_lossy();

    // 文件日志层
    let file_layer = if config.enabled {
        SizeRotatingWriter::new(config_dir, config.max_size_mb)
            .ok()
            .map(|writer| {
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
            })
    } else {
        None
    };

    // 控制台层：-v 或 debug 构建时输出到 stderr
    let console_layer = (verbose || cfg!(debug_assertions)).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
    });

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer);

    let _ = tracing::subscriber::set_global_default(subscriber);
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config_dir = cli.config_dir.clone().unwrap_or_else(default_config_dir);
    let config = cli.apply(SyncConfig::load(&config_dir));

    let locator: Box<dyn CacheLocator> = match &cli.source {
        Some(source) => Box::new(FixedLocator::new(source)),
        None => Box::new(ContentDeliveryLocator::new()),
    };

    let request = SyncRequest {
        destination: cli.destination.clone(),
        config,
    };

    let report = run_sync(
        request,
        locator.as_ref(),
        &TerminalPrompt,
        Arc::new(ImageCrateProbe),
    )
    .await
    .context("同步失败")?;

    Ok(render_report(&report, cli.json))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_dir = cli.config_dir.clone().unwrap_or_else(default_config_dir);
    init_logging(&config_dir, cli.verbose);

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("错误: {:#}", e);
            if let Some(hint) = e.downcast_ref::<SyncError>().and_then(SyncError::hint) {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
