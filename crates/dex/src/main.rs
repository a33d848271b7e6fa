//! dex - creature lookup with a local cache

mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dexcache::{CacheConfig, CacheService, DexError, DEFAULT_BASE_URL, DEFAULT_LANG};
use dexstore::{FileStore, FileStoreOptions, DEFAULT_CAPACITY};
use tracing::{debug, warn};

use crate::commands::{Command, CommandHandler};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory
    #[arg(short, long, env = "DEX_DATA", default_value = "./data")]
    data: PathBuf,

    /// API base URL
    #[arg(long, env = "DEX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Cache entry lifetime in seconds
    #[arg(long, env = "DEX_TTL_SECS", default_value_t = 300)]
    ttl_secs: u64,

    /// Store capacity in bytes
    #[arg(long, env = "DEX_QUOTA_BYTES", default_value_t = DEFAULT_CAPACITY)]
    quota_bytes: usize,

    /// Request timeout in seconds (none by default)
    #[arg(long, env = "DEX_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Language for ability names and descriptions
    #[arg(long, env = "DEX_LANG", default_value = DEFAULT_LANG)]
    lang: String,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout is command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<DexError>()
        .map(|e| e.exit_code())
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}

async fn run(args: Args) -> Result<()> {
    std::fs::create_dir_all(&args.data)
        .with_context(|| format!("failed to create data directory {}", args.data.display()))?;

    let options = FileStoreOptions::default().with_capacity(Some(args.quota_bytes));
    let store = Arc::new(
        FileStore::open(&args.data, options)
            .with_context(|| format!("failed to open store in {}", args.data.display()))?,
    );
    debug!(dir = %args.data.display(), entries = store.len(), "store opened");

    let config = CacheConfig::default()
        .with_base_url(args.base_url)
        .with_ttl(Duration::from_secs(args.ttl_secs))
        .with_request_timeout(args.timeout_secs.map(Duration::from_secs));

    let service = CacheService::over_http(config, store.clone())?;
    let handler = CommandHandler::new(service, args.lang);
    let result = handler.handle(args.command).await;
    finish(result, store.close())
}

/// The command's own error wins over a failed close
fn finish(result: Result<()>, closed: dexstore::Result<()>) -> Result<()> {
    if let Err(e) = closed {
        if result.is_err() {
            warn!(error = %e, "failed to close store");
        } else {
            return Err(e).context("failed to close store");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_error_does_not_mask_command_error() {
        let failed: Result<()> = Err(DexError::InvalidQuery {
            message: "empty query".to_string(),
        }
        .into());

        let err = finish(failed, Err(dexstore::Error::Closed)).unwrap_err();
        assert_eq!(exit_code(&err), 1);
        assert!(err.downcast_ref::<DexError>().is_some());
    }

    #[test]
    fn test_close_error_after_success() {
        let err = finish(Ok(()), Err(dexstore::Error::Closed)).unwrap_err();
        assert!(format!("{:#}", err).starts_with("failed to close store"));
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
