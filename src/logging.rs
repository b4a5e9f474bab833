//! Logging setup
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file.
//! `RUST_LOG` overrides the default `info` level.

use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber writing into `log_dir`.
///
/// Keep the returned guard alive for the lifetime of the program; dropping
/// it flushes buffered log lines.
pub fn init_tracing(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let appender = tracing_appender::rolling::daily(log_dir, "schema-table.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .with(filter)
        .try_init()?;

    Ok(guard)
}
