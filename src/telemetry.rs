//! Per-process logging.
//!
//! [`init`] builds a `tracing` subscriber with two sinks and installs it as the
//! default for the calling thread until the returned [`Telemetry`] guard is
//! dropped:
//!
//! - `logs/<tool>_<YYYYMMDD_HHMMSS>.log`, appended through a non-blocking
//!   writer that is flushed when the guard drops;
//! - stderr, so the operator sees progress while stdout stays reserved for
//!   the result line.
//!
//! Both sinks use [`LineFormat`]: `2026-01-15 09:30:42,117 - INFO - message`.
//!
//! The level comes from `RUST_LOG` when set, `info` otherwise.

use crate::naming::TIMESTAMP_FORMAT;
use chrono::{Local, NaiveDateTime};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// Directory log files are written to, relative to the working directory.
pub const LOG_DIR: &str = "logs";

/// Stem of every log file name.
pub const TOOL_NAME: &str = "qr_generator";

const DEFAULT_LEVEL: &str = "info";

/// `<timestamp> - <LEVEL> - <message>` with millisecond timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Keeps logging alive for the current scope.
///
/// Dropping it uninstalls the subscriber and flushes the log file.
#[derive(Debug)]
pub struct Telemetry {
    log_file: Option<PathBuf>,
    _dispatch: DefaultGuard,
    _worker: Option<WorkerGuard>,
}

impl Telemetry {
    /// Path of this process's log file, if one could be opened.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// `<tool_name>_<YYYYMMDD_HHMMSS>.log`
pub fn log_file_name(tool_name: &str, now: NaiveDateTime) -> String {
    format!("{tool_name}_{}.log", now.format(TIMESTAMP_FORMAT))
}

fn open_log_file(log_dir: &Path, tool_name: &str) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file_name(tool_name, Local::now().naive_local()));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Start logging to a fresh file in `log_dir` and to stderr.
///
/// If the log file can't be opened, a warning is printed and logging carries
/// on with stderr only.
pub fn init(log_dir: &Path, tool_name: &str) -> Telemetry {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let (file_writer, worker, log_file) = match open_log_file(log_dir, tool_name) {
        Ok((path, file)) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            (Some(non_blocking), Some(guard), Some(path))
        }
        Err(err) => {
            eprintln!(
                "Warning: failed to open log file in {}: {}",
                log_dir.display(),
                err
            );
            (None, None, None)
        }
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .event_format(LineFormat)
            .with_ansi(false)
            .with_writer(writer)
    });
    let console_layer = fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer);

    Telemetry {
        log_file,
        _dispatch: tracing::subscriber::set_default(subscriber),
        _worker: worker,
    }
}
