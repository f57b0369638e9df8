// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Logging Setup
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::General,
    util::{Error, ErrorKind}
};
use failure::ResultExt;
use std::path::Path;
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation}
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Build the log filter. `RUST_LOG` takes precedence over the configured
/// log level.
fn env_filter(general: &General) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(general.log_level.to_string()))
}

/// Open a log file for appending. The file is never rotated.
fn file_writer(location: &str) -> Result<(NonBlocking, WorkerGuard), Error> {
    let path = Path::new(location);
    let (directory, file_name) = match (path.parent(), path.file_name()) {
        (Some(directory), Some(file_name)) => (directory, file_name),
        _ => return Err(Error::from(ErrorKind::FileWrite(location.to_owned())))
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .context(ErrorKind::FileWrite(location.to_owned()))?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Install the global tracing subscriber. Logs go to stderr so that command
/// output on stdout stays machine readable. If a log file is given, logs are
/// appended to it as well.
///
/// The returned guard flushes the log file when it is dropped, so it must be
/// kept alive until the command is done. A log file which can not be opened
/// only produces a warning.
pub fn init(general: &General, log_file: Option<&str>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match log_file.map(file_writer) {
        Some(Ok((writer, guard))) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(env_filter(general))
            ),
            Some(guard)
        ),
        Some(Err(e)) => {
            eprintln!("Warning: {}", e);
            (None, None)
        }
        None => (None, None)
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter(general))
        )
        .init();

    guard
}
