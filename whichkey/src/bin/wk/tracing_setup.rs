//! Log output for the wk binary.
//!
//! Library code logs through the `log` facade; this installs a tracing
//! subscriber that picks those records up and writes them to stderr or the
//! configured log file, so stdout stays reserved for command output.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use whichkey::config::LoggingConfig;

/// Drops any event whose rendered line contains one of the patterns.
struct SuppressingFormatter {
    inner: fmt::format::Format,
    patterns: Vec<String>,
}

impl SuppressingFormatter {
    fn new(patterns: &[String]) -> Self {
        Self {
            inner: fmt::format::Format::default().with_target(false),
            patterns: patterns.to_vec(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for SuppressingFormatter
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
        let mut line = String::new();
        self.inner.format_event(ctx, Writer::new(&mut line), event)?;

        if self.patterns.iter().any(|pattern| line.contains(pattern.as_str())) {
            return Ok(());
        }
        write!(writer, "{line}")
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| eprintln!("cannot open log file {}: {err}", path.display()))
        .ok()
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. A log file that can't be
/// opened falls back to stderr.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let formatter = SuppressingFormatter::new(&config.suppressed_patterns);

    match config.log_file.as_deref().and_then(open_log_file) {
        Some(file) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .event_format(formatter);
            tracing_subscriber::registry().with(env_filter).with(layer).init();
        }
        None => {
            let layer = fmt::layer().with_writer(io::stderr).event_format(formatter);
            tracing_subscriber::registry().with(env_filter).with(layer).init();
        }
    }
}
