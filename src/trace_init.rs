//! Optional JSON trace output, compiled in with the `trace` feature.

#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

pub const TRACE_FILE: &str = "krutidev-trace.jsonl";

/// Keeps the background log writer alive. Pending lines are flushed on drop.
#[must_use]
pub struct TraceGuard {
    #[cfg(feature = "trace")]
    _guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Start writing spans and events to `<log_dir>/krutidev-trace.jsonl`.
///
/// Filtering follows `RUST_LOG`, falling back to `kruti_engine=debug`. Only
/// the first call installs a subscriber.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> TraceGuard {
    let mut guard = None;
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
        let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker);

        tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kruti_engine=debug")),
            )
            .init();
    });
    TraceGuard { _guard: guard }
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) -> TraceGuard {
    TraceGuard {}
}
