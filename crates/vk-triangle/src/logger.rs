use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Sets up the logging pipeline writing to stdout. The returned guard must
/// live until the process exits or buffered logs are lost.
pub fn init_logger(debug: bool) -> WorkerGuard {
    let level = if debug { Level::DEBUG } else { Level::INFO };

    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let stdout_layer = fmt::layer()
        .with_writer(writer)
        .with_filter(tracing_subscriber::filter::LevelFilter::from_level(level));

    tracing_subscriber::registry().with(stdout_layer).init();

    guard
}

/// Whether `--debug` was passed on the command line.
pub fn should_debug() -> bool {
    std::env::args().any(|arg| arg == "--debug")
}
