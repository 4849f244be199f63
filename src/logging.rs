use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global tracing subscriber. WARN by default so the
/// interactive prompts stay clean; set `POSTCRAFT_LOG=debug` to see
/// fallback and history-store diagnostics.
pub fn init() {
    let level = match std::env::var("POSTCRAFT_LOG").ok().as_deref() {
        Some("error") => Level::ERROR,
        Some("info") => Level::INFO,
        Some("debug") => Level::DEBUG,
        Some("trace") => Level::TRACE,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
