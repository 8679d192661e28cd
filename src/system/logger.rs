use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// HTTP client internals are noisy at debug level and say nothing about the
/// judge, so they stay at warn unless a filter is given explicitly.
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,h2=warn";

/// Installs the global tracing subscriber. Logs go to stderr so the report
/// on stdout stays machine-readable.
pub fn init_logging(verbose: bool, no_color: bool) {
    let explicit = std::env::var("JUDGELOAD_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let filter = EnvFilter::try_new(filter_directives(verbose, explicit.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose, None)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn filter_directives(verbose: bool, explicit: Option<&str>) -> String {
    match explicit.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_owned(),
        None if verbose => format!("debug,{}", QUIET_DEPENDENCIES),
        None => format!("info,{}", QUIET_DEPENDENCIES),
    }
}
