use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match (verbose, level) {
            (true, _) => "book_catalog=debug,info".to_string(),
            (false, Some(level)) => format!("book_catalog={}", level),
            (false, None) => "book_catalog=info".to_string(),
        };
        EnvFilter::new(directive)
    })
}

/// Compact stderr logging for interactive use.
///
/// `RUST_LOG` wins over both `verbose` and `level`.
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

pub fn init_json_logger(level: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(default_filter(false, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .json(),
        )
        .try_init();
}
