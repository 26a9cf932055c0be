use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text on stderr; stdout carries the JSON body.
    Compact,
    /// Flattened JSON objects on stdout, one per line, for CloudWatch.
    Json,
}

pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "boleto_barcode=debug,info"
    } else {
        "boleto_barcode=info"
    }
}

/// `RUST_LOG` wins over the built-in directives.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init(format: LogFormat, verbose: bool) {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));
    match format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false),
            )
            .init(),
    }
}

pub fn init_cli_logger(verbose: bool) {
    init(LogFormat::Compact, verbose);
}

pub fn init_lambda_logger() {
    init(LogFormat::Json, false);
}
