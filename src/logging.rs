//! Logging setup for the command line tools, using `tracing_subscriber`.
//!
//! Events go to stderr so decoded output on stdout stays machine readable.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a global subscriber.
///
/// `RUST_LOG` takes precedence over `directives` when set. `pretty` selects
/// human readable output; otherwise events are emitted as JSON lines.
pub fn setup_logging(directives: &str, pretty: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let registry = tracing_subscriber::registry().with(filter);

    if pretty {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
