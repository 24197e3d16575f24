// src/telemetry.rs
// =============================================================================
// Sets up `tracing` output.
//
// Diagnostics go to stderr so that stdout only ever carries the
// "Downloaded: <url>" progress lines and the final error message.
// RUST_LOG overrides the default filter.
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "warn,site_mirror=debug"
    } else {
        "warn,site_mirror=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
