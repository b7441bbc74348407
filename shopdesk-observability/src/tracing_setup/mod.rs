//! Tracing setup: `SHOPDESK_LOG` filtering with JSON or plain output on stderr.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shopdesk_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize the global subscriber.
///
/// `SHOPDESK_LOG` overrides `config.log_level`, e.g.
/// `SHOPDESK_LOG=shopdesk_retrieval=debug,shopdesk_storage=warn`.
/// Idempotent: later calls are ignored.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SHOPDESK_LOG")
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        install(filter, config.json);
    });
}

/// Initialize with an explicit filter string (tests, embedding).
pub fn init_tracing_with_filter(filter: &str, json: bool) {
    INIT.call_once(|| install(EnvFilter::new(filter), json));
}

fn install(filter: EnvFilter, json: bool) {
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };
    // Another global subscriber (e.g. a test harness) wins.
    if let Err(e) = installed {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}
