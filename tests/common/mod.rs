//! Common test utilities and logging infrastructure
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=highlighted_textbox::textbox=trace` - Event dispatch tracing

#![allow(dead_code)]

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use highlighted_textbox::SpanList;

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Idempotent. `log` records from the library are bridged into tracing by
/// the subscriber's log compatibility layer.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("highlighted_textbox=debug,test=info"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .compact(),
            )
            .try_init()
            .ok();
    });
}

/// A test span guard that logs entry and exit.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Build a span list from `(text, label)` pairs.
pub fn spans(items: &[(&str, Option<&str>)]) -> SpanList {
    items.iter().copied().collect()
}
