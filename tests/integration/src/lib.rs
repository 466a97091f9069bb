//! Integration tests for shapewire (query parameters + XML bodies).
//!
//! These tests drive the typed S3 shapes through both wire forms and back.
//! Set `RUST_LOG=shapewire_core=debug` to see the codec's own logging.

use std::sync::Once;

use shapewire_core::CodecConfig;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Codec settings for a test, with tracing installed.
#[must_use]
pub fn test_config() -> CodecConfig {
    init_tracing();
    CodecConfig::default()
}

/// View an XML document as text.
#[must_use]
pub fn xml_text(xml: &[u8]) -> &str {
    std::str::from_utf8(xml).unwrap_or_default()
}

mod test_query;
mod test_registry;
mod test_xml;
