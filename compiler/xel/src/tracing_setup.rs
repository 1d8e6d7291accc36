//! Subscriber setup for hosts that want the engine's events on stderr.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a formatting subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set or when another global
/// subscriber is already installed; safe to call repeatedly. Enable
/// with `RUST_LOG=xel_compile=debug` to see compilation decisions, or
/// `RUST_LOG=xel_eval=trace` for every evaluated node.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            // The host already installed its own subscriber.
            if let Err(err) = installed {
                tracing::debug!(%err, "tracing subscriber not installed");
            }
        }
    });
}
