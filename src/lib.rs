/// MedClarify - turns selected medical text into plain language using the
/// browser's on-device AI capabilities.
///
/// The crate models the extension as independently running surfaces that talk
/// through tagged messages:
/// 1. A background surface that serves settings and acknowledges processing tags
/// 2. A page surface that reads the selection, runs context-menu actions and
///    shows transient notifications
/// 3. A popup surface that simplifies or summarizes text directly
/// 4. A settings form that persists user preferences
///
/// # Architecture
///
/// The system uses:
/// - A per-surface `Router` with exactly one handler per message tag
/// - A `CapabilityAdapter` that calls host AI sessions with fixed options,
///   a bounded time budget and guaranteed session release
/// - A `SettingsStore` shared by every surface
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use medclarify::ai::{CapabilityAdapter, RemoteHost};
/// use medclarify::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Set up structured logging
///     medclarify::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let adapter = CapabilityAdapter::new(Arc::new(RemoteHost::from_config(&config)))
///         .with_timeout(config.session_timeout);
///
///     let plain = adapter
///         .simplify("The patient presented with myocardial infarction")
///         .await?;
///     println!("{plain}");
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod router;
pub mod surfaces;
pub mod transport;

pub use ai::CapabilityAdapter;
pub use errors::ClarifyError;
pub use router::Router;

/// Configure structured logging with JSON format on stderr.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once keeps the first subscriber.
///
/// # Example
///
/// ```
/// medclarify::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
