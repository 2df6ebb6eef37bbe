//! All AI capability functionality

pub mod adapter;
pub mod host;
pub mod remote;
pub mod session;

// Re-export main types for convenience
pub use adapter::{Action, CapabilityAdapter, RewriteOptions};
pub use host::{AiHost, Capability, CapabilityFactory, HostSession, SessionConfig, SessionKind};
pub use remote::RemoteHost;
pub use session::SessionGuard;
