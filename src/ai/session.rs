use tracing::debug;

use super::host::{Capability, HostSession};
use crate::errors::ClarifyError;

/// Owns a host session and destroys it exactly once.
///
/// Release happens on [`SessionGuard::release`] or, failing that, on drop. The
/// drop path covers errors propagated with `?` and futures abandoned by a timeout.
pub struct SessionGuard {
    capability: Capability,
    session: Option<Box<dyn HostSession>>,
}

impl SessionGuard {
    #[must_use]
    pub fn new(capability: Capability, session: Box<dyn HostSession>) -> Self {
        debug!(capability = %capability, "Host session acquired");
        Self {
            capability,
            session: Some(session),
        }
    }

    /// # Errors
    ///
    /// Returns the host's error, or `HostError` if the session was already released.
    pub async fn run(&mut self, input: &str) -> Result<String, ClarifyError> {
        match self.session.as_mut() {
            Some(session) => session.run(input).await,
            None => Err(ClarifyError::HostError(format!(
                "{} session used after release",
                self.capability
            ))),
        }
    }

    pub fn release(mut self) {
        self.release_inner();
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.session.is_some()
    }

    fn release_inner(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.destroy();
            debug!(capability = %self.capability, "Host session released");
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release_inner();
    }
}
