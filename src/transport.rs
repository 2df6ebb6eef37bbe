//! Inter-surface message delivery.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::core::models::{Request, Response};
use crate::errors::ClarifyError;
use crate::router::Router;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `request` and wait for a reply. `Ok(None)` means no listener answered.
    async fn request(&self, request: Request) -> Result<Option<Response>, ClarifyError>;

    /// Deliver `request` without caring about a reply.
    async fn send(&self, request: Request) -> Result<(), ClarifyError> {
        self.request(request).await.map(|_| ())
    }
}

/// Delivers to a router in the same process, passing through the JSON wire form.
#[derive(Clone)]
pub struct LocalTransport {
    router: Arc<Router>,
}

impl LocalTransport {
    #[must_use]
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn request(&self, request: Request) -> Result<Option<Response>, ClarifyError> {
        let message = serde_json::to_value(&request)
            .map_err(|e| ClarifyError::HostError(format!("unserializable message: {e}")))?;
        let Some(reply) = self.router.route_json(message).await else {
            debug!(surface = self.router.surface(), "Message went unanswered");
            return Ok(None);
        };
        serde_json::from_value(reply)
            .map(Some)
            .map_err(|e| ClarifyError::HostError(format!("malformed reply: {e}")))
    }
}
