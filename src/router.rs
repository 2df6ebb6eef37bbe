//! Per-surface message dispatch.
//!
//! Each surface owns one [`Router`] with at most one handler per [`Tag`].
//! A request with no matching handler produces no response, which callers
//! treat as "not handled" rather than as an error.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::models::{Outcome, Request, Response, Tag};
use crate::errors::ClarifyError;

#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handle a request. `None` means no reply is sent.
    async fn handle(&self, request: Request) -> Option<Response>;
}

pub struct Router {
    surface: &'static str,
    handlers: HashMap<Tag, Arc<dyn MessageHandler>>,
}

impl Router {
    #[must_use]
    pub fn new(surface: &'static str) -> Self {
        Self {
            surface,
            handlers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn surface(&self) -> &'static str {
        self.surface
    }

    /// Register `handler` for `tag`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateHandler` if the tag already has a handler on this surface.
    pub fn register(
        &mut self,
        tag: Tag,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), ClarifyError> {
        if self.handlers.contains_key(&tag) {
            return Err(ClarifyError::DuplicateHandler(tag));
        }
        self.handlers.insert(tag, handler);
        Ok(())
    }

    /// Register one handler for several tags.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateHandler` on the first tag that is already taken; tags
    /// before it stay registered.
    pub fn register_all(
        &mut self,
        tags: &[Tag],
        handler: &Arc<dyn MessageHandler>,
    ) -> Result<(), ClarifyError> {
        for tag in tags {
            self.register(*tag, Arc::clone(handler))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn handles(&self, tag: Tag) -> bool {
        self.handlers.contains_key(&tag)
    }

    pub async fn route(&self, request: Request) -> Option<Response> {
        let tag = request.tag();
        let Some(handler) = self.handlers.get(&tag) else {
            debug!(surface = self.surface, %tag, "No handler registered, ignoring");
            return None;
        };
        info!(surface = self.surface, %tag, "Dispatching message");
        handler.handle(request).await
    }

    /// Route a raw JSON message.
    ///
    /// Messages without a recognized `action`, or whose tag has no handler
    /// here, get no reply. A handled tag with a payload that does not decode
    /// gets a failed [`Outcome`] instead of silence.
    pub async fn route_json(&self, message: Value) -> Option<Value> {
        let tag = match message.get("action").cloned().map(serde_json::from_value::<Tag>) {
            Some(Ok(tag)) => tag,
            _ => {
                debug!(surface = self.surface, "Ignoring unrecognized message");
                return None;
            }
        };
        if !self.handles(tag) {
            debug!(surface = self.surface, %tag, "No handler registered, ignoring");
            return None;
        }

        let response = match serde_json::from_value::<Request>(message) {
            Ok(request) => self.route(request).await?,
            Err(e) => {
                warn!(surface = self.surface, %tag, "Malformed message payload: {}", e);
                Response::Outcome(Outcome::failed(format!("Malformed '{tag}' message: {e}")))
            }
        };
        serde_json::to_value(response).ok()
    }
}
