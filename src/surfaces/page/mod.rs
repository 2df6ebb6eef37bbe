//! Page surface: selection access, context-command handling and notifications.

pub mod highlight;
pub mod notifications;

use async_trait::async_trait;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::ai::{Action, CapabilityAdapter};
use crate::core::models::{Request, Response, SelectionResponse, Tag};
use crate::errors::ClarifyError;
use crate::router::{MessageHandler, Router};

pub use highlight::{PageNode, highlight_page};
pub use notifications::{Notification, NotificationBoard, NotificationKind};

/// Live text selection of the page.
pub trait SelectionSource: Send + Sync {
    fn selected_text(&self) -> Option<String>;
}

/// A selection that can be set from outside, e.g. by a test or a driver.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    text: Arc<RwLock<String>>,
}

impl SharedSelection {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(RwLock::new(text.into())),
        }
    }

    pub fn set(&self, text: impl Into<String>) {
        if let Ok(mut guard) = self.text.write() {
            *guard = text.into();
        }
    }
}

impl SelectionSource for SharedSelection {
    fn selected_text(&self) -> Option<String> {
        self.text
            .read()
            .ok()
            .map(|t| t.clone())
            .filter(|t| !t.is_empty())
    }
}

/// Page-level actions triggered from the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Simplify,
    Summarize,
}

impl PageAction {
    fn progress_message(self) -> &'static str {
        match self {
            PageAction::Simplify => "Simplifying medical text...",
            PageAction::Summarize => "Summarizing medical text...",
        }
    }

    fn success_message(self, result: &str) -> String {
        match self {
            PageAction::Simplify => format!("Simplified: {result}"),
            PageAction::Summarize => format!("Summary: {result}"),
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            PageAction::Simplify => "Failed to simplify text",
            PageAction::Summarize => "Failed to summarize text",
        }
    }

    fn action(self) -> Action {
        match self {
            PageAction::Simplify => Action::Simplify,
            PageAction::Summarize => Action::Summarize,
        }
    }
}

#[derive(Clone)]
pub struct PageSurface {
    adapter: CapabilityAdapter,
    selection: Arc<dyn SelectionSource>,
    board: NotificationBoard,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl PageSurface {
    #[must_use]
    pub fn new(
        adapter: CapabilityAdapter,
        selection: Arc<dyn SelectionSource>,
        notification_duration: Duration,
    ) -> Self {
        Self {
            adapter,
            selection,
            board: NotificationBoard::new(notification_duration),
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationBoard {
        &self.board
    }

    #[must_use]
    pub fn selected_text(&self) -> String {
        self.selection.selected_text().unwrap_or_default()
    }

    /// Run one page action to completion, notifying along the way.
    ///
    /// Idle → processing → result or error; the final notification then
    /// dismisses itself.
    pub async fn process(&self, action: PageAction, text: &str) {
        if text.trim().is_empty() {
            self.board
                .show(ClarifyError::EmptyInput.to_string(), NotificationKind::Error)
                .await;
            return;
        }

        self.board
            .show(action.progress_message(), NotificationKind::Info)
            .await;

        match self.adapter.invoke(action.action(), text).await {
            Ok(result) => {
                self.board
                    .show(action.success_message(&result), NotificationKind::Success)
                    .await;
            }
            Err(e) => {
                error!("Error processing page action {:?}: {}", action, e);
                self.board
                    .show(action.failure_message(), NotificationKind::Error)
                    .await;
            }
        }
    }

    /// Start `process` in the background.
    pub fn spawn_process(&self, action: PageAction, text: String) {
        let surface = self.clone();
        let handle = tokio::spawn(async move {
            surface.process(action, &text).await;
        });
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.retain(|t| !t.is_finished());
            tasks.push(handle);
        }
    }

    /// Wait for every background action started so far.
    pub async fn settle(&self) {
        let pending: Vec<JoinHandle<()>> = match self.tasks.lock() {
            Ok(mut tasks) => tasks.drain(..).collect(),
            Err(_) => Vec::new(),
        };
        for handle in pending {
            if let Err(e) = handle.await {
                error!("Page action task failed: {}", e);
            }
        }
    }
}

struct PageHandler {
    surface: PageSurface,
}

#[async_trait]
impl MessageHandler for PageHandler {
    async fn handle(&self, request: Request) -> Option<Response> {
        match request {
            Request::GetSelectedText => Some(Response::Selection(SelectionResponse {
                selected_text: self.surface.selected_text(),
            })),
            Request::SimplifyText { text } => {
                self.surface.spawn_process(PageAction::Simplify, text);
                None
            }
            Request::SummarizeText { text } => {
                self.surface.spawn_process(PageAction::Summarize, text);
                None
            }
            _ => None,
        }
    }
}

/// The page surface's single dispatch table.
///
/// # Errors
///
/// Only fails if a tag were registered twice, which this table never does.
pub fn page_router(surface: PageSurface) -> Result<Router, ClarifyError> {
    let mut router = Router::new("page");
    let handler: Arc<dyn MessageHandler> = Arc::new(PageHandler { surface });
    router.register_all(
        &[Tag::GetSelectedText, Tag::SimplifyText, Tag::SummarizeText],
        &handler,
    )?;
    info!("Page router ready");
    Ok(router)
}
