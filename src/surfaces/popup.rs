//! Popup surface: direct simplify/summarize on typed or selected text.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::ai::{Action, CapabilityAdapter};
use crate::core::models::{Availability, Request};
use crate::errors::ClarifyError;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupTab {
    #[default]
    Simplify,
    Summarize,
}

impl PopupTab {
    fn action(self) -> Action {
        match self {
            PopupTab::Simplify => Action::Simplify,
            PopupTab::Summarize => Action::Summarize,
        }
    }
}

/// Clears the popup's busy flag when dropped.
struct BusyFlag(Arc<AtomicBool>);

impl Drop for BusyFlag {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A popup action that has been started but not yet applied.
///
/// The popup stays busy for as long as this value, or the future returned by
/// [`PendingCall::run`], is alive. Dropping either one mid-call clears it.
pub struct PendingCall {
    adapter: CapabilityAdapter,
    action: Action,
    input: String,
    _busy: BusyFlag,
}

impl PendingCall {
    /// # Errors
    ///
    /// See [`CapabilityAdapter::invoke`].
    pub async fn run(self) -> Result<String, ClarifyError> {
        self.adapter.invoke(self.action, &self.input).await
    }
}

pub struct PopupSurface {
    adapter: CapabilityAdapter,
    page: Option<Arc<dyn Transport>>,
    input: String,
    result: String,
    error: String,
    busy: Arc<AtomicBool>,
    tab: PopupTab,
    availability: Availability,
}

impl PopupSurface {
    /// `page` reaches the active page, if there is one.
    #[must_use]
    pub fn new(adapter: CapabilityAdapter, page: Option<Arc<dyn Transport>>) -> Self {
        Self {
            adapter,
            page,
            input: String::new(),
            result: String::new(),
            error: String::new(),
            busy: Arc::new(AtomicBool::new(false)),
            tab: PopupTab::default(),
            availability: Availability {
                prompt: false,
                translator: false,
                summarizer: false,
                rewriter: false,
            },
        }
    }

    /// Probe availability and pull the page selection into the input field.
    /// A missing selection or an unanswered request leaves the input as is.
    pub async fn activate(&mut self) {
        self.availability = self.adapter.check_availability();

        let Some(page) = self.page.as_ref() else {
            return;
        };
        match page.request(Request::GetSelectedText).await {
            Ok(Some(response)) => match response.selected_text() {
                Some(text) if !text.is_empty() => self.input = text.to_string(),
                _ => debug!("Page has no selection"),
            },
            Ok(None) => debug!("Page did not answer getSelectedText"),
            Err(e) => warn!("Could not read page selection: {}", e),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn select_tab(&mut self, tab: PopupTab) {
        self.tab = tab;
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn tab(&self) -> PopupTab {
        self.tab
    }

    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Whether the action button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.input.trim().is_empty()
    }

    /// Text handed to the clipboard by the copy button.
    #[must_use]
    pub fn copy_result(&self) -> &str {
        &self.result
    }

    /// Run the active tab's action.
    pub async fn submit(&mut self) {
        self.drive(self.tab).await;
    }

    pub async fn simplify(&mut self) {
        self.drive(PopupTab::Simplify).await;
    }

    pub async fn summarize(&mut self) {
        self.drive(PopupTab::Summarize).await;
    }

    /// Validate the input and mark the popup busy.
    ///
    /// Returns `None` when the input is blank, which sets the empty-input
    /// error, or when another call is still in flight.
    pub fn begin(&mut self, tab: PopupTab) -> Option<PendingCall> {
        if self.input.trim().is_empty() {
            self.error = ClarifyError::EmptyInput.to_string();
            return None;
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            debug!("Popup call already in flight, ignoring submit");
            return None;
        }

        self.error.clear();
        self.result.clear();
        Some(PendingCall {
            adapter: self.adapter.clone(),
            action: tab.action(),
            input: self.input.clone(),
            _busy: BusyFlag(Arc::clone(&self.busy)),
        })
    }

    /// Show the outcome of a call started with [`PopupSurface::begin`].
    pub fn finish(&mut self, outcome: Result<String, ClarifyError>) {
        match outcome {
            Ok(output) => self.result = output,
            Err(e) => self.error = e.to_string(),
        }
    }

    async fn drive(&mut self, tab: PopupTab) {
        let Some(call) = self.begin(tab) else {
            return;
        };
        let outcome = call.run().await;
        self.finish(outcome);
    }
}
