//! Background surface: settings read/write, acknowledgement tags, and the
//! selection context menu.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::models::{Outcome, Request, Response, Settings, Tag};
use crate::core::settings::{SettingsStore, load_settings, save_settings};
use crate::errors::ClarifyError;
use crate::router::{MessageHandler, Router};
use crate::transport::Transport;

pub const MENU_PARENT_ID: &str = "medclarify-parent";
pub const MENU_SIMPLIFY_ID: &str = "medclarify-simplify";
pub const MENU_SUMMARIZE_ID: &str = "medclarify-summarize";

/// Serves `getSettings` and `saveSettings` from the persisted store.
pub struct SettingsHandler {
    store: Arc<dyn SettingsStore>,
}

impl SettingsHandler {
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageHandler for SettingsHandler {
    async fn handle(&self, request: Request) -> Option<Response> {
        match request {
            Request::GetSettings => {
                let settings = load_settings(self.store.as_ref())
                    .await
                    .unwrap_or_else(|e| {
                        warn!("Settings read failed, answering with defaults: {}", e);
                        Settings::default()
                    });
                Some(Response::Settings(settings))
            }
            Request::SaveSettings { settings } => {
                match save_settings(self.store.as_ref(), &settings).await {
                    Ok(()) => Some(Response::Outcome(Outcome::ok())),
                    Err(e) => {
                        error!("Settings write failed: {}", e);
                        Some(Response::Outcome(Outcome::failed(e.to_string())))
                    }
                }
            }
            _ => None,
        }
    }
}

/// Acknowledges processing tags without doing any work.
pub struct AckHandler;

#[async_trait]
impl MessageHandler for AckHandler {
    async fn handle(&self, request: Request) -> Option<Response> {
        let what = match request.tag() {
            Tag::ProcessSimplify => "simplification",
            Tag::ProcessSummarize => "summarization",
            Tag::ProcessExplain => "explanation",
            _ => return None,
        };
        info!("Processing {} request", what);
        Some(Response::Outcome(Outcome::ok()))
    }
}

/// The background surface's single dispatch table.
///
/// # Errors
///
/// Only fails if a tag were registered twice, which this table never does.
pub fn background_router(store: Arc<dyn SettingsStore>) -> Result<Router, ClarifyError> {
    let mut router = Router::new("background");

    let settings: Arc<dyn MessageHandler> = Arc::new(SettingsHandler::new(store));
    router.register_all(&[Tag::GetSettings, Tag::SaveSettings], &settings)?;

    let ack: Arc<dyn MessageHandler> = Arc::new(AckHandler);
    router.register_all(
        &[Tag::ProcessSimplify, Tag::ProcessSummarize, Tag::ProcessExplain],
        &ack,
    )?;

    Ok(router)
}

/// One context-menu entry, shown when text is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub parent_id: Option<&'static str>,
    pub title: &'static str,
}

/// Menu entries to install. Empty when the user disabled the context menu.
#[must_use]
pub fn context_menu_items(settings: &Settings) -> Vec<MenuItem> {
    if !settings.enable_context_menu {
        return Vec::new();
    }
    vec![
        MenuItem {
            id: MENU_PARENT_ID,
            parent_id: None,
            title: "MedClarify",
        },
        MenuItem {
            id: MENU_SIMPLIFY_ID,
            parent_id: Some(MENU_PARENT_ID),
            title: "Simplify Medical Text",
        },
        MenuItem {
            id: MENU_SUMMARIZE_ID,
            parent_id: Some(MENU_PARENT_ID),
            title: "Summarize Medical Text",
        },
    ]
}

/// Map a menu click to the page-level request it triggers.
#[must_use]
pub fn menu_request(menu_id: &str, selection: Option<&str>) -> Option<Request> {
    let text = selection.unwrap_or_default().to_string();
    match menu_id {
        MENU_SIMPLIFY_ID => Some(Request::SimplifyText { text }),
        MENU_SUMMARIZE_ID => Some(Request::SummarizeText { text }),
        _ => None,
    }
}

/// Forward a menu click to the page surface, fire-and-forget.
///
/// Returns whether anything was sent.
///
/// # Errors
///
/// Returns the transport's error if delivery fails.
pub async fn on_menu_click(
    page: &dyn Transport,
    menu_id: &str,
    selection: Option<&str>,
) -> Result<bool, ClarifyError> {
    let Some(request) = menu_request(menu_id, selection) else {
        return Ok(false);
    };
    info!(menu_id, "Context menu clicked");
    page.send(request).await?;
    Ok(true)
}
