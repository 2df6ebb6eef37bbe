//! Settings form.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

use crate::core::config::DEFAULT_SAVED_ACK_MS;
use crate::core::models::{DefaultAction, Settings, SettingsPatch, SummaryLength, Tone};
use crate::core::settings::{SettingsStore, load_settings, save_settings};
use crate::errors::ClarifyError;

/// A single field edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    EnableContextMenu(bool),
    DefaultAction(DefaultAction),
    Tone(Tone),
    SummaryLength(SummaryLength),
}

/// Local draft of the settings; nothing is persisted until [`SettingsForm::save`].
pub struct SettingsForm {
    store: Arc<dyn SettingsStore>,
    draft: Settings,
    saved_at: Option<Instant>,
    ack_duration: Duration,
}

impl SettingsForm {
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            store,
            draft: Settings::default(),
            saved_at: None,
            ack_duration: Duration::from_millis(DEFAULT_SAVED_ACK_MS),
        }
    }

    #[must_use]
    pub fn with_ack_duration(mut self, ack_duration: Duration) -> Self {
        self.ack_duration = ack_duration;
        self
    }

    /// Load persisted settings into the draft, keeping defaults if the read fails.
    pub async fn load(&mut self) {
        match load_settings(self.store.as_ref()).await {
            Ok(settings) => self.draft = settings,
            Err(e) => {
                warn!("Could not load settings, using defaults: {}", e);
                self.draft = Settings::default();
            }
        }
    }

    #[must_use]
    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    pub fn change(&mut self, field: SettingsField) {
        match field {
            SettingsField::EnableContextMenu(v) => self.draft.enable_context_menu = v,
            SettingsField::DefaultAction(v) => self.draft.default_action = v,
            SettingsField::Tone(v) => self.draft.tone = v,
            SettingsField::SummaryLength(v) => self.draft.summary_length = v,
        }
    }

    /// Persist the full draft and start the "saved" acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the acknowledgement is not shown in that case.
    pub async fn save(&mut self) -> Result<(), ClarifyError> {
        save_settings(self.store.as_ref(), &SettingsPatch::from(self.draft)).await?;
        self.saved_at = Some(Instant::now());
        Ok(())
    }

    /// Revert the draft to defaults without persisting.
    pub fn reset(&mut self) {
        self.draft = Settings::default();
    }

    /// Whether the "saved" acknowledgement is currently shown.
    #[must_use]
    pub fn shows_saved(&self) -> bool {
        self.saved_at
            .is_some_and(|at| at.elapsed() < self.ack_duration)
    }
}
