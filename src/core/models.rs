use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Message tags understood by the extension surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    GetSelectedText,
    SimplifyText,
    SummarizeText,
    ProcessSimplify,
    ProcessSummarize,
    ProcessExplain,
    GetSettings,
    SaveSettings,
}

impl Tag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::GetSelectedText => "getSelectedText",
            Tag::SimplifyText => "simplifyText",
            Tag::SummarizeText => "summarizeText",
            Tag::ProcessSimplify => "processSimplify",
            Tag::ProcessSummarize => "processSummarize",
            Tag::ProcessExplain => "processExplain",
            Tag::GetSettings => "getSettings",
            Tag::SaveSettings => "saveSettings",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged message travelling between surfaces. Serialized as
/// `{"action": "<tag>", ...payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetSelectedText,
    SimplifyText {
        #[serde(default)]
        text: String,
    },
    SummarizeText {
        #[serde(default)]
        text: String,
    },
    ProcessSimplify {
        #[serde(default)]
        text: String,
    },
    ProcessSummarize {
        #[serde(default)]
        text: String,
    },
    ProcessExplain {
        #[serde(default)]
        text: String,
    },
    GetSettings,
    SaveSettings {
        #[serde(default, deserialize_with = "lenient_patch")]
        settings: SettingsPatch,
    },
}

impl Request {
    #[must_use]
    pub fn tag(&self) -> Tag {
        match self {
            Request::GetSelectedText => Tag::GetSelectedText,
            Request::SimplifyText { .. } => Tag::SimplifyText,
            Request::SummarizeText { .. } => Tag::SummarizeText,
            Request::ProcessSimplify { .. } => Tag::ProcessSimplify,
            Request::ProcessSummarize { .. } => Tag::ProcessSummarize,
            Request::ProcessExplain { .. } => Tag::ProcessExplain,
            Request::GetSettings => Tag::GetSettings,
            Request::SaveSettings { .. } => Tag::SaveSettings,
        }
    }

    /// The text payload, for tags that carry one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Request::SimplifyText { text }
            | Request::SummarizeText { text }
            | Request::ProcessSimplify { text }
            | Request::ProcessSummarize { text }
            | Request::ProcessExplain { text } => Some(text),
            _ => None,
        }
    }
}

/// Generic success/failure envelope. `result` is only ever set on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Outcome {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            result: None,
            error: None,
        }
    }

    #[must_use]
    pub fn ok_with(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref().filter(|_| self.success)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub selected_text: String,
}

/// Reply to a routed [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Settings(Settings),
    Selection(SelectionResponse),
    Outcome(Outcome),
}

impl Response {
    #[must_use]
    pub fn as_settings(&self) -> Option<&Settings> {
        match self {
            Response::Settings(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        match self {
            Response::Selection(s) => Some(&s.selected_text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultAction {
    #[default]
    Simplify,
    Summarize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    #[default]
    Casual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    #[default]
    Short,
    Medium,
    Long,
}

/// User preferences, persisted field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub enable_context_menu: bool,
    pub default_action: DefaultAction,
    pub tone: Tone,
    pub summary_length: SummaryLength,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_context_menu: true,
            default_action: DefaultAction::Simplify,
            tone: Tone::Casual,
            summary_length: SummaryLength::Short,
        }
    }
}

/// A partial settings write; absent fields keep their stored value.
///
/// A field whose value does not decode is dropped from the patch, so a bad
/// value never blocks the rest of the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub enable_context_menu: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub default_action: Option<DefaultAction>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub summary_length: Option<SummaryLength>,
}

fn lenient_patch<'de, D>(deserializer: D) -> Result<SettingsPatch, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring invalid settings value {}: {}", raw, e);
            Ok(None)
        }
    }
}

impl From<Settings> for SettingsPatch {
    fn from(s: Settings) -> Self {
        Self {
            enable_context_menu: Some(s.enable_context_menu),
            default_action: Some(s.default_action),
            tone: Some(s.tone),
            summary_length: Some(s.summary_length),
        }
    }
}

/// Which host capabilities appear usable. Recomputed on every popup activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub prompt: bool,
    pub translator: bool,
    pub summarizer: bool,
    pub rewriter: bool,
}

impl Availability {
    #[must_use]
    pub fn all() -> Self {
        Self {
            prompt: true,
            translator: true,
            summarizer: true,
            rewriter: true,
        }
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.prompt || self.translator || self.summarizer || self.rewriter
    }

    /// Capability name/flag pairs in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            ("prompt", self.prompt),
            ("translator", self.translator),
            ("summarizer", self.summarizer),
            ("rewriter", self.rewriter),
        ]
    }
}
