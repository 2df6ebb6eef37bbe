//! The host-provided AI surface, as seen by the adapter.
//!
//! The host exposes up to four capability namespaces. Each namespace offers a
//! support probe and a session factory; a session performs exactly one kind of
//! operation and must be destroyed once the caller is done with it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::core::models::{Availability, SummaryLength, Tone};
use crate::errors::ClarifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Prompt,
    Translator,
    Summarizer,
    Rewriter,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::Prompt,
        Capability::Translator,
        Capability::Summarizer,
        Capability::Rewriter,
    ];

    /// Name used in user-facing availability messages.
    #[must_use]
    pub fn api_name(self) -> &'static str {
        match self {
            Capability::Prompt => "Prompt",
            Capability::Translator => "Translator",
            Capability::Summarizer => "Summarizer",
            Capability::Rewriter => "Rewriter",
        }
    }

    /// Name of the operation, used when the support probe says no.
    #[must_use]
    pub fn operation_name(self) -> &'static str {
        match self {
            Capability::Prompt => "Prompting",
            Capability::Translator => "Translation",
            Capability::Summarizer => "Summarization",
            Capability::Rewriter => "Rewriting",
        }
    }

    /// The prompt namespace has no support probe; the others do.
    #[must_use]
    pub fn has_support_probe(self) -> bool {
        !matches!(self, Capability::Prompt)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Markdown,
    PlainText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteLength {
    Shorter,
    Longer,
    #[default]
    Same,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryType {
    #[serde(rename = "key-points")]
    KeyPoints,
    #[serde(rename = "tl;dr")]
    Tldr,
}

/// Capability-specific session options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    Prompt,
    Translator {
        source_language: String,
        target_language: String,
    },
    Summarizer {
        summary_type: SummaryType,
        length: SummaryLength,
    },
    Rewriter {
        tone: Tone,
        format: OutputFormat,
        length: Option<RewriteLength>,
    },
}

impl SessionKind {
    #[must_use]
    pub fn capability(&self) -> Capability {
        match self {
            SessionKind::Prompt => Capability::Prompt,
            SessionKind::Translator { .. } => Capability::Translator,
            SessionKind::Summarizer { .. } => Capability::Summarizer,
            SessionKind::Rewriter { .. } => Capability::Rewriter,
        }
    }
}

/// Everything the host needs to build one session, including its time budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub kind: SessionKind,
    pub timeout: Duration,
}

/// One capability namespace on the host.
#[async_trait]
pub trait CapabilityFactory: Send + Sync {
    /// Whether the host can serve sessions with these options.
    async fn supports(&self, _kind: &SessionKind) -> Result<bool, ClarifyError> {
        Ok(true)
    }

    async fn create(&self, config: SessionConfig) -> Result<Box<dyn HostSession>, ClarifyError>;
}

/// A live host session: one operation, then `destroy`.
#[async_trait]
pub trait HostSession: Send {
    async fn run(&mut self, input: &str) -> Result<String, ClarifyError>;

    fn destroy(&mut self);
}

pub trait AiHost: Send + Sync {
    /// The namespace for `capability`, or `None` when this host does not expose it.
    fn capability(&self, capability: Capability) -> Option<&dyn CapabilityFactory>;

    /// Raw presence flags, without any degrade-open policy applied.
    fn presence(&self) -> Availability {
        Availability {
            prompt: self.capability(Capability::Prompt).is_some(),
            translator: self.capability(Capability::Translator).is_some(),
            summarizer: self.capability(Capability::Summarizer).is_some(),
            rewriter: self.capability(Capability::Rewriter).is_some(),
        }
    }
}
