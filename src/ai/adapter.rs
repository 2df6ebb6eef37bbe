//! Uniform async call contract over the host AI capabilities.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use super::host::{
    AiHost, Capability, OutputFormat, RewriteLength, SessionConfig, SessionKind, SummaryType,
};
use super::session::SessionGuard;
use crate::core::config::DEFAULT_SESSION_TIMEOUT_SECS;
use crate::core::models::{Availability, SummaryLength, Tone};
use crate::errors::ClarifyError;
use crate::prompt::build_explain_prompt;

/// Caller-tunable options for the generic rewrite action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteOptions {
    pub tone: Option<Tone>,
    pub length: Option<RewriteLength>,
}

impl RewriteOptions {
    /// Options with unspecified fields filled in (casual, same length).
    #[must_use]
    pub fn resolved(self) -> (Tone, RewriteLength) {
        (
            self.tone.unwrap_or(Tone::Casual),
            self.length.unwrap_or(RewriteLength::Same),
        )
    }
}

/// What to do with a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Explain,
    Simplify,
    Summarize,
    Rewrite(RewriteOptions),
    Translate,
}

impl Action {
    /// The session the host must construct for this action.
    #[must_use]
    pub fn session_kind(self) -> SessionKind {
        match self {
            Action::Explain => SessionKind::Prompt,
            Action::Simplify => SessionKind::Rewriter {
                tone: Tone::Casual,
                format: OutputFormat::PlainText,
                length: None,
            },
            Action::Summarize => SessionKind::Summarizer {
                summary_type: SummaryType::KeyPoints,
                length: SummaryLength::Short,
            },
            Action::Rewrite(options) => {
                let (tone, length) = options.resolved();
                SessionKind::Rewriter {
                    tone,
                    format: OutputFormat::PlainText,
                    length: Some(length),
                }
            }
            // Self-translation only validates that the capability works.
            Action::Translate => SessionKind::Translator {
                source_language: "en".to_string(),
                target_language: "en".to_string(),
            },
        }
    }

    fn input(self, text: &str) -> String {
        match self {
            Action::Explain => build_explain_prompt(text),
            _ => text.to_string(),
        }
    }
}

/// Calls host capabilities with fixed options and a bounded time budget.
///
/// A `None` host stands for a context where the capability surface does not
/// exist at all (for example a restricted UI context).
#[derive(Clone)]
pub struct CapabilityAdapter {
    host: Option<Arc<dyn AiHost>>,
    timeout: Duration,
}

impl CapabilityAdapter {
    #[must_use]
    pub fn new(host: Arc<dyn AiHost>) -> Self {
        Self {
            host: Some(host),
            timeout: Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECS),
        }
    }

    /// An adapter running outside any host capability surface.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            host: None,
            timeout: Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Report which capabilities look usable.
    ///
    /// Degrades open: with no host surface, or with every flag false, all
    /// capabilities are reported available and failures surface at call time.
    pub fn check_availability(&self) -> Availability {
        let Some(host) = self.host.as_ref() else {
            warn!("No AI capability surface in this context, reporting all available");
            return Availability::all();
        };

        let presence = host.presence();
        if presence.any() {
            presence
        } else {
            warn!("No AI capability reported present, reporting all available");
            Availability::all()
        }
    }

    /// # Errors
    ///
    /// See [`CapabilityAdapter::invoke`].
    pub async fn explain(&self, text: &str) -> Result<String, ClarifyError> {
        self.invoke(Action::Explain, text).await
    }

    /// # Errors
    ///
    /// See [`CapabilityAdapter::invoke`].
    pub async fn simplify(&self, text: &str) -> Result<String, ClarifyError> {
        self.invoke(Action::Simplify, text).await
    }

    /// # Errors
    ///
    /// See [`CapabilityAdapter::invoke`].
    pub async fn summarize(&self, text: &str) -> Result<String, ClarifyError> {
        self.invoke(Action::Summarize, text).await
    }

    /// # Errors
    ///
    /// See [`CapabilityAdapter::invoke`].
    pub async fn rewrite(&self, text: &str, options: RewriteOptions) -> Result<String, ClarifyError> {
        self.invoke(Action::Rewrite(options), text).await
    }

    /// # Errors
    ///
    /// See [`CapabilityAdapter::invoke`].
    pub async fn translate(&self, text: &str) -> Result<String, ClarifyError> {
        self.invoke(Action::Translate, text).await
    }

    /// Run `action` on `text` through a fresh host session.
    ///
    /// The session is released before this returns, on every path. The host's
    /// output is returned verbatim. There are no retries.
    ///
    /// # Errors
    ///
    /// - `CapabilityUnavailable` when the host does not expose the capability
    /// - `UnsupportedConfiguration` when the support probe rejects the options
    /// - `Timeout` when session creation plus the call exceed the time budget
    /// - any error the host session itself reports
    pub async fn invoke(&self, action: Action, text: &str) -> Result<String, ClarifyError> {
        let kind = action.session_kind();
        let capability = kind.capability();

        let result = self.invoke_inner(capability, kind, action.input(text)).await;
        if let Err(e) = &result {
            error!("{} error: {}", capability.operation_name(), e);
        }
        result
    }

    async fn invoke_inner(
        &self,
        capability: Capability,
        kind: SessionKind,
        input: String,
    ) -> Result<String, ClarifyError> {
        let factory = self
            .host
            .as_ref()
            .and_then(|host| host.capability(capability))
            .ok_or(ClarifyError::CapabilityUnavailable {
                capability: capability.api_name(),
            })?;

        if capability.has_support_probe() && !factory.supports(&kind).await? {
            return Err(ClarifyError::UnsupportedConfiguration {
                operation: capability.operation_name(),
            });
        }

        let config = SessionConfig {
            kind,
            timeout: self.timeout,
        };

        let work = async {
            let session = factory.create(config).await?;
            let mut guard = SessionGuard::new(capability, session);
            let output = guard.run(&input).await;
            guard.release();
            output
        };

        match tokio::time::timeout(self.timeout, work).await {
            Ok(output) => {
                if output.is_ok() {
                    info!(capability = %capability, "Capability call completed");
                }
                output
            }
            Err(_) => Err(ClarifyError::Timeout {
                capability: capability.api_name(),
                after: self.timeout,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_defaults_are_casual_and_same() {
        assert_eq!(
            Action::Rewrite(RewriteOptions::default()).session_kind(),
            SessionKind::Rewriter {
                tone: Tone::Casual,
                format: OutputFormat::PlainText,
                length: Some(RewriteLength::Same),
            }
        );

        let formal = RewriteOptions {
            tone: Some(Tone::Formal),
            length: Some(RewriteLength::Shorter),
        };
        assert_eq!(formal.resolved(), (Tone::Formal, RewriteLength::Shorter));
    }

    #[test]
    fn simplify_uses_casual_plain_text_rewriter() {
        assert_eq!(
            Action::Simplify.session_kind(),
            SessionKind::Rewriter {
                tone: Tone::Casual,
                format: OutputFormat::PlainText,
                length: None,
            }
        );
    }

    #[test]
    fn explain_input_embeds_text() {
        let input = Action::Explain.input("BP 150/95");
        assert!(input.contains("Medical Text: \"BP 150/95\""));
        assert_eq!(Action::Summarize.input("x"), "x");
    }

    #[test]
    fn detached_adapter_degrades_open() {
        assert_eq!(CapabilityAdapter::detached().check_availability(), Availability::all());
    }

    #[tokio::test]
    async fn detached_adapter_reports_unavailable_on_call() {
        let err = CapabilityAdapter::detached()
            .summarize("text")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClarifyError::CapabilityUnavailable {
                capability: "Summarizer"
            }
        ));
    }
}
