use crate::ai::host::{OutputFormat, RewriteLength, SessionKind, SummaryType};
use crate::core::models::{SummaryLength, Tone};

/// Opening instruction for the explain capability.
pub const EXPLAIN_PREAMBLE: &str = "You are a medical terminology expert. Explain the following medical text in simple, plain language that a patient can understand. Focus on making complex medical terms accessible.";

/// Closing instruction for the explain capability.
pub const EXPLAIN_CLOSING: &str = "Provide a clear, concise explanation.";

/// Build the explain prompt. The input is embedded verbatim.
#[must_use]
pub fn build_explain_prompt(text: &str) -> String {
    format!("{EXPLAIN_PREAMBLE}\n\nMedical Text: \"{text}\"\n\n{EXPLAIN_CLOSING}")
}

/// System instructions a remote model needs to behave like the given host session.
///
/// Prompt sessions get none: the caller's input already is the full instruction.
#[must_use]
pub fn session_instructions(kind: &SessionKind) -> Option<String> {
    match kind {
        SessionKind::Prompt => None,
        SessionKind::Translator {
            source_language,
            target_language,
        } => Some(format!(
            "Translate the user's text from language '{source_language}' to language '{target_language}'. \
             Output only the translation."
        )),
        SessionKind::Summarizer {
            summary_type,
            length,
        } => {
            let shape = match summary_type {
                SummaryType::KeyPoints => "a bulleted list of the key points",
                SummaryType::Tldr => "a single short paragraph (tl;dr)",
            };
            let size = match length {
                SummaryLength::Short => "at most 3 bullets or sentences",
                SummaryLength::Medium => "at most 5 bullets or sentences",
                SummaryLength::Long => "at most 7 bullets or sentences",
            };
            Some(format!(
                "Summarize the user's text as {shape}, {size}. Output only the summary."
            ))
        }
        SessionKind::Rewriter {
            tone,
            format,
            length,
        } => {
            let tone = match tone {
                Tone::Formal => "a formal",
                Tone::Casual => "a casual, plain-language",
            };
            let format = match format {
                OutputFormat::Markdown => "Markdown",
                OutputFormat::PlainText => "plain text with no markup",
            };
            let length = match length.unwrap_or_default() {
                RewriteLength::Shorter => "shorter than",
                RewriteLength::Longer => "longer than",
                RewriteLength::Same => "about the same length as",
            };
            Some(format!(
                "Rewrite the user's text in {tone} tone as {format}, {length} the original. \
                 Output only the rewritten text."
            ))
        }
    }
}
