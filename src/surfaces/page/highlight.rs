//! One-shot decoration of medical terms in page text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

/// Reference list of terms to mark.
pub const MEDICAL_TERMS: &[&str] = &[
    "hypertension", "diabetes", "cardiovascular", "myocardial", "infarction",
    "arrhythmia", "thrombosis", "embolism", "stenosis", "aneurysm",
    "pneumonia", "bronchitis", "asthma", "emphysema", "fibrosis",
    "hepatitis", "cirrhosis", "gastritis", "ulcer", "colitis",
    "arthritis", "osteoporosis", "rheumatoid", "lupus", "gout",
    "meningitis", "encephalitis", "stroke", "seizure", "epilepsy",
    "cancer", "malignant", "benign", "metastasis", "carcinoma",
    "lymphoma", "leukemia", "sarcoma", "melanoma", "adenoma",
    "infection", "sepsis", "bacteremia", "viremia", "fungal",
    "inflammation", "edema", "necrosis", "atrophy",
    "hypertrophy", "hyperplasia", "dysplasia", "metaplasia", "anaplasia",
];

pub const MARKER_CLASS: &str = "medclarify-term";
pub const MARKER_TITLE: &str = "Medical term - click to learn more";
const MARKER_STYLE: &str =
    "background-color: #fff3cd; cursor: help; border-bottom: 2px dotted #ffc107;";

static TERM_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = MEDICAL_TERMS
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap_or_else(|_| {
        // Terms are escaped literals; in practice this cannot fail.
        Regex::new(r"$^").expect("fallback regex compiles")
    })
});

/// A text-bearing node of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageNode {
    /// Original, untouched text.
    Text(String),
    /// HTML produced by a highlighting pass.
    Fragment(String),
}

/// Distinct terms from the list that occur as whole words in `text`, lowercased,
/// in order of first occurrence.
#[must_use]
pub fn find_terms(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in TERM_RE.find_iter(text) {
        let term = m.as_str().to_lowercase();
        if !found.contains(&term) {
            found.push(term);
        }
    }
    found
}

/// HTML for `text` with every term wrapped in a marker, or `None` when the text
/// has no terms. Surrounding text is escaped.
#[must_use]
pub fn highlight_fragment(text: &str) -> Option<String> {
    if !TERM_RE.is_match(text) {
        return None;
    }

    let mut out = String::with_capacity(text.len() * 2);
    let mut last = 0;
    for m in TERM_RE.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str(&format!(
            r#"<span class="{MARKER_CLASS}" style="{MARKER_STYLE}" title="{MARKER_TITLE}">{}</span>"#,
            escape_html(m.as_str())
        ));
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    Some(out)
}

/// Replace every original text node containing a term with its highlighted
/// fragment. Nodes produced by an earlier pass are left alone, so running this
/// twice changes nothing the second time.
///
/// Returns the number of nodes replaced.
pub fn highlight_page(nodes: &mut [PageNode]) -> usize {
    let mut replaced = 0;
    let mut terms: Vec<String> = Vec::new();
    for node in nodes.iter_mut() {
        let PageNode::Text(text) = node else {
            continue;
        };
        if let Some(fragment) = highlight_fragment(text) {
            for term in find_terms(text) {
                if !terms.contains(&term) {
                    terms.push(term);
                }
            }
            *node = PageNode::Fragment(fragment);
            replaced += 1;
        }
    }
    if replaced > 0 {
        info!(?terms, "Highlighted medical terms in {} text nodes", replaced);
    }
    replaced
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
