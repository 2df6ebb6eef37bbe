mod common;

use std::time::Duration;

use common::{Behavior, FakeHost, host};
use medclarify::ai::host::{Capability, OutputFormat, RewriteLength, SessionKind, SummaryType};
use medclarify::ai::{Action, CapabilityAdapter, RewriteOptions};
use medclarify::core::models::{Availability, SummaryLength, Tone};
use medclarify::errors::ClarifyError;

const ALL_ACTIONS: [Action; 5] = [
    Action::Explain,
    Action::Simplify,
    Action::Summarize,
    Action::Rewrite(RewriteOptions {
        tone: None,
        length: None,
    }),
    Action::Translate,
];

#[tokio::test]
async fn test_missing_capability_never_creates_a_session() {
    for action in ALL_ACTIONS {
        let (h, ledger) = host(FakeHost::empty());
        let adapter = CapabilityAdapter::new(h);

        let err = adapter.invoke(action, "text").await.unwrap_err();
        assert!(
            matches!(err, ClarifyError::CapabilityUnavailable { .. }),
            "{action:?} gave {err:?}"
        );
        assert_eq!(ledger.created(), 0);
        assert_eq!(ledger.probes(), 0);
    }
}

#[tokio::test]
async fn test_unavailable_message_guides_the_user() {
    let (h, _) = host(FakeHost::empty());
    let err = CapabilityAdapter::new(h).simplify("x").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Rewriter API not available in this context. Please ensure Chrome 121+ is installed and AI APIs are enabled."
    );
}

#[tokio::test]
async fn test_simplify_scenario_returns_raw_output_and_releases() {
    let raw = "  The patient had a heart attack.\n";
    let (h, ledger) = host(FakeHost::replying(raw));
    let adapter = CapabilityAdapter::new(h);

    let out = adapter
        .simplify("The patient presented with myocardial infarction")
        .await
        .unwrap();

    assert_eq!(out, raw);
    assert_eq!(ledger.created(), 1);
    assert_eq!(ledger.destroyed(), 1);
    assert_eq!(
        ledger.inputs(),
        vec!["The patient presented with myocardial infarction".to_string()]
    );

    let configs = ledger.configs();
    assert_eq!(
        configs[0].kind,
        SessionKind::Rewriter {
            tone: Tone::Casual,
            format: OutputFormat::PlainText,
            length: None,
        }
    );
    assert_eq!(configs[0].timeout, Duration::from_secs(30));
}

#[tokio::test]
async fn test_summarize_uses_short_key_points() {
    let (h, ledger) = host(FakeHost::replying("- point"));
    CapabilityAdapter::new(h).summarize("long text").await.unwrap();
    assert_eq!(
        ledger.configs()[0].kind,
        SessionKind::Summarizer {
            summary_type: SummaryType::KeyPoints,
            length: SummaryLength::Short,
        }
    );
}

#[tokio::test]
async fn test_rewrite_defaults_when_unspecified() {
    let (h, ledger) = host(FakeHost::replying("ok"));
    CapabilityAdapter::new(h)
        .rewrite("text", RewriteOptions::default())
        .await
        .unwrap();
    assert_eq!(
        ledger.configs()[0].kind,
        SessionKind::Rewriter {
            tone: Tone::Casual,
            format: OutputFormat::PlainText,
            length: Some(RewriteLength::Same),
        }
    );
}

#[tokio::test]
async fn test_explain_skips_probe_and_wraps_text() {
    let (h, ledger) = host(FakeHost::new(
        &[Capability::Prompt],
        false,
        Behavior::Reply("explained".to_string()),
    ));
    let out = CapabilityAdapter::new(h).explain("tachycardia").await.unwrap();
    assert_eq!(out, "explained");
    assert_eq!(ledger.probes(), 0);

    let input = &ledger.inputs()[0];
    assert!(input.starts_with("You are a medical terminology expert."));
    assert!(input.contains("Medical Text: \"tachycardia\""));
    assert!(input.ends_with("Provide a clear, concise explanation."));
}

#[tokio::test]
async fn test_translate_is_english_to_english() {
    let (h, ledger) = host(FakeHost::replying("same"));
    CapabilityAdapter::new(h).translate("text").await.unwrap();
    assert_eq!(
        ledger.configs()[0].kind,
        SessionKind::Translator {
            source_language: "en".to_string(),
            target_language: "en".to_string(),
        }
    );
}

#[tokio::test]
async fn test_rejected_probe_is_unsupported_configuration() {
    let (h, ledger) = host(FakeHost::new(
        &Capability::ALL,
        false,
        Behavior::Reply("never".to_string()),
    ));
    let err = CapabilityAdapter::new(h).summarize("x").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Summarization not supported on this device. Please check Chrome settings."
    );
    assert_eq!(ledger.probes(), 1);
    assert_eq!(ledger.created(), 0);
}

#[tokio::test]
async fn test_session_released_when_run_fails() {
    let (h, ledger) = host(FakeHost::new(
        &Capability::ALL,
        true,
        Behavior::Fail("model crashed".to_string()),
    ));
    let err = CapabilityAdapter::new(h).simplify("x").await.unwrap_err();
    assert!(matches!(err, ClarifyError::HostError(ref m) if m == "model crashed"));
    assert_eq!(ledger.created(), 1);
    assert_eq!(ledger.destroyed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_abandons_call_and_still_releases() {
    let (h, ledger) = host(FakeHost::new(
        &Capability::ALL,
        true,
        Behavior::Hang(Duration::from_secs(120)),
    ));
    let adapter = CapabilityAdapter::new(h).with_timeout(Duration::from_secs(30));

    let err = adapter.summarize("x").await.unwrap_err();
    assert!(matches!(
        err,
        ClarifyError::Timeout {
            capability: "Summarizer",
            after
        } if after == Duration::from_secs(30)
    ));
    assert_eq!(ledger.created(), 1);
    assert_eq!(ledger.destroyed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sub_second_budget_reported_exactly() {
    let (h, ledger) = host(FakeHost::new(
        &Capability::ALL,
        true,
        Behavior::Hang(Duration::from_secs(5)),
    ));
    let adapter = CapabilityAdapter::new(h).with_timeout(Duration::from_millis(400));

    let err = adapter.simplify("x").await.unwrap_err();
    assert_eq!(err.to_string(), "Rewriter request timed out after 400ms");
    assert_eq!(ledger.destroyed(), 1);
}

#[tokio::test]
async fn test_no_internal_retry() {
    let (h, ledger) = host(FakeHost::new(
        &Capability::ALL,
        true,
        Behavior::Fail("busy".to_string()),
    ));
    let adapter = CapabilityAdapter::new(h);
    let _ = adapter.simplify("x").await;
    let _ = adapter.simplify("x").await;
    assert_eq!(ledger.created(), 2);
    assert_eq!(ledger.destroyed(), 2);
}

#[test]
fn test_availability_degrades_open_when_all_flags_false() {
    let (h, _) = host(FakeHost::empty());
    assert_eq!(
        CapabilityAdapter::new(h).check_availability(),
        Availability::all()
    );
}

#[test]
fn test_availability_reports_partial_presence_as_is() {
    let (h, _) = host(FakeHost::new(
        &[Capability::Summarizer],
        true,
        Behavior::Reply(String::new()),
    ));
    assert_eq!(
        CapabilityAdapter::new(h).check_availability(),
        Availability {
            prompt: false,
            translator: false,
            summarizer: true,
            rewriter: false,
        }
    );
}
