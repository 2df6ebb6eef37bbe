//! Host capability surface backed by an OpenAI-compatible Responses endpoint.
//!
//! Used where no on-device capability surface exists (the command-line driver).
//! Every namespace is present only when an API key is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use super::host::{AiHost, Capability, CapabilityFactory, HostSession, SessionConfig, SessionKind};
use crate::core::config::AppConfig;
use crate::errors::ClarifyError;
use crate::prompt::session_instructions;

const MAX_OUTPUT_TOKENS: usize = 2_000;

#[derive(Clone)]
struct Endpoint {
    url: String,
    api_key: String,
    model: String,
}

pub struct RemoteFactory {
    capability: Capability,
    endpoint: Endpoint,
}

#[async_trait]
impl CapabilityFactory for RemoteFactory {
    async fn supports(&self, kind: &SessionKind) -> Result<bool, ClarifyError> {
        Ok(match kind {
            SessionKind::Translator {
                source_language,
                target_language,
            } => !source_language.trim().is_empty() && !target_language.trim().is_empty(),
            _ => kind.capability() == self.capability,
        })
    }

    async fn create(&self, config: SessionConfig) -> Result<Box<dyn HostSession>, ClarifyError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        info!(capability = %self.capability, model = %self.endpoint.model, "Creating remote session");
        Ok(Box::new(RemoteSession {
            http,
            endpoint: self.endpoint.clone(),
            instructions: session_instructions(&config.kind),
            destroyed: false,
        }))
    }
}

pub struct RemoteSession {
    http: Client,
    endpoint: Endpoint,
    instructions: Option<String>,
    destroyed: bool,
}

#[async_trait]
impl HostSession for RemoteSession {
    async fn run(&mut self, input: &str) -> Result<String, ClarifyError> {
        if self.destroyed {
            return Err(ClarifyError::HostError("session was destroyed".to_string()));
        }

        let body = build_request_body(&self.endpoint.model, self.instructions.as_deref(), input);

        #[cfg(feature = "debug-logs")]
        info!("Remote request body:\n{}", body);

        let response = self
            .http
            .post(&self.endpoint.url)
            .bearer_auth(&self.endpoint.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClarifyError::HttpError(format!("Responses API request failed: {e}")))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClarifyError::HostError(format!(
                "Responses API error: {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            ClarifyError::HostError(format!("Failed to parse Responses API reply: {e}"))
        })?;

        extract_output_text(&response_json)
            .ok_or_else(|| ClarifyError::HostError("No text in response".to_string()))
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// All four namespaces over one remote endpoint.
pub struct RemoteHost {
    factories: Vec<RemoteFactory>,
}

impl RemoteHost {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let factories = match &config.openai_api_key {
            Some(api_key) => {
                let endpoint = Endpoint {
                    url: format!("{}/responses", config.openai_base_url),
                    api_key: api_key.clone(),
                    model: config.openai_model.clone(),
                };
                Capability::ALL
                    .into_iter()
                    .map(|capability| RemoteFactory {
                        capability,
                        endpoint: endpoint.clone(),
                    })
                    .collect()
            }
            None => Vec::new(),
        };
        Self { factories }
    }
}

impl AiHost for RemoteHost {
    fn capability(&self, capability: Capability) -> Option<&dyn CapabilityFactory> {
        self.factories
            .iter()
            .find(|f| f.capability == capability)
            .map(|f| f as &dyn CapabilityFactory)
    }
}

#[must_use]
pub fn build_request_body(model: &str, instructions: Option<&str>, input: &str) -> Value {
    let mut body = json!({
        "model": model,
        "input": input,
        "max_output_tokens": MAX_OUTPUT_TOKENS,
    });
    if let Some(instructions) = instructions {
        body["instructions"] = json!(instructions);
    }
    body
}

/// Pull the text out of a Responses API reply: `output_text` when present,
/// otherwise every `output_text` part of every output item, joined by newlines.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(|v| v.as_str()) {
        return Some(text.to_string());
    }

    let mut collected: Vec<String> = Vec::new();
    if let Some(items) = response_json.get("output").and_then(|o| o.as_array()) {
        for item in items {
            let Some(parts) = item.get("content").and_then(|c| c.as_array()) else {
                continue;
            };
            for p in parts {
                if p.get("type").and_then(|t| t.as_str()) != Some("output_text") {
                    continue;
                }
                if let Some(s) = p.get("text").and_then(|t| t.as_str()) {
                    collected.push(s.to_string());
                } else if let Some(s) = p
                    .get("text")
                    .and_then(|t| t.get("value"))
                    .and_then(|v| v.as_str())
                {
                    collected.push(s.to_string());
                }
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}
