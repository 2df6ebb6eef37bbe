#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use medclarify::ai::host::{AiHost, Capability, CapabilityFactory, HostSession, SessionConfig};
use medclarify::errors::ClarifyError;

/// What a fake session does when run.
#[derive(Clone)]
pub enum Behavior {
    Reply(String),
    Fail(String),
    Hang(Duration),
}

/// Shared bookkeeping across every session a fake host creates.
#[derive(Clone, Default)]
pub struct Ledger {
    created: Arc<AtomicUsize>,
    destroyed: Arc<AtomicUsize>,
    probes: Arc<AtomicUsize>,
    configs: Arc<Mutex<Vec<SessionConfig>>>,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl Ledger {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn configs(&self) -> Vec<SessionConfig> {
        self.configs.lock().unwrap().clone()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

struct FakeFactory {
    capability: Capability,
    supported: bool,
    behavior: Behavior,
    ledger: Ledger,
}

#[async_trait]
impl CapabilityFactory for FakeFactory {
    async fn supports(
        &self,
        _kind: &medclarify::ai::host::SessionKind,
    ) -> Result<bool, ClarifyError> {
        self.ledger.probes.fetch_add(1, Ordering::SeqCst);
        Ok(self.supported)
    }

    async fn create(&self, config: SessionConfig) -> Result<Box<dyn HostSession>, ClarifyError> {
        self.ledger.created.fetch_add(1, Ordering::SeqCst);
        self.ledger.configs.lock().unwrap().push(config);
        Ok(Box::new(FakeSession {
            behavior: self.behavior.clone(),
            ledger: self.ledger.clone(),
        }))
    }
}

struct FakeSession {
    behavior: Behavior,
    ledger: Ledger,
}

#[async_trait]
impl HostSession for FakeSession {
    async fn run(&mut self, input: &str) -> Result<String, ClarifyError> {
        self.ledger.inputs.lock().unwrap().push(input.to_string());
        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::Fail(msg) => Err(ClarifyError::HostError(msg.clone())),
            Behavior::Hang(d) => {
                tokio::time::sleep(*d).await;
                Ok("too late".to_string())
            }
        }
    }

    fn destroy(&mut self) {
        self.ledger.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeHost {
    factories: Vec<FakeFactory>,
    pub ledger: Ledger,
}

impl FakeHost {
    pub fn new(capabilities: &[Capability], supported: bool, behavior: Behavior) -> Self {
        let ledger = Ledger::default();
        let factories = capabilities
            .iter()
            .map(|c| FakeFactory {
                capability: *c,
                supported,
                behavior: behavior.clone(),
                ledger: ledger.clone(),
            })
            .collect();
        Self { factories, ledger }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(&Capability::ALL, true, Behavior::Reply(text.to_string()))
    }

    pub fn empty() -> Self {
        Self::new(&[], true, Behavior::Reply(String::new()))
    }
}

impl AiHost for FakeHost {
    fn capability(&self, capability: Capability) -> Option<&dyn CapabilityFactory> {
        self.factories
            .iter()
            .find(|f| f.capability == capability)
            .map(|f| f as &dyn CapabilityFactory)
    }
}

/// Build a host and keep a handle on its ledger.
pub fn host(h: FakeHost) -> (Arc<dyn AiHost>, Ledger) {
    let ledger = h.ledger.clone();
    (Arc::new(h), ledger)
}
