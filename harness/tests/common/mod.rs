//! Common Test Utilities for Integration Tests
//!
//! An in-memory store that records every call, with failure injection, plus a
//! scripted payload generator.

#![allow(dead_code)]

use async_trait::async_trait;
use redbench::{PayloadGenerator, StoreClient, StoreConnector, StoreError};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// A call observed by the mock store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get(String),
    Set(String, String),
    Delete(String),
    Ping,
    Disconnect,
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::Get(_) => CallKind::Get,
            Call::Set(..) => CallKind::Set,
            Call::Delete(_) => CallKind::Delete,
            Call::Ping => CallKind::Ping,
            Call::Disconnect => CallKind::Disconnect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Get,
    Set,
    Delete,
    Ping,
    Disconnect,
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    issued_at: Vec<Instant>,
    data: HashMap<String, String>,
    seen: HashMap<CallKind, usize>,
}

enum Outcome {
    Proceed,
    Fail,
    Stall,
}

/// In-memory store implementing the store capability
#[derive(Default)]
pub struct MockStore {
    state: Mutex<MockState>,
    fail_nth: HashSet<(CallKind, usize)>,
    fail_all: HashSet<CallKind>,
    stall: HashSet<CallKind>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the n-th (1-based) call of a kind
    pub fn fail_nth(mut self, kind: CallKind, n: usize) -> Self {
        self.fail_nth.insert((kind, n));
        self
    }

    /// Fail every call of a kind
    pub fn fail_all(mut self, kind: CallKind) -> Self {
        self.fail_all.insert(kind);
        self
    }

    /// Never resolve calls of a kind
    pub fn stall(mut self, kind: CallKind) -> Self {
        self.stall.insert(kind);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// When each call reached the store, in call order
    pub fn call_times(&self) -> Vec<Instant> {
        self.state.lock().unwrap().issued_at.clone()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.kind() == kind)
            .count()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.state.lock().unwrap().data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().data.len()
    }

    /// Record the call and decide its fate; effects apply only on `Proceed`
    fn observe(&self, call: Call) -> Outcome {
        let kind = call.kind();
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        state.issued_at.push(Instant::now());
        let seen = state.seen.entry(kind).or_default();
        *seen += 1;
        let nth = *seen;

        if self.stall.contains(&kind) {
            return Outcome::Stall;
        }
        if self.fail_all.contains(&kind) || self.fail_nth.contains(&(kind, nth)) {
            return Outcome::Fail;
        }

        match call {
            Call::Set(key, value) => {
                state.data.insert(key, value);
            }
            Call::Delete(key) => {
                state.data.remove(&key);
            }
            _ => {}
        }
        Outcome::Proceed
    }

    async fn resolve(&self, call: Call) -> Result<(), StoreError> {
        let description = format!("{:?}", call);
        match self.observe(call) {
            Outcome::Proceed => Ok(()),
            Outcome::Fail => Err(StoreError::Operation(format!(
                "injected failure: {}",
                description
            ))),
            Outcome::Stall => std::future::pending().await,
        }
    }
}

#[async_trait]
impl StoreClient for MockStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.resolve(Call::Get(key.to_string())).await?;
        Ok(self.state.lock().unwrap().data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.resolve(Call::Set(key.to_string(), value.to_string())).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.resolve(Call::Delete(key.to_string())).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.resolve(Call::Ping).await
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        self.resolve(Call::Disconnect)
            .await
            .map_err(|e| StoreError::Shutdown(e.to_string()))
    }
}

/// Hands out the shared mock store, or refuses every connection
pub struct MockConnector {
    pub store: Arc<MockStore>,
    refuse: bool,
}

impl MockConnector {
    pub fn new(store: MockStore) -> Self {
        Self {
            store: Arc::new(store),
            refuse: false,
        }
    }

    pub fn refusing() -> Self {
        Self {
            store: Arc::new(MockStore::new()),
            refuse: true,
        }
    }
}

#[async_trait]
impl StoreConnector for MockConnector {
    async fn connect(&self) -> Result<Arc<dyn StoreClient>, StoreError> {
        if self.refuse {
            return Err(StoreError::Connection("connection refused".to_string()));
        }
        let client: Arc<dyn StoreClient> = self.store.clone();
        Ok(client)
    }
}

/// Returns scripted strings in order, then filler of the requested length
pub struct ScriptedPayload {
    values: Mutex<VecDeque<String>>,
}

impl ScriptedPayload {
    pub fn new(values: &[&str]) -> Self {
        Self {
            values: Mutex::new(values.iter().map(|v| v.to_string()).collect()),
        }
    }
}

impl PayloadGenerator for ScriptedPayload {
    fn generate(&self, len: usize) -> String {
        self.values
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "x".repeat(len))
    }
}

/// Shorthand for building expected call lists
pub fn set(key: &str, value: &str) -> Call {
    Call::Set(key.to_string(), value.to_string())
}

pub fn get(key: &str) -> Call {
    Call::Get(key.to_string())
}

pub fn del(key: &str) -> Call {
    Call::Delete(key.to_string())
}
