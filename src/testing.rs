//! Test doubles shared by unit tests

use crate::auth::{CredentialProvider, Token};
use crate::error::Result;
use crate::graphql::{
    ExecuteError, GraphqlOutcome, GraphqlRequest, RequestExecutor, TransportErrorKind,
};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type Scripted = std::result::Result<GraphqlOutcome<JsonValue>, ExecuteError>;

/// Replays scripted outcomes in order and records every call
#[derive(Default)]
pub struct ScriptedExecutor {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(GraphqlRequest, String)>>,
    delay: Option<Duration>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every call before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn then_data(self, data: JsonValue) -> Self {
        self.push(Ok(GraphqlOutcome::Data(data)))
    }

    pub fn then_errors(self, messages: &[&str]) -> Self {
        self.push(Ok(GraphqlOutcome::Errors(
            messages.iter().map(|m| (*m).to_string()).collect(),
        )))
    }

    pub fn then_transport(self, kind: TransportErrorKind) -> Self {
        self.push(Err(ExecuteError::transport(kind, "scripted failure")))
    }

    pub fn then_auth(self) -> Self {
        self.push(Err(ExecuteError::Auth("bad credentials".to_string())))
    }

    fn push(self, outcome: Scripted) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, token)| token.clone())
            .collect()
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(
        &self,
        request: &GraphqlRequest,
        token: &Token,
    ) -> std::result::Result<GraphqlOutcome<JsonValue>, ExecuteError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), token.expose().to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExecuteError::transport(TransportErrorKind::Request, "script exhausted")))
    }
}

/// Hands out `token-1`, `token-2`, ... and counts calls
#[derive(Default)]
pub struct CountingCredentials {
    calls: AtomicUsize,
    demo: AtomicBool,
}

impl CountingCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn demo() -> Self {
        let credentials = Self::default();
        credentials.set_demo(true);
        credentials
    }

    /// Flip the identity reported by `is_demo`
    pub fn set_demo(&self, demo: bool) {
        self.demo.store(demo, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialProvider for CountingCredentials {
    async fn token(&self) -> Result<Token> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Token::new(format!("token-{n}"))
    }

    fn is_demo(&self) -> bool {
        self.demo.load(Ordering::SeqCst)
    }
}

/// A repository node as GitHub would return it
pub fn repo_node(name: &str) -> JsonValue {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "forkCount": 1,
        "owner": {"login": "octocat", "avatarUrl": "https://avatars.example.com/octocat"},
        "issues": {"totalCount": 2},
        "url": format!("https://github.com/octocat/{name}"),
        "stargazers": {"totalCount": 5},
        "isFork": false
    })
}

/// `data` payload of one repository-connection page
pub fn connection_page(names: &[&str], end_cursor: Option<&str>, has_next_page: bool) -> JsonValue {
    let nodes: Vec<JsonValue> = names.iter().map(|n| repo_node(n)).collect();
    json!({
        "user": {
            "repositories": {
                "nodes": nodes,
                "pageInfo": {"endCursor": end_cursor, "hasNextPage": has_next_page}
            }
        }
    })
}
