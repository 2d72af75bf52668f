//! Scripted transport for exercising [`ApiClient`](crate::ApiClient) without
//! a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{ApiError, ApiRequest, ApiTransport, HttpReply};

enum Scripted {
    Reply(HttpReply),
    NetworkError(String),
}

/// Transport that replays queued outcomes in order and records every
/// request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an HTTP reply.
    pub fn push_reply(&self, status: u16, body: &str) {
        self.lock_outcomes()
            .push_back(Scripted::Reply(HttpReply::new(status, body)));
    }

    /// Queues a transport failure.
    pub fn push_network_error(&self, message: &str) {
        self.lock_outcomes()
            .push_back(Scripted::NetworkError(message.to_string()));
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn lock_outcomes(&self) -> std::sync::MutexGuard<'_, VecDeque<Scripted>> {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ApiTransport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<HttpReply, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match self.lock_outcomes().pop_front() {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::NetworkError(message)) => Err(ApiError::Network(message)),
            None => Err(ApiError::Network("no scripted reply left".to_string())),
        }
    }
}
