
use crate::{InferenceClient, InferenceError, InferenceRequest, InferenceResult, RetryPolicy, Worker};

use cr_core::{BroadcastEvent, JobKind, JobRecord, Topic};
use cr_ws::{BroadcastPublisher, ConnectionId, GroupRegistry, Metrics};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

pub(crate) const TIMEOUT: Duration = Duration::from_secs(5);

/// Plays back scripted results in order; the last one repeats
pub(crate) struct ScriptedClient {
    script: Mutex<VecDeque<InferenceResult<String>>>,
    requests: Mutex<Vec<InferenceRequest>>,
    calls: AtomicU32,
}

impl ScriptedClient {
    pub(crate) fn new(script: Vec<InferenceResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        })
    }

    pub(crate) fn replying(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_string())])
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for ScriptedClient {
    async fn complete(&self, request: &InferenceRequest) -> InferenceResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop_front()
        } else {
            None
        };

        match next {
            Some(result) => result,
            None => match script.front() {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(e)) => Err(clone_error(e)),
                None => Err(InferenceError::malformed("empty script")),
            },
        }
    }
}

fn clone_error(e: &InferenceError) -> InferenceError {
    match e {
        InferenceError::Timeout { after, .. } => InferenceError::timeout(*after),
        InferenceError::Transport { message, .. } => InferenceError::transport(message.clone()),
        InferenceError::Status { code, body, .. } => InferenceError::status(*code, body.clone()),
        InferenceError::MalformedResponse { message, .. } => {
            InferenceError::malformed(message.clone())
        }
    }
}

/// Never answers
pub(crate) struct HangingClient;

#[async_trait]
impl InferenceClient for HangingClient {
    async fn complete(&self, _request: &InferenceRequest) -> InferenceResult<String> {
        std::future::pending().await
    }
}

pub(crate) struct PanickingClient;

#[async_trait]
impl InferenceClient for PanickingClient {
    async fn complete(&self, _request: &InferenceRequest) -> InferenceResult<String> {
        panic!("inference client blew up");
    }
}

pub(crate) fn analyze_job(content: &str) -> JobRecord {
    JobRecord::new(JobKind::Analyze, content).unwrap()
}

pub(crate) fn fix_job(content: &str) -> JobRecord {
    JobRecord::new(JobKind::Fix, content).unwrap()
}

pub(crate) fn worker_with(
    client: Arc<dyn InferenceClient>,
    registry: &GroupRegistry,
    retry: RetryPolicy,
) -> Arc<Worker> {
    let publisher = BroadcastPublisher::new(registry.clone(), Metrics::new());
    Arc::new(Worker::new(client, publisher, Topic::analysis(), TIMEOUT, retry))
}

pub(crate) async fn subscribe(registry: &GroupRegistry) -> mpsc::Receiver<BroadcastEvent> {
    let (tx, rx) = mpsc::channel(16);
    registry.join(&Topic::analysis(), ConnectionId::new(), tx).await;
    rx
}

pub(crate) fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(100),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}
