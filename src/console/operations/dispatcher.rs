//! Executes screen requests on background tasks
//!
//! Every task belongs to the activation that issued it. Starting a new
//! activation aborts the tasks of the previous one and retires its id, so a
//! late response can never reach a screen that has been left.

use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{
    api::{ApiRequest, ContentBackend},
    console::events::{ActivationId, AppEvent, Ticket},
};

pub struct RequestDispatcher {
    backend: Arc<dyn ContentBackend>,
    tx: UnboundedSender<AppEvent>,
    activation: ActivationId,
    handles: Vec<JoinHandle<()>>,
}

impl RequestDispatcher {
    pub fn new(backend: Arc<dyn ContentBackend>, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            backend,
            tx,
            activation: 0,
            handles: Vec::new(),
        }
    }

    /// Retire the current activation and start a new one
    pub fn begin_activation(&mut self) -> ActivationId {
        self.cancel_all();
        self.activation += 1;
        debug!("Activation {} started", self.activation);
        self.activation
    }

    pub fn current(&self) -> ActivationId {
        self.activation
    }

    pub fn is_current(&self, activation: ActivationId) -> bool {
        activation == self.activation
    }

    /// Abort every task of the current activation
    pub fn cancel_all(&mut self) {
        let pending = self.handles.iter().filter(|h| !h.is_finished()).count();
        if pending > 0 {
            info!(
                "Cancelling {} pending request(s) of activation {}",
                pending, self.activation
            );
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    /// Number of tasks of the current activation still running
    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Execute one request
    pub fn dispatch(&mut self, ticket: Ticket, request: ApiRequest) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let activation = self.activation;
        debug!("Dispatching {} for activation {}", request.describe(), activation);

        let handle = tokio::spawn(async move {
            let outcome = backend.execute(&request).await;
            let _ = tx.send(AppEvent::Response {
                activation,
                ticket,
                outcome,
            });
        });
        self.track(handle);
    }

    /// Execute requests concurrently and deliver them as one response: a JSON
    /// array of the results in request order, or the first failure
    pub fn dispatch_all(&mut self, ticket: Ticket, requests: Vec<ApiRequest>) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let activation = self.activation;
        debug!(
            "Dispatching {} joined request(s) for activation {}",
            requests.len(),
            activation
        );

        let handle = tokio::spawn(async move {
            let outcome = try_join_all(requests.iter().map(|request| backend.execute(request)))
                .await
                .map(Value::Array);
            let _ = tx.send(AppEvent::Response {
                activation,
                ticket,
                outcome,
            });
        });
        self.track(handle);
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }
}

impl Drop for RequestDispatcher {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}
