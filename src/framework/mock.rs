//! # Mock Framework
//!
//! Utilities for testing clients without spawning a real [`ResourceActor`](super::ResourceActor).
//!
//! [`MockClient`] answers requests from a queue of expectations. [`create_mock_client`] hands
//! back the raw receiver instead, for tests that want to inspect payloads themselves.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};

enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Shared<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<SimulationRun>::new();
/// mock.expect_create().return_ok(RunId(1));
/// let client = SimulationClient::new(mock.client());
/// // ...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Shared<T>,
    failures: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Shared<T> = Arc::new(Mutex::new(VecDeque::new()));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let failed = failures.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().ok().and_then(|mut q| q.pop_front());
                match (request, next) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response })) => {
                        if id != expected {
                            record(&failed, format!("get: expected id {expected}, got {id}"));
                        }
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        if id != expected {
                            record(&failed, format!("action: expected id {expected}, got {id}"));
                        }
                        let _ = respond_to.send(response);
                    }
                    // Unmatched requests get no response; the caller sees `ActorDropped`.
                    (_, _) => record(&failed, "unexpected request".to_string()),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            failures,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Panics if an expectation is left over or a request did not match.
    pub fn verify(&self) {
        let failures = self.failures.lock().map(|f| f.clone()).unwrap_or_default();
        assert!(failures.is_empty(), "mock failures: {failures:?}");
        let remaining = self.expectations.lock().map(|q| q.len()).unwrap_or(0);
        assert_eq!(remaining, 0, "{remaining} expectations were not met");
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn record(failures: &Mutex<Vec<String>>, message: String) {
    if let Ok(mut failures) = failures.lock() {
        failures.push(message);
    }
}

/// Completes an expectation with the response the mock should send.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Shared<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        if let Ok(mut queue) = self.expectations.lock() {
            queue.push_back(expectation);
        }
    }
}

/// Creates a client and the receiver its requests land on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}
