/*!
 * Mock translation backend.
 *
 * This module provides an in-process backend that simulates the translation API:
 * - `MockBackend::working()` - Always succeeds with a tagged translation
 * - `MockBackend::failing()` - Always fails with an API error
 * - `MockBackend::intermittent(n)` - Fails every nth request
 *
 * Every backend counts requests and tracks the peak number of requests in flight,
 * which makes batching and caching behavior observable in tests.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{TranslateRequest, TranslationBackend};

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Answers without any translation result
    Empty,
}

/// Mock backend for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Total requests received, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Requests currently being served
    in_flight: Arc<AtomicUsize>,
    /// Highest value `in_flight` reached
    peak_in_flight: Arc<AtomicUsize>,
    /// Texts that always fail regardless of behavior
    failing_texts: Arc<Mutex<HashSet<String>>>,
    /// Every request received, in arrival order
    requests: Arc<Mutex<Vec<TranslateRequest>>>,
    /// Simulated latency per request
    delay: Option<Duration>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
            failing_texts: Arc::new(Mutex::new(HashSet::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Create a working mock backend that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock backend
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a failing mock backend that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock whose responses carry no translation
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Make every request for `text` fail with a transport error
    pub fn fail_on(self, text: impl Into<String>) -> Self {
        self.failing_texts.lock().insert(text.into());
        self
    }

    /// Sleep for `delay_ms` inside every request
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(delay_ms));
        self
    }

    /// The translation the working mode produces for a request
    pub fn default_translation(request: &TranslateRequest) -> String {
        format!("[{}] {}", request.target, request.q)
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Highest number of requests that were in flight at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Copy of every request received so far
    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.requests.lock().clone()
    }

    fn respond(&self, request: &TranslateRequest, count: usize) -> Result<String, ProviderError> {
        if self.failing_texts.lock().contains(&request.q) {
            return Err(ProviderError::RequestFailed(format!(
                "Simulated transport failure for '{}'",
                request.q
            )));
        }

        match self.behavior {
            MockBehavior::Working => Ok(Self::default_translation(request)),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(Self::default_translation(request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Err(ProviderError::EmptyResponse),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        let result = self.respond(request, count);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
