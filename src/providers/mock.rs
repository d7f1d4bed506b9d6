/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds, one clip per word
 * - `MockProvider::empty()` - Always answers with no clips
 * - `MockProvider::failing()` - Always fails with a transport error
 * - `MockProvider::scripted()` - Per-transcript replies with individual delays
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::playback::ClipId;

use super::{AnalyzeRequest, AnalyzeResponse, Provider};

/// Scripted reply for one transcript
#[derive(Debug, Clone)]
pub struct MockReply {
    /// Clips to return, or the error to fail with
    pub result: Result<Vec<ClipId>, ProviderError>,
    /// Delay before answering
    pub delay: Duration,
}

impl MockReply {
    pub fn clips(ids: &[&str]) -> Self {
        Self {
            result: Ok(ids.iter().map(|id| ClipId::from(*id)).collect()),
            delay: Duration::ZERO,
        }
    }

    pub fn empty() -> Self {
        Self::clips(&[])
    }

    pub fn error(error: ProviderError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
        }
    }

    /// Answer only after `ms` milliseconds
    pub fn after_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with one `<word>.mp4` clip per word
    Working,
    /// Always answers with an empty clip list
    Empty,
    /// Always fails with a connection error
    Failing,
    /// Succeeds like `Working` after a delay
    Slow { delay_ms: u64 },
    /// Answers from the script; unknown transcripts fail
    Scripted,
}

/// Mock provider for testing orchestration behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of requests received, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Number of connection checks received, shared between clones
    connection_checks: Arc<AtomicUsize>,
    /// Transcripts received, in arrival order
    requests: Arc<Mutex<Vec<String>>>,
    /// Replies used by `MockBehavior::Scripted`
    script: Arc<Mutex<HashMap<String, MockReply>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            connection_checks: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    pub fn scripted() -> Self {
        Self::new(MockBehavior::Scripted)
    }

    /// Script the reply for a transcript
    pub fn reply(self, transcript: &str, reply: MockReply) -> Self {
        self.script.lock().insert(transcript.to_string(), reply);
        self
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of `test_connection` calls so far
    pub fn connection_check_count(&self) -> usize {
        self.connection_checks.load(Ordering::SeqCst)
    }

    /// Transcripts received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn words_to_clips(transcript: &str) -> Vec<ClipId> {
        transcript
            .split_whitespace()
            .map(|word| ClipId::new(format!("{}.mp4", word.to_lowercase())))
            .collect()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.transcript.clone());

        match self.behavior {
            MockBehavior::Working => Ok(AnalyzeResponse::with_clips(Self::words_to_clips(&request.transcript))),

            MockBehavior::Empty => Ok(AnalyzeResponse::default()),

            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated network failure".to_string(),
            )),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(AnalyzeResponse::with_clips(Self::words_to_clips(&request.transcript)))
            }

            MockBehavior::Scripted => {
                let reply = self.script.lock().get(&request.transcript).cloned();
                let Some(reply) = reply else {
                    return Err(ProviderError::ApiError {
                        status_code: 404,
                        message: format!("No scripted reply for '{}'", request.transcript),
                    });
                };
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                reply.result.map(AnalyzeResponse::with_clips)
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.connection_checks.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated network failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
