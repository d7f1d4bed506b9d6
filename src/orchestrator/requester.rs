/*!
 * Translation requests with generation-based supersession.
 *
 * Every request is stamped with a generation when it is issued. When its
 * outcome arrives, only the newest issued generation may be applied; anything
 * older is dropped, whether it succeeded or failed and whenever it arrived.
 */

use log::{debug, error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::errors::{ProviderError, SupersededResult};
use crate::playback::{ClipSequence, Generation, PlayerEvent};
use crate::providers::{AnalyzeRequest, Provider};

/// Lifecycle of a translation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Resolved,
    Superseded,
    Failed,
}

/// A translation request and where it stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub generation: Generation,
    pub transcript: String,
    pub status: RequestStatus,
}

/// What came back for a request
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub request: TranslationRequest,
    pub result: Result<ClipSequence, ProviderError>,
}

impl RequestOutcome {
    /// The player event for this outcome, or `None` when it was superseded
    pub fn into_event(self) -> Option<PlayerEvent> {
        let generation = self.request.generation;
        match (self.request.status, self.result) {
            (RequestStatus::Superseded, _) | (RequestStatus::Pending, _) => None,
            (_, Ok(sequence)) => Some(PlayerEvent::SequenceResolved {
                generation,
                sequence,
            }),
            (_, Err(error)) => Some(PlayerEvent::RequestFailed { generation, error }),
        }
    }
}

/// Issues translation requests and tells current outcomes from stale ones
#[derive(Debug, Clone)]
pub struct TranslationRequester {
    provider: Arc<dyn Provider>,
    latest: Arc<AtomicU64>,
}

impl TranslationRequester {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Stamp a new request with the next generation
    pub fn issue(&self, transcript: &str) -> TranslationRequest {
        let generation = Generation::new(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        TranslationRequest {
            generation,
            transcript: transcript.trim().to_string(),
            status: RequestStatus::Pending,
        }
    }

    /// Highest generation issued so far
    pub fn latest(&self) -> Generation {
        Generation::new(self.latest.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest() == generation
    }

    /// Run an issued request against the provider and classify its outcome
    pub async fn fetch(&self, mut request: TranslationRequest) -> RequestOutcome {
        let started = Instant::now();
        info!(
            "Translating transcript {} via {}: '{}'",
            request.generation,
            self.provider.name(),
            request.transcript
        );

        let result = self
            .provider
            .complete(AnalyzeRequest::new(request.transcript.clone()))
            .await
            .map(|response| response.into_sequence());

        request.status = if !self.is_current(request.generation) {
            debug!(
                "{}",
                SupersededResult {
                    generation: request.generation,
                    latest: self.latest()
                }
            );
            RequestStatus::Superseded
        } else {
            match &result {
                Ok(sequence) if sequence.is_empty() => {
                    warn!("No sign language clips available for transcript {}", request.generation);
                    RequestStatus::Resolved
                }
                Ok(sequence) => {
                    debug!(
                        "Transcript {} resolved to {} clips in {:?}",
                        request.generation,
                        sequence.len(),
                        started.elapsed()
                    );
                    RequestStatus::Resolved
                }
                Err(e) => {
                    error!("Translation request {} failed: {}", request.generation, e);
                    RequestStatus::Failed
                }
            }
        };

        RequestOutcome { request, result }
    }

    /// Issue and run a request in one go
    pub async fn request(&self, transcript: &str) -> RequestOutcome {
        let request = self.issue(transcript);
        self.fetch(request).await
    }
}
