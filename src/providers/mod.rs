/*!
 * Translation service clients.
 *
 * This module contains implementations of the transcript-to-gesture service:
 * - `analyze`: HTTP client for the remote `/analyze` endpoint
 * - `lexicon`: offline word list with fingerspelling fallback
 * - `mock`: scripted provider for tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::playback::{ClipId, ClipSequence};

/// Request body understood by every translation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Transcript to translate
    pub transcript: String,
}

impl AnalyzeRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

/// Response body of a translation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Ordered clip file names; absent means no clips
    #[serde(default)]
    pub videos: Option<Vec<ClipId>>,
}

impl AnalyzeResponse {
    pub fn with_clips(clips: Vec<ClipId>) -> Self {
        Self { videos: Some(clips) }
    }

    /// Convert into the clip sequence, treating a missing list as empty
    pub fn into_sequence(self) -> ClipSequence {
        self.videos.map(ClipSequence::from).unwrap_or_default()
    }
}

/// Common trait for all translation services
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the translation requester.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate a transcript into an ordered clip list
    ///
    /// # Arguments
    /// * `request` - The transcript to translate
    ///
    /// # Returns
    /// * `Result<AnalyzeResponse, ProviderError>` - The clip list or a transport error
    async fn complete(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, ProviderError>;

    /// Test the connection to the service
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Human-readable provider name for logs
    fn name(&self) -> &str;
}

pub mod analyze;
pub mod lexicon;
pub mod mock;

pub use self::analyze::AnalyzeClient;
pub use self::lexicon::LexiconProvider;
pub use self::mock::{MockBehavior, MockProvider, MockReply};
