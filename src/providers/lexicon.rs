/*!
 * Offline gesture lexicon.
 *
 * Words with a recorded gesture map to `<WORD>.mp4`; every other word is
 * fingerspelled one letter clip at a time. Numbers one to ten have their own
 * gestures, other numbers are signed digit by digit.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::errors::ProviderError;
use crate::playback::ClipId;

use super::{AnalyzeRequest, AnalyzeResponse, Provider};

const DEFAULT_WORDS: &[&str] = &[
    "TIME", "HOME", "PERSON", "YOU", "HELLO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX",
    "SEVEN", "EIGHT", "NINE", "TEN", "THANK", "PLEASE", "SORRY", "LEARN", "FRIEND",
];

const NUMBER_WORDS: [&str; 10] = [
    "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
];

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+|[0-9]+").expect("valid token regex"));

/// Provider that translates with a local word list
#[derive(Debug, Clone)]
pub struct LexiconProvider {
    words: HashSet<String>,
    extension: String,
}

impl Default for LexiconProvider {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS.iter().map(|w| w.to_string()))
    }
}

impl LexiconProvider {
    /// Create a lexicon from a custom word list (case-insensitive)
    pub fn new(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.to_uppercase()).collect(),
            extension: "mp4".to_string(),
        }
    }

    /// Use a different clip file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn knows(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    fn clip(&self, name: &str) -> ClipId {
        ClipId::new(format!("{}.{}", name, self.extension))
    }

    /// Translate a transcript into clip identifiers
    pub fn translate(&self, transcript: &str) -> Vec<ClipId> {
        let mut clips = Vec::new();
        for token in TOKEN_RE.find_iter(transcript) {
            let token = token.as_str().to_uppercase();

            if token.chars().all(|c| c.is_ascii_digit()) {
                match token.parse::<usize>() {
                    Ok(n @ 1..=10) if self.knows(NUMBER_WORDS[n - 1]) => {
                        clips.push(self.clip(NUMBER_WORDS[n - 1]))
                    }
                    _ => clips.extend(token.chars().map(|d| self.clip(&d.to_string()))),
                }
            } else if self.knows(&token) {
                clips.push(self.clip(&token));
            } else {
                clips.extend(token.chars().map(|c| self.clip(&c.to_string())));
            }
        }
        clips
    }
}

#[async_trait]
impl Provider for LexiconProvider {
    async fn complete(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, ProviderError> {
        Ok(AnalyzeResponse::with_clips(self.translate(&request.transcript)))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
