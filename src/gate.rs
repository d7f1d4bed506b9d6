/*!
 * Admission control for captured transcripts.
 *
 * Capture hosts tend to re-send the same transcript whenever anything about the
 * capture changes, so the gate remembers the last transcript it let through and
 * turns away repeats.
 */

use log::debug;

/// Decide whether `transcript` should start a translation cycle.
///
/// Admits only when translation is enabled, the trimmed transcript is non-empty,
/// and it differs from `last_admitted`.
pub fn should_admit(transcript: &str, translate: bool, last_admitted: Option<&str>) -> bool {
    let transcript = transcript.trim();
    translate && !transcript.is_empty() && last_admitted != Some(transcript)
}

/// Stateful gate owning the last admitted transcript
#[derive(Debug, Default, Clone)]
pub struct TranscriptGate {
    last_admitted: Option<String>,
}

impl TranscriptGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit or decline a transcript; an admitted transcript is remembered
    pub fn admit(&mut self, transcript: &str, translate: bool) -> bool {
        if !should_admit(transcript, translate, self.last_admitted.as_deref()) {
            debug!("Transcript not admitted (translate: {}): '{}'", translate, transcript.trim());
            return false;
        }
        self.last_admitted = Some(transcript.trim().to_string());
        true
    }

    pub fn last_admitted(&self) -> Option<&str> {
        self.last_admitted.as_deref()
    }

    /// Forget the last admitted transcript so it can be admitted again
    pub fn reset(&mut self) {
        self.last_admitted = None;
    }
}
