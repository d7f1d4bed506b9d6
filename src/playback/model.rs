/*!
 * Data model for gesture clip playback.
 *
 * A `PlayerSession` is the only mutable state shared between translation
 * resolution and playback controls. It is never edited in place by callers;
 * the state machine in `machine.rs` produces a new session for every event.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a single gesture clip, as returned by the translation service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClipId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Ordered list of clips for one transcript.
///
/// Cheap to clone; the clips themselves are never mutated once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipSequence(Arc<[ClipId]>);

impl ClipSequence {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClipId> {
        self.0.get(index)
    }

    /// Index of the final clip, if any
    pub fn last_index(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ClipId] {
        &self.0
    }
}

impl From<Vec<ClipId>> for ClipSequence {
    fn from(clips: Vec<ClipId>) -> Self {
        Self(clips.into())
    }
}

impl<'a> From<&[&'a str]> for ClipSequence {
    fn from(ids: &[&'a str]) -> Self {
        ids.iter().map(|id| ClipId::from(*id)).collect()
    }
}

impl FromIterator<ClipId> for ClipSequence {
    fn from_iter<I: IntoIterator<Item = ClipId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Relative recency of a translation request.
///
/// Generation 0 is never issued; it marks a session that was not built from any
/// request yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub const NONE: Generation = Generation(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Token attached to every clip start.
///
/// Clip events quoting an older cue belong to a clip that has already been
/// replaced and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cue(u64);

impl Cue {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Lifecycle phase of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Empty,
    Loading,
    Ready,
    Error,
    Completed,
}

/// Observable player state, as the host sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerState {
    Empty,
    Loading,
    Ready { playing: bool },
    Error(String),
    Completed,
}

impl PlayerState {
    /// Completed and Error end a cycle until the next accepted resolution
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlayerState::Completed | PlayerState::Error(_))
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerState::Empty => write!(f, "empty"),
            PlayerState::Loading => write!(f, "loading"),
            PlayerState::Ready { playing: true } => write!(f, "playing"),
            PlayerState::Ready { playing: false } => write!(f, "paused"),
            PlayerState::Error(message) => write!(f, "error: {}", message),
            PlayerState::Completed => write!(f, "completed"),
        }
    }
}

/// Position and transport state within the current sequence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// Index of the clip on screen; 0 and unused while the sequence is empty
    pub current_index: usize,
    /// Whether the current clip is playing
    pub playing: bool,
    /// Cycle failure message in the Error phase, or the latest clip fault otherwise
    pub error: Option<String>,
}

/// The clip sequence being shown, its playback state, and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerSession {
    pub(crate) phase: Phase,
    pub(crate) sequence: ClipSequence,
    pub(crate) playback: PlaybackState,
    /// Generation the current sequence was built from
    pub(crate) generation: Generation,
    /// Generation awaited while loading
    pub(crate) pending: Option<Generation>,
    pub(crate) cue: Cue,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlayerState {
        match self.phase {
            Phase::Empty => PlayerState::Empty,
            Phase::Loading => PlayerState::Loading,
            Phase::Ready => PlayerState::Ready {
                playing: self.playback.playing,
            },
            Phase::Error => PlayerState::Error(self.playback.error.clone().unwrap_or_default()),
            Phase::Completed => PlayerState::Completed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sequence(&self) -> &ClipSequence {
        &self.sequence
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn current_index(&self) -> usize {
        self.playback.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.playback.playing
    }

    pub fn error(&self) -> Option<&str> {
        self.playback.error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn pending_generation(&self) -> Option<Generation> {
        self.pending
    }

    pub fn cue(&self) -> Cue {
        self.cue
    }

    pub fn current_clip(&self) -> Option<&ClipId> {
        if self.sequence.is_empty() {
            return None;
        }
        self.sequence.get(self.playback.current_index)
    }

    /// Checks the index and playing invariants
    pub fn invariants_hold(&self) -> bool {
        match self.sequence.last_index() {
            None => !self.playback.playing && self.playback.current_index == 0,
            Some(last) => {
                let in_bounds = self.playback.current_index <= last;
                let completed_stopped = self.phase != Phase::Completed || !self.playback.playing;
                let idle_stopped = self.phase == Phase::Ready || !self.playback.playing;
                in_bounds && completed_stopped && idle_stopped
            }
        }
    }

    /// One-line description for status output
    pub fn status_line(&self) -> String {
        match self.current_clip() {
            Some(clip) if matches!(self.phase, Phase::Ready | Phase::Completed) => format!(
                "[{}] Showing gesture {} of {} ({})",
                self.state(),
                self.playback.current_index + 1,
                self.sequence.len(),
                clip
            ),
            _ => format!("[{}]", self.state()),
        }
    }
}
