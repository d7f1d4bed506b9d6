/*!
 * Playback state machine.
 *
 * `PlayerSession::apply` is a pure function from (session, event) to a new
 * session plus the effects the host must perform. Nothing here touches clocks,
 * channels or clip players; the orchestrator's actor executes the effects.
 *
 * States and the events each one reacts to:
 *
 * | state          | reacts to                                                  |
 * |----------------|------------------------------------------------------------|
 * | Empty          | RequestIssued                                              |
 * | Loading        | RequestIssued, SequenceResolved, RequestFailed (same gen)  |
 * | Ready(playing) | ClipEnded, ClipFailed, Pause, Next, Previous, RequestIssued|
 * | Ready(paused)  | ClipFailed, Play, Next, Previous, RequestIssued            |
 * | Completed      | Play (replay), Next, Previous, RequestIssued               |
 * | Error          | RequestIssued                                              |
 *
 * Every other combination is a no-op.
 */

use crate::errors::{ClipPlaybackError, CycleError, ProviderError};

use super::model::{ClipId, ClipSequence, Cue, Generation, Phase, PlaybackState, PlayerSession};

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// An admitted transcript was sent for translation
    RequestIssued { generation: Generation },
    /// The service answered with a clip sequence (possibly empty)
    SequenceResolved {
        generation: Generation,
        sequence: ClipSequence,
    },
    /// The service call failed
    RequestFailed {
        generation: Generation,
        error: ProviderError,
    },
    /// The clip started under `cue` played to its end
    ClipEnded { cue: Cue },
    /// The clip started under `cue` could not be played
    ClipFailed { cue: Cue, message: String },
    Play,
    Pause,
    Next,
    Previous,
}

impl PlayerEvent {
    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            PlayerEvent::RequestIssued { .. } => "request-issued",
            PlayerEvent::SequenceResolved { .. } => "sequence-resolved",
            PlayerEvent::RequestFailed { .. } => "request-failed",
            PlayerEvent::ClipEnded { .. } => "clip-ended",
            PlayerEvent::ClipFailed { .. } => "clip-failed",
            PlayerEvent::Play => "play",
            PlayerEvent::Pause => "pause",
            PlayerEvent::Next => "next",
            PlayerEvent::Previous => "previous",
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load the clip and, when `autoplay` is set, start playing it
    StartClip {
        clip: ClipId,
        index: usize,
        total: usize,
        cue: Cue,
        autoplay: bool,
    },
    PauseClip,
    ResumeClip,
    /// Tear down whatever clip is on screen
    StopPlayback,
    /// A non-superseded translation cycle finished
    CycleCompleted {
        generation: Generation,
        outcome: Result<usize, CycleError>,
    },
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: PlayerSession,
    pub effects: Vec<Effect>,
    /// False when the event was a no-op in the current state
    pub accepted: bool,
}

impl Transition {
    fn ignored(session: &PlayerSession) -> Self {
        Self {
            session: session.clone(),
            effects: Vec::new(),
            accepted: false,
        }
    }

    fn to(session: PlayerSession, effects: Vec<Effect>) -> Self {
        Self {
            session,
            effects,
            accepted: true,
        }
    }
}

impl PlayerSession {
    /// Apply an event, returning the next session and the effects to perform
    pub fn apply(&self, event: PlayerEvent) -> Transition {
        match event {
            PlayerEvent::RequestIssued { generation } => self.on_request_issued(generation),
            PlayerEvent::SequenceResolved {
                generation,
                sequence,
            } => self.on_resolved(generation, sequence),
            PlayerEvent::RequestFailed { generation, error } => {
                self.on_failed(generation, CycleError::Network(error))
            }
            PlayerEvent::ClipEnded { cue } => self.on_clip_ended(cue),
            PlayerEvent::ClipFailed { cue, message } => self.on_clip_failed(cue, message),
            PlayerEvent::Play => self.on_play(),
            PlayerEvent::Pause => self.on_pause(),
            PlayerEvent::Next => self.on_next(),
            PlayerEvent::Previous => self.on_previous(),
        }
    }

    fn awaits(&self, generation: Generation) -> bool {
        self.phase == Phase::Loading && self.pending == Some(generation)
    }

    fn on_request_issued(&self, generation: Generation) -> Transition {
        let newest = self.pending.unwrap_or(self.generation);
        if generation <= newest {
            return Transition::ignored(self);
        }

        let mut next = self.clone();
        let mut effects = Vec::new();
        if matches!(self.phase, Phase::Ready | Phase::Completed) {
            effects.push(Effect::StopPlayback);
        }
        next.phase = Phase::Loading;
        next.pending = Some(generation);
        next.playback.playing = false;
        next.playback.error = None;
        Transition::to(next, effects)
    }

    fn on_resolved(&self, generation: Generation, sequence: ClipSequence) -> Transition {
        if !self.awaits(generation) {
            return Transition::ignored(self);
        }
        if sequence.is_empty() {
            return self.on_failed(generation, CycleError::EmptyResult);
        }

        let total = sequence.len();
        let cue = self.cue.next();
        let first = sequence.get(0).cloned();
        let next = PlayerSession {
            phase: Phase::Ready,
            sequence,
            playback: PlaybackState {
                current_index: 0,
                playing: true,
                error: None,
            },
            generation,
            pending: None,
            cue,
        };

        let mut effects = Vec::with_capacity(2);
        if let Some(clip) = first {
            effects.push(Effect::StartClip {
                clip,
                index: 0,
                total,
                cue,
                autoplay: true,
            });
        }
        effects.push(Effect::CycleCompleted {
            generation,
            outcome: Ok(total),
        });
        Transition::to(next, effects)
    }

    fn on_failed(&self, generation: Generation, error: CycleError) -> Transition {
        if !self.awaits(generation) {
            return Transition::ignored(self);
        }

        let next = PlayerSession {
            phase: Phase::Error,
            sequence: ClipSequence::empty(),
            playback: PlaybackState {
                current_index: 0,
                playing: false,
                error: Some(error.to_string()),
            },
            generation,
            pending: None,
            cue: self.cue,
        };
        Transition::to(
            next,
            vec![Effect::CycleCompleted {
                generation,
                outcome: Err(error),
            }],
        )
    }

    fn on_clip_ended(&self, cue: Cue) -> Transition {
        if self.phase != Phase::Ready || !self.playback.playing || cue != self.cue {
            return Transition::ignored(self);
        }
        match self.sequence.last_index() {
            Some(last) if self.playback.current_index < last => {
                self.start_at(self.playback.current_index + 1, true, self.playback.error.clone())
            }
            _ => {
                let mut next = self.clone();
                next.phase = Phase::Completed;
                next.playback.playing = false;
                Transition::to(next, Vec::new())
            }
        }
    }

    /// A faulty clip is skipped: the fault is recorded and playback moves on as
    /// if the clip had ended.
    fn on_clip_failed(&self, cue: Cue, message: String) -> Transition {
        if self.phase != Phase::Ready || cue != self.cue {
            return Transition::ignored(self);
        }
        let Some(clip) = self.current_clip().cloned() else {
            return Transition::ignored(self);
        };
        let fault = ClipPlaybackError { clip, message }.to_string();

        match self.sequence.last_index() {
            Some(last) if self.playback.current_index < last => self.start_at(
                self.playback.current_index + 1,
                self.playback.playing,
                Some(fault),
            ),
            _ => {
                let mut next = self.clone();
                next.phase = Phase::Completed;
                next.playback.playing = false;
                next.playback.error = Some(fault);
                Transition::to(next, vec![Effect::StopPlayback])
            }
        }
    }

    fn on_play(&self) -> Transition {
        match self.phase {
            Phase::Ready if !self.playback.playing => {
                let mut next = self.clone();
                next.playback.playing = true;
                Transition::to(next, vec![Effect::ResumeClip])
            }
            Phase::Completed if !self.sequence.is_empty() => self.start_at(0, true, None),
            _ => Transition::ignored(self),
        }
    }

    fn on_pause(&self) -> Transition {
        if self.phase != Phase::Ready || !self.playback.playing {
            return Transition::ignored(self);
        }
        let mut next = self.clone();
        next.playback.playing = false;
        Transition::to(next, vec![Effect::PauseClip])
    }

    fn on_next(&self) -> Transition {
        if !matches!(self.phase, Phase::Ready | Phase::Completed) {
            return Transition::ignored(self);
        }
        match self.sequence.last_index() {
            Some(last) if self.playback.current_index < last => {
                self.start_at(self.playback.current_index + 1, true, None)
            }
            _ => Transition::ignored(self),
        }
    }

    fn on_previous(&self) -> Transition {
        if !matches!(self.phase, Phase::Ready | Phase::Completed) || self.sequence.is_empty() {
            return Transition::ignored(self);
        }
        if self.playback.current_index == 0 {
            return Transition::ignored(self);
        }
        self.start_at(self.playback.current_index - 1, true, None)
    }

    /// Move to `index` under a fresh cue and ask the host to load that clip
    fn start_at(&self, index: usize, playing: bool, error: Option<String>) -> Transition {
        let Some(clip) = self.sequence.get(index).cloned() else {
            return Transition::ignored(self);
        };
        let cue = self.cue.next();
        let mut next = self.clone();
        next.phase = Phase::Ready;
        next.cue = cue;
        next.playback = PlaybackState {
            current_index: index,
            playing,
            error,
        };
        Transition::to(
            next,
            vec![Effect::StartClip {
                clip,
                index,
                total: self.sequence.len(),
                cue,
                autoplay: playing,
            }],
        )
    }
}
