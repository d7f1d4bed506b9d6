/*!
 * Clip drivers execute the playback effects produced by the state machine.
 *
 * A driver owns whatever actually shows a clip (a video element, a window, a
 * terminal progress bar) and reports back through the `PlayerHandle` when a clip
 * ends or fails. Every report quotes the cue the clip was started with.
 */

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::orchestrator::PlayerHandle;

use super::assets::{ClipResolver, ResolvedClip};
use super::model::{ClipId, Cue};

/// Position of a clip within its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipPosition {
    pub index: usize,
    pub total: usize,
}

/// Host-side executor of playback effects.
///
/// Methods are called from the player task and must not block.
pub trait ClipDriver: Send + Sync {
    /// Load `clip`; start playing immediately when `autoplay` is set
    fn start(&self, clip: &ClipId, position: ClipPosition, cue: Cue, autoplay: bool, player: &PlayerHandle);

    fn pause(&self);

    fn resume(&self, player: &PlayerHandle);

    /// Remove the current clip, if any
    fn stop(&self);
}

/// Driver for hosts that report clip events themselves
#[derive(Debug, Default)]
pub struct NoopClipDriver;

impl ClipDriver for NoopClipDriver {
    fn start(&self, clip: &ClipId, position: ClipPosition, cue: Cue, _autoplay: bool, _player: &PlayerHandle) {
        debug!("Clip {} ({}/{}) cued as {}", clip, position.index + 1, position.total, cue.value());
    }

    fn pause(&self) {}

    fn resume(&self, _player: &PlayerHandle) {}

    fn stop(&self) {}
}

struct CurrentClip {
    clip: ResolvedClip,
    cue: Cue,
}

/// Plays every clip for a fixed duration and renders progress in the terminal
pub struct SimulatedClipDriver {
    resolver: ClipResolver,
    clip_duration: Duration,
    progress: ProgressBar,
    current: Mutex<Option<CurrentClip>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl SimulatedClipDriver {
    pub fn new(resolver: ClipResolver, clip_duration: Duration) -> Self {
        Self::with_progress_bar(resolver, clip_duration, ProgressBar::new(0))
    }

    /// Create a driver that draws nothing, for tests and non-interactive runs
    pub fn hidden(resolver: ClipResolver, clip_duration: Duration) -> Self {
        Self::with_progress_bar(resolver, clip_duration, ProgressBar::hidden())
    }

    fn with_progress_bar(resolver: ClipResolver, clip_duration: Duration, progress: ProgressBar) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] gesture {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        progress.set_style(style);

        Self {
            resolver,
            clip_duration,
            progress,
            current: Mutex::new(None),
            timer: Mutex::new(None),
        }
    }

    fn cancel_timer(&self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
        }
    }

    fn arm_timer(&self, cue: Cue, player: &PlayerHandle) {
        self.cancel_timer();
        let player = player.clone();
        let duration = self.clip_duration;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            player.clip_ended(cue);
        });
        *self.timer.lock() = Some(timer);
    }
}

impl ClipDriver for SimulatedClipDriver {
    fn start(&self, clip: &ClipId, position: ClipPosition, cue: Cue, autoplay: bool, player: &PlayerHandle) {
        self.cancel_timer();

        let resolved = match self.resolver.resolve(clip) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("{}", e);
                self.current.lock().take();
                player.clip_failed(cue, e.message);
                return;
            }
        };

        self.progress.set_length(position.total as u64);
        self.progress.set_position(position.index as u64 + 1);
        self.progress.set_message(resolved.location.to_string());
        debug!("Showing gesture {} of {}: {}", position.index + 1, position.total, resolved.location);

        *self.current.lock() = Some(CurrentClip { clip: resolved, cue });
        if autoplay {
            self.arm_timer(cue, player);
        }
    }

    fn pause(&self) {
        self.cancel_timer();
        if let Some(current) = self.current.lock().as_ref() {
            self.progress.set_message(format!("{} (paused)", current.clip.location));
        }
    }

    fn resume(&self, player: &PlayerHandle) {
        // A resumed clip replays its full duration
        let cue = match self.current.lock().as_ref() {
            Some(current) => {
                self.progress.set_message(current.clip.location.to_string());
                current.cue
            }
            None => return,
        };
        self.arm_timer(cue, player);
    }

    fn stop(&self) {
        self.cancel_timer();
        self.current.lock().take();
        self.progress.reset();
        self.progress.set_message("");
    }
}

impl Drop for SimulatedClipDriver {
    fn drop(&mut self) {
        self.cancel_timer();
        self.progress.finish_and_clear();
    }
}
