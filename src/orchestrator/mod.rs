/*!
 * Translation playback orchestration.
 *
 * Wires the transcript gate, the translation requester and the player task
 * together:
 *
 * transcript → gate → requester (own task per request) → player task → driver
 *
 * - `requester`: generation-stamped translation requests
 * - `actor`: the player task and its handle
 * - `notify`: cycle completion callbacks
 */

use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::errors::{AppError, SupersededResult};
use crate::gate::TranscriptGate;
use crate::playback::{ClipDriver, Generation, PlayerEvent, PlayerSession};
use crate::providers::Provider;

pub mod actor;
pub mod notify;
pub mod requester;

pub use self::actor::PlayerHandle;
pub use self::notify::NotificationSink;
pub use self::requester::{RequestOutcome, RequestStatus, TranslationRequest, TranslationRequester};

use self::actor::PlayerActor;

/// An admitted transcript's translation in flight
pub struct CycleHandle {
    generation: Generation,
    task: JoinHandle<RequestStatus>,
}

impl CycleHandle {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Wait until the request has settled and its outcome was handed to the player
    pub async fn settled(self) -> Result<RequestStatus, AppError> {
        self.task
            .await
            .map_err(|e| AppError::Unknown(format!("translation task {} aborted: {}", self.generation, e)))
    }
}

/// Drives translation requests and sequential clip playback for a host
pub struct Orchestrator {
    gate: Mutex<TranscriptGate>,
    requester: TranslationRequester,
    player: PlayerHandle,
    player_task: Mutex<Option<JoinHandle<()>>>,
}

impl Orchestrator {
    /// Start the player task; must be called inside a tokio runtime
    pub fn spawn(
        provider: Arc<dyn Provider>,
        driver: Arc<dyn ClipDriver>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let (player, player_task) = PlayerActor::spawn(driver, notifier);
        Self {
            gate: Mutex::new(TranscriptGate::new()),
            requester: TranslationRequester::new(provider),
            player,
            player_task: Mutex::new(Some(player_task)),
        }
    }

    /// Offer a captured transcript.
    ///
    /// Returns `None` when the gate declines it. Otherwise the player enters
    /// Loading right away and the translation runs on its own task.
    pub fn submit(&self, transcript: &str, translate: bool) -> Option<CycleHandle> {
        // Held until RequestIssued is queued so generations reach the player in order
        let mut gate = self.gate.lock();
        if !gate.admit(transcript, translate) {
            return None;
        }

        let request = self.requester.issue(transcript);
        let generation = request.generation;
        self.player.send(PlayerEvent::RequestIssued { generation });
        drop(gate);

        info!("Transcript admitted as {}", generation);
        let requester = self.requester.clone();
        let player = self.player.clone();
        let task = tokio::spawn(async move {
            let outcome = requester.fetch(request).await;
            hand_over(&requester, &player, outcome).await
        });

        Some(CycleHandle { generation, task })
    }

    pub fn player(&self) -> &PlayerHandle {
        &self.player
    }

    pub fn requester(&self) -> &TranslationRequester {
        &self.requester
    }

    pub fn play(&self) {
        self.player.play();
    }

    pub fn pause(&self) {
        self.player.pause();
    }

    pub fn next(&self) {
        self.player.next();
    }

    pub fn previous(&self) {
        self.player.previous();
    }

    /// Session after every previously sent command has been applied
    pub async fn snapshot(&self) -> Result<PlayerSession, AppError> {
        self.player.snapshot().await
    }

    /// Forget the last admitted transcript so the same text can be translated again
    pub fn reset_gate(&self) {
        self.gate.lock().reset();
    }

    pub fn last_admitted(&self) -> Option<String> {
        self.gate.lock().last_admitted().map(str::to_string)
    }

    /// Stop the player task and wait for it to finish
    pub async fn shutdown(&self) {
        self.player.shutdown();
        let task = self.player_task.lock().take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }
}

/// Pass an outcome to the player and settle its status on the player's verdict.
///
/// A newer request can be issued between `fetch` classifying the outcome and
/// the player receiving it; the player's rejection then marks it superseded.
async fn hand_over(requester: &TranslationRequester, player: &PlayerHandle, outcome: RequestOutcome) -> RequestStatus {
    let generation = outcome.request.generation;
    let status = outcome.request.status;
    let Some(event) = outcome.into_event() else {
        debug!("Dropped outcome of {}", generation);
        return status;
    };

    match player.deliver(event).await {
        Ok(true) => status,
        Ok(false) => {
            debug!(
                "{}",
                SupersededResult {
                    generation,
                    latest: requester.latest()
                }
            );
            RequestStatus::Superseded
        }
        Err(e) => {
            debug!("Outcome of {} not delivered: {}", generation, e);
            status
        }
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.player.shutdown();
    }
}
