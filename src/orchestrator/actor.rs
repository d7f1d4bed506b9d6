/*!
 * Player task: the single writer of the player session.
 *
 * Both producers of change, translation outcomes and playback/transport events,
 * post commands to one task, which applies them in arrival order through the
 * state machine and then performs the resulting effects.
 */

use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::errors::AppError;
use crate::playback::{ClipDriver, ClipPosition, Cue, Effect, PlayerEvent, PlayerSession};

use super::notify::NotificationSink;

pub(crate) enum PlayerCommand {
    Event(PlayerEvent),
    /// An event whose sender needs to know whether it was applied
    Deliver {
        event: PlayerEvent,
        reply: oneshot::Sender<bool>,
    },
    Snapshot(oneshot::Sender<PlayerSession>),
    Shutdown,
}

/// Cloneable handle for controlling the player.
///
/// Every control method is a non-blocking send; the player applies commands in
/// the order they were sent.
#[derive(Clone)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<PlayerCommand>,
    state: watch::Receiver<PlayerSession>,
}

impl PlayerHandle {
    pub fn play(&self) {
        self.send(PlayerEvent::Play);
    }

    pub fn pause(&self) {
        self.send(PlayerEvent::Pause);
    }

    pub fn next(&self) {
        self.send(PlayerEvent::Next);
    }

    pub fn previous(&self) {
        self.send(PlayerEvent::Previous);
    }

    /// Report that the clip started under `cue` reached its end
    pub fn clip_ended(&self, cue: Cue) {
        self.send(PlayerEvent::ClipEnded { cue });
    }

    /// Report that the clip started under `cue` could not be played
    pub fn clip_failed(&self, cue: Cue, message: impl Into<String>) {
        self.send(PlayerEvent::ClipFailed {
            cue,
            message: message.into(),
        });
    }

    /// Post a raw event; returns false when the player has stopped
    pub fn send(&self, event: PlayerEvent) -> bool {
        let name = event.name();
        if self.tx.send(PlayerCommand::Event(event)).is_err() {
            debug!("Player stopped, dropping {} event", name);
            return false;
        }
        true
    }

    /// Post an event and wait for the player's verdict: `true` when it was applied,
    /// `false` when the state machine rejected it
    pub async fn deliver(&self, event: PlayerEvent) -> Result<bool, AppError> {
        let (reply, verdict) = oneshot::channel();
        self.tx
            .send(PlayerCommand::Deliver { event, reply })
            .map_err(|_| AppError::PlayerStopped("event delivered after shutdown".to_string()))?;
        verdict
            .await
            .map_err(|_| AppError::PlayerStopped("player exited before answering".to_string()))
    }

    /// Session after every command sent before this call has been applied
    pub async fn snapshot(&self) -> Result<PlayerSession, AppError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(PlayerCommand::Snapshot(reply))
            .map_err(|_| AppError::PlayerStopped("snapshot requested after shutdown".to_string()))?;
        response
            .await
            .map_err(|_| AppError::PlayerStopped("player exited before answering".to_string()))
    }

    /// Most recently published session, without waiting for queued commands
    pub fn current(&self) -> PlayerSession {
        self.state.borrow().clone()
    }

    /// Watch every published session
    pub fn subscribe(&self) -> watch::Receiver<PlayerSession> {
        self.state.clone()
    }

    pub(crate) fn shutdown(&self) {
        let _ = self.tx.send(PlayerCommand::Shutdown);
    }
}

pub(crate) struct PlayerActor {
    session: PlayerSession,
    rx: mpsc::UnboundedReceiver<PlayerCommand>,
    state_tx: watch::Sender<PlayerSession>,
    handle: PlayerHandle,
    driver: Arc<dyn ClipDriver>,
    notifier: Arc<dyn NotificationSink>,
}

impl PlayerActor {
    /// Start the player task and return a handle to it
    pub(crate) fn spawn(
        driver: Arc<dyn ClipDriver>,
        notifier: Arc<dyn NotificationSink>,
    ) -> (PlayerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PlayerSession::new());
        let handle = PlayerHandle { tx, state: state_rx };

        let actor = PlayerActor {
            session: PlayerSession::new(),
            rx,
            state_tx,
            handle: handle.clone(),
            driver,
            notifier,
        };
        let task = tokio::spawn(actor.run());
        (handle, task)
    }

    async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            match command {
                PlayerCommand::Event(event) => {
                    self.handle_event(event);
                }
                PlayerCommand::Deliver { event, reply } => {
                    let accepted = self.handle_event(event);
                    let _ = reply.send(accepted);
                }
                PlayerCommand::Snapshot(reply) => {
                    let _ = reply.send(self.session.clone());
                }
                PlayerCommand::Shutdown => break,
            }
        }
        self.driver.stop();
        debug!("Player task finished");
    }

    fn handle_event(&mut self, event: PlayerEvent) -> bool {
        let name = event.name();
        let transition = self.session.apply(event);
        if !transition.accepted {
            debug!("Ignoring {} while {}", name, self.session.state());
            return false;
        }

        self.session = transition.session;
        debug_assert!(self.session.invariants_hold(), "{:?}", self.session);
        self.state_tx.send_replace(self.session.clone());

        for effect in transition.effects {
            self.dispatch(effect);
        }
        true
    }

    fn dispatch(&self, effect: Effect) {
        match effect {
            Effect::StartClip {
                clip,
                index,
                total,
                cue,
                autoplay,
            } => self
                .driver
                .start(&clip, ClipPosition { index, total }, cue, autoplay, &self.handle),
            Effect::PauseClip => self.driver.pause(),
            Effect::ResumeClip => self.driver.resume(&self.handle),
            Effect::StopPlayback => self.driver.stop(),
            Effect::CycleCompleted { generation, outcome } => {
                match outcome {
                    Ok(count) => info!("Translation {} ready: {} gestures", generation, count),
                    Err(e) => warn!("Translation {} ended without clips: {}", generation, e),
                }
                self.notifier.cycle_completed();
            }
        }
    }
}
