use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::app_config::{Config, TranslationProvider};
use crate::errors::CycleError;
use crate::orchestrator::{NotificationSink, Orchestrator};
use crate::playback::{ClipDriver, ClipResolver, PlayerSession, PlayerState, SimulatedClipDriver};
use crate::providers::{AnalyzeClient, LexiconProvider, Provider};

// @module: Application controller for translation playback

/// Transport command typed into an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Play,
    Pause,
    Next,
    Previous,
    Translate(bool),
    Status,
    Quit,
}

impl ConsoleCommand {
    /// Parse a `:command` line; `None` for anything that isn't one
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(':')?;
        let mut parts = rest.split_whitespace();
        let command = match parts.next()?.to_lowercase().as_str() {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "next" => Self::Next,
            "prev" | "previous" => Self::Previous,
            "status" => Self::Status,
            "quit" | "exit" => Self::Quit,
            "translate" => match parts.next().map(str::to_lowercase).as_deref() {
                Some("on") => Self::Translate(true),
                Some("off") => Self::Translate(false),
                _ => return None,
            },
            _ => return None,
        };
        Some(command)
    }
}

/// Main application controller for translation playback
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        let mut config = Config::default();
        config.translation.provider = TranslationProvider::Lexicon;
        config.playback.clip_duration_ms = 10;
        Self::with_config(config)
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the configured translation provider
    pub fn build_provider(&self) -> Result<Arc<dyn Provider>> {
        let provider: Arc<dyn Provider> = match self.config.translation.provider {
            TranslationProvider::Analyze => Arc::new(
                AnalyzeClient::new(&self.config.translation.endpoint, self.config.translation.timeout())
                    .map_err(|e| anyhow!("Failed to create analyze client: {}", e))?,
            ),
            TranslationProvider::Lexicon => Arc::new(LexiconProvider::default()),
        };
        Ok(provider)
    }

    /// Check the provider connection in the background
    fn warm_up(provider: &Arc<dyn Provider>) {
        let provider = provider.clone();
        tokio::spawn(async move {
            match provider.test_connection().await {
                Ok(()) => debug!("{} provider reachable", provider.name()),
                Err(e) => warn!("{} provider not reachable yet: {}", provider.name(), e),
            }
        });
    }

    fn build_driver(&self, visible: bool) -> Result<Arc<dyn ClipDriver>> {
        let resolver = ClipResolver::new(&self.config.playback.asset_base)?;
        let duration = self.config.playback.clip_duration();
        let driver = if visible {
            SimulatedClipDriver::new(resolver, duration)
        } else {
            SimulatedClipDriver::hidden(resolver, duration)
        };
        Ok(Arc::new(driver))
    }

    /// Translate one transcript and play it through to the end
    pub async fn run_once(&self, transcript: &str) -> Result<PlayerSession> {
        self.run_once_with(self.build_provider()?, transcript, true).await
    }

    /// `run_once` against an explicit provider
    pub async fn run_once_with(
        &self,
        provider: Arc<dyn Provider>,
        transcript: &str,
        visible: bool,
    ) -> Result<PlayerSession> {
        let driver = self.build_driver(visible)?;
        Self::warm_up(&provider);
        let orchestrator = Orchestrator::spawn(provider, driver, Arc::new(|| debug!("Translation cycle complete")));
        let mut updates = orchestrator.player().subscribe();

        let cycle = orchestrator
            .submit(transcript, true)
            .ok_or_else(|| anyhow!("Nothing to translate: transcript is empty"))?;
        info!("Translating '{}'", transcript.trim());
        cycle.settled().await?;

        let session = updates
            .wait_for(|session| session.state().is_terminal())
            .await
            .map_err(|_| anyhow!("Player stopped before the sequence finished"))?
            .clone();
        orchestrator.shutdown().await;

        match session.state() {
            PlayerState::Completed => {
                info!("Played {} gestures", session.sequence().len());
                if let Some(fault) = session.error() {
                    warn!("Some gestures could not be shown: {}", fault);
                }
                Ok(session)
            }
            PlayerState::Error(message) if message == CycleError::EmptyResult.to_string() => {
                Err(anyhow!("No sign language clips available for this content"))
            }
            PlayerState::Error(message) => Err(anyhow!(message)),
            other => Err(anyhow!("Unexpected player state: {}", other)),
        }
    }

    /// Interactive session: every line read is a captured transcript or a `:command`
    pub async fn listen<R>(&self, input: R) -> Result<ListenSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        self.listen_with(self.build_provider()?, input, true).await
    }

    /// `listen` against an explicit provider
    pub async fn listen_with<R>(&self, provider: Arc<dyn Provider>, input: R, visible: bool) -> Result<ListenSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        let translate = Arc::new(AtomicBool::new(self.config.translate_by_default));
        let completed = Arc::new(AtomicUsize::new(0));
        let notifier: Arc<dyn NotificationSink> = {
            let completed = completed.clone();
            Arc::new(move || {
                completed.fetch_add(1, Ordering::SeqCst);
            })
        };

        Self::warm_up(&provider);
        let orchestrator = Orchestrator::spawn(provider, self.build_driver(visible)?, notifier);
        let mut summary = ListenSummary::default();
        let mut lines = input.lines();
        let mut last_cycle = None;
        let mut quit = false;

        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            if let Some(command) = ConsoleCommand::parse(&line) {
                match command {
                    ConsoleCommand::Play => orchestrator.play(),
                    ConsoleCommand::Pause => orchestrator.pause(),
                    ConsoleCommand::Next => orchestrator.next(),
                    ConsoleCommand::Previous => orchestrator.previous(),
                    ConsoleCommand::Translate(enabled) => {
                        translate.store(enabled, Ordering::SeqCst);
                        info!("Translation {}", if enabled { "enabled" } else { "disabled" });
                    }
                    ConsoleCommand::Status => {
                        let session = orchestrator.snapshot().await?;
                        println!("{}", session.status_line());
                    }
                    ConsoleCommand::Quit => {
                        quit = true;
                        break;
                    }
                }
                continue;
            }

            if line.trim_start().starts_with(':') {
                warn!("Unknown command: {}", line.trim());
                continue;
            }

            match orchestrator.submit(&line, translate.load(Ordering::SeqCst)) {
                Some(cycle) => {
                    summary.admitted += 1;
                    debug!("Transcript queued as {}", cycle.generation());
                    last_cycle = Some(cycle);
                }
                None => summary.declined += 1,
            }
        }

        // Input ran out: let the newest transcript play out unless the user paused it
        if !quit {
            if let Some(cycle) = last_cycle.take() {
                cycle.settled().await?;
            }
            let mut updates = orchestrator.player().subscribe();
            orchestrator.snapshot().await?;
            updates
                .wait_for(|session| !matches!(session.state(), PlayerState::Loading | PlayerState::Ready { playing: true }))
                .await
                .map_err(|_| anyhow!("Player stopped unexpectedly"))?;
        }

        summary.final_session = Some(orchestrator.snapshot().await?);
        orchestrator.shutdown().await;
        summary.cycles_completed = completed.load(Ordering::SeqCst);
        Ok(summary)
    }
}

/// What happened during an interactive session
#[derive(Debug, Default)]
pub struct ListenSummary {
    /// Transcripts that started a translation
    pub admitted: usize,
    /// Transcripts turned away by the gate
    pub declined: usize,
    /// Completion callbacks received
    pub cycles_completed: usize,
    /// Player session when input ended
    pub final_session: Option<PlayerSession>,
}
