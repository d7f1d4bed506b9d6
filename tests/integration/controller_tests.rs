/*!
 * Integration tests for the application controller
 */

use anyhow::Result;
use std::sync::Arc;

use signflow::app_config::{Config, TranslationProvider};
use signflow::app_controller::Controller;
use signflow::playback::PlayerState;
use signflow::providers::{LexiconProvider, MockProvider};

use crate::common;

fn quick_controller() -> Result<Controller> {
    common::init_logging();
    Controller::new_for_test()
}

#[tokio::test]
async fn test_runOnce_withLexicon_shouldPlayEveryGesture() -> Result<()> {
    let controller = quick_controller()?;
    let session = controller
        .run_once_with(Arc::new(LexiconProvider::default()), "hello friend", false)
        .await?;

    assert_eq!(session.state(), PlayerState::Completed);
    let clips: Vec<&str> = session.sequence().iter().map(|c| c.as_str()).collect();
    assert_eq!(clips, vec!["HELLO.mp4", "FRIEND.mp4"]);
    assert_eq!(session.current_index(), 1);
    assert!(session.error().is_none());
    Ok(())
}

#[tokio::test]
async fn test_runOnce_withEmptyResult_shouldReportNoClips() -> Result<()> {
    let controller = quick_controller()?;
    let err = controller
        .run_once_with(Arc::new(MockProvider::empty()), "mumble", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No sign language clips available"));
    Ok(())
}

#[tokio::test]
async fn test_runOnce_withFailingProvider_shouldReturnError() -> Result<()> {
    let controller = quick_controller()?;
    let err = controller
        .run_once_with(Arc::new(MockProvider::failing()), "hello", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Simulated network failure"));
    Ok(())
}

#[tokio::test]
async fn test_runOnce_shouldCheckProviderConnectionBeforeTranslating() -> Result<()> {
    let controller = quick_controller()?;
    let provider = MockProvider::working();
    controller
        .run_once_with(Arc::new(provider.clone()), "hello", false)
        .await?;

    assert_eq!(provider.connection_check_count(), 1);
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_runOnce_withUnreachableProvider_shouldStillAttemptTranslation() -> Result<()> {
    let controller = quick_controller()?;
    let provider = MockProvider::failing();
    let err = controller
        .run_once_with(Arc::new(provider.clone()), "hello", false)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Simulated network failure"));
    assert_eq!(provider.connection_check_count(), 1);
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_runOnce_withBlankTranscript_shouldFailWithoutRequest() -> Result<()> {
    let controller = quick_controller()?;
    let provider = MockProvider::working();
    assert!(
        controller
            .run_once_with(Arc::new(provider.clone()), "   ", false)
            .await
            .is_err()
    );
    assert_eq!(provider.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_runOnce_withUnsafeClipName_shouldSkipItAndComplete() -> Result<()> {
    let controller = quick_controller()?;
    let provider = MockProvider::scripted().reply(
        "hi",
        signflow::providers::MockReply::clips(&["../H.mp4", "I.mp4"]),
    );
    let session = controller.run_once_with(Arc::new(provider), "hi", false).await?;

    assert_eq!(session.state(), PlayerState::Completed);
    assert!(session.error().unwrap().contains("../H.mp4"));
    Ok(())
}

#[tokio::test]
async fn test_listen_shouldGateTranscriptsAndPlayTheLast() -> Result<()> {
    let controller = quick_controller()?;
    let input: &[u8] = b"hello\nhello\n:translate off\nthank you\n:translate on\nthank you\n:status\n";

    let summary = controller
        .listen_with(Arc::new(LexiconProvider::default()), input, false)
        .await?;

    assert_eq!(summary.admitted, 2);
    assert_eq!(summary.declined, 2);
    assert!(summary.cycles_completed >= 1);

    let session = summary.final_session.expect("session captured");
    assert_eq!(session.state(), PlayerState::Completed);
    let clips: Vec<&str> = session.sequence().iter().map(|c| c.as_str()).collect();
    assert_eq!(clips, vec!["THANK.mp4", "YOU.mp4"]);
    Ok(())
}

#[tokio::test]
async fn test_listen_withQuit_shouldStopReading() -> Result<()> {
    let controller = quick_controller()?;
    let provider = MockProvider::working();
    let input: &[u8] = b":quit\nhello\n";

    let summary = controller
        .listen_with(Arc::new(provider.clone()), input, false)
        .await?;
    assert_eq!(summary.admitted, 0);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(summary.final_session.map(|s| s.state()), Some(PlayerState::Empty));
    Ok(())
}

#[tokio::test]
async fn test_listen_withTranslationOffByDefault_shouldDeclineUntilEnabled() -> Result<()> {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Lexicon;
    config.playback.clip_duration_ms = 5;
    config.translate_by_default = false;
    let controller = Controller::with_config(config)?;

    let input: &[u8] = b"hello\n:bogus\n:translate on\nhello\n";
    let summary = controller
        .listen_with(Arc::new(LexiconProvider::default()), input, false)
        .await?;
    assert_eq!(summary.declined, 1);
    assert_eq!(summary.admitted, 1);
    assert_eq!(summary.cycles_completed, 1);
    Ok(())
}
