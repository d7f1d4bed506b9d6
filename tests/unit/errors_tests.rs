/*!
 * Tests for error types and conversions
 */

use signflow::errors::{AppError, ClipPlaybackError, CycleError, ProviderError, SupersededResult};
use signflow::playback::{ClipId, Generation};

#[test]
fn test_cycleError_emptyResult_shouldDisplayNoContent() {
    assert_eq!(CycleError::EmptyResult.to_string(), "no content");
}

#[test]
fn test_cycleError_fromProviderError_shouldKeepCause() {
    let error: CycleError = ProviderError::ConnectionError("Host unreachable".to_string()).into();
    let display = error.to_string();
    assert!(display.contains("Failed to fetch sign language clips"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_clipPlaybackError_shouldNameClip() {
    let error = ClipPlaybackError {
        clip: ClipId::from("HELLO.mp4"),
        message: "not found".to_string(),
    };
    assert_eq!(error.to_string(), "Error playing clip HELLO.mp4: not found");
}

#[test]
fn test_supersededResult_shouldShowBothGenerations() {
    let error = SupersededResult {
        generation: Generation::new(1),
        latest: Generation::new(3),
    };
    assert_eq!(error.to_string(), "result of generation #1 superseded by #3");
}

#[test]
fn test_appError_conversions_shouldWrapCorrectly() {
    let app: AppError = CycleError::EmptyResult.into();
    assert!(matches!(app, AppError::Cycle(CycleError::EmptyResult)));

    let app: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("odd").into();
    assert_eq!(app.to_string(), "Unknown error: odd");
}
