/*!
 * Tests for clip asset resolution
 */

use signflow::playback::{ClipId, ClipLocation, ClipResolver};
use std::path::PathBuf;

#[test]
fn test_resolve_withHttpBase_shouldBuildClipUrl() {
    let resolver = ClipResolver::new("https://aurisvue-api.onrender.com/videos/").unwrap();
    let clip = resolver.resolve(&ClipId::from("HELLO.mp4")).unwrap();
    assert_eq!(clip.id.as_str(), "HELLO.mp4");
    assert_eq!(
        clip.location.to_string(),
        "https://aurisvue-api.onrender.com/videos/HELLO.mp4"
    );
}

#[test]
fn test_resolve_withRelativeDirectory_shouldJoinPath() {
    let resolver = ClipResolver::new("assets/isl").unwrap();
    let clip = resolver.resolve(&ClipId::from("A.mp4")).unwrap();
    assert_eq!(clip.location, ClipLocation::Path(PathBuf::from("assets/isl/A.mp4")));
}

#[test]
fn test_resolve_withUnsafeIdentifiers_shouldFail() {
    let resolver = ClipResolver::new("/videos/").unwrap();
    for id in ["", "/etc/passwd", "a/../../b.mp4", "..\\b.mp4"] {
        assert!(resolver.resolve(&ClipId::from(id)).is_err(), "{:?} should be rejected", id);
    }
}

#[test]
fn test_resolve_withAbsoluteUrlIdentifier_shouldStayInsideAssetBase() {
    let resolver = ClipResolver::new("https://cdn.example.com/isl/").unwrap();
    for id in [
        "https://evil.example.net/x.mp4",
        "//evil.example.net/x.mp4",
        "file:///etc/passwd",
        "javascript:alert(1)",
    ] {
        let err = resolver.resolve(&ClipId::from(id)).unwrap_err();
        assert_eq!(err.clip.as_str(), id);
    }

    let clip = resolver.resolve(&ClipId::from("letters/A.mp4")).unwrap();
    assert_eq!(clip.location.to_string(), "https://cdn.example.com/isl/letters/A.mp4");
}

#[test]
fn test_resolve_withDriveLetterIdentifier_shouldFailForLocalBase() {
    let resolver = ClipResolver::new("assets").unwrap();
    assert!(resolver.resolve(&ClipId::from("C:\\secret.mp4")).is_err());
}
