/*!
 * Tests for transcript admission
 */

use signflow::gate::{TranscriptGate, should_admit};

#[test]
fn test_shouldAdmit_withTranslationDisabled_shouldDecline() {
    assert!(!should_admit("hello", false, None));
}

#[test]
fn test_shouldAdmit_withWhitespaceOnly_shouldDecline() {
    assert!(!should_admit("", true, None));
    assert!(!should_admit(" \t\n", true, None));
}

#[test]
fn test_shouldAdmit_withRepeatedTranscript_shouldDeclineAfterTrimming() {
    assert!(!should_admit("  hello  ", true, Some("hello")));
    assert!(should_admit("Hello", true, Some("hello")));
}

#[test]
fn test_gate_admit_shouldRememberOnlyAdmittedTranscripts() {
    let mut gate = TranscriptGate::new();
    assert!(!gate.admit("hello", false));
    assert_eq!(gate.last_admitted(), None);

    assert!(gate.admit(" hello ", true));
    assert_eq!(gate.last_admitted(), Some("hello"));
    assert!(!gate.admit("hello", true));

    assert!(gate.admit("goodbye", true));
    assert!(gate.admit("hello", true));
}

#[test]
fn test_gate_reset_shouldAllowSameTranscriptAgain() {
    let mut gate = TranscriptGate::new();
    assert!(gate.admit("hello", true));
    gate.reset();
    assert_eq!(gate.last_admitted(), None);
    assert!(gate.admit("hello", true));
}
