/*!
 * Gesture clip playback.
 *
 * - `model`: clip, sequence and session types
 * - `machine`: the pure playback state machine
 * - `assets`: clip identifier to media location resolution
 * - `driver`: executors for playback effects
 */

pub mod assets;
pub mod driver;
pub mod machine;
pub mod model;

pub use self::assets::{ClipLocation, ClipResolver, ResolvedClip};
pub use self::driver::{ClipDriver, ClipPosition, NoopClipDriver, SimulatedClipDriver};
pub use self::machine::{Effect, PlayerEvent, Transition};
pub use self::model::{
    ClipId, ClipSequence, Cue, Generation, Phase, PlaybackState, PlayerSession, PlayerState,
};
