//! Playback state machine
//!
//! The face is a cooperative single-threaded reactor: every callback is
//! an event, and all behavior is a function of the current state and an
//! event. The machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::PlaybackState;
