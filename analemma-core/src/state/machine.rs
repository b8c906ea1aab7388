//! State machine definition
//!
//! Playback has exactly two states: nothing loaded, or a decoder/buffer
//! pair live with a pending frame advance. There is no terminal state
//! during normal operation; the loop runs until the window unloads.

use super::events::Event;

/// Playback states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackState {
    /// No decoder handle or frame buffer exists
    Idle,
    /// Decoder and buffer live, a scheduled advance is pending
    Playing,
}

impl PlaybackState {
    /// Check if playback is active
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use PlaybackState::*;

        match (self, event) {
            (Idle, Load) => Playing,
            (Playing, Unload) => Idle,
            // Frame and minute ticks never change the playback state;
            // decode exhaustion restarts the loop inside Playing.
            (Playing, FrameTick) => Playing,
            (Playing, MinuteTick(_)) => Playing,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeOfDay;

    #[test]
    fn test_load_starts_playback() {
        assert_eq!(PlaybackState::Idle.transition(Event::Load), PlaybackState::Playing);
    }

    #[test]
    fn test_unload_stops_playback() {
        assert_eq!(
            PlaybackState::Playing.transition(Event::Unload),
            PlaybackState::Idle
        );
    }

    #[test]
    fn test_ticks_keep_playing() {
        let now = TimeOfDay::new(13, 15).unwrap();
        let state = PlaybackState::Playing;
        assert_eq!(state.transition(Event::FrameTick), PlaybackState::Playing);
        assert_eq!(state.transition(Event::MinuteTick(now)), PlaybackState::Playing);
    }

    #[test]
    fn test_ticks_ignored_when_idle() {
        let now = TimeOfDay::new(13, 15).unwrap();
        let state = PlaybackState::Idle;
        assert_eq!(state.transition(Event::FrameTick), PlaybackState::Idle);
        assert_eq!(state.transition(Event::MinuteTick(now)), PlaybackState::Idle);
    }
}
