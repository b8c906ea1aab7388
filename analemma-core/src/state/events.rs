//! Events that trigger state transitions

use crate::clock::TimeOfDay;

/// Events delivered to the face by the host event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Window activated; build elements and start playback
    Load,
    /// Window torn down; release everything
    Unload,

    // Timer events
    /// Scheduled frame advance fired
    FrameTick,
    /// Wall clock crossed a minute boundary
    MinuteTick(TimeOfDay),
}

impl Event {
    /// Check if this event comes from the timer/notification services
    pub fn is_timer_event(&self) -> bool {
        matches!(self, Event::FrameTick | Event::MinuteTick(_))
    }

    /// Check if this event is a window lifecycle edge
    pub fn is_lifecycle_event(&self) -> bool {
        matches!(self, Event::Load | Event::Unload)
    }
}
