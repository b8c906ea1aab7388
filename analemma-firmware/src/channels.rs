//! Inter-task communication channels
//!
//! Uses embassy-sync primitives for safe async communication between the
//! clock task and the face task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use analemma_core::clock::TimeOfDay;

/// Minute-tick notification with the current wall-clock time
///
/// Latest-value semantics: a slow face task only ever sees the most
/// recent minute, which is all a watchface needs.
pub static MINUTE_SIGNAL: Signal<CriticalSectionRawMutex, TimeOfDay> = Signal::new();
