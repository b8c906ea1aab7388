//! Board-agnostic face logic for the Analemma watchface
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Clock formatting (12h/24h time strings)
//! - Playback state machine and events
//! - Frame-advance player over an abstract animation source
//! - GIF adapter for that source over an embedded resource
//! - Fixed screen layout for the 144x168 target
//! - The watchface context (window lifecycle and event dispatch)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod clock;
pub mod face;
pub mod gif;
pub mod layout;
pub mod state;
