//! Display backend trait
//!
//! Seam between the face's composited content and the physical panel.
//! The firmware implements this over a mipidsi driver; tests implement it
//! over a plain frame buffer.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for presenting composited
/// content. Implementations handle the specifics of the panel driver.
pub trait DisplayBackend {
    /// Draw target the face composites into
    type Target: DrawTarget<Color = Rgb565>;

    /// Access the draw target
    fn target(&mut self) -> &mut Self::Target;

    /// Present composited content on the panel
    ///
    /// For drivers that push pixels on draw this is a no-op.
    fn flush(&mut self) -> Result<(), DisplayError>;
}
