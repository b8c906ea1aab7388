//! Leaf visual elements
//!
//! A watchface's content tree is flat: text elements and one bitmap
//! element. Each element tracks its own dirty flag; setting content marks
//! the element dirty, compositing marks it clean.

use embedded_graphics::image::Image;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;

use crate::framebuffer::FrameBuffer;

/// Maximum characters a text element holds
pub const TEXT_LEN: usize = 8;

/// Text element: centered numeric text, transparent background
///
/// Styling matches the face's large time digits; only the foreground
/// color differs between instances.
#[derive(Clone)]
pub struct TextElement {
    text: String<TEXT_LEN>,
    region: Rectangle,
    color: Rgb565,
    dirty: bool,
}

impl TextElement {
    /// Create an empty text element filling `region`
    pub fn new(region: Rectangle, color: Rgb565) -> Self {
        Self {
            text: String::new(),
            region,
            color,
            dirty: true,
        }
    }

    /// Replace the element's text, truncating to capacity
    ///
    /// Setting text marks the element dirty; the next composite redraws it.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    /// Current text content
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.text.clear();
        self.dirty = true;
    }

    /// Check if the element needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark as clean (after compositing)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Draw the text centered in the element's region
    ///
    /// The background is left untouched (transparent), so the element
    /// layers over whatever was drawn beneath it.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.text.is_empty() {
            return Ok(());
        }
        let character_style = MonoTextStyle::new(&FONT_10X20, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            self.text.as_str(),
            self.region.center(),
            character_style,
            text_style,
        )
        .draw(target)?;
        Ok(())
    }
}

/// Bitmap element: blits a frame buffer at a fixed origin
pub struct BitmapElement {
    origin: Point,
    dirty: bool,
}

impl BitmapElement {
    /// Create a bitmap element anchored at `origin`
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            dirty: false,
        }
    }

    /// Check if the element needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark as needing redraw (a new frame landed in the buffer)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Mark as clean (after compositing)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Blit `frame` at the element's origin
    pub fn draw<D>(&self, frame: &FrameBuffer<'_>, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Image::new(frame, self.origin).draw(target)
    }
}
