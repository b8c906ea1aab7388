//! Frame buffer for decoded animation frames
//!
//! The decoder draws into a `FrameBuffer` as a `DrawTarget`; the bitmap
//! element blits it back out as an `ImageDrawable`. Pixel storage is
//! borrowed from the caller so the same allocation survives loop restarts.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

/// Errors constructing a frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameBufferError {
    /// Storage slice cannot hold a frame of the requested size
    FrameTooLarge,
    /// Requested frame has a zero dimension
    EmptyFrame,
}

/// Raster buffer sized to one animation frame
///
/// Dimensions are fixed at creation (decoders report a fixed frame size
/// per resource). The full storage slice is retained so `into_storage`
/// hands back exactly what `new` was given.
pub struct FrameBuffer<'b> {
    size: Size,
    pixels: &'b mut [Rgb565],
}

impl<'b> FrameBuffer<'b> {
    /// Create a frame buffer over caller-provided storage
    ///
    /// Clears the frame area to black so a fresh buffer never shows
    /// stale pixels from a previous sequence.
    pub fn new(storage: &'b mut [Rgb565], size: Size) -> Result<Self, FrameBufferError> {
        let area = (size.width as usize) * (size.height as usize);
        if area == 0 {
            return Err(FrameBufferError::EmptyFrame);
        }
        if area > storage.len() {
            return Err(FrameBufferError::FrameTooLarge);
        }
        storage[..area].fill(Rgb565::BLACK);
        Ok(Self {
            size,
            pixels: storage,
        })
    }

    /// Recover the storage slice for reuse by the next buffer
    pub fn into_storage(self) -> &'b mut [Rgb565] {
        self.pixels
    }

    /// Pixel at a point, if inside the frame
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.pixels[(y * self.size.width + x) as usize])
    }

    /// Frame contents in row-major order
    pub fn data(&self) -> &[Rgb565] {
        let area = (self.size.width * self.size.height) as usize;
        &self.pixels[..area]
    }
}

impl OriginDimensions for FrameBuffer<'_> {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                if x < self.size.width && y < self.size.height {
                    self.pixels[(y * self.size.width + x) as usize] = color;
                }
            }
        }
        Ok(())
    }
}

impl ImageDrawable for FrameBuffer<'_> {
    type Color = Rgb565;

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = (self.size.width * self.size.height) as usize;
        target.fill_contiguous(&self.bounding_box(), self.pixels[..area].iter().copied())
    }

    fn draw_sub_image<D>(&self, target: &mut D, area: &Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = area.intersection(&self.bounding_box());
        let colors = area.points().filter_map(|p| self.pixel(p));
        target.fill_contiguous(&Rectangle::new(Point::zero(), area.size), colors)
    }
}
