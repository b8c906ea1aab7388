//! Fixed screen layout for the 144x168 target display
//!
//! The face has exactly three elements: a time display across the top,
//! a second time display offset up-left for a layered effect, and the
//! animation region filling the rest of the screen.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Target screen dimensions in pixels
pub const SCREEN_SIZE: Size = Size::new(144, 168);

/// Time display region across the top of the screen
pub const TIME_REGION: Rectangle = Rectangle::new(Point::zero(), Size::new(144, 42));

/// Second time display, nudged up-left to layer under the main one
pub const TIME_SHADOW_REGION: Rectangle = Rectangle::new(Point::new(-2, -2), Size::new(144, 42));

/// Animation region below the time display
pub const ANIMATION_REGION: Rectangle = Rectangle::new(Point::new(0, 42), Size::new(144, 126));

/// Pixel capacity needed for one animation frame
pub const FRAME_PIXELS: usize = (144 * 126) as usize;

/// Main time color (spring bud, a yellow-green)
pub const TIME_COLOR: Rgb565 = Rgb565::new(21, 63, 10);

/// Shadow time color (kelly green, darker)
pub const TIME_SHADOW_COLOR: Rgb565 = Rgb565::new(10, 42, 0);

/// Window background
pub const BACKGROUND: Rgb565 = Rgb565::BLACK;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_tile_the_screen() {
        assert_eq!(
            TIME_REGION.size.height + ANIMATION_REGION.size.height,
            SCREEN_SIZE.height
        );
        assert_eq!(ANIMATION_REGION.top_left.y as u32, TIME_REGION.size.height);
    }

    #[test]
    fn test_frame_capacity_covers_animation_region() {
        let area = ANIMATION_REGION.size.width * ANIMATION_REGION.size.height;
        assert_eq!(FRAME_PIXELS, area as usize);
    }

    #[test]
    fn test_shadow_is_same_size_as_main() {
        assert_eq!(TIME_SHADOW_REGION.size, TIME_REGION.size);
    }

    #[test]
    fn test_time_colors_quantize_their_rgb888_sources() {
        fn quantize(r: u8, g: u8, b: u8) -> Rgb565 {
            Rgb565::new(r >> 3, g >> 2, b >> 3)
        }
        // Spring bud #AAFF55 over kelly green #55AA00
        assert_eq!(TIME_COLOR, quantize(0xAA, 0xFF, 0x55));
        assert_eq!(TIME_SHADOW_COLOR, quantize(0x55, 0xAA, 0x00));
    }
}
