//! GIF decoder adapter
//!
//! Bridges `tinygif` onto the animation seam. Each `open` re-parses the
//! embedded resource, so a loop restart always yields a stream positioned
//! at the first frame.

use analemma_display::FrameBuffer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tinygif::Gif;

use crate::animation::{AnimationError, AnimationSource, FrameStream};

/// An embedded GIF resource
pub struct GifAnimation {
    data: &'static [u8],
}

impl GifAnimation {
    pub fn new(data: &'static [u8]) -> Self {
        Self { data }
    }
}

/// One pass over the resource's frame sequence
///
/// `tinygif` frame iterators borrow the `Gif` they come from, so the
/// stream holds the parsed `Gif` (it is `Copy` over the resource bytes)
/// plus a frame cursor, and re-walks to the cursor on every decode.
pub struct GifStream {
    gif: Gif<'static, Rgb565>,
    consumed: usize,
}

impl AnimationSource for GifAnimation {
    type Stream = GifStream;

    fn open(&self) -> Result<GifStream, AnimationError> {
        let gif =
            Gif::<Rgb565>::from_slice(self.data).map_err(|_| AnimationError::Resource)?;
        // A sequence with no frames could never schedule an advance
        let parsed: Gif<'_, Rgb565> = gif;
        if parsed.frames().next().is_none() {
            return Err(AnimationError::Resource);
        }
        Ok(GifStream { gif, consumed: 0 })
    }
}

impl FrameStream for GifStream {
    fn frame_size(&self) -> Size {
        Size::new(u32::from(self.gif.width()), u32::from(self.gif.height()))
    }

    fn next_frame(&mut self, frame: &mut FrameBuffer<'_>) -> Result<Option<u32>, AnimationError> {
        // The iterator cannot outlive this call; shorten the handle's
        // lifetime so it can borrow a local copy
        let gif: Gif<'_, Rgb565> = self.gif;
        match gif.frames().nth(self.consumed) {
            Some(decoded) => {
                decoded.draw(frame).map_err(|_| AnimationError::Decode)?;
                self.consumed += 1;
                // GIF delays are in centiseconds
                Ok(Some(u32::from(decoded.delay_centis) * 10))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Advance, Player, INITIAL_FRAME_DELAY_MS};
    use crate::state::PlaybackState;

    // Two 16x16 frames, 10 centiseconds each
    static LOOP_GIF: &[u8] = include_bytes!("../assets/loop.gif");

    #[test]
    fn test_stream_decodes_each_frame_once() {
        let mut stream = GifAnimation::new(LOOP_GIF).open().unwrap();
        assert_eq!(stream.frame_size(), Size::new(16, 16));

        let mut storage = [Rgb565::BLACK; 256];
        let mut frame = FrameBuffer::new(&mut storage, Size::new(16, 16)).unwrap();

        assert_eq!(stream.next_frame(&mut frame), Ok(Some(100)));
        assert_eq!(stream.next_frame(&mut frame), Ok(Some(100)));
        // Exhaustion is sticky until the source is reopened
        assert_eq!(stream.next_frame(&mut frame), Ok(None));
        assert_eq!(stream.next_frame(&mut frame), Ok(None));
    }

    #[test]
    fn test_player_loops_the_resource() {
        let mut storage = [Rgb565::BLACK; 256];
        let mut player = Player::new(GifAnimation::new(LOOP_GIF), &mut storage);
        player.load().unwrap();

        let first = {
            assert_eq!(
                player.advance(),
                Ok(Advance::Shown { next_delay_ms: 100 })
            );
            let mut copy = [Rgb565::BLACK; 256];
            copy.copy_from_slice(player.frame().unwrap().data());
            copy
        };

        assert_eq!(player.advance(), Ok(Advance::Shown { next_delay_ms: 100 }));
        assert_eq!(
            player.advance(),
            Ok(Advance::Restarted { next_delay_ms: INITIAL_FRAME_DELAY_MS })
        );
        assert_eq!(player.state(), PlaybackState::Playing);

        // The restarted stream replays the first frame pixel for pixel
        assert_eq!(player.advance(), Ok(Advance::Shown { next_delay_ms: 100 }));
        assert_eq!(player.frame().unwrap().data(), &first[..]);
    }

    #[test]
    fn test_truncated_resource_is_rejected() {
        assert!(matches!(
            GifAnimation::new(&LOOP_GIF[..6]).open(),
            Err(AnimationError::Resource)
        ));
    }

    #[test]
    fn test_frameless_resource_is_rejected() {
        // Valid header and trailer, no image data between them
        static EMPTY: &[u8] = &[
            b'G', b'I', b'F', b'8', b'9', b'a', 0x10, 0x00, 0x10, 0x00, 0x00, 0x00,
            0x00, 0x3b,
        ];
        assert!(matches!(
            GifAnimation::new(EMPTY).open(),
            Err(AnimationError::Resource)
        ));
    }
}
