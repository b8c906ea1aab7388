//! Frame-advance player
//!
//! Drives looping playback of a fixed animation resource. The decoder
//! seam is two traits: `AnimationSource` opens a fresh `FrameStream`, and
//! the stream decodes successive frames into a `FrameBuffer`. Exhaustion
//! is reported as `Ok(None)` and is not an error; it is the designed
//! restart signal, which keeps the loop agnostic to sequence length.
//!
//! The stream and its frame buffer are held in one owning pair, so the
//! "never one without the other" invariant cannot be violated.

use analemma_display::{FrameBuffer, FrameBufferError};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::state::PlaybackState;

/// Delay for the first advance after a (re)load, in milliseconds
///
/// Zero means "next event-loop iteration", not a meaningful time unit.
pub const INITIAL_FRAME_DELAY_MS: u32 = 0;

/// Errors from the animation subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationError {
    /// Embedded resource missing or malformed
    Resource,
    /// Frame data failed to decode
    Decode,
    /// Advance requested with nothing loaded
    NotLoaded,
    /// Frame buffer could not be sized to the resource
    Buffer(FrameBufferError),
}

impl From<FrameBufferError> for AnimationError {
    fn from(err: FrameBufferError) -> Self {
        AnimationError::Buffer(err)
    }
}

/// A decoder over one animation resource
pub trait FrameStream {
    /// Frame dimensions, fixed for the life of the stream
    fn frame_size(&self) -> Size;

    /// Decode the next frame into `frame`
    ///
    /// Returns `Ok(Some(delay_ms))` with the delay until the following
    /// frame, or `Ok(None)` when the sequence is exhausted.
    fn next_frame(&mut self, frame: &mut FrameBuffer<'_>) -> Result<Option<u32>, AnimationError>;
}

/// Factory for streams over a fixed embedded resource
///
/// Re-opening is the loop restart: every `open` yields a stream
/// positioned at the first frame.
pub trait AnimationSource {
    type Stream: FrameStream;

    fn open(&self) -> Result<Self::Stream, AnimationError>;
}

/// Owning pair of decoder stream and frame buffer
///
/// Constructed and destroyed together; holding them in one struct makes
/// the pairing invariant structural.
struct LoadedAnimation<'b, S> {
    stream: S,
    frame: FrameBuffer<'b>,
}

/// Outcome of a frame advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Advance {
    /// A frame was decoded into the buffer; schedule the next advance
    Shown { next_delay_ms: u32 },
    /// Sequence exhausted; a fresh pair was created from the start
    Restarted { next_delay_ms: u32 },
}

impl Advance {
    /// Delay until the next scheduled advance, in milliseconds
    pub fn next_delay_ms(&self) -> u32 {
        match *self {
            Advance::Shown { next_delay_ms } => next_delay_ms,
            Advance::Restarted { next_delay_ms } => next_delay_ms,
        }
    }
}

/// Looping playback over an animation source
///
/// Pixel storage is borrowed once at construction and shuttled between
/// the player (while idle) and the frame buffer (while playing), so loop
/// restarts and teardown never leak it.
pub struct Player<'b, R: AnimationSource> {
    resource: R,
    storage: Option<&'b mut [Rgb565]>,
    slot: Option<LoadedAnimation<'b, R::Stream>>,
}

impl<'b, R: AnimationSource> Player<'b, R> {
    /// Create an idle player over `resource`
    pub fn new(resource: R, storage: &'b mut [Rgb565]) -> Self {
        Self {
            resource,
            storage: Some(storage),
            slot: None,
        }
    }

    /// Current playback state, derived from the pair slot
    pub fn state(&self) -> PlaybackState {
        if self.slot.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    /// The current frame, if playing
    pub fn frame(&self) -> Option<&FrameBuffer<'b>> {
        self.slot.as_ref().map(|slot| &slot.frame)
    }

    /// Start (or restart) playback from the first frame
    ///
    /// Releases any existing stream/buffer pair, opens a fresh stream,
    /// and sizes a buffer to its reported frame dimensions. Returns the
    /// delay for the first advance.
    pub fn load(&mut self) -> Result<u32, AnimationError> {
        self.unload();

        let stream = self.resource.open()?;
        let size = stream.frame_size();

        // unload() above guarantees the storage is home
        let storage = self.storage.take().ok_or(AnimationError::NotLoaded)?;

        // Size check up front so the storage survives the error path
        let area = (size.width as usize) * (size.height as usize);
        if area == 0 || area > storage.len() {
            let err = if area == 0 {
                FrameBufferError::EmptyFrame
            } else {
                FrameBufferError::FrameTooLarge
            };
            self.storage = Some(storage);
            return Err(AnimationError::Buffer(err));
        }

        let frame = FrameBuffer::new(storage, size)?;
        self.slot = Some(LoadedAnimation { stream, frame });
        Ok(INITIAL_FRAME_DELAY_MS)
    }

    /// Decode the next frame
    ///
    /// On exhaustion the pair is recreated from the start and the advance
    /// reports `Restarted`; the fresh stream decodes its first frame on
    /// the next tick.
    pub fn advance(&mut self) -> Result<Advance, AnimationError> {
        let decoded = match self.slot.as_mut() {
            Some(slot) => slot.stream.next_frame(&mut slot.frame)?,
            None => return Err(AnimationError::NotLoaded),
        };

        match decoded {
            Some(next_delay_ms) => Ok(Advance::Shown { next_delay_ms }),
            None => {
                let next_delay_ms = self.load()?;
                Ok(Advance::Restarted { next_delay_ms })
            }
        }
    }

    /// Release the stream/buffer pair and reclaim the pixel storage
    ///
    /// Idempotent; safe to call from any state.
    pub fn unload(&mut self) {
        if let Some(LoadedAnimation { stream, frame }) = self.slot.take() {
            drop(stream);
            self.storage = Some(frame.into_storage());
        }
    }
}
