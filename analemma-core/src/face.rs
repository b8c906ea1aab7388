//! The watchface context
//!
//! One object owns everything the face needs: the player, the two time
//! elements, and the animation element. The host event loop calls
//! `load`, feeds timer events through `handle`, composites dirty content,
//! and calls `unload` at teardown. Callbacks arriving after teardown are
//! ignored, so stale timers cannot resurrect playback.

use analemma_display::{BitmapElement, FrameBuffer, TextElement};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::animation::{Advance, AnimationError, AnimationSource, Player};
use crate::clock::{format_time, HourStyle, TimeOfDay};
use crate::layout;
use crate::state::{Event, PlaybackState};

/// Scheduling request returned to the host event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Directive {
    /// Re-arm the one-shot frame timer for `delay_ms`
    ScheduleFrame { delay_ms: u32 },
    /// Playback hit a decoder fault and stopped scheduling frames; the
    /// clock keeps running
    PlaybackFault { error: AnimationError },
}

/// The single watchface instance
pub struct Watchface<'b, R: AnimationSource> {
    player: Player<'b, R>,
    state: PlaybackState,
    style: HourStyle,
    time_main: TextElement,
    time_shadow: TextElement,
    animation: BitmapElement,
}

impl<'b, R: AnimationSource> Watchface<'b, R> {
    /// Build the face's element tree over `resource`
    pub fn new(resource: R, storage: &'b mut [Rgb565], style: HourStyle) -> Self {
        Self {
            player: Player::new(resource, storage),
            state: PlaybackState::Idle,
            style,
            time_main: TextElement::new(layout::TIME_REGION, layout::TIME_COLOR),
            time_shadow: TextElement::new(layout::TIME_SHADOW_REGION, layout::TIME_SHADOW_COLOR),
            animation: BitmapElement::new(layout::ANIMATION_REGION.top_left),
        }
    }

    /// Activate the face
    ///
    /// Shows the current time immediately (the face is never blank before
    /// the first minute tick) and starts playback. The returned directive
    /// schedules the first frame advance.
    pub fn load(&mut self, now: TimeOfDay) -> Result<Directive, AnimationError> {
        self.show_time(now);
        let delay_ms = self.player.load()?;
        self.state = self.state.transition(Event::Load);
        Ok(Directive::ScheduleFrame { delay_ms })
    }

    /// Dispatch one timer event
    ///
    /// Events arriving while idle (including after `unload`) are dropped.
    /// Lifecycle events go through `load`/`unload` and are ignored here.
    pub fn handle(&mut self, event: Event) -> Option<Directive> {
        if !self.state.is_playing() {
            return None;
        }

        match event {
            Event::FrameTick => {
                let directive = match self.player.advance() {
                    Ok(Advance::Shown { next_delay_ms }) => {
                        self.animation.mark_dirty();
                        Some(Directive::ScheduleFrame { delay_ms: next_delay_ms })
                    }
                    // Fresh pair; its first frame decodes on the next tick
                    Ok(Advance::Restarted { next_delay_ms }) => {
                        Some(Directive::ScheduleFrame { delay_ms: next_delay_ms })
                    }
                    Err(error) => Some(Directive::PlaybackFault { error }),
                };
                self.state = self.state.transition(Event::FrameTick);
                directive
            }
            Event::MinuteTick(now) => {
                self.show_time(now);
                None
            }
            Event::Load | Event::Unload => None,
        }
    }

    /// Tear the face down
    ///
    /// Releases the stream/buffer pair and its storage unconditionally
    /// and clears the elements. Subsequent events are ignored.
    pub fn unload(&mut self) {
        self.player.unload();
        self.time_main.clear();
        self.time_shadow.clear();
        self.animation.mark_clean();
        self.state = self.state.transition(Event::Unload);
    }

    /// Draw dirty elements onto `target`
    ///
    /// Returns true if anything was redrawn. The shadow layer draws under
    /// the main time layer; the animation region does not overlap either.
    pub fn composite<D>(&mut self, target: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut redrawn = false;

        if self.animation.is_dirty() {
            if let Some(frame) = self.player.frame() {
                self.animation.draw(frame, target)?;
                redrawn = true;
            }
            self.animation.mark_clean();
        }

        if self.time_main.is_dirty() || self.time_shadow.is_dirty() {
            // Repaint the region so stale digits never show through the
            // transparent text background
            target.fill_solid(&layout::TIME_REGION, layout::BACKGROUND)?;
            self.time_shadow.draw(target)?;
            self.time_main.draw(target)?;
            self.time_shadow.mark_clean();
            self.time_main.mark_clean();
            redrawn = true;
        }

        Ok(redrawn)
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Main time element content
    pub fn time_text(&self) -> &str {
        self.time_main.text()
    }

    /// Shadow time element content
    pub fn shadow_text(&self) -> &str {
        self.time_shadow.text()
    }

    /// Current animation frame, if playing
    pub fn frame(&self) -> Option<&FrameBuffer<'b>> {
        self.player.frame()
    }

    fn show_time(&mut self, now: TimeOfDay) {
        let text = format_time(now, self.style);
        self.time_main.set_text(&text);
        self.time_shadow.set_text(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{FrameStream, INITIAL_FRAME_DELAY_MS};

    const FRAME_DELAYS: &[u32] = &[80, 120];

    struct LoopSource;

    struct LoopStream {
        next: usize,
    }

    impl AnimationSource for LoopSource {
        type Stream = LoopStream;
        fn open(&self) -> Result<LoopStream, AnimationError> {
            Ok(LoopStream { next: 0 })
        }
    }

    impl FrameStream for LoopStream {
        fn frame_size(&self) -> Size {
            Size::new(2, 2)
        }
        fn next_frame(
            &mut self,
            frame: &mut FrameBuffer<'_>,
        ) -> Result<Option<u32>, AnimationError> {
            match FRAME_DELAYS.get(self.next) {
                Some(&delay) => {
                    frame.clear(Rgb565::CSS_ORANGE).unwrap();
                    self.next += 1;
                    Ok(Some(delay))
                }
                None => Ok(None),
            }
        }
    }

    fn face(storage: &mut [Rgb565]) -> Watchface<'_, LoopSource> {
        Watchface::new(LoopSource, storage, HourStyle::H24)
    }

    fn t(hour: u8, minute: u8) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn test_load_shows_time_immediately() {
        let mut storage = [Rgb565::BLACK; 4];
        let mut face = face(&mut storage);

        let directive = face.load(t(9, 5)).unwrap();
        assert_eq!(
            directive,
            Directive::ScheduleFrame { delay_ms: INITIAL_FRAME_DELAY_MS }
        );
        assert_eq!(face.time_text(), "09:05");
        assert_eq!(face.shadow_text(), "09:05");
        assert_eq!(face.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_both_elements_track_minute_ticks() {
        let mut storage = [Rgb565::BLACK; 4];
        let mut face = face(&mut storage);
        face.load(t(9, 5)).unwrap();

        face.handle(Event::MinuteTick(t(9, 6)));
        assert_eq!(face.time_text(), face.shadow_text());
        assert_eq!(face.time_text(), "09:06");
    }

    #[test]
    fn test_twelve_hour_face() {
        let mut storage = [Rgb565::BLACK; 4];
        let mut face = Watchface::new(LoopSource, &mut storage, HourStyle::H12);
        face.load(t(13, 15)).unwrap();
        assert_eq!(face.time_text(), "01:15");
    }

    #[test]
    fn test_frame_tick_schedules_reported_delay() {
        let mut storage = [Rgb565::BLACK; 4];
        let mut face = face(&mut storage);
        face.load(t(9, 5)).unwrap();

        let directive = face.handle(Event::FrameTick);
        assert_eq!(
            directive,
            Some(Directive::ScheduleFrame { delay_ms: FRAME_DELAYS[0] })
        );
    }

    #[test]
    fn test_loop_restarts_after_exhaustion() {
        let mut storage = [Rgb565::BLACK; 4];
        let mut face = face(&mut storage);
        face.load(t(9, 5)).unwrap();

        face.handle(Event::FrameTick);
        face.handle(Event::FrameTick);
        // Sequence exhausted: the loop restarts transparently
        let directive = face.handle(Event::FrameTick);
        assert_eq!(
            directive,
            Some(Directive::ScheduleFrame { delay_ms: INITIAL_FRAME_DELAY_MS })
        );
        assert_eq!(face.state(), PlaybackState::Playing);

        // And the fresh stream plays from the top
        let directive = face.handle(Event::FrameTick);
        assert_eq!(
            directive,
            Some(Directive::ScheduleFrame { delay_ms: FRAME_DELAYS[0] })
        );
    }

    #[test]
    fn test_events_ignored_after_unload() {
        let mut storage = [Rgb565::BLACK; 4];
        let mut face = face(&mut storage);
        face.load(t(9, 5)).unwrap();
        face.unload();

        assert_eq!(face.state(), PlaybackState::Idle);
        assert!(face.frame().is_none());
        assert_eq!(face.handle(Event::FrameTick), None);
        assert_eq!(face.handle(Event::MinuteTick(t(9, 6))), None);
        assert_eq!(face.time_text(), "");
    }

    #[test]
    fn test_events_ignored_before_load() {
        let mut storage = [Rgb565::BLACK; 4];
        let mut face = face(&mut storage);
        assert_eq!(face.handle(Event::FrameTick), None);
        assert_eq!(face.handle(Event::MinuteTick(t(9, 5))), None);
    }

    #[test]
    fn test_decode_fault_stops_playback_but_not_the_clock() {
        struct FaultSource;
        struct FaultStream {
            next: usize,
        }

        impl AnimationSource for FaultSource {
            type Stream = FaultStream;
            fn open(&self) -> Result<FaultStream, AnimationError> {
                Ok(FaultStream { next: 0 })
            }
        }

        impl FrameStream for FaultStream {
            fn frame_size(&self) -> Size {
                Size::new(2, 2)
            }
            fn next_frame(
                &mut self,
                _frame: &mut FrameBuffer<'_>,
            ) -> Result<Option<u32>, AnimationError> {
                match self.next {
                    0 => {
                        self.next += 1;
                        Ok(Some(80))
                    }
                    _ => Err(AnimationError::Decode),
                }
            }
        }

        let mut storage = [Rgb565::BLACK; 4];
        let mut face = Watchface::new(FaultSource, &mut storage, HourStyle::H24);
        face.load(t(9, 5)).unwrap();

        face.handle(Event::FrameTick);
        // The fault is reported, not swallowed, and no frame is scheduled
        assert_eq!(
            face.handle(Event::FrameTick),
            Some(Directive::PlaybackFault { error: AnimationError::Decode })
        );

        // The time elements keep tracking minute ticks
        face.handle(Event::MinuteTick(t(9, 6)));
        assert_eq!(face.time_text(), "09:06");
    }

    #[test]
    fn test_composite_clears_dirty_flags() {
        let mut storage = [Rgb565::BLACK; 4];
        let mut face = face(&mut storage);
        face.load(t(9, 5)).unwrap();
        face.handle(Event::FrameTick);

        let mut screen_storage = [Rgb565::BLACK; 144 * 168];
        let mut screen =
            FrameBuffer::new(&mut screen_storage, layout::SCREEN_SIZE).unwrap();

        assert!(face.composite(&mut screen).unwrap());
        // Animation frame landed inside the animation region
        assert_eq!(
            screen.pixel(layout::ANIMATION_REGION.top_left),
            Some(Rgb565::CSS_ORANGE)
        );
        // Nothing dirty: second composite is a no-op
        assert!(!face.composite(&mut screen).unwrap());
    }
}
