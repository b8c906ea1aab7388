//! Face task - the watchface event loop
//!
//! Owns the watchface context and the panel. Waits on whichever comes
//! first, the pending one-shot frame timer or a minute notification,
//! maps it to a core event, and presents whatever the dispatch dirtied.
//! Frame timers are one-shot and re-armed from the returned directive.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};

use analemma_core::clock::TimeOfDay;
use analemma_core::face::{Directive, Watchface};
use analemma_core::gif::GifAnimation;
use analemma_core::state::Event;
use analemma_display::DisplayBackend;

use crate::channels::MINUTE_SIGNAL;
use crate::screen::Screen;

/// Face task - load the face, then dispatch events forever
#[embassy_executor::task]
pub async fn face_task(
    mut face: Watchface<'static, GifAnimation>,
    mut screen: Screen,
    start: TimeOfDay,
) {
    info!("Face task started");

    let mut frame_deadline = match face.load(start) {
        Ok(Directive::ScheduleFrame { delay_ms }) => Some(deadline_after(delay_ms)),
        Ok(Directive::PlaybackFault { error }) | Err(error) => {
            // Resource fault: the clock still runs, the animation does not
            error!("Animation failed to load: {}", error);
            None
        }
    };
    present(&mut face, &mut screen);

    loop {
        let event = match frame_deadline {
            Some(at) => match select(Timer::at(at), MINUTE_SIGNAL.wait()).await {
                Either::First(()) => {
                    frame_deadline = None;
                    Event::FrameTick
                }
                Either::Second(now) => Event::MinuteTick(now),
            },
            None => Event::MinuteTick(MINUTE_SIGNAL.wait().await),
        };

        match face.handle(event) {
            Some(Directive::ScheduleFrame { delay_ms }) => {
                frame_deadline = Some(deadline_after(delay_ms));
            }
            Some(Directive::PlaybackFault { error }) => {
                warn!("Animation stopped on a decode fault: {}", error);
            }
            None => {}
        }

        present(&mut face, &mut screen);
    }
}

fn deadline_after(delay_ms: u32) -> Instant {
    Instant::now() + Duration::from_millis(u64::from(delay_ms))
}

fn present(face: &mut Watchface<'static, GifAnimation>, screen: &mut Screen) {
    match face.composite(screen.target()) {
        Ok(true) => {
            if let Err(err) = screen.flush() {
                warn!("Panel flush failed: {}", err);
            }
        }
        Ok(false) => {}
        Err(_) => warn!("Panel draw failed"),
    }
}
