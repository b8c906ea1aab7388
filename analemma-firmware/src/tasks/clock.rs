//! Minute-tick task
//!
//! Sleeps to each minute boundary of the RTC and signals the current
//! wall-clock time to the face task. The face never polls the clock
//! itself; it only sees these notifications plus the time it was handed
//! at startup.

use defmt::*;
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::Rtc;
use embassy_time::Timer;

use analemma_core::clock::TimeOfDay;

use crate::channels::MINUTE_SIGNAL;

/// Read the RTC as a minute-granularity time of day
pub fn time_of_day(rtc: &Rtc<'static, RTC>) -> TimeOfDay {
    match rtc.now() {
        Ok(dt) => TimeOfDay::new(dt.hour, dt.minute).unwrap_or(TimeOfDay::MIDNIGHT),
        Err(_) => {
            warn!("RTC unreadable, reporting midnight");
            TimeOfDay::MIDNIGHT
        }
    }
}

/// Clock task - delivers one notification per wall-clock minute
#[embassy_executor::task]
pub async fn clock_task(rtc: Rtc<'static, RTC>) {
    info!("Clock task started");

    loop {
        let second = match rtc.now() {
            Ok(dt) => dt.second.min(59),
            Err(_) => 0,
        };
        Timer::after_secs(u64::from(60 - second)).await;

        let now = time_of_day(&rtc);
        debug!("Minute tick: {}:{}", now.hour(), now.minute());
        MINUTE_SIGNAL.signal(now);
    }
}
