//! Metronome: a steady beat published on the event bus.

use std::time::Duration;

use crate::bus::Bus;
use crate::dashboard::Teardown;
use crate::event::{CoreEvent, MetronomeBeatPayload};

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 240;
pub const DEFAULT_BPM: u32 = 120;

pub fn clamp_bpm(bpm: u32) -> u32 {
    bpm.clamp(MIN_BPM, MAX_BPM)
}

/// Seconds per beat, as a duration.
pub fn beat_period(bpm: u32) -> Duration {
    Duration::from_secs_f64(60.0 / clamp_bpm(bpm) as f64)
}

/// Start the beat task. The returned handle MUST be registered with the
/// dashboard controller so closing or switching tools stops the beat.
pub fn start(bpm: u32, bus: Bus) -> Teardown {
    let bpm = clamp_bpm(bpm);
    let period = beat_period(bpm);
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            bus.publish(CoreEvent::MetronomeBeat(MetronomeBeatPayload { bpm }));
        }
    });
    Teardown::from_abort(handle.abort_handle())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[test]
    fn bpm_clamped_to_range() {
        assert_eq!(clamp_bpm(10), MIN_BPM);
        assert_eq!(clamp_bpm(500), MAX_BPM);
        assert_eq!(clamp_bpm(120), 120);
    }

    #[test]
    fn period_is_sixty_over_bpm() {
        assert_eq!(beat_period(120), Duration::from_millis(500));
        assert_eq!(beat_period(60), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn beats_arrive_until_disposed() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let mut teardown = start(240, bus);

        for _ in 0..3 {
            let event = timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("beat timeout")
                .expect("beat recv");
            assert!(matches!(event, CoreEvent::MetronomeBeat(ref b) if b.bpm == 240));
        }

        teardown.dispose();
        // Drain whatever was already queued, then the stream must go quiet.
        while rx.try_recv().is_ok() {}
        assert!(timeout(Duration::from_secs(2), rx.recv()).await.is_err());
    }
}
