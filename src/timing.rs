use std::time::{Duration, Instant};

// NB. all of these are PAL; an NTSC machine would need 1022727Hz, 65 and 263

/// system clock of the PAL machine, in Hz
pub const CLOCK_HZ: u64 = 985_248;

/// clock ticks the video chip spends on one raster line
pub const TICKS_PER_SCANLINE: u64 = 63;

/// raster lines in one frame, including vertical blank
pub const SCANLINES_PER_FRAME: u16 = 312;

/// clock ticks in one frame
pub const TICKS_PER_FRAME: u64 = SCANLINES_PER_FRAME as u64 * TICKS_PER_SCANLINE;

/// exact clock ticks spent on `lines` raster lines
pub fn scanline_ticks(lines: u16) -> u64 {
    lines as u64 * TICKS_PER_SCANLINE
}

/// emulated microseconds for a tick count. derived from the exact tick count
/// so that converting back with the same clock gives the same ticks
pub fn ticks_to_micros(ticks: u64) -> f64 {
    ticks as f64 * 1_000_000.0 / CLOCK_HZ as f64
}

/// ticks covered by `micros` emulated microseconds, rounded to the nearest tick
pub fn micros_to_ticks(micros: f64) -> u64 {
    (micros * CLOCK_HZ as f64 / 1_000_000.0).round() as u64
}

/// wall-clock offset of the end of frame `frames`, counted from frame zero.
/// computed from the frame count in one go, so rounding never accumulates
pub fn frame_offset(frames: u64) -> Duration {
    let nanos = frames as u128 * TICKS_PER_FRAME as u128 * 1_000_000_000 / CLOCK_HZ as u128;
    Duration::from_nanos(nanos as u64)
}

/// the wall-clock schedule of frames. every frame moves the deadline on by
/// exactly one frame period, however long the work actually took
pub struct FrameClock {
    origin: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn start(origin: Instant) -> FrameClock {
        FrameClock { origin, frames: 0 }
    }

    /// when the frame currently being worked on should end
    pub fn next_deadline(&self) -> Instant {
        self.origin + frame_offset(self.frames + 1)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// close the current frame; returns how long to sleep, if at all. when
    /// running late the schedule is kept, not reset to `now`, so the next
    /// frames catch up
    pub fn pace(&mut self, now: Instant) -> Option<Duration> {
        let deadline = self.next_deadline();
        self.frames += 1;
        if deadline > now {
            Some(deadline - now)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_constants() {
        assert_eq!(TICKS_PER_FRAME, 19_656);
        // 19.950306ms, ~50.125Hz
        assert_eq!(frame_offset(1), Duration::from_nanos(19_950_306));
    }

    #[test]
    fn test_every_frame_subrange_is_tick_exact() {
        for lines in 1..=SCANLINES_PER_FRAME {
            let ticks = scanline_ticks(lines);
            assert_eq!(micros_to_ticks(ticks_to_micros(ticks)), ticks);
        }
    }

    proptest! {
        #[test]
        fn test_tick_round_trip(lines in 1u16..=SCANLINES_PER_FRAME) {
            let ticks = scanline_ticks(lines);
            prop_assert_eq!(micros_to_ticks(ticks_to_micros(ticks)), lines as u64 * 63);
        }
    }

    #[test]
    fn test_thousand_frames_do_not_drift() {
        let origin = Instant::now();
        let mut clock = FrameClock::start(origin);
        for _ in 0..1000 {
            // pretend every frame finished instantly
            clock.pace(origin);
        }
        assert_eq!(clock.frames(), 1000);
        // deadline of the last frame closed, and of the one now running
        let scheduled = frame_offset(clock.frames());
        assert_eq!(clock.next_deadline() - origin, frame_offset(1001));
        let exact_nanos = 1000.0 * TICKS_PER_FRAME as f64 * 1e9 / CLOCK_HZ as f64;
        let one_tick_nanos = 1e9 / CLOCK_HZ as f64;
        assert!((scheduled.as_nanos() as f64 - exact_nanos).abs() < one_tick_nanos);

        // summing 1000 individually rounded microsecond sleeps is off by far more
        let naive = Duration::from_micros(19_950) * 1000;
        assert!((naive.as_nanos() as f64 - exact_nanos).abs() > one_tick_nanos);
    }

    #[test]
    fn test_pace_sleeps_until_deadline() {
        let origin = Instant::now();
        let mut clock = FrameClock::start(origin);
        let now = origin + Duration::from_millis(5);
        let wait = clock.pace(now).unwrap();
        assert_eq!(now + wait, origin + frame_offset(1));
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn test_late_frame_does_not_reset_schedule() {
        let origin = Instant::now();
        let mut clock = FrameClock::start(origin);
        // first frame overran by a whole frame and a bit
        assert_eq!(clock.pace(origin + Duration::from_millis(45)), None);
        assert_eq!(clock.next_deadline(), origin + frame_offset(2));
        // second frame is still behind, so no sleep either
        assert_eq!(clock.pace(origin + Duration::from_millis(46)), None);
        // third frame is back on schedule
        let wait = clock.pace(origin + Duration::from_millis(50)).unwrap();
        assert_eq!(origin + Duration::from_millis(50) + wait, origin + frame_offset(3));
    }
}
