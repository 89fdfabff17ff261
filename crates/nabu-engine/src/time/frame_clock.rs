use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous ticked frame. Zero on the first frame and on
    /// the first frame after a [`FrameClock::reset`].
    pub dt: f32,

    /// Accumulated `dt` since the clock was created, in seconds.
    pub elapsed: f32,

    /// Host timestamp of this tick, in milliseconds.
    pub timestamp_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock driven by host animation-frame timestamps.
///
/// The host supplies a monotonically increasing timestamp in milliseconds
/// for every frame it wants ticked. The clock never reads wall time on its own,
/// which keeps it deterministic under test.
///
/// Pausing is modelled by [`reset`](Self::reset): the previous timestamp is
/// forgotten, so the next delta is forced to zero instead of reporting the
/// whole time the surface was hidden.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    previous_ms: Option<f64>,
    elapsed: f32,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the previous timestamp. The next `tick` reports `dt = 0`.
    pub fn reset(&mut self) {
        self.previous_ms = None;
    }

    /// Total seconds accumulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advances the clock to `timestamp_ms` and returns the new `FrameTime`.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTime {
        let dt = match self.previous_ms {
            // Out-of-order timestamps are treated as a zero-length frame.
            Some(prev) => (((timestamp_ms - prev) / 1000.0).max(0.0)) as f32,
            None => 0.0,
        };

        self.previous_ms = Some(timestamp_ms);
        self.elapsed += dt;

        let ft = FrameTime {
            dt,
            elapsed: self.elapsed,
            timestamp_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    /// Milliseconds since `origin`, for hosts without a native frame timestamp.
    pub fn now_ms(origin: Instant) -> f64 {
        origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_dt_and_no_elapsed() {
        let mut clock = FrameClock::new();
        let ft = clock.tick(5_000.0);
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.elapsed, 0.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn subsequent_ticks_measure_seconds() {
        let mut clock = FrameClock::new();
        clock.tick(1_000.0);
        let ft = clock.tick(1_250.0);
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert!((ft.elapsed - 0.25).abs() < 1e-6);

        let ft = clock.tick(1_500.0);
        assert!((ft.elapsed - 0.5).abs() < 1e-6);
        assert_eq!(ft.frame_index, 2);
    }

    #[test]
    fn reset_forces_zero_dt_on_resume() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        clock.reset();

        // A long gap while paused must not leak into dt.
        let ft = clock.tick(60_000.0);
        assert_eq!(ft.dt, 0.0);
        assert!((ft.elapsed - 0.016).abs() < 1e-6);

        let ft = clock.tick(60_016.0);
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_clamps_to_zero() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(50.0).dt, 0.0);
    }
}
