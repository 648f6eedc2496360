//! Frame timing
//!
//! The frame loop asks a [`FrameClock`] for the elapsed time once per frame.
//! Interactive runs use the wall clock; headless and scripted runs use a
//! fixed step so they are reproducible.

use std::time::Instant;

/// Source of per-frame elapsed time
#[derive(Debug, Clone, Copy)]
enum ClockMode {
    Realtime { last_frame: Instant },
    Fixed { step: f32 },
}

/// Per-frame timer
#[derive(Debug, Clone)]
pub struct FrameClock {
    mode: ClockMode,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Clock driven by the wall clock
    pub fn realtime() -> Self {
        Self::with_mode(ClockMode::Realtime { last_frame: Instant::now() })
    }

    /// Clock that advances by exactly `step` seconds every frame
    pub fn fixed(step: f32) -> Self {
        Self::with_mode(ClockMode::Fixed { step })
    }

    /// Pick the mode from an optional fixed timestep
    pub fn from_timestep(fixed_timestep: Option<f32>) -> Self {
        fixed_timestep.map_or_else(Self::realtime, Self::fixed)
    }

    fn with_mode(mode: ClockMode) -> Self {
        Self {
            mode,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame and return the elapsed time in seconds
    pub fn tick(&mut self) -> f32 {
        self.delta_time = match &mut self.mode {
            ClockMode::Realtime { last_frame } => {
                let now = Instant::now();
                let elapsed = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;
                elapsed
            }
            ClockMode::Fixed { step } => *step,
        };
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Elapsed time of the most recent frame
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total time accumulated since creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::realtime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_deterministic() {
        let mut clock = FrameClock::fixed(0.25);
        for _ in 0..4 {
            assert_eq!(clock.tick(), 0.25);
        }
        assert_eq!(clock.frame_count(), 4);
        assert!((clock.total_time() - 1.0).abs() < 1e-6);
        assert!((clock.average_fps() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_realtime_clock_never_goes_backwards() {
        let mut clock = FrameClock::from_timestep(None);
        let dt = clock.tick();
        assert!(dt >= 0.0);
        assert_eq!(clock.delta_time(), dt);
    }
}
