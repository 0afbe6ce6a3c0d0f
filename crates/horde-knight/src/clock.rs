use std::time::{Duration, Instant};

/// Timing of one simulated frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub dt: f32,
    pub frame_index: u64,
}

impl FrameTime {
    /// Frames per second implied by `dt`.
    pub fn fps(&self) -> f32 {
        1.0 / self.dt
    }
}

#[derive(Debug, Clone)]
enum Source {
    Measured { last: Instant, dt_min: Duration, dt_max: Duration },
    Fixed(Duration),
}

/// Produces the per-frame delta handed to animation and particles.
///
/// The engine never reads a clock itself, so every time step starts here.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    frame_index: u64,
}

impl FrameClock {
    /// Wall-clock deltas clamped to `[0.1 ms, 250 ms]`.
    pub fn measured() -> Self {
        Self {
            source: Source::Measured {
                last: Instant::now(),
                dt_min: Duration::from_micros(100),
                dt_max: Duration::from_millis(250),
            },
            frame_index: 0,
        }
    }

    /// Constant deltas of `1 / fps` seconds, for reproducible runs.
    pub fn fixed(fps: f32) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 30.0 };
        Self {
            source: Source::Fixed(Duration::from_secs_f32(1.0 / fps)),
            frame_index: 0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let dt = match &mut self.source {
            Source::Measured { last, dt_min, dt_max } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last).clamp(*dt_min, *dt_max);
                *last = now;
                dt
            }
            Source::Fixed(step) => *step,
        };

        let ft = FrameTime { dt: dt.as_secs_f32(), frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}
