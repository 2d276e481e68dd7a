/// Crossfade ramp
///
/// A timed linear interpolation of volume between the two music channels.
/// The ramp is plain state advanced by the host's per-frame tick; it never
/// blocks and it never touches the backend itself. At most one ramp exists at
/// a time: a new crossfade request overwrites the active one.
use std::time::Duration;

use crate::channel::ChannelId;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Volumes to apply after one tick of the ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampStep {
    pub from_volume: f32,
    pub to_volume: f32,

    /// True exactly once, on the tick where elapsed reaches the duration.
    /// The source channel must then be stopped and the ramp discarded.
    pub finished: bool,
}

/// In-flight crossfade between two channels
#[derive(Debug, Clone)]
pub struct CrossfadeRamp {
    from: ChannelId,
    to: ChannelId,
    from_start: f32,
    to_start: f32,
    target: f32,
    elapsed: Duration,
    duration: Duration,
}

impl CrossfadeRamp {
    /// Start a ramp fading `from` out and `to` in toward `target`.
    ///
    /// `duration` must be positive; zero-duration requests are handled by
    /// dispatch before a ramp is ever created.
    pub fn new(
        from: ChannelId,
        to: ChannelId,
        from_start: f32,
        to_start: f32,
        target: f32,
        duration: Duration,
    ) -> Self {
        Self {
            from,
            to,
            from_start,
            to_start,
            target,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn from_channel(&self) -> ChannelId {
        self.from
    }

    pub fn to_channel(&self) -> ChannelId {
        self.to
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Advance the ramp by one host tick and report the volumes to apply
    pub fn advance(&mut self, dt: Duration) -> RampStep {
        self.elapsed = self.elapsed.saturating_add(dt);

        let t = if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        };

        if t >= 1.0 {
            // Endpoint is forced exactly, independent of tick granularity
            RampStep {
                from_volume: 0.0,
                to_volume: self.target,
                finished: true,
            }
        } else {
            RampStep {
                from_volume: lerp(self.from_start, 0.0, t),
                to_volume: lerp(self.to_start, self.target, t),
                finished: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(duration_ms: u64) -> CrossfadeRamp {
        CrossfadeRamp::new(
            ChannelId::MusicPrimary,
            ChannelId::MusicSecondary,
            0.8,
            0.0,
            0.6,
            Duration::from_millis(duration_ms),
        )
    }

    #[test]
    fn test_midpoint_interpolation() {
        let mut ramp = ramp(2000);
        let step = ramp.advance(Duration::from_millis(1000));

        assert!(!step.finished);
        assert_relative_eq!(step.from_volume, 0.4, epsilon = 1e-5);
        assert_relative_eq!(step.to_volume, 0.3, epsilon = 1e-5);
    }

    #[test]
    fn test_exact_duration_finishes() {
        let mut ramp = ramp(500);
        let step = ramp.advance(Duration::from_millis(500));

        assert!(step.finished);
        assert_eq!(step.from_volume, 0.0);
        assert_eq!(step.to_volume, 0.6);
    }

    #[test]
    fn test_overshoot_clamps_to_endpoint() {
        let mut ramp = ramp(100);
        let step = ramp.advance(Duration::from_secs(10));

        assert!(step.finished);
        assert_eq!(step.from_volume, 0.0);
        assert_eq!(step.to_volume, 0.6);
    }

    #[test]
    fn test_incremental_ticks_reach_endpoint() {
        let mut ramp = ramp(100);
        let mut last = RampStep {
            from_volume: 0.8,
            to_volume: 0.0,
            finished: false,
        };

        // 7 x 16ms > 100ms, so the ramp must finish within these ticks
        for _ in 0..7 {
            let step = ramp.advance(Duration::from_millis(16));
            assert!(step.from_volume <= last.from_volume + 1e-6);
            assert!(step.to_volume >= last.to_volume - 1e-6);
            last = step;
            if step.finished {
                break;
            }
        }

        assert!(last.finished);
        assert_eq!(last.to_volume, 0.6);
    }

    #[test]
    fn test_channels_and_target_exposed() {
        let ramp = ramp(100);
        assert_eq!(ramp.from_channel(), ChannelId::MusicPrimary);
        assert_eq!(ramp.to_channel(), ChannelId::MusicSecondary);
        assert_relative_eq!(ramp.target(), 0.6);
    }
}
