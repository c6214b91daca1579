/// Wall-clock delta source for variable-rate animation.
///
/// Fed with host timestamps in milliseconds (e.g. the `requestAnimationFrame`
/// timestamp). The first sample after construction or `reset` yields zero, so
/// time spent hidden or stopped is never replayed.
#[derive(Debug, Clone, Default)]
pub struct DeltaClock {
    last_ms: Option<f64>,
}

impl DeltaClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous sample. Non-finite timestamps are ignored
    /// and a clock running backwards yields zero.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0.0;
        };
        (((now_ms - last) / 1000.0).max(0.0)) as f32
    }

    /// Forget the previous sample.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Clamp a host-supplied frame delta to something safe to integrate.
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_zero() {
        let mut clock = DeltaClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn reset_skips_the_gap() {
        let mut clock = DeltaClock::new();
        clock.delta(0.0);
        clock.delta(16.0);
        clock.reset();
        assert_eq!(clock.delta(60_000.0), 0.0);
        assert!((clock.delta(60_020.0) - 0.02).abs() < 1e-6);
    }

    #[test]
    fn backwards_and_non_finite_samples() {
        let mut clock = DeltaClock::new();
        clock.delta(500.0);
        assert_eq!(clock.delta(400.0), 0.0);
        assert_eq!(clock.delta(f64::NAN), 0.0);
        assert!((clock.delta(410.0) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn sanitize_rejects_bad_deltas() {
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
        assert_eq!(sanitize_delta(-0.5), 0.0);
        assert_eq!(sanitize_delta(0.25), 0.25);
    }
}
