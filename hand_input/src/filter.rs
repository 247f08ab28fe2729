//! Exponential moving average for the hand angle
//!
//! The first sample passes through unchanged. After that each output is
//! `alpha * input + (1 - alpha) * previous`.

/// Exponential moving average filter
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f32,
    value: f32,
    initialized: bool,
}

impl Ema {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: clamp_alpha(alpha),
            value: 0.0,
            initialized: false,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp_alpha(alpha);
    }

    /// Feed one sample and return the smoothed value
    pub fn update(&mut self, sample: f32) -> f32 {
        if !sample.is_finite() {
            return self.value;
        }
        if !self.initialized {
            self.value = sample;
            self.initialized = true;
            return sample;
        }
        self.value = self.alpha * sample + (1.0 - self.alpha) * self.value;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Forget history; the next sample passes through again
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.initialized = false;
    }
}

fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        return 1.0;
    }
    alpha.clamp(0.0, 1.0)
}

/// Alpha for the hand angle given how far the new sample is from the
/// current value: 0.15 when still, rising linearly to 0.9 at a 10 degree jump.
pub fn adaptive_alpha(diff_deg: f32) -> f32 {
    let diff = if diff_deg.is_finite() { diff_deg.abs() } else { 10.0 };
    0.15 + (diff / 10.0).min(1.0) * 0.75
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes_through() {
        for sample in [0.0, 140.0, 359.5, -20.0] {
            let mut ema = Ema::new(0.2);
            assert_eq!(ema.update(sample), sample);
        }
    }

    #[test]
    fn test_output_is_convex_combination() {
        let mut ema = Ema::new(0.2);
        ema.update(100.0);
        let out = ema.update(200.0);
        assert!((out - 120.0).abs() < 1e-4);

        let prev = out;
        let out = ema.update(50.0);
        assert!(out <= prev && out >= 50.0, "Between input and previous");
    }

    #[test]
    fn test_reset_restores_passthrough() {
        let mut ema = Ema::new(0.2);
        ema.update(10.0);
        ema.update(90.0);
        ema.reset();
        assert!(!ema.is_initialized());
        assert_eq!(ema.update(250.0), 250.0);
    }

    #[test]
    fn test_non_finite_sample_is_ignored() {
        let mut ema = Ema::new(0.5);
        ema.update(40.0);
        assert_eq!(ema.update(f32::NAN), 40.0);
        assert_eq!(ema.update(60.0), 50.0);
    }

    #[test]
    fn test_adaptive_alpha() {
        assert_eq!(adaptive_alpha(0.0), 0.15);
        assert!((adaptive_alpha(5.0) - 0.525).abs() < 1e-6);
        assert!((adaptive_alpha(10.0) - 0.9).abs() < 1e-6);
        assert!((adaptive_alpha(-80.0) - 0.9).abs() < 1e-6, "Capped for large jumps");
        assert_eq!(Ema::new(3.0).alpha(), 1.0);
    }
}
