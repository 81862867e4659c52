//! Easing functions for camera and drone interpolation.
//!
//! Every curve maps a linear progress ratio in [0, 1] onto an eased ratio
//! in [0, 1] with `f(0) = 0` and `f(1) = 1`.

/// Easing function variants for motion curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quadratic ease-in/out (slow start and end).
    #[default]
    QuadraticInOut,
    /// Cubic ease-out (fast start, long settle).
    CubicOut,
    /// Cubic ease-in/out (slow start and end, steeper middle).
    CubicInOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Self::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticOut,
        EasingFunction::QuadraticInOut,
        EasingFunction::CubicOut,
        EasingFunction::CubicInOut,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.evaluate(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.evaluate(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_input_clamping() {
        for easing in ALL {
            assert_eq!(easing.evaluate(-0.5), easing.evaluate(0.0));
            assert_eq!(easing.evaluate(1.5), easing.evaluate(1.0));
        }
    }

    #[test]
    fn test_in_out_curves_are_symmetric_at_midpoint() {
        assert!((EasingFunction::QuadraticInOut.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!((EasingFunction::CubicInOut.evaluate(0.5) - 0.5).abs() < 1e-6);
        // Slow start
        assert!(EasingFunction::CubicInOut.evaluate(0.1) < 0.1);
        assert!(EasingFunction::QuadraticInOut.evaluate(0.1) < 0.1);
    }

    #[test]
    fn test_cubic_out_front_loads_progress() {
        let quarter = EasingFunction::CubicOut.evaluate(0.25);
        assert!(
            quarter > 0.5,
            "Ease-out should cover over half the distance at t=0.25, got {quarter}"
        );
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.5), 0.75); // 1 - (1-0.5)² = 0.75
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.evaluate(i as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{easing:?} decreased at step {i}");
                prev = v;
            }
        }
    }
}
