//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, secant steps and inverse quadratic interpolation.
/// Needs a bracket `[a, b]` with `f(a)` and `f(b)` of opposite sign and
/// converges for any continuous `f` on that bracket.
///
/// # Example
///
/// ```
/// use forecast_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let f = |x: f64| x * x * x - x - 2.0;
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - `|f(x)| < tolerance` or the bracket shrank below tolerance
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` share a sign
    /// * `Err(SolverError::NonFinite)` - `f` returned NaN or infinity
    /// * `Err(SolverError::MaxIterationsExceeded)` - iteration limit hit
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let eval = |x: T| -> Result<T, SolverError> {
            let y = f(x);
            if y.is_finite() {
                Ok(y)
            } else {
                Err(SolverError::NonFinite {
                    x: x.to_f64().unwrap_or(f64::NAN),
                })
            }
        };

        let (mut a, mut b) = (a, b);
        let (mut fa, mut fb) = (eval(a)?, eval(b)?);

        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::one() + T::one();
        let three = two + T::one();
        let tol = self.config.tolerance;

        // c is the contrapoint: f(b) and f(c) always straddle zero
        let mut c = a;
        let mut fc = fa;
        let mut step = b - a;
        let mut prev_step = step;

        for _ in 0..self.config.max_iterations {
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                step = b - a;
                prev_step = step;
            }
            // Keep b as the best estimate
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let half = (c - b) / two;
            if fb.abs() < tol || half.abs() <= tol {
                return Ok(b);
            }

            let interpolate = prev_step.abs() >= tol && fa.abs() > fb.abs();
            let mut bisect = true;

            if interpolate {
                let s = fb / fa;
                let (p, q) = if a == c {
                    // Secant step
                    (two * half * s, T::one() - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * half * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                let (p, q) = if p > T::zero() { (p, -q) } else { (-p, q) };

                let limit_a = three * half * q - (tol * q).abs();
                let limit_b = (prev_step * q).abs();
                if two * p < limit_a.min(limit_b) {
                    prev_step = step;
                    step = p / q;
                    bisect = false;
                }
            }

            if bisect {
                step = half;
                prev_step = half;
            }

            a = b;
            fa = fb;
            b = if step.abs() > tol {
                b + step
            } else if half > T::zero() {
                b + tol
            } else {
                b - tol
            };
            fb = eval(b)?;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

/// Locate the first sub-interval of `[lo, hi]` on which `f` changes sign.
///
/// The interval is split into `steps` equal parts and scanned from `lo`.
/// Points where `f` is not finite are skipped. Returns `None` when no sign
/// change is found.
///
/// # Example
///
/// ```
/// use forecast_core::math::solvers::scan_bracket;
///
/// let (a, b) = scan_bracket(|x: f64| x - 0.3, 0.0, 1.0, 10).unwrap();
/// assert!(a <= 0.3 && 0.3 <= b);
/// ```
pub fn scan_bracket<T, F>(f: F, lo: T, hi: T, steps: usize) -> Option<(T, T)>
where
    T: Float,
    F: Fn(T) -> T,
{
    if steps == 0 || lo.is_nan() || hi.is_nan() || lo >= hi {
        return None;
    }
    let n = T::from(steps)?;
    let width = (hi - lo) / n;

    let mut prev: Option<(T, T)> = None;
    for i in 0..=steps {
        let x = lo + width * T::from(i)?;
        let y = f(x);
        if !y.is_finite() {
            prev = None;
            continue;
        }
        if y == T::zero() {
            return Some((x, x));
        }
        if let Some((px, py)) = prev {
            if py.signum() != y.signum() {
                return Some((px, x));
            }
        }
        prev = Some((x, y));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_single_period_rate() {
        // -100 + 110/(1+r) = 0 -> r = 10%
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();
        let root = solver
            .find_root(|r| -100.0 + 110.0 / (1.0 + r), -0.5, 2.0)
            .unwrap();
        assert!((root - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_multi_period_rate() {
        // -1000 + 500/(1+r) + 500/(1+r)^2 + 500/(1+r)^3, IRR ~ 23.375%
        let npv = |r: f64| {
            -1000.0 + (1..=3).map(|t| 500.0 / (1.0 + r).powi(t)).sum::<f64>()
        };
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();
        let root = solver.find_root(npv, 0.0, 1.0).unwrap();
        assert!(npv(root).abs() < 1e-6);
        assert!((root - 0.233_75).abs() < 1e-4);
    }

    #[test]
    fn test_bracket_reversed() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();
        let root = solver.find_root(|x| x * x - 2.0, 2.0, 0.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_root_at_endpoint() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();
        assert_eq!(solver.find_root(|x| x - 1.0, 0.0, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_no_bracket() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();
        match solver.find_root(|x| x * x + 1.0, -1.0, 1.0) {
            Err(SolverError::NoBracket { a, b }) => {
                assert_eq!(a, -1.0);
                assert_eq!(b, 1.0);
            }
            other => panic!("Expected NoBracket error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_objective() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();
        let result = solver.find_root(|x| 1.0 / (x + 1.0), -1.0, 1.0);
        assert!(matches!(result, Err(SolverError::NonFinite { .. })));
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = BrentSolver::new(SolverConfig::new(1e-300, 3));
        match solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0) {
            Err(SolverError::MaxIterationsExceeded { iterations }) => assert_eq!(iterations, 3),
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
    }

    #[test]
    fn test_with_f32() {
        let solver: BrentSolver<f32> = BrentSolver::new(SolverConfig::new(1e-6, 100));
        let root = solver.find_root(|x: f32| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((root - std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_scan_bracket_finds_first_sign_change() {
        // Roots at 0.2 and 0.7; the scan stops at the first one
        let f = |x: f64| (x - 0.2) * (x - 0.7);
        let (a, b) = scan_bracket(f, 0.0, 1.0, 7).unwrap();
        assert!(a < 0.2 && 0.2 < b);
    }

    #[test]
    fn test_scan_bracket_none() {
        assert!(scan_bracket(|x: f64| x * x + 1.0, -1.0, 1.0, 50).is_none());
        assert!(scan_bracket(|x: f64| x, 1.0, -1.0, 50).is_none());
        assert!(scan_bracket(|x: f64| x, -1.0, 1.0, 0).is_none());
    }
}
