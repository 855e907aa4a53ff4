//! Solver configuration types.

use crate::types::SolverError;
use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 100);
///
/// let strict = SolverConfig::new(1e-14, 500).unwrap();
/// assert!(strict.tolerance < config.tolerance);
/// assert!(SolverConfig::new(0.0_f64, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on both `|f(x)|` and the bracket half-width.
    pub tolerance: T,

    /// Maximum number of iterations before giving up with
    /// `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Tolerance `1e-10` (falls back to machine epsilon for narrow types)
    /// and 100 iterations.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// `SolverError::NumericalInstability` if `tolerance` is not a positive
    /// finite number or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        if !(tolerance > T::zero()) || !tolerance.is_finite() {
            return Err(SolverError::NumericalInstability(
                "tolerance must be positive and finite".to_string(),
            ));
        }
        if max_iterations == 0 {
            return Err(SolverError::NumericalInstability(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-20);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_new_rejects_bad_tolerance() {
        assert!(SolverConfig::new(-1e-10_f64, 100).is_err());
        assert!(SolverConfig::new(f64::NAN, 100).is_err());
        assert!(SolverConfig::new(f64::INFINITY, 100).is_err());
    }

    #[test]
    fn test_new_rejects_zero_iterations() {
        match SolverConfig::new(1e-10_f64, 0).unwrap_err() {
            SolverError::NumericalInstability(msg) => assert!(msg.contains("max_iterations")),
            _ => panic!("Expected NumericalInstability"),
        }
    }
}
