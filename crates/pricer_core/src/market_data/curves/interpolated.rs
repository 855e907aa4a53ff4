//! Pillar-based forward curve.

use super::traits::{check_forward, check_time, shift_factor};
use super::ForwardCurve;
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::LinearInterpolator;
use num_traits::Float;

/// Forward curve interpolated linearly between `(time, forward)` pillars.
///
/// Before the first pillar and after the last one the curve is held flat, so
/// `forward` is total on `t >= 0`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{ForwardCurve, InterpolatedForwardCurve};
///
/// let curve = InterpolatedForwardCurve::new(&[0.5_f64, 1.0, 2.0], &[100.0, 102.0, 106.0]).unwrap();
///
/// assert_eq!(curve.forward(0.0).unwrap(), 100.0);
/// assert!((curve.forward(1.5).unwrap() - 104.0).abs() < 1e-12);
/// assert_eq!(curve.forward(30.0).unwrap(), 106.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedForwardCurve<T: Float> {
    pillars: LinearInterpolator<T>,
}

impl<T: Float> InterpolatedForwardCurve<T> {
    /// Construct a curve from pillar times and forwards.
    ///
    /// # Arguments
    ///
    /// * `times` - Strictly increasing, non-negative pillar times (at least 2)
    /// * `forwards` - Positive forward level at each pillar
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InsufficientData` - Fewer than 2 pillars or mismatched lengths
    /// * `MarketDataError::InvalidMaturity` - Negative pillar time
    /// * `MarketDataError::InvalidForward` - Non-positive forward
    /// * `MarketDataError::Interpolation` - Unsorted pillar times
    pub fn new(times: &[T], forwards: &[T]) -> Result<Self, MarketDataError> {
        if times.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: times.len(),
                need: 2,
            });
        }
        if times.len() != forwards.len() {
            return Err(MarketDataError::InsufficientData {
                got: forwards.len(),
                need: times.len(),
            });
        }
        for &t in times {
            check_time(t)?;
        }
        for &f in forwards {
            check_forward(f)?;
        }

        Ok(Self {
            pillars: LinearInterpolator::new(times, forwards)?,
        })
    }

    /// Pillar times.
    #[inline]
    pub fn times(&self) -> &[T] {
        self.pillars.xs()
    }

    /// Pillar forwards.
    #[inline]
    pub fn forwards(&self) -> &[T] {
        self.pillars.ys()
    }
}

impl<T: Float> ForwardCurve<T> for InterpolatedForwardCurve<T> {
    fn forward(&self, t: T) -> Result<T, MarketDataError> {
        check_time(t)?;
        Ok(self.pillars.interpolate_flat(t))
    }

    fn with_fractional_shift(&self, shift: T) -> Result<Self, MarketDataError> {
        let factor = shift_factor(shift)?;
        Ok(Self {
            pillars: self.pillars.map_values(|f| f * factor),
        })
    }
}
