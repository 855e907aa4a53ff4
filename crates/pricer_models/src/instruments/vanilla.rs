//! European vanilla option.

use num_traits::Float;

use super::error::InstrumentError;

/// European call or put on the forward.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::instruments::EuropeanVanillaOption;
///
/// let call = EuropeanVanillaOption::call(100.0_f64, 1.0).unwrap();
/// assert_eq!(call.payoff(110.0), 10.0);
/// assert_eq!(call.payoff(90.0), 0.0);
///
/// // Payoff per unit forward on a moneyness axis
/// assert_eq!(call.normalised_payoff(0.75), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanVanillaOption<T: Float> {
    strike: T,
    time_to_expiry: T,
    is_call: bool,
}

impl<T: Float> EuropeanVanillaOption<T> {
    /// Creates a new option.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidStrike` if strike <= 0 or not finite
    /// - `InstrumentError::InvalidExpiry` if time_to_expiry < 0 or not finite
    pub fn new(strike: T, time_to_expiry: T, is_call: bool) -> Result<Self, InstrumentError> {
        if !(strike > T::zero()) || !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(time_to_expiry >= T::zero()) || !time_to_expiry.is_finite() {
            return Err(InstrumentError::InvalidExpiry {
                expiry: time_to_expiry.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            strike,
            time_to_expiry,
            is_call,
        })
    }

    /// Call option.
    pub fn call(strike: T, time_to_expiry: T) -> Result<Self, InstrumentError> {
        Self::new(strike, time_to_expiry, true)
    }

    /// Put option.
    pub fn put(strike: T, time_to_expiry: T) -> Result<Self, InstrumentError> {
        Self::new(strike, time_to_expiry, false)
    }

    /// The same contract at another strike.
    pub fn with_strike(&self, strike: T) -> Result<Self, InstrumentError> {
        Self::new(strike, self.time_to_expiry, self.is_call)
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> T {
        self.time_to_expiry
    }

    /// True for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.is_call
    }

    /// Payoff at expiry for underlying level `x`.
    #[inline]
    pub fn payoff(&self, x: T) -> T {
        if self.is_call {
            (x - self.strike).max(T::zero())
        } else {
            (self.strike - x).max(T::zero())
        }
    }

    /// Payoff divided by the forward, as a function of moneyness `m = K / F`.
    ///
    /// - Call: `max(1 - m, 0)`
    /// - Put: `max(m - 1, 0)`
    #[inline]
    pub fn normalised_payoff(&self, m: T) -> T {
        if self.is_call {
            (T::one() - m).max(T::zero())
        } else {
            (m - T::one()).max(T::zero())
        }
    }
}
