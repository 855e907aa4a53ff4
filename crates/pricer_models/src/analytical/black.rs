//! Black model for European options on a forward.
//!
//! All values are undiscounted (forward measure), which is the unit the local
//! volatility PDE produces.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = F·N(d₁) - K·N(d₂)
//! **Put Price**: P = K·N(-d₂) - F·N(-d₁)
//!
//! Where:
//! - d₁ = ln(F/K) / (σ√T) + σ√T/2
//! - d₂ = d₁ - σ√T

use num_traits::Float;

use super::distributions::{lit, norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Below this `σ√T` the option is treated as expired.
const SMALL_SIGMA_ROOT_T: f64 = 1e-12;

/// Black model at a fixed forward and volatility.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::Black76;
///
/// let black = Black76::new(100.0_f64, 0.2).unwrap();
/// let call = black.price(100.0, 1.0, true);
/// let put = black.price(100.0, 1.0, false);
///
/// // Put-call parity on the forward: C - P = F - K
/// assert!((call - put).abs() < 1e-10);
/// assert!((call - 7.965567).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Black76<T: Float> {
    forward: T,
    volatility: T,
}

/// All Black Greeks at one strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackGreeks<T: Float> {
    /// Undiscounted price
    pub price: T,
    /// ∂V/∂F
    pub delta: T,
    /// ∂V/∂K
    pub dual_delta: T,
    /// ∂²V/∂F²
    pub gamma: T,
    /// ∂²V/∂K²
    pub dual_gamma: T,
    /// ∂V/∂σ
    pub vega: T,
    /// ∂²V/∂F∂σ
    pub vanna: T,
    /// ∂²V/∂σ²
    pub vomma: T,
}

impl<T: Float> Black76<T> {
    /// Creates a new Black model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidForward` if forward <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0
    ///
    /// A zero volatility is allowed and prices intrinsic value.
    pub fn new(forward: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(forward > T::zero()) || !forward.is_finite() {
            return Err(AnalyticalError::InvalidForward {
                forward: forward.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility >= T::zero()) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            forward,
            volatility,
        })
    }

    /// Returns the forward.
    #[inline]
    pub fn forward(&self) -> T {
        self.forward
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn sigma_root_t(&self, expiry: T) -> T {
        self.volatility * expiry.max(T::zero()).sqrt()
    }

    #[inline]
    fn is_degenerate(&self, expiry: T) -> bool {
        self.sigma_root_t(expiry) < lit(SMALL_SIGMA_ROOT_T)
    }

    /// Computes d₁. Only meaningful when `σ√T > 0`.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let srt = self.sigma_root_t(expiry);
        (self.forward / strike).ln() / srt + lit::<T>(0.5) * srt
    }

    /// Computes d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.sigma_root_t(expiry)
    }

    #[inline]
    fn sign(is_call: bool) -> T {
        if is_call {
            T::one()
        } else {
            -T::one()
        }
    }

    /// Undiscounted option price.
    ///
    /// Falls back to intrinsic value `max(±(F - K), 0)` when `σ√T` vanishes.
    pub fn price(&self, strike: T, expiry: T, is_call: bool) -> T {
        let s = Self::sign(is_call);
        if self.is_degenerate(expiry) {
            return (s * (self.forward - strike)).max(T::zero());
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let value = s * (self.forward * norm_cdf(s * d1) - strike * norm_cdf(s * d2));
        value.max(T::zero())
    }

    /// Delta with respect to the forward.
    ///
    /// - Call Delta = N(d₁)
    /// - Put Delta = N(d₁) - 1
    pub fn delta(&self, strike: T, expiry: T, is_call: bool) -> T {
        let s = Self::sign(is_call);
        if self.is_degenerate(expiry) {
            return if s * (self.forward - strike) > T::zero() {
                s
            } else {
                T::zero()
            };
        }
        s * norm_cdf(s * self.d1(strike, expiry))
    }

    /// Dual delta, the derivative with respect to the strike.
    ///
    /// - Call = -N(d₂)
    /// - Put = N(-d₂)
    pub fn dual_delta(&self, strike: T, expiry: T, is_call: bool) -> T {
        let s = Self::sign(is_call);
        if self.is_degenerate(expiry) {
            return if s * (self.forward - strike) > T::zero() {
                -s
            } else {
                T::zero()
            };
        }
        -s * norm_cdf(s * self.d2(strike, expiry))
    }

    /// Gamma = φ(d₁) / (F σ√T), identical for calls and puts.
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return T::zero();
        }
        norm_pdf(self.d1(strike, expiry)) / (self.forward * self.sigma_root_t(expiry))
    }

    /// Dual gamma = φ(d₂) / (K σ√T), the strike density of the forward.
    pub fn dual_gamma(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return T::zero();
        }
        norm_pdf(self.d2(strike, expiry)) / (strike * self.sigma_root_t(expiry))
    }

    /// Vega = F φ(d₁) √T.
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return T::zero();
        }
        self.forward * norm_pdf(self.d1(strike, expiry)) * expiry.sqrt()
    }

    /// Vanna = -φ(d₁) d₂ / σ.
    pub fn vanna(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return T::zero();
        }
        -norm_pdf(self.d1(strike, expiry)) * self.d2(strike, expiry) / self.volatility
    }

    /// Vomma = F φ(d₁) √T d₁ d₂ / σ.
    pub fn vomma(&self, strike: T, expiry: T) -> T {
        if self.is_degenerate(expiry) {
            return T::zero();
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        self.forward * norm_pdf(d1) * expiry.sqrt() * d1 * d2 / self.volatility
    }

    /// All Greeks at once.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::Black76;
    ///
    /// let g = Black76::new(100.0_f64, 0.25).unwrap().greeks(110.0, 0.5, false);
    /// assert!(g.delta < 0.0 && g.dual_delta > 0.0);
    /// assert!(g.gamma > 0.0 && g.vega > 0.0);
    /// ```
    pub fn greeks(&self, strike: T, expiry: T, is_call: bool) -> BlackGreeks<T> {
        BlackGreeks {
            price: self.price(strike, expiry, is_call),
            delta: self.delta(strike, expiry, is_call),
            dual_delta: self.dual_delta(strike, expiry, is_call),
            gamma: self.gamma(strike, expiry),
            dual_gamma: self.dual_gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            vanna: self.vanna(strike, expiry),
            vomma: self.vomma(strike, expiry),
        }
    }
}
