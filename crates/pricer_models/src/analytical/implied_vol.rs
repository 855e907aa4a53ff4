//! Black implied volatility.

use num_traits::Float;
use pricer_core::math::solvers::{BrentSolver, SolverConfig};

use super::black::Black76;
use super::distributions::lit;
use super::error::AnalyticalError;

/// Lower end of the volatility bracket.
const MIN_VOLATILITY: f64 = 1e-8;
/// Initial upper end of the volatility bracket, doubled until it brackets.
const INITIAL_MAX_VOLATILITY: f64 = 1.0;
const MAX_BRACKET_DOUBLINGS: usize = 12;
/// Prices within this many ulps of a no-arbitrage bound carry no volatility information.
const BOUND_ULPS: f64 = 16.0;

/// Invert an undiscounted Black price to its volatility.
///
/// The price must lie strictly inside the no-arbitrage band
/// `(max(±(F - K), 0), F or K)`. At either bound, or outside it, no finite
/// positive volatility reproduces the price and the inversion fails.
///
/// Working in normalised units (`forward = 1`, `strike = m`) is equivalent
/// and is how grid prices on a moneyness axis are inverted.
///
/// # Errors
/// - `AnalyticalError::InvalidForward` / `InvalidStrike` / `InvalidExpiry` for bad inputs
/// - `AnalyticalError::ImpliedVolatility` when the price is outside the band or
///   the root search fails
///
/// # Examples
/// ```
/// use pricer_models::analytical::{implied_volatility, Black76};
///
/// let price = Black76::new(100.0_f64, 0.3).unwrap().price(90.0, 2.0, false);
/// let vol = implied_volatility(price, 100.0, 90.0, 2.0, false).unwrap();
/// assert!((vol - 0.3).abs() < 1e-9);
///
/// // Intrinsic value has no implied volatility
/// assert!(implied_volatility(0.0, 100.0, 90.0, 2.0, false).is_err());
/// ```
pub fn implied_volatility<T: Float>(
    price: T,
    forward: T,
    strike: T,
    expiry: T,
    is_call: bool,
) -> Result<T, AnalyticalError> {
    if !(forward > T::zero()) || !forward.is_finite() {
        return Err(AnalyticalError::InvalidForward {
            forward: forward.to_f64().unwrap_or(f64::NAN),
        });
    }
    if !(strike > T::zero()) || !strike.is_finite() {
        return Err(AnalyticalError::InvalidStrike {
            strike: strike.to_f64().unwrap_or(f64::NAN),
        });
    }
    if !(expiry > T::zero()) || !expiry.is_finite() {
        return Err(AnalyticalError::InvalidExpiry {
            expiry: expiry.to_f64().unwrap_or(f64::NAN),
        });
    }
    if !price.is_finite() {
        return Err(unavailable(format!(
            "non-finite price {}",
            price.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let (intrinsic, upper) = if is_call {
        ((forward - strike).max(T::zero()), forward)
    } else {
        ((strike - forward).max(T::zero()), strike)
    };
    let tolerance = lit::<T>(BOUND_ULPS) * T::epsilon() * upper;

    if price <= intrinsic + tolerance {
        return Err(unavailable(format!(
            "price {} at or below intrinsic value {}",
            price.to_f64().unwrap_or(f64::NAN),
            intrinsic.to_f64().unwrap_or(f64::NAN)
        )));
    }
    if price >= upper - tolerance {
        return Err(unavailable(format!(
            "price {} at or above upper bound {}",
            price.to_f64().unwrap_or(f64::NAN),
            upper.to_f64().unwrap_or(f64::NAN)
        )));
    }

    let objective = |vol: T| match Black76::new(forward, vol) {
        Ok(black) => black.price(strike, expiry, is_call) - price,
        Err(_) => T::nan(),
    };

    let lower_vol = lit::<T>(MIN_VOLATILITY);
    let mut upper_vol = lit::<T>(INITIAL_MAX_VOLATILITY);
    let mut doublings = 0;
    while objective(upper_vol) < T::zero() {
        if doublings == MAX_BRACKET_DOUBLINGS {
            return Err(unavailable(format!(
                "no volatility below {} reproduces the price",
                upper_vol.to_f64().unwrap_or(f64::NAN)
            )));
        }
        upper_vol = upper_vol + upper_vol;
        doublings += 1;
    }

    let config = SolverConfig::new(lit::<T>(1e-14), 200)
        .map_err(|e| unavailable(e.to_string()))?;
    BrentSolver::new(config)
        .find_root(objective, lower_vol, upper_vol)
        .map_err(|e| unavailable(e.to_string()))
}

fn unavailable(reason: String) -> AnalyticalError {
    AnalyticalError::ImpliedVolatility { reason }
}
