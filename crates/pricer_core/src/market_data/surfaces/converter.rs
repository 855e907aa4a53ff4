//! Conversion between strike and moneyness parameterisations.
//!
//! A strike surface `σ_K(t, K)` and a moneyness surface `σ_m(t, m)` describe
//! the same local volatility when
//!
//! ```text
//! σ_m(t, m) = σ_K(t, m·F(t))      σ_K(t, K) = σ_m(t, K / F(t))
//! ```
//!
//! The converters here are thin borrowing views: every lookup reads the
//! forward curve and the wrapped surface, nothing is cached or tabulated.
//! Bumping the forward curve therefore changes the converted surface, which
//! is exactly the "surface moves with the forward" behaviour the forward PDE
//! Greeks rely on.

use super::{LocalVolatilitySurface, SurfaceCoordinate};
use crate::market_data::curves::ForwardCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;
use std::marker::PhantomData;

/// Strike surface viewed in moneyness coordinates.
#[derive(Debug)]
pub struct MoneynessSurface<'a, T: Float, S: ?Sized, C> {
    surface: &'a S,
    curve: &'a C,
    _marker: PhantomData<T>,
}

/// Moneyness surface viewed in strike coordinates.
#[derive(Debug)]
pub struct StrikeSurface<'a, T: Float, S: ?Sized, C> {
    surface: &'a S,
    curve: &'a C,
    _marker: PhantomData<T>,
}

/// View a strike-parameterised surface in moneyness coordinates.
///
/// # Errors
///
/// * `MarketDataError::Coordinate` - If `surface` is not declared in strike coordinates
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::FlatForwardCurve;
/// use pricer_core::market_data::surfaces::{
///     to_moneyness_surface, FunctionalLocalVol, LocalVolatilitySurface, SurfaceCoordinate,
/// };
///
/// let curve = FlatForwardCurve::new(100.0_f64).unwrap();
/// let strike_surface =
///     FunctionalLocalVol::new(|_t: f64, k: f64| k / 500.0, SurfaceCoordinate::Strike);
///
/// let m_surface = to_moneyness_surface(&strike_surface, &curve).unwrap();
/// assert!((m_surface.volatility(1.0, 1.1).unwrap() - 0.22).abs() < 1e-12);
/// ```
pub fn to_moneyness_surface<'a, T, S, C>(
    surface: &'a S,
    curve: &'a C,
) -> Result<MoneynessSurface<'a, T, S, C>, MarketDataError>
where
    T: Float,
    S: LocalVolatilitySurface<T> + ?Sized,
    C: ForwardCurve<T>,
{
    expect_coordinate(surface.coordinate(), SurfaceCoordinate::Strike)?;
    Ok(MoneynessSurface {
        surface,
        curve,
        _marker: PhantomData,
    })
}

/// View a moneyness-parameterised surface in strike coordinates.
///
/// # Errors
///
/// * `MarketDataError::Coordinate` - If `surface` is not declared in moneyness coordinates
pub fn to_strike_surface<'a, T, S, C>(
    surface: &'a S,
    curve: &'a C,
) -> Result<StrikeSurface<'a, T, S, C>, MarketDataError>
where
    T: Float,
    S: LocalVolatilitySurface<T> + ?Sized,
    C: ForwardCurve<T>,
{
    expect_coordinate(surface.coordinate(), SurfaceCoordinate::Moneyness)?;
    Ok(StrikeSurface {
        surface,
        curve,
        _marker: PhantomData,
    })
}

fn expect_coordinate(
    found: SurfaceCoordinate,
    expected: SurfaceCoordinate,
) -> Result<(), MarketDataError> {
    if found != expected {
        return Err(MarketDataError::Coordinate { expected, found });
    }
    Ok(())
}

impl<T, S, C> LocalVolatilitySurface<T> for MoneynessSurface<'_, T, S, C>
where
    T: Float,
    S: LocalVolatilitySurface<T> + ?Sized,
    C: ForwardCurve<T>,
{
    #[inline]
    fn volatility(&self, t: T, m: T) -> Result<T, MarketDataError> {
        let forward = self.curve.forward(t)?;
        self.surface.volatility(t, m * forward)
    }

    #[inline]
    fn coordinate(&self) -> SurfaceCoordinate {
        SurfaceCoordinate::Moneyness
    }
}

impl<T, S, C> LocalVolatilitySurface<T> for StrikeSurface<'_, T, S, C>
where
    T: Float,
    S: LocalVolatilitySurface<T> + ?Sized,
    C: ForwardCurve<T>,
{
    #[inline]
    fn volatility(&self, t: T, k: T) -> Result<T, MarketDataError> {
        let forward = self.curve.forward(t)?;
        self.surface.volatility(t, k / forward)
    }

    #[inline]
    fn coordinate(&self) -> SurfaceCoordinate {
        SurfaceCoordinate::Strike
    }
}
