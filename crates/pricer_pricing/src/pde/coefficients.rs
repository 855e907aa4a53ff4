//! PDE coefficient bundles.
//!
//! The solver works on
//!
//! ```text
//! ∂f/∂t + a(t, x) ∂²f/∂x² + b(t, x) ∂f/∂x + c(t, x) f = 0
//! ```
//!
//! where `t` runs along the time mesh. Both local volatility equations are
//! pure diffusions (`b = c = 0`) with `a = -½ σ² x²`.

use pricer_core::market_data::{ForwardCurve, LocalVolatilitySurface, SurfaceCoordinate};

use super::error::PdeError;

/// Coefficients `a`, `b` and `c` of the solved equation.
pub trait PdeCoefficients {
    /// Diffusion coefficient `a(t, x)`.
    fn diffusion(&self, t: f64, x: f64) -> Result<f64, PdeError>;

    /// Convection coefficient `b(t, x)`.
    fn convection(&self, _t: f64, _x: f64) -> Result<f64, PdeError> {
        Ok(0.0)
    }

    /// Source coefficient `c(t, x)`.
    fn source(&self, _t: f64, _x: f64) -> Result<f64, PdeError> {
        Ok(0.0)
    }
}

/// Forward (Dupire) equation in expiry `t` and moneyness `m`.
///
/// `a = -½ σ_m(t, m)² m²` on a moneyness surface.
#[derive(Debug)]
pub struct ForwardLocalVolCoefficients<'a, S: ?Sized> {
    surface: &'a S,
}

impl<'a, S> ForwardLocalVolCoefficients<'a, S>
where
    S: LocalVolatilitySurface<f64> + ?Sized,
{
    /// Wraps a moneyness surface.
    pub fn new(surface: &'a S) -> Self {
        Self { surface }
    }
}

impl<S> PdeCoefficients for ForwardLocalVolCoefficients<'_, S>
where
    S: LocalVolatilitySurface<f64> + ?Sized,
{
    #[inline]
    fn diffusion(&self, t: f64, m: f64) -> Result<f64, PdeError> {
        let sigma = self.surface.volatility(t, m)?;
        Ok(-0.5 * sigma * sigma * m * m)
    }
}

/// Backward equation in time to expiry `τ` and forward level `f` of `F(T)`.
///
/// `a = -½ σ(T - τ, x)² f²` where the surface coordinate is
/// `x = f·F(t)/F(T)` for a strike surface and `x = f/F(T)` for a moneyness
/// surface.
#[derive(Debug)]
pub struct BackwardLocalVolCoefficients<'a, S: ?Sized, C> {
    surface: &'a S,
    curve: &'a C,
    expiry: f64,
    terminal_forward: f64,
}

impl<'a, S, C> BackwardLocalVolCoefficients<'a, S, C>
where
    S: LocalVolatilitySurface<f64> + ?Sized,
    C: ForwardCurve<f64>,
{
    /// Coefficients for an option expiring at `expiry`.
    pub fn new(surface: &'a S, curve: &'a C, expiry: f64) -> Result<Self, PdeError> {
        let terminal_forward = curve.forward(expiry)?;
        Ok(Self {
            surface,
            curve,
            expiry,
            terminal_forward,
        })
    }

    /// Forward at expiry.
    #[inline]
    pub fn terminal_forward(&self) -> f64 {
        self.terminal_forward
    }

    /// Surface coordinate of forward level `f` at calendar time `t`.
    fn coordinate_of(&self, t: f64, f: f64) -> Result<f64, PdeError> {
        Ok(match self.surface.coordinate() {
            SurfaceCoordinate::Strike => f * self.curve.forward(t)? / self.terminal_forward,
            SurfaceCoordinate::Moneyness => f / self.terminal_forward,
        })
    }
}

impl<S, C> PdeCoefficients for BackwardLocalVolCoefficients<'_, S, C>
where
    S: LocalVolatilitySurface<f64> + ?Sized,
    C: ForwardCurve<f64>,
{
    fn diffusion(&self, tau: f64, f: f64) -> Result<f64, PdeError> {
        let t = (self.expiry - tau).max(0.0);
        let x = self.coordinate_of(t, f)?;
        let sigma = self.surface.volatility(t, x)?;
        Ok(-0.5 * sigma * sigma * f * f)
    }
}
