//! Forward (Dupire) solve: one grid yields the whole smile.
//!
//! In moneyness `m = K / F(T)` the normalised call price `c = C / F(T)`
//! satisfies
//!
//! ```text
//! ∂c/∂T = ½ σ_m(T, m)² m² ∂²c/∂m²,    c(0, m) = max(1 - m, 0)
//! ```
//!
//! and likewise for puts with `max(m - 1, 0)`. Prices follow as `F(T)·c(T, m)`.

use pricer_core::market_data::{
    to_moneyness_surface, ForwardCurve, LocalVolatilitySurface, SurfaceCoordinate,
};
use pricer_models::instruments::EuropeanVanillaOption;
use tracing::debug;

use super::boundary::BoundaryConditionSelector;
use super::coefficients::ForwardLocalVolCoefficients;
use super::config::PdeConfig;
use super::error::PdeError;
use super::grid::{GridAxis, TerminalGrid};
use super::mesh::{Direction, MeshPlanner};
use super::theta::ThetaMethodSolver;

/// Solves the forward equation on a moneyness grid.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{FlatForwardCurve, FlatLocalVol};
/// use pricer_models::instruments::EuropeanVanillaOption;
/// use pricer_pricing::pde::{ForwardPdeSolver, GridAxis, PdeConfig};
///
/// let surface = FlatLocalVol::strike(0.2).unwrap();
/// let curve = FlatForwardCurve::new(100.0).unwrap();
/// let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();
///
/// let grid = ForwardPdeSolver::new(PdeConfig::default())
///     .solve(&surface, &curve, &option)
///     .unwrap();
///
/// assert_eq!(grid.axis(), GridAxis::Moneyness);
/// assert_eq!(grid.domain(), (0.0, 3.5));
/// ```
#[derive(Clone, Debug)]
pub struct ForwardPdeSolver {
    config: PdeConfig,
    planner: MeshPlanner,
    stepper: ThetaMethodSolver,
}

impl ForwardPdeSolver {
    /// Creates a solver from the engine configuration.
    pub fn new(config: PdeConfig) -> Self {
        Self {
            planner: MeshPlanner::new(&config),
            stepper: ThetaMethodSolver::from_config(&config),
            config,
        }
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &PdeConfig {
        &self.config
    }

    /// Solves for `option`'s expiry and payoff type.
    ///
    /// A strike surface is viewed in moneyness through `curve`; the grid is
    /// independent of the option's strike.
    ///
    /// # Errors
    ///
    /// - `PdeError::Config` if the expiry is not positive
    /// - `PdeError::MarketData` if the curve or surface cannot be read
    /// - `PdeError::SingularSystem` / `PdeError::NonFinite` if the solve fails
    pub fn solve<S, C>(
        &self,
        surface: &S,
        curve: &C,
        option: &EuropeanVanillaOption<f64>,
    ) -> Result<TerminalGrid, PdeError>
    where
        S: LocalVolatilitySurface<f64> + ?Sized,
        C: ForwardCurve<f64>,
    {
        match surface.coordinate() {
            SurfaceCoordinate::Strike => {
                let moneyness = to_moneyness_surface(surface, curve)?;
                self.solve_moneyness(&moneyness, curve, option)
            }
            SurfaceCoordinate::Moneyness => self.solve_moneyness(surface, curve, option),
        }
    }

    fn solve_moneyness<S, C>(
        &self,
        surface: &S,
        curve: &C,
        option: &EuropeanVanillaOption<f64>,
    ) -> Result<TerminalGrid, PdeError>
    where
        S: LocalVolatilitySurface<f64> + ?Sized,
        C: ForwardCurve<f64>,
    {
        let expiry = option.time_to_expiry();
        let forward = curve.forward(expiry)?;

        let upper = self.planner.space_upper(Direction::Forward, forward);
        let space = self.planner.space_mesh(upper, 1.0)?;
        let times = self.planner.time_mesh(expiry, Direction::Forward)?;
        let initial: Vec<f64> = space.iter().map(|&m| option.normalised_payoff(m)).collect();
        let (lower_bc, upper_bc) = BoundaryConditionSelector::select(option, Direction::Forward);

        debug!(
            direction = "forward",
            nodes = space.len(),
            steps = times.len() - 1,
            expiry,
            forward,
            is_call = option.is_call(),
            "solving PDE"
        );

        let coefficients = ForwardLocalVolCoefficients::new(surface);
        let values = self
            .stepper
            .solve(&coefficients, &space, &times, initial, lower_bc, upper_bc)?;
        TerminalGrid::new(space, values, forward, expiry, GridAxis::Moneyness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{FlatForwardCurve, FlatLocalVol};
    use pricer_models::analytical::Black76;

    fn flat_market() -> (FlatLocalVol<f64>, FlatForwardCurve<f64>) {
        (
            FlatLocalVol::strike(0.2).unwrap(),
            FlatForwardCurve::new(100.0).unwrap(),
        )
    }

    #[test]
    fn test_call_boundary_limits() {
        let (surface, curve) = flat_market();
        let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();
        let grid = ForwardPdeSolver::new(PdeConfig::default())
            .solve(&surface, &curve, &option)
            .unwrap();

        let values = grid.values();
        assert_eq!(values[0], 1.0);
        assert_eq!(values[values.len() - 1], 0.0);
        assert_eq!(grid.nodes()[grid.len() - 1], 3.5);
        assert_eq!(grid.forward(), 100.0);
    }

    #[test]
    fn test_put_boundary_limits() {
        let (surface, curve) = flat_market();
        let option = EuropeanVanillaOption::put(100.0, 1.0).unwrap();
        let grid = ForwardPdeSolver::new(PdeConfig::default())
            .solve(&surface, &curve, &option)
            .unwrap();

        assert_eq!(grid.values()[0], 0.0);
        let n = grid.len();
        let slope = (grid.values()[n - 1] - grid.values()[n - 2])
            / (grid.nodes()[n - 1] - grid.nodes()[n - 2]);
        assert_relative_eq!(slope, 1.0, epsilon = 1e-10);
    }

    /// Coarse anchor on the default 100x100 mesh. The 1e-3 absolute anchor
    /// needs an 800x400 mesh and lives in `tests/local_vol_pricing.rs`.
    #[test]
    fn test_flat_surface_matches_black_at_the_money() {
        let (surface, curve) = flat_market();
        let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();
        let grid = ForwardPdeSolver::new(PdeConfig::default())
            .solve(&surface, &curve, &option)
            .unwrap();

        let atm = grid.nodes().iter().position(|&m| m == 1.0).unwrap();
        let price = grid.forward() * grid.values()[atm];
        let black = Black76::new(100.0, 0.2).unwrap().price(100.0, 1.0, true);
        assert_relative_eq!(price, black, epsilon = 1e-2);
    }

    #[test]
    fn test_zero_expiry_is_rejected() {
        let (surface, curve) = flat_market();
        let option = EuropeanVanillaOption::call(100.0, 0.0).unwrap();
        let result = ForwardPdeSolver::new(PdeConfig::default()).solve(&surface, &curve, &option);
        assert!(matches!(result, Err(PdeError::Config(_))));
    }
}
