//! Backward solve: one grid per strike, indexed by the level of `F(T)`.
//!
//! In time to expiry `τ` the undiscounted price `V(τ, f)` satisfies
//!
//! ```text
//! ∂V/∂τ = ½ σ(T - τ, x(f))² f² ∂²V/∂f²,    V(0, f) = payoff(f)
//! ```
//!
//! with `x(f)` the surface coordinate of the forward level (see
//! [`BackwardLocalVolCoefficients`]). The price is read at `f = F(T)`, which
//! is always a grid node.

use pricer_core::market_data::{ForwardCurve, LocalVolatilitySurface};
use pricer_models::instruments::EuropeanVanillaOption;
use rayon::prelude::*;
use tracing::debug;

use super::boundary::BoundaryConditionSelector;
use super::coefficients::BackwardLocalVolCoefficients;
use super::config::PdeConfig;
use super::error::PdeError;
use super::grid::{GridAxis, TerminalGrid};
use super::mesh::{Direction, MeshPlanner};
use super::theta::ThetaMethodSolver;

/// Solves the backward equation on a forward-level grid.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{FlatForwardCurve, FlatLocalVol};
/// use pricer_models::instruments::EuropeanVanillaOption;
/// use pricer_pricing::pde::{BackwardPdeSolver, PdeConfig};
///
/// let surface = FlatLocalVol::strike(0.2).unwrap();
/// let curve = FlatForwardCurve::new(100.0).unwrap();
/// let option = EuropeanVanillaOption::put(95.0, 0.5).unwrap();
///
/// let solver = BackwardPdeSolver::new(PdeConfig::default());
/// let grid = solver.solve(&surface, &curve, &option).unwrap();
/// assert_eq!(grid.domain(), (0.0, 350.0));
///
/// let price = solver.price(&surface, &curve, &option).unwrap();
/// assert!(price > 0.0 && price < 95.0);
/// ```
#[derive(Clone, Debug)]
pub struct BackwardPdeSolver {
    config: PdeConfig,
    planner: MeshPlanner,
    stepper: ThetaMethodSolver,
}

impl BackwardPdeSolver {
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

    /// Solves for a single option.
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
        let expiry = option.time_to_expiry();
        let coefficients = BackwardLocalVolCoefficients::new(surface, curve, expiry)?;
        let forward = coefficients.terminal_forward();

        let upper = self.planner.space_upper(Direction::Backward, forward);
        let space = self.planner.space_mesh(upper, forward)?;
        let times = self.planner.time_mesh(expiry, Direction::Backward)?;
        let initial: Vec<f64> = space.iter().map(|&f| option.payoff(f)).collect();
        let (lower_bc, upper_bc) = BoundaryConditionSelector::select(option, Direction::Backward);

        debug!(
            direction = "backward",
            nodes = space.len(),
            steps = times.len() - 1,
            expiry,
            forward,
            strike = option.strike(),
            is_call = option.is_call(),
            "solving PDE"
        );

        let values = self
            .stepper
            .solve(&coefficients, &space, &times, initial, lower_bc, upper_bc)?;
        TerminalGrid::new(space, values, forward, expiry, GridAxis::ForwardLevel)
    }

    /// Undiscounted price of `option` at today's forward.
    ///
    /// # Errors
    ///
    /// As [`BackwardPdeSolver::solve`].
    pub fn price<S, C>(
        &self,
        surface: &S,
        curve: &C,
        option: &EuropeanVanillaOption<f64>,
    ) -> Result<f64, PdeError>
    where
        S: LocalVolatilitySurface<f64> + ?Sized,
        C: ForwardCurve<f64>,
    {
        let grid = self.solve(surface, curve, option)?;
        value_at_forward(&grid)
    }

    /// Prices one option per strike, solving the grids in parallel.
    ///
    /// # Errors
    ///
    /// `PdeError::Instrument` for an invalid strike or expiry, otherwise as
    /// [`BackwardPdeSolver::solve`]. The first failing strike aborts the smile.
    pub fn smile<S, C>(
        &self,
        surface: &S,
        curve: &C,
        expiry: f64,
        strikes: &[f64],
        is_call: bool,
    ) -> Result<Vec<f64>, PdeError>
    where
        S: LocalVolatilitySurface<f64> + Sync + ?Sized,
        C: ForwardCurve<f64> + Sync,
    {
        strikes
            .par_iter()
            .map(|&strike| {
                let option = EuropeanVanillaOption::new(strike, expiry, is_call)?;
                self.price(surface, curve, &option)
            })
            .collect()
    }
}

/// Value of a backward grid at its forward node.
pub(crate) fn value_at_forward(grid: &TerminalGrid) -> Result<f64, PdeError> {
    forward_node(grid).map(|i| grid.values()[i])
}

/// Index of the node sitting on the grid forward.
pub(crate) fn forward_node(grid: &TerminalGrid) -> Result<usize, PdeError> {
    let forward = grid.forward();
    grid.nodes()
        .iter()
        .position(|&f| f == forward)
        .ok_or_else(|| {
            let (min, max) = grid.domain();
            PdeError::OutOfDomain {
                x: forward,
                min,
                max,
            }
        })
}
