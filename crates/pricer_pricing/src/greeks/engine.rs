//! Bump-and-revise Greeks for the local volatility PDE.
//!
//! The local volatility surface is usually quoted relative to the forward,
//! so when the forward moves the surface moves with it. The spot Greeks are
//! therefore the grid derivatives (surface held fixed) plus a correction
//! from re-solving with the forward curve bumped by `±ε`.
//!
//! On a forward grid `V = F·v(m; F)` with `m = K/F`. Writing `g` for the
//! central difference in the curve bump,
//!
//! ```text
//! delta = (v - m v') + F·g[v]
//! gamma = 2 g[v] + F g²[v] - 2m g[v'] + m² v''/F
//! ```
//!
//! Volatility Greeks shift the whole surface by `±δ`. Black-equivalent
//! Greeks invert the normalised price to an implied volatility; nodes where
//! that fails report [`GreekValue::Unavailable`].

use pricer_core::market_data::{ForwardCurve, LocalVolatilitySurface, ShiftedLocalVol};
use pricer_models::analytical::{implied_volatility, AnalyticalError, Black76, BlackGreeks};
use pricer_models::instruments::EuropeanVanillaOption;
use tracing::{info, warn};

use super::collection::{GridGreekCollection, PointGreeks};
use super::extractor::{GridQuantity, GridResultExtractor};
use super::kind::{GreekKind, GreekValue};
use crate::pde::backward::forward_node;
use crate::pde::{
    BackwardPdeSolver, Direction, ForwardPdeSolver, PdeConfig, PdeError, TerminalGrid,
};

/// Greek engine over the forward and backward PDE solvers.
///
/// Stateless; a single engine can serve concurrent requests.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{FlatForwardCurve, FlatLocalVol};
/// use pricer_models::instruments::EuropeanVanillaOption;
/// use pricer_pricing::greeks::{GreekKind, LocalVolGreekEngine, SingleResultResolver};
/// use pricer_pricing::pde::PdeConfig;
///
/// let surface = FlatLocalVol::strike(0.2).unwrap();
/// let curve = FlatForwardCurve::new(100.0).unwrap();
/// let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();
///
/// let engine = LocalVolGreekEngine::new(PdeConfig::default());
/// let greeks = engine
///     .grid_greeks_for(&surface, &curve, &option, &[GreekKind::Price, GreekKind::Delta])
///     .unwrap();
///
/// let delta = SingleResultResolver::new(&greeks, GreekKind::Delta).result(100.0).unwrap();
/// assert!((delta - 0.54).abs() < 1e-2);
/// ```
#[derive(Clone, Debug)]
pub struct LocalVolGreekEngine {
    config: PdeConfig,
    forward: ForwardPdeSolver,
    backward: BackwardPdeSolver,
}

impl LocalVolGreekEngine {
    /// Creates an engine from the PDE configuration.
    pub fn new(config: PdeConfig) -> Self {
        Self {
            forward: ForwardPdeSolver::new(config),
            backward: BackwardPdeSolver::new(config),
            config,
        }
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &PdeConfig {
        &self.config
    }

    /// Every [`GreekKind`] at every interior node of the forward grid.
    ///
    /// # Errors
    ///
    /// As [`LocalVolGreekEngine::grid_greeks_for`].
    pub fn grid_greeks<S, C>(
        &self,
        surface: &S,
        curve: &C,
        option: &EuropeanVanillaOption<f64>,
    ) -> Result<GridGreekCollection, PdeError>
    where
        S: LocalVolatilitySurface<f64> + Sync + ?Sized,
        C: ForwardCurve<f64> + Sync,
    {
        self.grid_greeks_for(surface, curve, option, &GreekKind::ALL)
    }

    /// Requested Greeks at every interior node of the forward grid.
    ///
    /// The option's expiry and payoff type select the grid; its strike is
    /// not used. Three forward solves (base, forward up, forward down) run
    /// concurrently; six more run when a volatility Greek is requested.
    ///
    /// # Errors
    ///
    /// - `PdeError::MarketData` if the curve cannot be bumped or read
    /// - any solver error of [`ForwardPdeSolver::solve`]
    ///
    /// Implied volatility failures do not fail the request; they are
    /// reported as [`GreekValue::Unavailable`] at the affected nodes.
    pub fn grid_greeks_for<S, C>(
        &self,
        surface: &S,
        curve: &C,
        option: &EuropeanVanillaOption<f64>,
        kinds: &[GreekKind],
    ) -> Result<GridGreekCollection, PdeError>
    where
        S: LocalVolatilitySurface<f64> + Sync + ?Sized,
        C: ForwardCurve<f64> + Sync,
    {
        let eps = self.config.forward_shift();
        let up_curve = curve.with_fractional_shift(eps)?;
        let down_curve = curve.with_fractional_shift(-eps)?;
        let solver = &self.forward;

        let (base, (up, down)) = rayon::join(
            || solver.solve(surface, curve, option),
            || {
                rayon::join(
                    || solver.solve(surface, &up_curve, option),
                    || solver.solve(surface, &down_curve, option),
                )
            },
        );
        let (base, up, down) = (base?, up?, down?);

        let vol = if kinds.iter().any(|k| k.needs_vol_bumps()) {
            Some(self.vol_scenarios(
                Direction::Forward,
                surface,
                [curve, &up_curve, &down_curve],
                option,
            )?)
        } else {
            None
        };
        let want_black = kinds.iter().any(|k| k.is_black());

        let forward = base.forward();
        let expiry = option.time_to_expiry();
        let n = base.len();
        let mut strikes = Vec::with_capacity(n - 2);
        let mut nodes = Vec::with_capacity(n - 2);

        for i in 1..n - 1 {
            let m = base.nodes()[i];
            let strike = m * forward;
            let v = base.values()[i];
            let v1 = base.first_derivatives()[i];
            let v2 = base.second_derivatives()[i];
            let (vu, vd) = (up.values()[i], down.values()[i]);
            let (vu1, vd1) = (up.first_derivatives()[i], down.first_derivatives()[i]);

            let surface_delta = (vu - vd) / (2.0 * forward * eps);
            let cross_gamma = (vu1 - vd1) / (2.0 * forward * eps);
            let surface_gamma = (vu + vd - 2.0 * v) / (forward * eps * eps);
            let dual_gamma = v2 / forward;

            let vol_greeks = vol.as_ref().map(|g| {
                let delta = self.config.vol_shift();
                let (s_up, s_dn) = (g.sigma_up.values()[i], g.sigma_down.values()[i]);
                let (s_up1, s_dn1) = (
                    g.sigma_up.first_derivatives()[i],
                    g.sigma_down.first_derivatives()[i],
                );
                let x_vanna = (s_up - s_dn - m * (s_up1 - s_dn1)) / (2.0 * delta);
                let surface_vanna = (g.up_up.values()[i] + g.down_down.values()[i]
                    - g.up_down.values()[i]
                    - g.down_up.values()[i])
                    / (4.0 * eps * delta);
                VolGreeks {
                    vega: forward * (s_up - s_dn) / (2.0 * delta),
                    vanna: x_vanna + surface_vanna,
                    vomma: forward * (s_up + s_dn - 2.0 * v) / (delta * delta),
                }
            });

            let black = want_black.then(|| {
                black_equivalent(v, m, forward, expiry, option.is_call()).map_err(|err| {
                    warn!(strike, reason = %err, "implied volatility unavailable");
                    err.to_string()
                })
            });

            strikes.push(strike);
            nodes.push(NodeGreeks {
                price: forward * v,
                normalised_price: v,
                delta: v - m * v1 + forward * surface_delta,
                dual_delta: v1,
                gamma: 2.0 * surface_delta + surface_gamma - 2.0 * m * cross_gamma
                    + m * m * dual_gamma,
                dual_gamma,
                vol: vol_greeks,
                black,
            });
        }

        let mut collection = GridGreekCollection::new(strikes, forward, expiry, option.is_call());
        for &kind in kinds {
            collection.insert(kind, nodes.iter().map(|node| node.value(kind)).collect());
        }

        info!(
            expiry,
            forward,
            is_call = option.is_call(),
            strikes = collection.len(),
            kinds = kinds.len(),
            vol_bumps = vol.is_some(),
            "computed grid Greeks"
        );
        Ok(collection)
    }

    /// Every [`GreekKind`] for a single option from backward solves.
    ///
    /// # Errors
    ///
    /// As [`LocalVolGreekEngine::backward_greeks_for`].
    pub fn backward_greeks<S, C>(
        &self,
        surface: &S,
        curve: &C,
        option: &EuropeanVanillaOption<f64>,
    ) -> Result<PointGreeks, PdeError>
    where
        S: LocalVolatilitySurface<f64> + Sync + ?Sized,
        C: ForwardCurve<f64> + Sync,
    {
        self.backward_greeks_for(surface, curve, option, &GreekKind::ALL)
    }

    /// Requested Greeks for a single option from backward solves.
    ///
    /// Price, delta and gamma are read at the forward node of the base grid;
    /// the surface correction compares the bumped grids at the same forward
    /// level. Dual delta and dual gamma come from a forward solve at the
    /// option's moneyness. Base, bumped and forward solves run concurrently.
    ///
    /// # Errors
    ///
    /// - `PdeError::MarketData` if the curve cannot be bumped or read
    /// - `PdeError::OutOfDomain` if the strike lies outside the forward grid
    /// - any solver error
    pub fn backward_greeks_for<S, C>(
        &self,
        surface: &S,
        curve: &C,
        option: &EuropeanVanillaOption<f64>,
        kinds: &[GreekKind],
    ) -> Result<PointGreeks, PdeError>
    where
        S: LocalVolatilitySurface<f64> + Sync + ?Sized,
        C: ForwardCurve<f64> + Sync,
    {
        let eps = self.config.forward_shift();
        let up_curve = curve.with_fractional_shift(eps)?;
        let down_curve = curve.with_fractional_shift(-eps)?;
        let solver = &self.backward;

        let ((base, up), (down, dual)) = rayon::join(
            || {
                rayon::join(
                    || solver.solve(surface, curve, option),
                    || solver.solve(surface, &up_curve, option),
                )
            },
            || {
                rayon::join(
                    || solver.solve(surface, &down_curve, option),
                    || self.forward.solve(surface, curve, option),
                )
            },
        );
        let (base, up, down, dual) = (base?, up?, down?, dual?);

        let forward = base.forward();
        let expiry = option.time_to_expiry();
        let strike = option.strike();
        let centre = forward_node(&base)?;

        let v = base.values()[centre];
        let v1 = base.first_derivatives()[centre];
        let v2 = base.second_derivatives()[centre];
        let up_at = GridResultExtractor::new(&up);
        let down_at = GridResultExtractor::new(&down);
        let (vu, vd) = (
            up_at.interpolate(GridQuantity::Value, forward)?,
            down_at.interpolate(GridQuantity::Value, forward)?,
        );
        let (vu1, vd1) = (
            up_at.interpolate(GridQuantity::FirstDerivative, forward)?,
            down_at.interpolate(GridQuantity::FirstDerivative, forward)?,
        );

        let bump = forward * eps;
        let surface_delta = (vu - vd) / (2.0 * bump);
        let cross_gamma = (vu1 - vd1) / (2.0 * bump);
        let surface_gamma = (vu + vd - 2.0 * v) / (bump * bump);

        let moneyness = strike / forward;
        let dual_at = GridResultExtractor::new(&dual);
        let dual_delta = dual_at.interpolate(GridQuantity::FirstDerivative, moneyness)?;
        let dual_gamma = dual_at.interpolate(GridQuantity::SecondDerivative, moneyness)? / forward;

        let vol = if kinds.iter().any(|k| k.needs_vol_bumps()) {
            let grids = self.vol_scenarios(
                Direction::Backward,
                surface,
                [curve, &up_curve, &down_curve],
                option,
            )?;
            let delta = self.config.vol_shift();
            let at_forward = |grid: &TerminalGrid| -> Result<f64, PdeError> {
                GridResultExtractor::new(grid).interpolate(GridQuantity::Value, forward)
            };
            let (s_up, s_dn) = (at_forward(&grids.sigma_up)?, at_forward(&grids.sigma_down)?);
            let surface_vanna = (at_forward(&grids.up_up)? + at_forward(&grids.down_down)?
                - at_forward(&grids.up_down)?
                - at_forward(&grids.down_up)?)
                / (4.0 * bump * delta);
            let x_vanna = (GridResultExtractor::new(&grids.sigma_up)
                .interpolate(GridQuantity::FirstDerivative, forward)?
                - GridResultExtractor::new(&grids.sigma_down)
                    .interpolate(GridQuantity::FirstDerivative, forward)?)
                / (2.0 * delta);
            Some(VolGreeks {
                vega: (s_up - s_dn) / (2.0 * delta),
                vanna: x_vanna + surface_vanna,
                vomma: (s_up + s_dn - 2.0 * v) / (delta * delta),
            })
        } else {
            None
        };

        let black = kinds.iter().any(|k| k.is_black()).then(|| {
            black_equivalent(v / forward, moneyness, forward, expiry, option.is_call()).map_err(
                |err| {
                    warn!(strike, reason = %err, "implied volatility unavailable");
                    err.to_string()
                },
            )
        });

        let node = NodeGreeks {
            price: v,
            normalised_price: v / forward,
            delta: v1 + surface_delta,
            dual_delta,
            gamma: v2 + 2.0 * cross_gamma + surface_gamma,
            dual_gamma,
            vol,
            black,
        };

        let mut point = PointGreeks::new(strike);
        for &kind in kinds {
            point.insert(kind, node.value(kind));
        }

        info!(
            expiry,
            forward,
            strike,
            is_call = option.is_call(),
            kinds = kinds.len(),
            vol_bumps = node.vol.is_some(),
            "computed backward Greeks"
        );
        Ok(point)
    }

    /// Solves the six volatility scenarios concurrently.
    ///
    /// `curves` is `[base, forward up, forward down]`.
    fn vol_scenarios<S, C>(
        &self,
        direction: Direction,
        surface: &S,
        curves: [&C; 3],
        option: &EuropeanVanillaOption<f64>,
    ) -> Result<VolScenarios, PdeError>
    where
        S: LocalVolatilitySurface<f64> + Sync + ?Sized,
        C: ForwardCurve<f64> + Sync,
    {
        let delta = self.config.vol_shift();
        let [base, up, down] = curves;
        let shifted = |curve: &C, shift: f64| {
            self.solve(direction, &ShiftedLocalVol::new(surface, shift), curve, option)
        };

        let ((sigma_up, sigma_down), ((up_up, down_down), (up_down, down_up))) = rayon::join(
            || rayon::join(|| shifted(base, delta), || shifted(base, -delta)),
            || {
                rayon::join(
                    || rayon::join(|| shifted(up, delta), || shifted(down, -delta)),
                    || rayon::join(|| shifted(up, -delta), || shifted(down, delta)),
                )
            },
        );
        Ok(VolScenarios {
            sigma_up: sigma_up?,
            sigma_down: sigma_down?,
            up_up: up_up?,
            down_down: down_down?,
            up_down: up_down?,
            down_up: down_up?,
        })
    }

    fn solve<S, C>(
        &self,
        direction: Direction,
        surface: &S,
        curve: &C,
        option: &EuropeanVanillaOption<f64>,
    ) -> Result<TerminalGrid, PdeError>
    where
        S: LocalVolatilitySurface<f64> + ?Sized,
        C: ForwardCurve<f64>,
    {
        match direction {
            Direction::Forward => self.forward.solve(surface, curve, option),
            Direction::Backward => self.backward.solve(surface, curve, option),
        }
    }
}

/// Grids of the volatility-bumped solves; `up_down` is forward up, volatility down.
struct VolScenarios {
    sigma_up: TerminalGrid,
    sigma_down: TerminalGrid,
    up_up: TerminalGrid,
    down_down: TerminalGrid,
    up_down: TerminalGrid,
    down_up: TerminalGrid,
}

#[derive(Clone, Copy, Debug)]
struct VolGreeks {
    vega: f64,
    vanna: f64,
    vomma: f64,
}

/// All quantities of one node, before selection by kind.
#[derive(Debug)]
struct NodeGreeks {
    price: f64,
    normalised_price: f64,
    delta: f64,
    dual_delta: f64,
    gamma: f64,
    dual_gamma: f64,
    vol: Option<VolGreeks>,
    black: Option<Result<(f64, BlackGreeks<f64>), String>>,
}

impl NodeGreeks {
    fn value(&self, kind: GreekKind) -> GreekValue {
        match kind {
            GreekKind::Price => GreekValue::Available(self.price),
            GreekKind::NormalisedPrice => GreekValue::Available(self.normalised_price),
            GreekKind::Delta => GreekValue::Available(self.delta),
            GreekKind::DualDelta => GreekValue::Available(self.dual_delta),
            GreekKind::Gamma => GreekValue::Available(self.gamma),
            GreekKind::DualGamma => GreekValue::Available(self.dual_gamma),
            GreekKind::Vega => self.vol_value(|v| v.vega),
            GreekKind::Vanna => self.vol_value(|v| v.vanna),
            GreekKind::Vomma => self.vol_value(|v| v.vomma),
            GreekKind::ImpliedVol => self.black_value(|vol, _| vol),
            GreekKind::BlackPrice => self.black_value(|_, g| g.price),
            GreekKind::BlackDelta => self.black_value(|_, g| g.delta),
            GreekKind::BlackDualDelta => self.black_value(|_, g| g.dual_delta),
            GreekKind::BlackGamma => self.black_value(|_, g| g.gamma),
            GreekKind::BlackDualGamma => self.black_value(|_, g| g.dual_gamma),
            GreekKind::BlackVega => self.black_value(|_, g| g.vega),
            GreekKind::BlackVanna => self.black_value(|_, g| g.vanna),
            GreekKind::BlackVomma => self.black_value(|_, g| g.vomma),
        }
    }

    fn vol_value(&self, field: impl Fn(&VolGreeks) -> f64) -> GreekValue {
        match &self.vol {
            Some(v) => GreekValue::Available(field(v)),
            None => GreekValue::Unavailable("volatility bumps not requested".to_string()),
        }
    }

    fn black_value(&self, field: impl Fn(f64, &BlackGreeks<f64>) -> f64) -> GreekValue {
        match &self.black {
            Some(Ok((vol, greeks))) => GreekValue::Available(field(*vol, greeks)),
            Some(Err(reason)) => GreekValue::Unavailable(reason.clone()),
            None => GreekValue::Unavailable("implied volatility not requested".to_string()),
        }
    }
}

/// Implied volatility of a normalised price and the Black Greeks at it.
///
/// The normalised price is a Black price with unit forward and strike `m`;
/// the Greeks are evaluated at forward `F` and strike `m·F`.
fn black_equivalent(
    normalised_price: f64,
    moneyness: f64,
    forward: f64,
    expiry: f64,
    is_call: bool,
) -> Result<(f64, BlackGreeks<f64>), AnalyticalError> {
    let vol = implied_volatility(normalised_price, 1.0, moneyness, expiry, is_call)?;
    let greeks = Black76::new(forward, vol)?.greeks(moneyness * forward, expiry, is_call);
    Ok((vol, greeks))
}
