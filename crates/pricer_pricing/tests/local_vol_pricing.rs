//! End-to-end pricing tests for the local volatility PDE solvers.
//!
//! # Test Categories
//!
//! 1. **Black anchor**: A flat surface reproduces Black-76
//! 2. **Domains**: Grid extents for both directions
//! 3. **Degenerate surfaces**: Zero volatility returns the payoff
//! 4. **Direction consistency**: Forward and backward prices agree

use approx::{assert_abs_diff_eq, assert_relative_eq};
use pricer_core::market_data::{
    DriftForwardCurve, FlatForwardCurve, FlatLocalVol, FunctionalLocalVol, SurfaceCoordinate,
};
use pricer_models::analytical::Black76;
use pricer_models::instruments::EuropeanVanillaOption;
use pricer_pricing::greeks::{GreekKind, LocalVolGreekEngine, SingleResultResolver};
use pricer_pricing::pde::{BackwardPdeSolver, ForwardPdeSolver, PdeConfig, PdeError};

fn fine_config() -> PdeConfig {
    PdeConfig::builder()
        .space_steps(400)
        .time_steps(200)
        .build()
        .unwrap()
}

// ============================================================================
// Black Anchor
// ============================================================================

#[test]
fn test_forward_flat_surface_matches_black() {
    let surface = FlatLocalVol::strike(0.2).unwrap();
    let curve = FlatForwardCurve::new(100.0).unwrap();
    let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();

    let config = PdeConfig::builder()
        .space_steps(800)
        .time_steps(400)
        .build()
        .unwrap();

    // The strike sits on the snapped centre node, so no interpolation error
    let grid = ForwardPdeSolver::new(config).solve(&surface, &curve, &option).unwrap();
    let atm = grid.nodes().iter().position(|&m| m == 1.0).unwrap();
    let price = grid.forward() * grid.values()[atm];

    let black = Black76::new(100.0, 0.2).unwrap().price(100.0, 1.0, true);
    assert_abs_diff_eq!(price, black, epsilon = 1e-3);
}

#[test]
fn test_backward_flat_surface_matches_black() {
    let surface = FlatLocalVol::moneyness(0.25).unwrap();
    let curve = FlatForwardCurve::new(100.0).unwrap();
    let solver = BackwardPdeSolver::new(fine_config());

    for (strike, is_call) in [(90.0, false), (100.0, true), (110.0, true)] {
        let option = EuropeanVanillaOption::new(strike, 2.0, is_call).unwrap();
        let price = solver.price(&surface, &curve, &option).unwrap();
        let black = Black76::new(100.0, 0.25).unwrap().price(strike, 2.0, is_call);
        assert_relative_eq!(price, black, max_relative = 2e-3);
    }
}

#[test]
fn test_put_call_parity_on_skewed_surface() {
    let surface = FunctionalLocalVol::new(
        |_t: f64, k: f64| 0.22 - 0.06 * (2.0 * (k / 100.0 - 1.0)).tanh(),
        SurfaceCoordinate::Strike,
    );
    let curve = FlatForwardCurve::new(100.0).unwrap();
    let engine = LocalVolGreekEngine::new(fine_config());

    let call = EuropeanVanillaOption::call(100.0, 1.0).unwrap();
    let put = EuropeanVanillaOption::put(100.0, 1.0).unwrap();
    let calls = engine
        .grid_greeks_for(&surface, &curve, &call, &[GreekKind::Price])
        .unwrap();
    let puts = engine
        .grid_greeks_for(&surface, &curve, &put, &[GreekKind::Price])
        .unwrap();

    for strike in [80.0, 95.0, 100.0, 120.0] {
        let c = SingleResultResolver::new(&calls, GreekKind::Price).result(strike).unwrap();
        let p = SingleResultResolver::new(&puts, GreekKind::Price).result(strike).unwrap();
        assert_relative_eq!(c - p, 100.0 - strike, epsilon = 5e-3);
    }
}

// ============================================================================
// Domains
// ============================================================================

#[test]
fn test_grid_domains() {
    let surface = FlatLocalVol::strike(0.2).unwrap();
    let curve = FlatForwardCurve::new(100.0).unwrap();
    let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();
    let config = PdeConfig::default();

    let forward = ForwardPdeSolver::new(config).solve(&surface, &curve, &option).unwrap();
    assert_eq!(forward.domain(), (0.0, 3.5));
    assert_eq!(forward.len(), config.space_steps() + 1);

    let backward = BackwardPdeSolver::new(config).solve(&surface, &curve, &option).unwrap();
    assert_eq!(backward.domain().0, 0.0);
    assert_relative_eq!(backward.domain().1, 350.0, max_relative = 1e-12);
}

#[test]
fn test_collection_strikes_are_interior() {
    let surface = FlatLocalVol::strike(0.2).unwrap();
    let curve = FlatForwardCurve::new(100.0).unwrap();
    let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();

    let greeks = LocalVolGreekEngine::new(PdeConfig::default())
        .grid_greeks_for(&surface, &curve, &option, &[GreekKind::Price])
        .unwrap();
    let (min, max) = greeks.strike_range().unwrap();
    assert!(min > 0.0);
    assert!(max < 350.0);

    let resolver = SingleResultResolver::new(&greeks, GreekKind::Price);
    assert!(matches!(resolver.result(0.0), Err(PdeError::OutOfDomain { .. })));
    assert!(matches!(resolver.result(350.0), Err(PdeError::OutOfDomain { .. })));
}

#[test]
fn test_growing_forward_moves_the_grid() {
    let surface = FlatLocalVol::moneyness(0.2).unwrap();
    let curve = DriftForwardCurve::new(100.0, 0.05).unwrap();
    let option = EuropeanVanillaOption::call(100.0, 2.0).unwrap();

    let grid = ForwardPdeSolver::new(PdeConfig::default())
        .solve(&surface, &curve, &option)
        .unwrap();
    assert_relative_eq!(grid.forward(), 100.0 * (0.1_f64).exp(), max_relative = 1e-12);
    assert_relative_eq!(grid.strike_at(grid.len() - 1), 3.5 * grid.forward(), max_relative = 1e-12);
}

// ============================================================================
// Degenerate Surfaces
// ============================================================================

#[test]
fn test_zero_volatility_keeps_black_greeks_contained() {
    let surface = FlatLocalVol::strike(0.0).unwrap();
    let curve = FlatForwardCurve::new(100.0).unwrap();
    let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();

    let greeks = LocalVolGreekEngine::new(PdeConfig::default())
        .grid_greeks_for(
            &surface,
            &curve,
            &option,
            &[GreekKind::Price, GreekKind::ImpliedVol, GreekKind::BlackDelta],
        )
        .unwrap();

    for i in 0..greeks.len() {
        let strike = greeks.strikes()[i];
        let price = greeks.get(GreekKind::Price, i).unwrap().value().unwrap();
        assert_relative_eq!(price, (100.0 - strike).max(0.0), epsilon = 1e-9);
        assert!(!greeks.get(GreekKind::ImpliedVol, i).unwrap().is_available());
        assert!(!greeks.get(GreekKind::BlackDelta, i).unwrap().is_available());
    }

    match SingleResultResolver::new(&greeks, GreekKind::ImpliedVol).result(100.0) {
        Err(PdeError::Unavailable { kind, .. }) => assert_eq!(kind, GreekKind::ImpliedVol),
        _ => panic!("Expected Unavailable"),
    }
}

// ============================================================================
// Direction Consistency
// ============================================================================

#[test]
fn test_forward_and_backward_prices_agree() {
    let surface = FunctionalLocalVol::new(
        |t: f64, m: f64| 0.2 + 0.02 * t - 0.05 * (m - 1.0),
        SurfaceCoordinate::Moneyness,
    );
    let curve = DriftForwardCurve::new(100.0, 0.03).unwrap();
    let config = fine_config();
    let call = EuropeanVanillaOption::call(100.0, 1.0).unwrap();

    let greeks = LocalVolGreekEngine::new(config)
        .grid_greeks_for(&surface, &curve, &call, &[GreekKind::Price])
        .unwrap();
    let resolver = SingleResultResolver::new(&greeks, GreekKind::Price);

    let strikes = [90.0, 100.0, 115.0];
    let smile = BackwardPdeSolver::new(config)
        .smile(&surface, &curve, 1.0, &strikes, true)
        .unwrap();
    for (strike, backward) in strikes.iter().zip(smile) {
        let forward = resolver.result(*strike).unwrap();
        assert_relative_eq!(forward, backward, epsilon = 2e-2);
    }
}

#[test]
fn test_backward_greeks_agree_with_grid_greeks() {
    let surface = FlatLocalVol::strike(0.2).unwrap();
    let curve = FlatForwardCurve::new(100.0).unwrap();
    let option = EuropeanVanillaOption::call(105.0, 1.0).unwrap();
    let engine = LocalVolGreekEngine::new(fine_config());
    let kinds = [GreekKind::Price, GreekKind::Delta, GreekKind::Gamma];

    let grid = engine.grid_greeks_for(&surface, &curve, &option, &kinds).unwrap();
    let point = engine.backward_greeks_for(&surface, &curve, &option, &kinds).unwrap();
    assert_eq!(point.strike(), 105.0);

    let black = Black76::new(100.0, 0.2).unwrap().greeks(105.0, 1.0, true);
    let expected = [
        (GreekKind::Price, black.price),
        (GreekKind::Delta, black.delta),
        (GreekKind::Gamma, black.gamma),
    ];
    for (kind, black_value) in expected {
        let from_grid = SingleResultResolver::new(&grid, kind).result(105.0).unwrap();
        let from_point = point.get(kind).unwrap().value().unwrap();
        assert_relative_eq!(from_grid, black_value, max_relative = 2e-2);
        assert_relative_eq!(from_point, black_value, max_relative = 2e-2);
    }
}
