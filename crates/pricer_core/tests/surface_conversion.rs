//! Integration tests for strike/moneyness surface conversion.

use approx::assert_relative_eq;
use pricer_core::market_data::curves::{DriftForwardCurve, ForwardCurve, InterpolatedForwardCurve};
use pricer_core::market_data::surfaces::{
    to_moneyness_surface, to_strike_surface, GridLocalVol, LocalVolatilitySurface,
    SurfaceCoordinate,
};
use proptest::prelude::*;

fn strike_grid() -> GridLocalVol<f64> {
    let times = [0.25, 0.5, 1.0, 2.0];
    let strikes = [60.0, 80.0, 100.0, 120.0, 140.0];
    let vols = [
        &[0.35, 0.28, 0.22, 0.20, 0.21][..],
        &[0.33, 0.27, 0.22, 0.20, 0.20][..],
        &[0.31, 0.26, 0.21, 0.19, 0.19][..],
        &[0.29, 0.25, 0.21, 0.19, 0.18][..],
    ];
    GridLocalVol::new(&times, &strikes, &vols, SurfaceCoordinate::Strike).unwrap()
}

#[test]
fn test_grid_surface_round_trip_through_moneyness_and_back() {
    let curve = InterpolatedForwardCurve::new(&[0.0, 1.0, 2.0], &[100.0, 102.0, 105.0]).unwrap();
    let surface = strike_grid();

    let m_view = to_moneyness_surface(&surface, &curve).unwrap();
    let k_view = to_strike_surface(&m_view, &curve).unwrap();

    for &t in &[0.3, 0.9, 1.7] {
        for &k in &[70.0, 95.0, 100.0, 131.0] {
            assert_relative_eq!(
                k_view.volatility(t, k).unwrap(),
                surface.volatility(t, k).unwrap(),
                max_relative = 1e-14
            );
        }
    }
}

#[test]
fn test_at_the_money_moneyness_reads_forward_strike() {
    let curve = DriftForwardCurve::new(100.0, 0.05).unwrap();
    let surface = strike_grid();
    let m_view = to_moneyness_surface(&surface, &curve).unwrap();

    let t = 1.0;
    let f = curve.forward(t).unwrap();
    assert_relative_eq!(
        m_view.volatility(t, 1.0).unwrap(),
        surface.volatility(t, f).unwrap(),
        max_relative = 1e-15
    );
}

proptest! {
    #[test]
    fn prop_round_trip_relative_error(
        spot in 50.0f64..200.0,
        drift in -0.05f64..0.05,
        t in 0.0f64..3.0,
        k_over_f in 0.3f64..3.0,
    ) {
        let curve = DriftForwardCurve::new(spot, drift).unwrap();
        let surface = strike_grid();
        let m_view = to_moneyness_surface(&surface, &curve).unwrap();

        let k = k_over_f * curve.forward(t).unwrap();
        let direct = surface.volatility(t, k).unwrap();
        let via = m_view.volatility(t, k / curve.forward(t).unwrap()).unwrap();
        prop_assert!((direct - via).abs() <= 1e-14 * direct.abs());
    }
}
