//! Single-strike results read from a grid collection.

use pricer_core::math::interpolators::{Interpolator, NearestPointInterpolator};
use pricer_core::types::InterpolationError;

use super::collection::GridGreekCollection;
use super::kind::GreekKind;
use crate::pde::PdeError;

/// Reads one Greek at an arbitrary strike from a [`GridGreekCollection`].
///
/// Values are interpolated with a Lagrange polynomial through the four
/// nearest nodes where the Greek is available; unavailable nodes are
/// skipped.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{FlatForwardCurve, FlatLocalVol};
/// use pricer_models::analytical::Black76;
/// use pricer_models::instruments::EuropeanVanillaOption;
/// use pricer_pricing::greeks::{GreekKind, LocalVolGreekEngine, SingleResultResolver};
/// use pricer_pricing::pde::{PdeConfig, PdeError};
///
/// let surface = FlatLocalVol::strike(0.2).unwrap();
/// let curve = FlatForwardCurve::new(100.0).unwrap();
/// let option = EuropeanVanillaOption::put(100.0, 1.0).unwrap();
///
/// let greeks = LocalVolGreekEngine::new(PdeConfig::default())
///     .grid_greeks_for(&surface, &curve, &option, &[GreekKind::Price])
///     .unwrap();
/// let resolver = SingleResultResolver::new(&greeks, GreekKind::Price);
///
/// let black = Black76::new(100.0, 0.2).unwrap().price(92.5, 1.0, false);
/// assert!((resolver.result(92.5).unwrap() - black).abs() < 1e-2);
///
/// assert!(matches!(resolver.result(400.0), Err(PdeError::OutOfDomain { .. })));
/// ```
#[derive(Clone, Debug)]
pub struct SingleResultResolver<'a> {
    collection: &'a GridGreekCollection,
    kind: GreekKind,
}

impl<'a> SingleResultResolver<'a> {
    /// Resolver for `kind` over `collection`.
    pub fn new(collection: &'a GridGreekCollection, kind: GreekKind) -> Self {
        Self { collection, kind }
    }

    /// Resolved kind.
    #[inline]
    pub fn kind(&self) -> GreekKind {
        self.kind
    }

    /// The Greek at `strike`.
    ///
    /// # Errors
    ///
    /// - `PdeError::OutOfDomain` if `strike` lies outside the collection's strikes
    /// - `PdeError::Unavailable` if fewer than two nodes carry the Greek, the
    ///   kind was not computed, or `strike` lies outside the available nodes
    pub fn result(&self, strike: f64) -> Result<f64, PdeError> {
        let unavailable = || PdeError::Unavailable {
            kind: self.kind,
            strike,
        };

        let (min, max) = self.collection.strike_range().ok_or_else(unavailable)?;
        if !(strike >= min && strike <= max) {
            return Err(PdeError::OutOfDomain {
                x: strike,
                min,
                max,
            });
        }

        let column = self.collection.column(self.kind).ok_or_else(unavailable)?;
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .collection
            .strikes()
            .iter()
            .zip(column)
            .filter_map(|(&k, v)| v.value().map(|v| (k, v)))
            .unzip();
        if xs.len() < 2 {
            return Err(unavailable());
        }

        let interpolator = NearestPointInterpolator::four_point(&xs, &ys)?;
        interpolator.interpolate(strike).map_err(|err| match err {
            InterpolationError::OutOfBounds { .. } => unavailable(),
            other => other.into(),
        })
    }
}
