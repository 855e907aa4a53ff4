//! Reported quantities and their values.

use std::fmt;

/// A quantity reported by the Greek engine.
///
/// Model Greeks come from the PDE grids and surface bumps; `Black*` kinds
/// are the Black formulas evaluated at the implied volatility of the PDE
/// price. All prices are undiscounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GreekKind {
    /// Option price.
    Price,
    /// Price divided by the forward.
    NormalisedPrice,
    /// ∂V/∂F with the surface moving with the forward.
    Delta,
    /// ∂V/∂K.
    DualDelta,
    /// ∂²V/∂F² with the surface moving with the forward.
    Gamma,
    /// ∂²V/∂K².
    DualGamma,
    /// ∂V/∂σ for a parallel shift of the local volatility surface.
    Vega,
    /// ∂²V/∂F∂σ.
    Vanna,
    /// ∂²V/∂σ².
    Vomma,
    /// Black implied volatility of the price.
    ImpliedVol,
    /// Black price at the implied volatility.
    BlackPrice,
    /// Black delta.
    BlackDelta,
    /// Black dual delta.
    BlackDualDelta,
    /// Black gamma.
    BlackGamma,
    /// Black dual gamma.
    BlackDualGamma,
    /// Black vega.
    BlackVega,
    /// Black vanna.
    BlackVanna,
    /// Black vomma.
    BlackVomma,
}

impl GreekKind {
    /// Every kind, in declaration order.
    pub const ALL: [GreekKind; 18] = [
        GreekKind::Price,
        GreekKind::NormalisedPrice,
        GreekKind::Delta,
        GreekKind::DualDelta,
        GreekKind::Gamma,
        GreekKind::DualGamma,
        GreekKind::Vega,
        GreekKind::Vanna,
        GreekKind::Vomma,
        GreekKind::ImpliedVol,
        GreekKind::BlackPrice,
        GreekKind::BlackDelta,
        GreekKind::BlackDualDelta,
        GreekKind::BlackGamma,
        GreekKind::BlackDualGamma,
        GreekKind::BlackVega,
        GreekKind::BlackVanna,
        GreekKind::BlackVomma,
    ];

    /// Position in [`GreekKind::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// True for kinds derived from the implied volatility.
    #[inline]
    pub fn is_black(self) -> bool {
        matches!(
            self,
            GreekKind::ImpliedVol
                | GreekKind::BlackPrice
                | GreekKind::BlackDelta
                | GreekKind::BlackDualDelta
                | GreekKind::BlackGamma
                | GreekKind::BlackDualGamma
                | GreekKind::BlackVega
                | GreekKind::BlackVanna
                | GreekKind::BlackVomma
        )
    }

    /// True for kinds that need volatility-bumped solves.
    #[inline]
    pub fn needs_vol_bumps(self) -> bool {
        matches!(self, GreekKind::Vega | GreekKind::Vanna | GreekKind::Vomma)
    }

    /// Kind name as written in configuration files and reports.
    pub fn name(self) -> &'static str {
        match self {
            GreekKind::Price => "Price",
            GreekKind::NormalisedPrice => "NormalisedPrice",
            GreekKind::Delta => "Delta",
            GreekKind::DualDelta => "DualDelta",
            GreekKind::Gamma => "Gamma",
            GreekKind::DualGamma => "DualGamma",
            GreekKind::Vega => "Vega",
            GreekKind::Vanna => "Vanna",
            GreekKind::Vomma => "Vomma",
            GreekKind::ImpliedVol => "ImpliedVol",
            GreekKind::BlackPrice => "BlackPrice",
            GreekKind::BlackDelta => "BlackDelta",
            GreekKind::BlackDualDelta => "BlackDualDelta",
            GreekKind::BlackGamma => "BlackGamma",
            GreekKind::BlackDualGamma => "BlackDualGamma",
            GreekKind::BlackVega => "BlackVega",
            GreekKind::BlackVanna => "BlackVanna",
            GreekKind::BlackVomma => "BlackVomma",
        }
    }
}

impl fmt::Display for GreekKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of one Greek at one node.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::GreekValue;
///
/// let v = GreekValue::Available(0.25);
/// assert_eq!(v.value(), Some(0.25));
///
/// let u = GreekValue::Unavailable("price at intrinsic".to_string());
/// assert!(!u.is_available());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GreekValue {
    /// Computed value.
    Available(f64),
    /// Not computable, with the reason.
    Unavailable(String),
}

impl GreekValue {
    /// The value, if available.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        match self {
            GreekValue::Available(v) => Some(*v),
            GreekValue::Unavailable(_) => None,
        }
    }

    /// True if a value was computed.
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, GreekValue::Available(_))
    }
}

impl fmt::Display for GreekValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreekValue::Available(v) => write!(f, "{}", v),
            GreekValue::Unavailable(reason) => write!(f, "n/a ({})", reason),
        }
    }
}
