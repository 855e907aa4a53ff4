//! Boundary conditions at the ends of the space domain.
//!
//! | direction | payoff | lower | upper |
//! |---|---|---|---|
//! | forward | call | Dirichlet 1 | Dirichlet 0 |
//! | forward | put | Dirichlet 0 | Neumann 1 |
//! | backward | call | Dirichlet 0 | Neumann 1 |
//! | backward | put | Dirichlet K | Neumann 0 |
//!
//! Forward grids hold the normalised price `C/F` as a function of moneyness,
//! backward grids the absolute price as a function of the forward level.

use pricer_models::instruments::EuropeanVanillaOption;

use super::mesh::Direction;

/// End of the space domain a condition applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryLocation {
    /// First node.
    Lower,
    /// Last node.
    Upper,
}

/// Condition imposed on the solution at one end of the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryCondition {
    /// Fixed value.
    Dirichlet {
        /// Value at the boundary node.
        level: f64,
        /// Boundary end.
        location: BoundaryLocation,
    },
    /// Fixed first derivative.
    Neumann {
        /// Derivative at the boundary.
        slope: f64,
        /// Boundary end.
        location: BoundaryLocation,
    },
}

impl BoundaryCondition {
    /// End of the domain the condition applies to.
    #[inline]
    pub fn location(&self) -> BoundaryLocation {
        match self {
            Self::Dirichlet { location, .. } | Self::Neumann { location, .. } => *location,
        }
    }
}

/// Picks the boundary conditions of a solve.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::EuropeanVanillaOption;
/// use pricer_pricing::pde::{BoundaryCondition, BoundaryConditionSelector, BoundaryLocation, Direction};
///
/// let put = EuropeanVanillaOption::put(90.0, 1.0).unwrap();
/// let (lower, upper) = BoundaryConditionSelector::select(&put, Direction::Backward);
///
/// assert_eq!(lower, BoundaryCondition::Dirichlet { level: 90.0, location: BoundaryLocation::Lower });
/// assert_eq!(upper, BoundaryCondition::Neumann { slope: 0.0, location: BoundaryLocation::Upper });
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundaryConditionSelector;

impl BoundaryConditionSelector {
    /// Lower and upper conditions for `option` solved in `direction`.
    pub fn select(
        option: &EuropeanVanillaOption<f64>,
        direction: Direction,
    ) -> (BoundaryCondition, BoundaryCondition) {
        use BoundaryLocation::{Lower, Upper};

        match (direction, option.is_call()) {
            (Direction::Forward, true) => (
                BoundaryCondition::Dirichlet {
                    level: 1.0,
                    location: Lower,
                },
                BoundaryCondition::Dirichlet {
                    level: 0.0,
                    location: Upper,
                },
            ),
            (Direction::Forward, false) => (
                BoundaryCondition::Dirichlet {
                    level: 0.0,
                    location: Lower,
                },
                BoundaryCondition::Neumann {
                    slope: 1.0,
                    location: Upper,
                },
            ),
            (Direction::Backward, true) => (
                BoundaryCondition::Dirichlet {
                    level: 0.0,
                    location: Lower,
                },
                BoundaryCondition::Neumann {
                    slope: 1.0,
                    location: Upper,
                },
            ),
            (Direction::Backward, false) => (
                BoundaryCondition::Dirichlet {
                    level: option.strike(),
                    location: Lower,
                },
                BoundaryCondition::Neumann {
                    slope: 0.0,
                    location: Upper,
                },
            ),
        }
    }
}
