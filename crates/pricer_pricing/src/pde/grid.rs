//! Terminal slice of a PDE solve.

use super::error::{ConfigError, PdeError};
use super::stencil::{first_derivatives, second_derivatives};

/// Meaning of the space coordinate of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridAxis {
    /// Moneyness `m = K / F(T)`; values are prices divided by `F(T)`.
    Moneyness,
    /// Level of the forward `F(T)`; values are absolute prices.
    ForwardLevel,
}

/// Solution at the last time node together with its space derivatives.
#[derive(Clone, Debug, PartialEq)]
pub struct TerminalGrid {
    nodes: Vec<f64>,
    values: Vec<f64>,
    first: Vec<f64>,
    second: Vec<f64>,
    forward: f64,
    expiry: f64,
    axis: GridAxis,
}

impl TerminalGrid {
    /// Builds the grid and differentiates the slice on its non-uniform nodes.
    ///
    /// # Errors
    ///
    /// `PdeError::Config` if fewer than three nodes are given or the lengths differ.
    pub fn new(
        nodes: Vec<f64>,
        values: Vec<f64>,
        forward: f64,
        expiry: f64,
        axis: GridAxis,
    ) -> Result<Self, PdeError> {
        if nodes.len() < 3 || nodes.len() != values.len() {
            return Err(ConfigError::InvalidParameter {
                name: "grid",
                value: format!(
                    "need at least 3 nodes with one value each, got {} nodes and {} values",
                    nodes.len(),
                    values.len()
                ),
            }
            .into());
        }
        let first = first_derivatives(&nodes, &values);
        let second = second_derivatives(&nodes, &values);
        Ok(Self {
            nodes,
            values,
            first,
            second,
            forward,
            expiry,
            axis,
        })
    }

    /// Space nodes.
    #[inline]
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Solution values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First derivative along the axis.
    #[inline]
    pub fn first_derivatives(&self) -> &[f64] {
        &self.first
    }

    /// Second derivative along the axis.
    #[inline]
    pub fn second_derivatives(&self) -> &[f64] {
        &self.second
    }

    /// Forward `F(T)` used to build the grid.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Expiry of the solved option.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Space coordinate.
    #[inline]
    pub fn axis(&self) -> GridAxis {
        self.axis
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a grid holds at least three nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `(first node, last node)`.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.nodes[0], self.nodes[self.nodes.len() - 1])
    }

    /// Strike of node `i`.
    ///
    /// `m·F` on a moneyness grid; backward grids carry a single strike, so the
    /// node coordinate (a forward level) is returned unchanged.
    #[inline]
    pub fn strike_at(&self, i: usize) -> f64 {
        match self.axis {
            GridAxis::Moneyness => self.nodes[i] * self.forward,
            GridAxis::ForwardLevel => self.nodes[i],
        }
    }
}
