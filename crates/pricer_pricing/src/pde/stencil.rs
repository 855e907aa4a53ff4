//! Three-point finite-difference stencils on non-uniform meshes.
//!
//! With `dx0 = x_i - x_{i-1}` and `dx1 = x_{i+1} - x_i` the central weights on
//! `(f_{i-1}, f_i, f_{i+1})` are
//!
//! ```text
//! f'  : [-dx1/(dx0(dx0+dx1)), (dx1-dx0)/(dx0 dx1), dx0/(dx1(dx0+dx1))]
//! f'' : [2/(dx0(dx0+dx1)),    -2/(dx0 dx1),        2/(dx1(dx0+dx1))]
//! ```
//!
//! Both are exact for quadratics. End nodes use one-sided second-order first
//! derivatives and the second derivative of the neighbouring interior node.

/// Central weights at an interior node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Stencil {
    pub(crate) first: [f64; 3],
    pub(crate) second: [f64; 3],
}

impl Stencil {
    /// Weights for spacings `dx0` (left) and `dx1` (right).
    #[inline]
    pub(crate) fn central(dx0: f64, dx1: f64) -> Self {
        let sum = dx0 + dx1;
        Self {
            first: [
                -dx1 / (dx0 * sum),
                (dx1 - dx0) / (dx0 * dx1),
                dx0 / (dx1 * sum),
            ],
            second: [2.0 / (dx0 * sum), -2.0 / (dx0 * dx1), 2.0 / (dx1 * sum)],
        }
    }

    /// Stencils of all interior nodes; entry `i` belongs to node `i + 1`.
    pub(crate) fn interior(nodes: &[f64]) -> Vec<Self> {
        nodes
            .windows(3)
            .map(|w| Self::central(w[1] - w[0], w[2] - w[1]))
            .collect()
    }
}

#[inline]
fn apply(weights: &[f64; 3], values: &[f64]) -> f64 {
    weights[0] * values[0] + weights[1] * values[1] + weights[2] * values[2]
}

/// First derivative at every node. Requires at least three nodes.
pub(crate) fn first_derivatives(nodes: &[f64], values: &[f64]) -> Vec<f64> {
    let n = nodes.len();
    let mut out = Vec::with_capacity(n);

    let (dx0, dx1) = (nodes[1] - nodes[0], nodes[2] - nodes[1]);
    let sum = dx0 + dx1;
    let lower = [
        -(2.0 * dx0 + dx1) / (dx0 * sum),
        sum / (dx0 * dx1),
        -dx0 / (dx1 * sum),
    ];
    out.push(apply(&lower, &values[0..3]));

    for (i, w) in nodes.windows(3).enumerate() {
        let stencil = Stencil::central(w[1] - w[0], w[2] - w[1]);
        out.push(apply(&stencil.first, &values[i..i + 3]));
    }

    let (dx0, dx1) = (nodes[n - 2] - nodes[n - 3], nodes[n - 1] - nodes[n - 2]);
    let sum = dx0 + dx1;
    let upper = [
        dx1 / (dx0 * sum),
        -sum / (dx0 * dx1),
        (dx0 + 2.0 * dx1) / (dx1 * sum),
    ];
    out.push(apply(&upper, &values[n - 3..n]));
    out
}

/// Second derivative at every node. Requires at least three nodes.
pub(crate) fn second_derivatives(nodes: &[f64], values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = nodes
        .windows(3)
        .enumerate()
        .map(|(i, w)| {
            let stencil = Stencil::central(w[1] - w[0], w[2] - w[1]);
            apply(&stencil.second, &values[i..i + 3])
        })
        .collect();
    let first = out[0];
    let last = out[out.len() - 1];
    out.insert(0, first);
    out.push(last);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_for_quadratics() {
        let nodes = [0.0, 0.3, 0.5, 1.1, 1.2, 2.0];
        let values: Vec<f64> = nodes.iter().map(|x| 3.0 * x * x - 2.0 * x + 1.0).collect();

        let d1 = first_derivatives(&nodes, &values);
        let d2 = second_derivatives(&nodes, &values);
        assert_eq!(d1.len(), nodes.len());
        assert_eq!(d2.len(), nodes.len());
        for (i, x) in nodes.iter().enumerate() {
            assert_relative_eq!(d1[i], 6.0 * x - 2.0, epsilon = 1e-12);
            assert_relative_eq!(d2[i], 6.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_uniform_weights() {
        let stencil = Stencil::central(0.5, 0.5);
        assert_relative_eq!(stencil.first[0], -1.0);
        assert_relative_eq!(stencil.first[1], 0.0);
        assert_relative_eq!(stencil.first[2], 1.0);
        assert_relative_eq!(stencil.second[0], 4.0);
        assert_relative_eq!(stencil.second[1], -8.0);
        assert_relative_eq!(stencil.second[2], 4.0);
    }
}
