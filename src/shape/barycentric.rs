use super::serendipity::{ShapeGradients, ShapeValues};
use nalgebra::SVector;

/// Lagrange shape functions on a simplex, expressed through its barycentric coordinates
///
/// * order 1: `N_i = L_i`
/// * order 2: corners `N_i = L_i (2 L_i - 1)`, mid-edge nodes `N_ab = 4 L_a L_b`
///
/// `mid_edges` lists the corner pair of each mid-edge node, in vertex order.
pub fn lagrange(order: u8, bary: &[f64], mid_edges: &[[usize; 2]]) -> ShapeValues {
    match order {
        1 => bary.iter().copied().collect(),
        2 => bary
            .iter()
            .map(|l| l * (2.0 * l - 1.0))
            .chain(mid_edges.iter().map(|[a, b]| 4.0 * bary[*a] * bary[*b]))
            .collect(),
        _ => unreachable!("simplex elements are order 1 or 2"),
    }
}

/// Parametric gradients of [lagrange], given the (constant) gradients of the barycentric coordinates
pub fn lagrange_derivatives<const D: usize>(
    order: u8,
    bary: &[f64],
    bary_d: &[SVector<f64, D>],
    mid_edges: &[[usize; 2]],
) -> ShapeGradients<D> {
    match order {
        1 => bary_d.iter().copied().collect(),
        2 => bary
            .iter()
            .zip(bary_d.iter())
            .map(|(l, dl)| dl * (4.0 * l - 1.0))
            .chain(
                mid_edges
                    .iter()
                    .map(|[a, b]| (bary_d[*b] * bary[*a] + bary_d[*a] * bary[*b]) * 4.0),
            )
            .collect(),
        _ => unreachable!("simplex elements are order 1 or 2"),
    }
}
