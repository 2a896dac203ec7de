use crate::MAX_ELEMENT_VERTICES;
use nalgebra::SVector;
use smallvec::SmallVec;

/// Shape function values at one parametric point (one per vertex)
pub type ShapeValues = SmallVec<[f64; MAX_ELEMENT_VERTICES]>;

/// Shape function gradients at one parametric point (one per vertex)
pub type ShapeGradients<const D: usize> = SmallVec<[SVector<f64, D>; MAX_ELEMENT_VERTICES]>;

/// Multilinear shape functions over `[-1, 1]^D` for vertices at the corners `c ∈ {-1, 1}^D`
///
/// `N_i = Π_j (1 + x_j c_ij) / 2^D`
pub fn multilinear<const D: usize>(corners: &[[f64; D]], x: &SVector<f64, D>) -> ShapeValues {
    let scale = 0.5_f64.powi(D as i32);
    corners
        .iter()
        .map(|c| scale * product_except(c, x, None))
        .collect()
}

pub fn multilinear_derivatives<const D: usize>(
    corners: &[[f64; D]],
    x: &SVector<f64, D>,
) -> ShapeGradients<D> {
    let scale = 0.5_f64.powi(D as i32);
    corners
        .iter()
        .map(|c| SVector::from_fn(|k, _| scale * c[k] * product_except(c, x, Some(k))))
        .collect()
}

/// Quadratic serendipity shape functions over `[-1, 1]^D`
///
/// Vertices with every coordinate in `{-1, 1}` are corners:
/// `N_i = Π_j (1 + x_j c_ij) (Σ_j x_j c_ij - (D - 1)) / 2^D`
///
/// Vertices with exactly one zero coordinate (along axis `k`) are mid-edge nodes:
/// `N_i = (1 - x_k^2) Π_{j≠k} (1 + x_j c_ij) / 2^(D-1)`
pub fn serendipity<const D: usize>(vertices: &[[f64; D]], x: &SVector<f64, D>) -> ShapeValues {
    vertices
        .iter()
        .map(|c| match mid_edge_axis(c) {
            None => {
                let scale = 0.5_f64.powi(D as i32);
                scale * product_except(c, x, None) * (linear_sum(c, x) - (D as f64 - 1.0))
            }
            Some(k) => {
                let scale = 0.5_f64.powi(D as i32 - 1);
                scale * (1.0 - x[k] * x[k]) * product_except(c, x, Some(k))
            }
        })
        .collect()
}

pub fn serendipity_derivatives<const D: usize>(
    vertices: &[[f64; D]],
    x: &SVector<f64, D>,
) -> ShapeGradients<D> {
    vertices
        .iter()
        .map(|c| match mid_edge_axis(c) {
            None => {
                let scale = 0.5_f64.powi(D as i32);
                let sum = linear_sum(c, x) - (D as f64 - 1.0);
                SVector::from_fn(|k, _| {
                    // d/dx_k [(1 + x_k c_k) (Σ - (D-1))] = c_k (Σ - (D-1)) + (1 + x_k c_k) c_k
                    scale * c[k] * product_except(c, x, Some(k)) * (sum + 1.0 + x[k] * c[k])
                })
            }
            Some(m) => {
                let scale = 0.5_f64.powi(D as i32 - 1);
                SVector::from_fn(|k, _| {
                    if k == m {
                        scale * -2.0 * x[m] * product_except(c, x, Some(m))
                    } else {
                        let others: f64 = (0..D)
                            .filter(|j| *j != m && *j != k)
                            .map(|j| 1.0 + x[j] * c[j])
                            .product();
                        scale * (1.0 - x[m] * x[m]) * c[k] * others
                    }
                })
            }
        })
        .collect()
}

// Π_{j≠skip} (1 + x_j c_j)
fn product_except<const D: usize>(c: &[f64; D], x: &SVector<f64, D>, skip: Option<usize>) -> f64 {
    (0..D)
        .filter(|j| Some(*j) != skip)
        .map(|j| 1.0 + x[j] * c[j])
        .product()
}

fn linear_sum<const D: usize>(c: &[f64; D], x: &SVector<f64, D>) -> f64 {
    (0..D).map(|j| x[j] * c[j]).sum()
}

fn mid_edge_axis<const D: usize>(c: &[f64; D]) -> Option<usize> {
    let mut zeros = (0..D).filter(|j| c[*j] == 0.0);
    let axis = zeros.next();
    debug_assert!(zeros.next().is_none(), "serendipity vertices may have at most one zero coordinate");
    axis
}
