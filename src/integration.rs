use nalgebra::SVector;

/// Gauss-Legendre points and weights over `(-1, 1)`
pub mod glq;

/// Tensor-product and symmetric rules over the cube `[-1, 1]^3` and the square `[-1, 1]^2`
pub mod cube;

/// Fixed rules over the reference triangle and tetrahedron
pub mod simplex;

/// A single quadrature sample: a location in a `D` dimensional parametric space and its weight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationPoint<const D: usize> {
    pub point: SVector<f64, D>,
    pub weight: f64,
}

/// Integration point inside a 3D reference element
pub type VolumePoint = IntegrationPoint<3>;

/// Integration point on a 2D reference face
pub type FacePoint = IntegrationPoint<2>;

impl<const D: usize> IntegrationPoint<D> {
    pub fn new(point: [f64; D], weight: f64) -> Self {
        Self {
            point: SVector::from(point),
            weight,
        }
    }
}

/// Apply a quadrature rule to some integrand `f`
///
/// ```
/// use fem_3d::integration::{integrate, cube::tensor_rule_3d};
///
/// // integrate u^2 * w^2 over [-1, 1]^3
/// let rule = tensor_rule_3d(3);
/// let solution = integrate(&rule, |uvw| uvw[0].powi(2) * uvw[2].powi(2));
///
/// assert!((solution - 8.0 / 9.0).abs() < 1e-12);
/// ```
pub fn integrate<const D: usize, F>(points: &[IntegrationPoint<D>], f: F) -> f64
where
    F: Fn(&SVector<f64, D>) -> f64,
{
    points.iter().map(|ip| f(&ip.point) * ip.weight).sum()
}
