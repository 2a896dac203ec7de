use super::{FacePoint, VolumePoint};
use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};

// 4 point, degree 2 rule for tetrahedra (barycentric coordinates, weights sum to 1)
const TET_4_A: f64 = 0.585_410_196_624_968_5;
const TET_4_B: f64 = 0.138_196_601_125_010_5;

/// Single centroid sample over the tetrahedron with the given parametric vertices (exact for linear integrands)
pub fn tetrahedron_1_point(vertices: &[[f64; 3]; 4]) -> Vec<VolumePoint> {
    vec![tet_point(vertices, [0.25; 4], tet_volume(vertices))]
}

/// Four point rule over the tetrahedron with the given parametric vertices (exact for quadratic integrands)
pub fn tetrahedron_4_point(vertices: &[[f64; 3]; 4]) -> Vec<VolumePoint> {
    let volume = tet_volume(vertices);
    (0..4)
        .map(|i| {
            let mut bary = [TET_4_B; 4];
            bary[i] = TET_4_A;
            tet_point(vertices, bary, volume / 4.0)
        })
        .collect()
}

/// Three point rule over the triangle with the given parametric vertices (exact for quadratic integrands)
///
/// ```
/// use fem_3d::integration::{integrate, simplex::triangle_3_point};
///
/// let rule = triangle_3_point(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
///
/// // area of the reference triangle
/// assert!((integrate(&rule, |_| 1.0) - 0.5).abs() < 1e-14);
/// // integral of s^2 over the reference triangle is 1/12
/// assert!((integrate(&rule, |st| st[0] * st[0]) - 1.0 / 12.0).abs() < 1e-14);
/// ```
pub fn triangle_3_point(vertices: &[[f64; 2]; 3]) -> Vec<FacePoint> {
    let [a, b, c] = vertices.map(Vector2::from);
    let area = Matrix2::from_columns(&[b - a, c - a]).determinant().abs() / 2.0;

    (0..3)
        .map(|i| {
            let mut bary = [1.0 / 6.0; 3];
            bary[i] = 2.0 / 3.0;
            let point = a * bary[0] + b * bary[1] + c * bary[2];
            FacePoint::new([point[0], point[1]], area / 3.0)
        })
        .collect()
}

fn tet_volume(vertices: &[[f64; 3]; 4]) -> f64 {
    let [a, b, c, d] = vertices.map(Vector3::from);
    Matrix3::from_columns(&[b - a, c - a, d - a]).determinant().abs() / 6.0
}

fn tet_point(vertices: &[[f64; 3]; 4], bary: [f64; 4], weight: f64) -> VolumePoint {
    let point = vertices
        .iter()
        .zip(bary.iter())
        .fold(Vector3::zeros(), |acc, (v, l)| acc + Vector3::from(*v) * *l);
    VolumePoint::new([point[0], point[1], point[2]], weight)
}
