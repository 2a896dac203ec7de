use super::glq::gauss_quadrature_points;
use super::{FacePoint, VolumePoint};

/// n by n Gauss-Legendre rule over the square `[-1, 1]^2`
///
/// ```
/// use fem_3d::integration::{integrate, cube::tensor_rule_2d};
///
/// let rule = tensor_rule_2d(2);
/// assert_eq!(rule.len(), 4);
///
/// // integrate (u^2 * v^2) over the square
/// let solution = integrate(&rule, |uv| uv[0].powi(2) * uv[1].powi(2));
/// assert!((solution - 4.0 / 9.0).abs() < 1e-12);
/// ```
pub fn tensor_rule_2d(n: usize) -> Vec<FacePoint> {
    let (points, weights) = gauss_quadrature_points(n);

    let mut rule = Vec::with_capacity(n * n);
    for (u, u_w) in points.iter().zip(weights.iter()) {
        for (v, v_w) in points.iter().zip(weights.iter()) {
            rule.push(FacePoint::new([*u, *v], u_w * v_w));
        }
    }
    rule
}

/// n by n by n Gauss-Legendre rule over the cube `[-1, 1]^3`
pub fn tensor_rule_3d(n: usize) -> Vec<VolumePoint> {
    let (points, weights) = gauss_quadrature_points(n);

    let mut rule = Vec::with_capacity(n * n * n);
    for (u, u_w) in points.iter().zip(weights.iter()) {
        for (v, v_w) in points.iter().zip(weights.iter()) {
            for (w, w_w) in points.iter().zip(weights.iter()) {
                rule.push(VolumePoint::new([*u, *v, *w], u_w * v_w * w_w));
            }
        }
    }
    rule
}

/// Irons' 14 point rule over the cube `[-1, 1]^3`
///
/// Six points on the axes (near the face centers) and eight points on the diagonals (near the corners).
/// Integrates all monomials of total degree 5 or less exactly while using roughly half the points of a 3x3x3 Gauss rule.
pub fn irons_14_point_rule() -> Vec<VolumePoint> {
    let b = (19.0_f64 / 30.0).sqrt();
    let c = (19.0_f64 / 33.0).sqrt();
    let w_axis = 320.0 / 361.0;
    let w_diag = 121.0 / 361.0;

    let mut rule = Vec::with_capacity(14);
    for axis in 0..3 {
        for sign in [-1.0, 1.0] {
            let mut p = [0.0; 3];
            p[axis] = sign * b;
            rule.push(VolumePoint::new(p, w_axis));
        }
    }
    for su in [-1.0, 1.0] {
        for sv in [-1.0, 1.0] {
            for sw in [-1.0, 1.0] {
                rule.push(VolumePoint::new([su * c, sv * c, sw * c], w_diag));
            }
        }
    }
    rule
}
