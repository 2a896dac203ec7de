use super::barycentric::{lagrange, lagrange_derivatives};
use super::face::{FaceDef, FaceShape};
use super::serendipity::{ShapeGradients, ShapeValues};
use crate::integration::{simplex, VolumePoint};
use nalgebra::Vector3;

/// Parametric locations of the corners and mid-edge nodes of the reference tetrahedron
///
/// The corners span the region `0 <= w <= v <= u <= 1`:
/// ```text
///                 3 (1, 1, 1)
///                /|\
///               / | \
///              7  |  8
///             /   9   \
///            /    |    \
///  (0, 0, 0) 0 ---|-4---- 1 (1, 0, 0)
///             \   |    /
///              6  |   5
///               \ |  /
///                \| /
///                 2 (1, 1, 0)
/// ```
pub static TET_VERTICES: [[f64; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
    [0.5, 0.0, 0.0],
    [1.0, 0.5, 0.0],
    [0.5, 0.5, 0.0],
    [0.5, 0.5, 0.5],
    [1.0, 0.5, 0.5],
    [1.0, 1.0, 0.5],
];

/// Corner pairs of the mid-edge nodes 4..=9
pub const TET_MID_EDGES: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];

// corners of each face are ordered such that (∂x/∂s × ∂x/∂t) points out of the element
pub static LINEAR_TET_FACES: [FaceDef; 4] = [
    FaceDef::new(FaceShape::Tri3, &[0, 2, 1]),
    FaceDef::new(FaceShape::Tri3, &[0, 1, 3]),
    FaceDef::new(FaceShape::Tri3, &[0, 3, 2]),
    FaceDef::new(FaceShape::Tri3, &[1, 2, 3]),
];

pub static QUADRATIC_TET_FACES: [FaceDef; 4] = [
    FaceDef::new(FaceShape::Tri6, &[0, 2, 1, 6, 5, 4]),
    FaceDef::new(FaceShape::Tri6, &[0, 1, 3, 4, 8, 7]),
    FaceDef::new(FaceShape::Tri6, &[0, 3, 2, 7, 9, 6]),
    FaceDef::new(FaceShape::Tri6, &[1, 2, 3, 5, 9, 8]),
];

// ∇L_i (constant over the element)
const BARY_GRADIENTS: [[f64; 3]; 4] = [
    [-1.0, 0.0, 0.0],
    [1.0, -1.0, 0.0],
    [0.0, 1.0, -1.0],
    [0.0, 0.0, 1.0],
];

/// Barycentric coordinates of a parametric point with respect to the corners 0..=3
pub fn barycentric(uvw: &Vector3<f64>) -> [f64; 4] {
    [1.0 - uvw[0], uvw[0] - uvw[1], uvw[1] - uvw[2], uvw[2]]
}

pub fn shape_functions(order: u8, uvw: &Vector3<f64>) -> ShapeValues {
    lagrange(order, &barycentric(uvw), &TET_MID_EDGES)
}

pub fn shape_function_derivatives(order: u8, uvw: &Vector3<f64>) -> ShapeGradients<3> {
    lagrange_derivatives(
        order,
        &barycentric(uvw),
        &BARY_GRADIENTS.map(Vector3::from),
        &TET_MID_EDGES,
    )
}

pub fn volume_integration_points(order: u8) -> Vec<VolumePoint> {
    let corners = [TET_VERTICES[0], TET_VERTICES[1], TET_VERTICES[2], TET_VERTICES[3]];
    match order {
        1 => simplex::tetrahedron_1_point(&corners),
        _ => simplex::tetrahedron_4_point(&corners),
    }
}

/// Whether `uvw` lies in the reference tetrahedron (within `tol`)
pub fn contains(uvw: &Vector3<f64>, tol: f64) -> bool {
    barycentric(uvw).iter().all(|l| *l >= -tol)
}
