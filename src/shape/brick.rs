use super::face::{FaceDef, FaceShape};
use super::serendipity::{
    multilinear, multilinear_derivatives, serendipity, serendipity_derivatives, ShapeGradients,
    ShapeValues,
};
use nalgebra::Vector3;

/// Parametric locations of the corners and mid-edge nodes of the reference brick `[-1, 1]^3`
///
/// ```text
///        7-------18------6
///       /|              /|
///     19 |            17 |
///     /  15          /   14
///    4-------16-----5    |
///    |   |          |    |
///    |   3------10--|----2
///   12  /          13   /
///    | 11            |  9
///    |/              | /
///    0-------8-------1
/// ```
/// `u` points from 0 to 1, `v` from 0 to 3 and `w` from 0 to 4
pub static BRICK_VERTICES: [[f64; 3]; 20] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [0.0, -1.0, -1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0],
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0],
];

/// Corner pairs of the mid-edge nodes 8..=19
pub const BRICK_MID_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
];

// bottom (w = -1), top (w = 1), front (v = -1), right (u = 1), back (v = 1), left (u = -1)
// corners are counter-clockwise when viewed from outside the element
pub static LINEAR_BRICK_FACES: [FaceDef; 6] = [
    FaceDef::new(FaceShape::Quad4, &[0, 3, 2, 1]),
    FaceDef::new(FaceShape::Quad4, &[4, 5, 6, 7]),
    FaceDef::new(FaceShape::Quad4, &[0, 1, 5, 4]),
    FaceDef::new(FaceShape::Quad4, &[1, 2, 6, 5]),
    FaceDef::new(FaceShape::Quad4, &[2, 3, 7, 6]),
    FaceDef::new(FaceShape::Quad4, &[3, 0, 4, 7]),
];

pub static QUADRATIC_BRICK_FACES: [FaceDef; 6] = [
    FaceDef::new(FaceShape::Quad8, &[0, 3, 2, 1, 11, 10, 9, 8]),
    FaceDef::new(FaceShape::Quad8, &[4, 5, 6, 7, 16, 17, 18, 19]),
    FaceDef::new(FaceShape::Quad8, &[0, 1, 5, 4, 8, 13, 16, 12]),
    FaceDef::new(FaceShape::Quad8, &[1, 2, 6, 5, 9, 14, 17, 13]),
    FaceDef::new(FaceShape::Quad8, &[2, 3, 7, 6, 10, 15, 18, 14]),
    FaceDef::new(FaceShape::Quad8, &[3, 0, 4, 7, 11, 12, 19, 15]),
];

pub fn shape_functions(order: u8, uvw: &Vector3<f64>) -> ShapeValues {
    match order {
        1 => multilinear(&BRICK_VERTICES[..8], uvw),
        _ => serendipity(&BRICK_VERTICES, uvw),
    }
}

pub fn shape_function_derivatives(order: u8, uvw: &Vector3<f64>) -> ShapeGradients<3> {
    match order {
        1 => multilinear_derivatives(&BRICK_VERTICES[..8], uvw),
        _ => serendipity_derivatives(&BRICK_VERTICES, uvw),
    }
}

/// Whether `uvw` lies in the reference brick (within `tol`)
pub fn contains(uvw: &Vector3<f64>, tol: f64) -> bool {
    uvw.iter().all(|x| x.abs() <= 1.0 + tol)
}
