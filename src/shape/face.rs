use super::barycentric::{lagrange, lagrange_derivatives};
use super::serendipity::{
    multilinear, multilinear_derivatives, serendipity, serendipity_derivatives, ShapeGradients,
    ShapeValues,
};
use crate::integration::{cube, simplex, FacePoint};
use nalgebra::Vector2;
use std::sync::OnceLock;

/// Reference triangle `(0, 0), (1, 0), (0, 1)` followed by its mid-edge nodes
static TRI_VERTICES: [[f64; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [0.5, 0.0],
    [0.5, 0.5],
    [0.0, 0.5],
];

const TRI_MID_EDGES: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];

/// Reference square `[-1, 1]^2` (counter-clockwise corners) followed by its mid-edge nodes
static QUAD_VERTICES: [[f64; 2]; 8] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
    [0.0, -1.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [-1.0, 0.0],
];

static FACE_RULES: OnceLock<[Vec<FacePoint>; 4]> = OnceLock::new();

/// Parametric description of an Element's face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceShape {
    /// 3 node triangle
    Tri3,
    /// 6 node triangle (corners, then mid-edge nodes)
    Tri6,
    /// 4 node quadrilateral
    Quad4,
    /// 8 node serendipity quadrilateral (corners, then mid-edge nodes)
    Quad8,
}

impl FaceShape {
    pub fn num_vertices(&self) -> usize {
        match self {
            Self::Tri3 => 3,
            Self::Tri6 => 6,
            Self::Quad4 => 4,
            Self::Quad8 => 8,
        }
    }

    pub fn num_corners(&self) -> usize {
        match self {
            Self::Tri3 | Self::Tri6 => 3,
            Self::Quad4 | Self::Quad8 => 4,
        }
    }

    /// Parametric `(s, t)` coordinates of the face's vertices
    pub fn vertices(&self) -> &'static [[f64; 2]] {
        match self {
            Self::Tri3 | Self::Tri6 => &TRI_VERTICES[..self.num_vertices()],
            Self::Quad4 | Self::Quad8 => &QUAD_VERTICES[..self.num_vertices()],
        }
    }

    pub fn shape_functions(&self, st: &Vector2<f64>) -> ShapeValues {
        match self {
            Self::Tri3 => lagrange(1, &tri_barycentric(st), &TRI_MID_EDGES),
            Self::Tri6 => lagrange(2, &tri_barycentric(st), &TRI_MID_EDGES),
            Self::Quad4 => multilinear(&QUAD_VERTICES[..4], st),
            Self::Quad8 => serendipity(&QUAD_VERTICES, st),
        }
    }

    pub fn shape_function_derivatives(&self, st: &Vector2<f64>) -> ShapeGradients<2> {
        let tri_gradients = [
            Vector2::new(-1.0, -1.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
        ];
        match self {
            Self::Tri3 => lagrange_derivatives(1, &tri_barycentric(st), &tri_gradients, &TRI_MID_EDGES),
            Self::Tri6 => lagrange_derivatives(2, &tri_barycentric(st), &tri_gradients, &TRI_MID_EDGES),
            Self::Quad4 => multilinear_derivatives(&QUAD_VERTICES[..4], st),
            Self::Quad8 => serendipity_derivatives(&QUAD_VERTICES, st),
        }
    }

    /// Surface quadrature over the reference face
    ///
    /// Exact for the tangent cross product of any face whose geometry is of the face's own order
    pub fn integration_points(&self) -> &'static [FacePoint] {
        let rules = FACE_RULES.get_or_init(|| {
            let tri = [TRI_VERTICES[0], TRI_VERTICES[1], TRI_VERTICES[2]];
            [
                simplex::triangle_3_point(&tri),
                simplex::triangle_3_point(&tri),
                cube::tensor_rule_2d(2),
                cube::tensor_rule_2d(3),
            ]
        });

        &rules[*self as usize]
    }
}

fn tri_barycentric(st: &Vector2<f64>) -> [f64; 3] {
    [1.0 - st[0] - st[1], st[0], st[1]]
}

/// One face of a reference element: its parametric shape and the local Element vertices it is built from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceDef {
    pub shape: FaceShape,
    /// Local vertex indices (corners first, then mid-edge nodes) in the order expected by `shape`
    pub vertices: &'static [usize],
}

impl FaceDef {
    pub const fn new(shape: FaceShape, vertices: &'static [usize]) -> Self {
        Self { shape, vertices }
    }

    pub fn corners(&self) -> &'static [usize] {
        &self.vertices[..self.shape.num_corners()]
    }
}
