/// Shape functions over the barycentric coordinates of a simplex
pub mod barycentric;
/// 8 and 20 node hexahedral Elements over `[-1, 1]^3`
pub mod brick;
/// 2D face shapes used for oriented area integration
pub mod face;
/// Multilinear and quadratic serendipity shape functions over `[-1, 1]^D`
pub mod serendipity;
/// 4 and 10 node tetrahedral Elements over `0 <= w <= v <= u <= 1`
pub mod tetrahedron;

use crate::error::MeshError;
use crate::integration::{cube, VolumePoint};
use face::FaceDef;
use serendipity::{ShapeGradients, ShapeValues};

use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Parametric points closer than this to the edge of the reference domain are considered inside it
pub const PARAMETRIC_DOMAIN_TOLERANCE: f64 = 1e-12;

static CATALOG: OnceLock<Vec<ElementTypeShape>> = OnceLock::new();

/// Family of the reference domain an Element type is defined over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeCategory {
    /// hexahedral Elements, parametric coordinates in `[-1, 1]^3`
    Brick,
    /// tetrahedral Elements, parametric coordinates satisfying `0 <= w <= v <= u <= 1`
    Tetrahedron,
}

/// The supported Element types
///
/// The three quadratic brick variants share the same 20 node shape functions; they differ only in the
/// volume integration points used downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    /// 4 node tetrahedron
    LinearTetrahedron,
    /// 10 node tetrahedron
    QuadraticTetrahedron,
    /// 8 node brick
    LinearBrick,
    /// 20 node brick with 3x3x3 Gauss integration
    QuadraticBrick,
    /// 20 node brick with 2x2x2 Gauss integration
    QuadraticBrickReduced,
    /// 20 node brick with a 14 point rule that suppresses the hourglass modes of reduced integration
    QuadraticBrickIncompatible,
}

impl ElementType {
    pub const ALL: [Self; 6] = [
        Self::LinearTetrahedron,
        Self::QuadraticTetrahedron,
        Self::LinearBrick,
        Self::QuadraticBrick,
        Self::QuadraticBrickReduced,
        Self::QuadraticBrickIncompatible,
    ];

    /// Look up the (process-wide) shape description of this Element type
    pub fn shape(&self) -> &'static ElementTypeShape {
        &catalog()[*self as usize]
    }

    pub fn num_vertices(&self) -> usize {
        match self {
            Self::LinearTetrahedron => 4,
            Self::QuadraticTetrahedron => 10,
            Self::LinearBrick => 8,
            Self::QuadraticBrick | Self::QuadraticBrickReduced | Self::QuadraticBrickIncompatible => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LinearTetrahedron => "LinearTetrahedron",
            Self::QuadraticTetrahedron => "QuadraticTetrahedron",
            Self::LinearBrick => "LinearBrick",
            Self::QuadraticBrick => "QuadraticBrick",
            Self::QuadraticBrickReduced => "QuadraticBrickReduced",
            Self::QuadraticBrickIncompatible => "QuadraticBrickIncompatible",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ElementType {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|et| et.name() == s)
            .copied()
            .ok_or_else(|| MeshError::UnknownElementType(s.to_string()))
    }
}

/// Immutable description of one Element type: reference vertices, shape functions, quadrature and faces
#[derive(Debug)]
pub struct ElementTypeShape {
    pub element_type: ElementType,
    pub category: ShapeCategory,
    /// Polynomial order of the shape functions (1 or 2)
    pub order: u8,
    vertices: &'static [[f64; 3]],
    volume_integration_points: Vec<VolumePoint>,
    faces: &'static [FaceDef],
}

impl ElementTypeShape {
    fn new(element_type: ElementType) -> Self {
        let (category, order, vertices, volume_integration_points, faces) = match element_type {
            ElementType::LinearTetrahedron => (
                ShapeCategory::Tetrahedron,
                1,
                &tetrahedron::TET_VERTICES[..4],
                tetrahedron::volume_integration_points(1),
                &tetrahedron::LINEAR_TET_FACES[..],
            ),
            ElementType::QuadraticTetrahedron => (
                ShapeCategory::Tetrahedron,
                2,
                &tetrahedron::TET_VERTICES[..],
                tetrahedron::volume_integration_points(2),
                &tetrahedron::QUADRATIC_TET_FACES[..],
            ),
            ElementType::LinearBrick => (
                ShapeCategory::Brick,
                1,
                &brick::BRICK_VERTICES[..8],
                cube::tensor_rule_3d(2),
                &brick::LINEAR_BRICK_FACES[..],
            ),
            ElementType::QuadraticBrick => (
                ShapeCategory::Brick,
                2,
                &brick::BRICK_VERTICES[..],
                cube::tensor_rule_3d(3),
                &brick::QUADRATIC_BRICK_FACES[..],
            ),
            ElementType::QuadraticBrickReduced => (
                ShapeCategory::Brick,
                2,
                &brick::BRICK_VERTICES[..],
                cube::tensor_rule_3d(2),
                &brick::QUADRATIC_BRICK_FACES[..],
            ),
            ElementType::QuadraticBrickIncompatible => (
                ShapeCategory::Brick,
                2,
                &brick::BRICK_VERTICES[..],
                cube::irons_14_point_rule(),
                &brick::QUADRATIC_BRICK_FACES[..],
            ),
        };

        debug_assert_eq!(vertices.len(), element_type.num_vertices());

        Self {
            element_type,
            category,
            order,
            vertices,
            volume_integration_points,
            faces,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Parametric coordinates of local vertex `index`
    pub fn vertex(&self, index: usize) -> Vector3<f64> {
        Vector3::from(self.vertices[index])
    }

    /// Evaluate every vertex's shape function at `uvw`
    ///
    /// The values sum to one at any point (partition of unity)
    pub fn shape_functions(&self, uvw: &Vector3<f64>) -> ShapeValues {
        match self.category {
            ShapeCategory::Tetrahedron => tetrahedron::shape_functions(self.order, uvw),
            ShapeCategory::Brick => brick::shape_functions(self.order, uvw),
        }
    }

    /// Gradient of every vertex's shape function with respect to `(u, v, w)` at `uvw`
    pub fn shape_function_derivatives(&self, uvw: &Vector3<f64>) -> ShapeGradients<3> {
        match self.category {
            ShapeCategory::Tetrahedron => tetrahedron::shape_function_derivatives(self.order, uvw),
            ShapeCategory::Brick => brick::shape_function_derivatives(self.order, uvw),
        }
    }

    pub fn volume_integration_points(&self) -> &[VolumePoint] {
        &self.volume_integration_points
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> &'static [FaceDef] {
        self.faces
    }

    /// Get a face definition by its local index
    ///
    /// Panics if `local_face` is out of range for this Element type
    pub fn face(&self, local_face: usize) -> &'static FaceDef {
        assert!(
            local_face < self.faces.len(),
            "{} Elements have {} faces; face {} does not exist!",
            self.element_type,
            self.faces.len(),
            local_face
        );
        &self.faces[local_face]
    }

    /// Volume of the reference domain
    pub fn reference_volume(&self) -> f64 {
        match self.category {
            ShapeCategory::Brick => 8.0,
            ShapeCategory::Tetrahedron => 1.0 / 6.0,
        }
    }

    /// Whether `uvw` lies inside the reference domain
    pub fn contains(&self, uvw: &Vector3<f64>) -> bool {
        match self.category {
            ShapeCategory::Brick => brick::contains(uvw, PARAMETRIC_DOMAIN_TOLERANCE),
            ShapeCategory::Tetrahedron => tetrahedron::contains(uvw, PARAMETRIC_DOMAIN_TOLERANCE),
        }
    }
}

fn catalog() -> &'static [ElementTypeShape] {
    CATALOG.get_or_init(|| {
        debug!("building Element type catalog");
        ElementType::ALL.iter().map(|et| ElementTypeShape::new(*et)).collect()
    })
}
