//! Finite element mesh preprocessing: an element shape catalog, isoparametric
//! volume/area evaluation over a [`Mesh3`], and node-to-node gap detection
//! between two sets of mesh faces.

/// Error types shared by the mesh and gap modules
pub mod error;
/// Closest-node correspondences between two sets of mesh faces
pub mod gap;
/// Numerical quadrature rules over parametric domains
pub mod integration;
/// Nodes, Elements and the geometric quantities computed over them
pub mod mesh;
/// Shape functions, derivatives and quadrature for each supported element type
pub mod shape;

pub use error::{MeshError, MeshResult};
pub use gap::{compute_gap_from_face_sets, Gap, Pair};
pub use mesh::{element::Element, face::FaceRef, node::Node, ElementId, Mesh3, NodeId};
pub use shape::{ElementType, ElementTypeShape, ShapeCategory};

/// Largest number of vertices on any supported element (quadratic brick)
pub const MAX_ELEMENT_VERTICES: usize = 20;

/// Largest number of vertices on any supported element face (8 node quadrilateral)
pub const MAX_FACE_VERTICES: usize = 8;
