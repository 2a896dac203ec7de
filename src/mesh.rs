/// A Finite Element: type tag plus ordered Node keys
pub mod element;
/// Addressing individual Element faces
pub mod face;
/// JSON import and export of a Mesh
#[cfg(feature = "json_export")]
pub mod io;
/// Isoparametric mapping, Jacobians, volumes and oriented areas
pub mod measure;
/// A point in 3D space
pub mod node;

use crate::error::{MeshError, MeshResult};
use crate::shape::ElementType;
use crate::MAX_FACE_VERTICES;
use element::Element;
use face::FaceRef;
use node::Node;

use nalgebra::Point3;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Key of a [`Node`] within its Mesh
pub type NodeId = usize;

/// Key of an [`Element`] within its Mesh
pub type ElementId = usize;

/// Flat collections of Nodes and Elements describing a 3D Finite Element Mesh
///
/// Elements refer to Nodes by key. Every key referenced by an Element exists in the Mesh, and every Element has
/// exactly as many Nodes as its type requires.
#[derive(Debug, Clone, Default)]
pub struct Mesh3 {
    nodes: Vec<Node>,
    elements: Vec<Element>,
}

impl Mesh3 {
    /// Construct a completely empty Mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a Node at some point in real space, returning its key
    pub fn add_node(&mut self, coords: Point3<f64>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, coords));
        id
    }

    /// Add an Element connecting existing Nodes, returning its key
    ///
    /// Panics if a Node key doesn't exist or if the number of Nodes doesn't match `element_type`
    pub fn add_element(&mut self, element_type: ElementType, nodes: &[NodeId]) -> ElementId {
        for node_id in nodes {
            assert!(
                *node_id < self.nodes.len(),
                "Node {} does not exist; cannot connect {} Element!",
                node_id,
                element_type
            );
        }

        let id = self.elements.len();
        self.elements.push(Element::new(id, element_type, nodes));
        id
    }

    /// Same as [`Mesh3::add_element`], except structural problems are reported as an `Err`
    pub fn try_add_element(
        &mut self,
        element_type: ElementType,
        nodes: &[NodeId],
    ) -> MeshResult<ElementId> {
        if nodes.len() != element_type.num_vertices() {
            return Err(MeshError::NodeCountMismatch {
                element_type: element_type.name(),
                expected: element_type.num_vertices(),
                found: nodes.len(),
            });
        }
        if let Some(missing) = nodes.iter().find(|node_id| **node_id >= self.nodes.len()) {
            return Err(MeshError::UnknownNode(*missing));
        }

        Ok(self.add_element(element_type, nodes))
    }

    // ----------------------------------------------------------------------------------------------------
    // General Data Retrieval
    // ----------------------------------------------------------------------------------------------------

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn node(&self, node_id: NodeId) -> &Node {
        assert!(node_id < self.nodes.len(), "Node {} does not exist!", node_id);
        &self.nodes[node_id]
    }

    pub fn element(&self, element_id: ElementId) -> &Element {
        assert!(
            element_id < self.elements.len(),
            "Element {} does not exist!",
            element_id
        );
        &self.elements[element_id]
    }

    /// Get the real-space [Point3]s of an [`Element`]'s Nodes, in local vertex order
    pub fn element_points(&self, element_id: ElementId) -> SmallVec<[Point3<f64>; crate::MAX_ELEMENT_VERTICES]> {
        self.element(element_id)
            .nodes
            .iter()
            .map(|node_id| self.nodes[*node_id].coords)
            .collect()
    }

    /// Node keys of a face (corners first, then mid-edge nodes)
    pub fn face_nodes(&self, face: FaceRef) -> SmallVec<[NodeId; MAX_FACE_VERTICES]> {
        self.element(face.element).face_nodes(face.face)
    }

    /// Faces which belong to exactly one Element
    ///
    /// Faces are matched by their corner Nodes; results are sorted by Element, then by local face index
    pub fn boundary_faces(&self) -> Vec<FaceRef> {
        let mut face_owners: BTreeMap<SmallVec<[NodeId; 4]>, SmallVec<[FaceRef; 2]>> = BTreeMap::new();

        for element in self.elements.iter() {
            for local_face in 0..element.shape().num_faces() {
                face_owners
                    .entry(element.face_key(local_face))
                    .or_default()
                    .push(FaceRef::new(element.id, local_face));
            }
        }

        let mut boundary: Vec<FaceRef> = face_owners
            .into_values()
            .filter(|owners| owners.len() == 1)
            .map(|owners| owners[0])
            .collect();
        boundary.sort_unstable();
        boundary
    }
}
