use super::{ElementId, NodeId};
use crate::shape::{ElementType, ElementTypeShape};
use crate::{MAX_ELEMENT_VERTICES, MAX_FACE_VERTICES};
use smallvec::SmallVec;

/// The basic finite unit of a [`Mesh3`](super::Mesh3)
///
/// `nodes` are ordered according to the local vertex numbering of the Element type's reference shape
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub element_type: ElementType,
    pub nodes: SmallVec<[NodeId; MAX_ELEMENT_VERTICES]>,
}

impl Element {
    pub(crate) fn new(id: ElementId, element_type: ElementType, nodes: &[NodeId]) -> Self {
        assert_eq!(
            nodes.len(),
            element_type.num_vertices(),
            "{} Elements need {} Nodes; cannot construct Element {}",
            element_type,
            element_type.num_vertices(),
            id,
        );

        Self {
            id,
            element_type,
            nodes: SmallVec::from_slice(nodes),
        }
    }

    pub fn shape(&self) -> &'static ElementTypeShape {
        self.element_type.shape()
    }

    /// Node keys of one of this Element's faces (corners first, then mid-edge nodes)
    pub fn face_nodes(&self, local_face: usize) -> SmallVec<[NodeId; MAX_FACE_VERTICES]> {
        self.shape()
            .face(local_face)
            .vertices
            .iter()
            .map(|local_idx| self.nodes[*local_idx])
            .collect()
    }

    /// Sorted corner Node keys of a face; identical for any two Elements sharing that face
    pub(crate) fn face_key(&self, local_face: usize) -> SmallVec<[NodeId; 4]> {
        let mut key: SmallVec<[NodeId; 4]> = self
            .shape()
            .face(local_face)
            .corners()
            .iter()
            .map(|local_idx| self.nodes[*local_idx])
            .collect();
        key.sort_unstable();
        key
    }
}
