use super::NodeId;
use nalgebra::Point3;

/// A point in 3D space, referenced by Elements through its `id`
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub coords: Point3<f64>,
}

impl Node {
    pub fn new(id: NodeId, coords: Point3<f64>) -> Self {
        Self { id, coords }
    }
}
