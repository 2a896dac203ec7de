use crate::mesh::NodeId;
use nalgebra::Point3;
use std::collections::HashMap;

/// Integer coordinates of a cubic cell in a [NodeGrid]
pub type CellCoord = [i64; 3];

/// Uniform spatial hash of Node keys
///
/// Nodes are bucketed into cubic cells of side `cell_size`; only occupied cells are stored.
#[derive(Debug, Clone)]
pub struct NodeGrid {
    cell_size: f64,
    cells: HashMap<CellCoord, Vec<NodeId>>,
}

impl NodeGrid {
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "grid cells must have a positive, finite size; got {}",
            cell_size
        );
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn insert(&mut self, node_id: NodeId, point: &Point3<f64>) {
        self.cells.entry(self.cell_of(point)).or_default().push(node_id);
    }

    pub fn cell_of(&self, point: &Point3<f64>) -> CellCoord {
        [
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
            (point.z / self.cell_size).floor() as i64,
        ]
    }

    pub fn num_occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Every Node key stored in a cell that could hold a point within `radius` of `point`
    ///
    /// This is a superset of the Nodes within `radius`; callers still need to check distances.
    pub fn candidates<'a>(&'a self, point: &Point3<f64>, radius: f64) -> impl Iterator<Item = NodeId> + 'a {
        let [cx, cy, cz] = self.cell_of(point);
        let reach = (radius / self.cell_size).ceil() as i64;

        let span = move |c: i64| c.saturating_sub(reach)..=c.saturating_add(reach);

        span(cx)
            .flat_map(move |x| span(cy).map(move |y| (x, y)))
            .flat_map(move |(x, y)| span(cz).map(move |z| [x, y, z]))
            .filter_map(move |cell| self.cells.get(&cell))
            .flat_map(|node_ids| node_ids.iter().copied())
    }
}
