/// Uniform spatial hash used to find nearby Nodes
pub mod grid;

use crate::mesh::{face::FaceRef, Mesh3, NodeId};
use grid::NodeGrid;

use nalgebra::Vector3;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Largest ratio of point cloud extent to grid cell size for which the spatial hash is used
///
/// Beyond this, neighboring cell indices are no longer reliable in `f64` and the search falls back to a direct scan.
pub const MAX_GRID_SPAN: f64 = 1e12;

/// Correspondence between a Node from the first set and its nearest neighbor in the second
#[derive(Clone, Debug, PartialEq)]
pub struct Pair {
    /// `[first set Node, second set Node]`
    pub nodes: [NodeId; 2],
    /// Vector from the first Node to the second
    pub displacement: Vector3<f64>,
}

impl Pair {
    pub fn distance(&self) -> f64 {
        self.displacement.norm()
    }
}

/// Pairs of close Nodes between two regions of a Mesh
///
/// Holds at most one [Pair] per Node of the first set, sorted by that Node's key
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gap {
    pub pairs: Vec<Pair>,
}

impl Gap {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pair> + '_ {
        self.pairs.iter()
    }

    /// Largest separation among all pairs (`None` if there are no pairs)
    pub fn max_distance(&self) -> Option<f64> {
        self.pairs.iter().map(Pair::distance).reduce(f64::max)
    }
}

/// For every Node on `face_set_1`, find the nearest Node on `face_set_2` that is no further than `max_dist` away
///
/// Nodes without a candidate within `max_dist` are left out of the result. Equidistant candidates are resolved in
/// favor of the lowest Node key. A Node found on both face sets (e.g. on an edge where they meet) is its own nearest
/// neighbor, so it is paired with itself at zero displacement.
pub fn compute_gap_from_face_sets(
    mesh: &Mesh3,
    face_set_1: &[FaceRef],
    face_set_2: &[FaceRef],
    max_dist: f64,
) -> Gap {
    let nodes_1 = face_set_nodes(mesh, face_set_1);
    let nodes_2 = face_set_nodes(mesh, face_set_2);

    compute_gap_from_node_sets(mesh, &nodes_1, &nodes_2, max_dist)
}

/// Same as [compute_gap_from_face_sets], but with explicit lists of Node keys
///
/// Repeated keys in `nodes_1` produce repeated pairs
pub fn compute_gap_from_node_sets(
    mesh: &Mesh3,
    nodes_1: &[NodeId],
    nodes_2: &[NodeId],
    max_dist: f64,
) -> Gap {
    if max_dist.is_nan() || max_dist < 0.0 || nodes_1.is_empty() || nodes_2.is_empty() {
        return Gap::default();
    }

    // unbounded searches, and cells too small to resolve the point cloud in f64, check every candidate directly
    let cell_size = if max_dist > 0.0 { max_dist } else { 1.0 };
    let use_grid = max_dist.is_finite()
        && extent(mesh, nodes_1.iter().chain(nodes_2)) / cell_size <= MAX_GRID_SPAN;

    let grid = use_grid.then(|| {
        let mut grid = NodeGrid::new(cell_size);
        for node_id in nodes_2 {
            grid.insert(*node_id, &mesh.node(*node_id).coords);
        }
        debug!(
            "gap search: {} candidate Nodes in {} grid cells",
            nodes_2.len(),
            grid.num_occupied_cells()
        );
        grid
    });

    let max_dist_sq = max_dist * max_dist;
    let pairs: Vec<Pair> = nodes_1
        .par_iter()
        .filter_map(|node_id| {
            let (partner, dist_sq) = match &grid {
                Some(grid) => nearest_of(
                    mesh,
                    *node_id,
                    grid.candidates(&mesh.node(*node_id).coords, max_dist),
                ),
                None => nearest_of(mesh, *node_id, nodes_2.iter().copied()),
            }?;
            if dist_sq <= max_dist_sq {
                Some(Pair {
                    nodes: [*node_id, partner],
                    displacement: mesh.node(partner).coords - mesh.node(*node_id).coords,
                })
            } else {
                None
            }
        })
        .collect();

    debug!(
        "gap search: {} of {} Nodes paired within {}",
        pairs.len(),
        nodes_1.len(),
        max_dist
    );

    Gap { pairs }
}

// largest side of the bounding box of some Nodes
fn extent<'a>(mesh: &Mesh3, node_ids: impl Iterator<Item = &'a NodeId>) -> f64 {
    let mut lower = Vector3::repeat(f64::INFINITY);
    let mut upper = Vector3::repeat(f64::NEG_INFINITY);
    for node_id in node_ids {
        let coords = &mesh.node(*node_id).coords.coords;
        lower = lower.inf(coords);
        upper = upper.sup(coords);
    }
    (upper - lower).max()
}

/// Sorted, de-duplicated Node keys of every face in a set
pub fn face_set_nodes(mesh: &Mesh3, faces: &[FaceRef]) -> Vec<NodeId> {
    faces
        .iter()
        .flat_map(|face| mesh.face_nodes(*face))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// closest candidate (by squared distance, then by lowest key)
fn nearest_of(
    mesh: &Mesh3,
    node_id: NodeId,
    candidates: impl Iterator<Item = NodeId>,
) -> Option<(NodeId, f64)> {
    let point = &mesh.node(node_id).coords;
    candidates
        .map(|candidate| (candidate, (mesh.node(candidate).coords - point).norm_squared()))
        .min_by(|(a_id, a_dist), (b_id, b_dist)| a_dist.total_cmp(b_dist).then(a_id.cmp(b_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::tests::two_brick_mesh;
    use crate::shape::ElementType;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    /// A unit brick `[0, 1]^3` and a second brick whose left face sits just beyond `x = 1`
    ///
    /// The second brick's left face corner at (y, z) = (1, 1) is pulled out to `x = 1.9`
    fn gapped_bricks() -> (Mesh3, FaceRef, FaceRef) {
        let mut mesh = Mesh3::new();
        let mut brick = |x_left: [f64; 4], x_right: f64| {
            let yz = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
            let left: Vec<_> = yz
                .iter()
                .zip(x_left.iter())
                .map(|((y, z), x)| mesh.add_node(Point3::new(*x, *y, *z)))
                .collect();
            let right: Vec<_> = yz
                .iter()
                .map(|(y, z)| mesh.add_node(Point3::new(x_right, *y, *z)))
                .collect();
            // bottom (z = 0): 0, 1, 2, 3 = (x-, y-), (x+, y-), (x+, y+), (x-, y+)
            let nodes = [left[0], right[0], right[1], left[1], left[3], right[3], right[2], left[2]];
            mesh.add_element(ElementType::LinearBrick, &nodes)
        };

        let a = brick([0.0; 4], 1.0);
        let b = brick([1.1, 1.1, 1.9, 1.1], 3.0);

        (mesh, FaceRef::new(a, 3), FaceRef::new(b, 5))
    }

    #[test]
    fn gap_between_facing_bricks() {
        let (mesh, right_of_a, left_of_b) = gapped_bricks();
        assert!(mesh.volume(0).is_ok() && mesh.volume(1).is_ok());

        let gap = compute_gap_from_face_sets(&mesh, &[right_of_a], &[left_of_b], 0.5);

        // node keys: brick a's right face is 4..=7 at (y, z) = (0,0), (1,0), (1,1), (0,1); likewise 8..=11 on brick b
        let expected = [[4, 8], [5, 9], [7, 11]];
        assert_eq!(gap.len(), 3);
        for (pair, nodes) in gap.iter().zip(expected.iter()) {
            assert_eq!(&pair.nodes, nodes);
            assert_relative_eq!(pair.displacement, Vector3::new(0.1, 0.0, 0.0), epsilon = 1e-14);
        }
        assert_relative_eq!(gap.max_distance().unwrap(), 0.1, epsilon = 1e-14);

        // the pulled out corner pairs up once the bound is loose enough
        let loose = compute_gap_from_face_sets(&mesh, &[right_of_a], &[left_of_b], 0.95);
        assert_eq!(loose.len(), 4);
        assert_eq!(loose.pairs[2].nodes, [6, 10]);
        assert_relative_eq!(loose.pairs[2].displacement, Vector3::new(0.9, 0.0, 0.0), epsilon = 1e-14);

        // nothing within a tight bound
        assert!(compute_gap_from_face_sets(&mesh, &[right_of_a], &[left_of_b], 0.05).is_empty());
    }

    #[test]
    fn equidistant_candidates_resolve_to_lowest_key() {
        let mut mesh = Mesh3::new();
        let origin = mesh.add_node(Point3::origin());
        let far = mesh.add_node(Point3::new(-1.0, 0.0, 0.0));
        let tied_low = mesh.add_node(Point3::new(0.0, 0.5, 0.0));
        let tied_high = mesh.add_node(Point3::new(0.0, 0.0, 0.5));

        let gap = compute_gap_from_node_sets(&mesh, &[origin], &[far, tied_low, tied_high], 2.0);
        assert_eq!(gap.len(), 1);
        assert_eq!(gap.pairs[0].nodes, [origin, tied_low]);

        // same answer regardless of candidate order
        let reversed = compute_gap_from_node_sets(&mesh, &[origin], &[tied_high, tied_low, far], 2.0);
        assert_eq!(reversed, gap);

        // unbounded searches use the same rule
        let unbounded =
            compute_gap_from_node_sets(&mesh, &[origin], &[far, tied_high, tied_low], f64::INFINITY);
        assert_eq!(unbounded, gap);
    }

    #[test]
    fn shared_nodes_pair_with_themselves() {
        let mesh = two_brick_mesh();

        // coincident faces: every node is its own nearest neighbor
        let shared_from_a = FaceRef::new(0, 3);
        let shared_from_b = FaceRef::new(1, 5);
        let gap = compute_gap_from_face_sets(&mesh, &[shared_from_a], &[shared_from_b], 0.0);
        let nodes: Vec<_> = gap.iter().map(|p| p.nodes).collect();
        assert_eq!(nodes, vec![[4, 4], [5, 5], [6, 6], [7, 7]]);
        assert!(gap.iter().all(|p| p.displacement == Vector3::zeros()));

        // top faces of both bricks meet along the edge through nodes 6 and 7
        let top_of_a = FaceRef::new(0, 1);
        let top_of_b = FaceRef::new(1, 1);
        let gap = compute_gap_from_face_sets(&mesh, &[top_of_a], &[top_of_b], 0.5);
        let nodes: Vec<_> = gap.iter().map(|p| p.nodes).collect();
        assert_eq!(nodes, vec![[6, 6], [7, 7]]);
        assert_eq!(gap.max_distance(), Some(0.0));
    }

    #[test]
    fn degenerate_bounds() {
        let mut mesh = Mesh3::new();
        let a = mesh.add_node(Point3::new(1.0, 2.0, 3.0));
        let b = mesh.add_node(Point3::new(1.0, 2.0, 3.0));
        let c = mesh.add_node(Point3::new(1.0, 2.0, 3.5));

        let coincident = compute_gap_from_node_sets(&mesh, &[a], &[b, c], 0.0);
        assert_eq!(coincident.pairs, vec![Pair { nodes: [a, b], displacement: Vector3::zeros() }]);

        assert!(compute_gap_from_node_sets(&mesh, &[a], &[b, c], -1.0).is_empty());
        assert!(compute_gap_from_node_sets(&mesh, &[a], &[b, c], f64::NAN).is_empty());
        assert!(compute_gap_from_node_sets(&mesh, &[], &[b, c], 1.0).is_empty());
    }

    #[test]
    fn tiny_bound_on_large_coordinates() {
        let mut mesh = Mesh3::new();
        let a = mesh.add_node(Point3::new(1e5, 0.0, 0.0));
        let b = mesh.add_node(Point3::new(1e5, 0.0, 0.0));
        let c = mesh.add_node(Point3::new(-1e5, 0.0, 0.0));

        for max_dist in [1e-15, 1e-300, 0.0] {
            let gap = compute_gap_from_node_sets(&mesh, &[a, c], &[b], max_dist);
            assert_eq!(gap.pairs, vec![Pair { nodes: [a, b], displacement: Vector3::zeros() }]);
        }

        // the spatial hash is still used for moderate spans
        let gap = compute_gap_from_node_sets(&mesh, &[a, c], &[b], 1e-3);
        assert_eq!(gap.len(), 1);
    }

    #[test]
    fn grid_search_matches_brute_force() {
        // scattered points from a small linear congruential generator
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = || {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        };

        let mut mesh = Mesh3::new();
        let nodes_1: Vec<_> = (0..200)
            .map(|_| mesh.add_node(Point3::new(next() * 4.0, next() * 4.0, next())))
            .collect();
        let nodes_2: Vec<_> = (0..300)
            .map(|_| mesh.add_node(Point3::new(next() * 4.0, next() * 4.0, 1.0 + next() * 0.2)))
            .collect();

        for max_dist in [0.1, 0.35, 0.8] {
            let gap = compute_gap_from_node_sets(&mesh, &nodes_1, &nodes_2, max_dist);

            let brute: Vec<Pair> = nodes_1
                .iter()
                .filter_map(|n1| {
                    let (n2, dist_sq) = nearest_of(&mesh, *n1, nodes_2.iter().copied())?;
                    (dist_sq <= max_dist * max_dist).then(|| Pair {
                        nodes: [*n1, n2],
                        displacement: mesh.node(n2).coords - mesh.node(*n1).coords,
                    })
                })
                .collect();

            assert_eq!(gap.pairs, brute);
            assert!(gap.iter().all(|p| p.distance() <= max_dist));
        }
    }
}
