use super::{ElementId, Mesh3};
use crate::error::{MeshError, MeshResult};

use nalgebra::{Matrix3, Point3, Vector2, Vector3};
use rayon::prelude::*;
use tracing::warn;

impl Mesh3 {
    /// Evaluate the isoparametric map of an Element: the real-space location of parametric point `uvw`
    pub fn map_to_physical(&self, element_id: ElementId, uvw: &Vector3<f64>) -> Point3<f64> {
        let element = self.element(element_id);
        let sf = element.shape().shape_functions(uvw);

        let coords = element
            .nodes
            .iter()
            .zip(sf.iter())
            .fold(Vector3::zeros(), |acc, (node_id, n)| acc + self.nodes[*node_id].coords.coords * *n);

        Point3::from(coords)
    }

    /// Jacobian of an Element's isoparametric map at `uvw`
    ///
    /// Column `k` holds the derivative of the real-space position with respect to parametric coordinate `k`
    pub fn jacobian(&self, element_id: ElementId, uvw: &Vector3<f64>) -> Matrix3<f64> {
        let element = self.element(element_id);
        let sf_d = element.shape().shape_function_derivatives(uvw);

        element
            .nodes
            .iter()
            .zip(sf_d.iter())
            .fold(Matrix3::zeros(), |acc, (node_id, d_uvw)| {
                acc + self.nodes[*node_id].coords.coords * d_uvw.transpose()
            })
    }

    /// Real-space volume of an Element
    ///
    /// Integrates `det(J)` over the Element type's volume integration points.
    /// Returns an `Err` if the determinant is zero, negative or NaN at any integration point (an inverted or collapsed
    /// Element, or one with non-finite Node coordinates).
    pub fn volume(&self, element_id: ElementId) -> MeshResult<f64> {
        let shape = self.element(element_id).shape();

        let mut volume = 0.0;
        for (point_index, ip) in shape.volume_integration_points().iter().enumerate() {
            let det = self.jacobian(element_id, &ip.point).determinant();
            if det.is_nan() || det <= 0.0 {
                warn!(
                    "Element {} ({}) has det(J) = {:e} at integration point {}",
                    element_id, shape.element_type, det, point_index
                );
                return Err(MeshError::DegenerateElement {
                    element_id,
                    point_index,
                    det,
                });
            }
            volume += det * ip.weight;
        }

        Ok(volume)
    }

    /// Oriented area of one of an Element's faces
    ///
    /// The result's magnitude is the face's real-space area. Its direction is the normal implied by the
    /// face's local vertex ordering (outward for every face in the catalog when the Element isn't inverted).
    ///
    /// Panics if `local_face` is out of range for the Element's type
    pub fn oriented_area(&self, element_id: ElementId, local_face: usize) -> Vector3<f64> {
        let element = self.element(element_id);
        let face = element.shape().face(local_face);

        face.shape
            .integration_points()
            .iter()
            .fold(Vector3::zeros(), |area, ip| {
                let st = Vector2::new(ip.point[0], ip.point[1]);
                let sf_d = face.shape.shape_function_derivatives(&st);

                let (d_s, d_t) = face.vertices.iter().zip(sf_d.iter()).fold(
                    (Vector3::zeros(), Vector3::zeros()),
                    |(d_s, d_t), (local_idx, d_st)| {
                        let x = self.nodes[element.nodes[*local_idx]].coords.coords;
                        (d_s + x * d_st[0], d_t + x * d_st[1])
                    },
                );

                area + d_s.cross(&d_t) * ip.weight
            })
    }

    /// Volume of every Element (indexed by Element key), computed in parallel
    pub fn element_volumes(&self) -> Vec<MeshResult<f64>> {
        (0..self.elements.len())
            .into_par_iter()
            .map(|element_id| self.volume(element_id))
            .collect()
    }

    /// Sum of all Element volumes; fails on the first degenerate Element
    pub fn total_volume(&self) -> MeshResult<f64> {
        self.element_volumes().into_iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::two_brick_mesh;
    use super::*;
    use crate::shape::{ElementType, ShapeCategory};
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Unit};

    /// Build a single Element whose Nodes are the reference vertices transformed by `f`
    fn reference_element<F>(element_type: ElementType, f: F) -> Mesh3
    where
        F: Fn(Vector3<f64>) -> Vector3<f64>,
    {
        let shape = element_type.shape();
        let mut mesh = Mesh3::new();
        let nodes: Vec<_> = (0..shape.num_vertices())
            .map(|i| mesh.add_node(Point3::from(f(shape.vertex(i)))))
            .collect();
        mesh.add_element(element_type, &nodes);
        mesh
    }

    fn rotation(angle: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Unit::new_normalize(Vector3::new(1.0, 2.0, -0.5)), angle)
    }

    #[test]
    fn reference_tetrahedron_volume() {
        let mesh = reference_element(ElementType::LinearTetrahedron, |x| x);
        assert_relative_eq!(mesh.volume(0).unwrap(), 1.0 / 6.0, epsilon = 1e-14);

        let scaled = reference_element(ElementType::LinearTetrahedron, |x| {
            x.component_mul(&Vector3::new(3.0, 4.0, 5.0))
        });
        assert_relative_eq!(scaled.volume(0).unwrap(), 60.0 / 6.0, epsilon = 1e-12);

        for angle in [0.3, 1.23, 2.9, -4.0] {
            let rotated = reference_element(ElementType::LinearTetrahedron, |x| rotation(angle) * x);
            assert_relative_eq!(rotated.volume(0).unwrap(), 1.0 / 6.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn volume_is_invariant_under_affine_maps() {
        let scale = Vector3::new(3.0, 4.0, 5.0);
        let offset = Vector3::new(-2.0, 7.5, 0.25);

        for et in ElementType::ALL {
            let ref_volume = et.shape().reference_volume();

            let reference = reference_element(et, |x| x);
            assert_relative_eq!(reference.volume(0).unwrap(), ref_volume, epsilon = 1e-12);

            let scaled = reference_element(et, |x| x.component_mul(&scale) + offset);
            assert_relative_eq!(scaled.volume(0).unwrap(), ref_volume * 60.0, epsilon = 1e-10);

            let rotated = reference_element(et, |x| rotation(1.23) * x + offset);
            assert_relative_eq!(rotated.volume(0).unwrap(), ref_volume, epsilon = 1e-12);

            let sheared = Matrix3::new(1.0, 0.5, 0.0, 0.0, 1.0, 0.25, 0.0, 0.0, 2.0);
            let general = reference_element(et, |x| rotation(-0.7) * (sheared * x));
            assert_relative_eq!(general.volume(0).unwrap(), ref_volume * 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn curved_quadratic_brick_volume() {
        // bulge the top face's mid-edge nodes outward: the volume grows but stays positive
        let mesh = reference_element(ElementType::QuadraticBrick, |x| {
            if x[2] == 1.0 && (x[0] == 0.0 || x[1] == 0.0) {
                x + Vector3::new(0.0, 0.0, 0.2)
            } else {
                x
            }
        });
        let volume = mesh.volume(0).unwrap();
        assert!(volume > 8.0);

        // the reduced and incompatible-mode variants integrate the same geometry
        for et in [ElementType::QuadraticBrickReduced, ElementType::QuadraticBrickIncompatible] {
            let mut variant = Mesh3::new();
            for node in mesh.nodes() {
                variant.add_node(node.coords);
            }
            variant.add_element(et, &mesh.element(0).nodes);
            assert!((variant.volume(0).unwrap() - volume).abs() < 1e-2);
        }
    }

    #[test]
    fn inverted_element_is_reported() {
        // mirroring the reference tetrahedron flips the sign of det(J)
        let mesh = reference_element(ElementType::LinearTetrahedron, |x| Vector3::new(-x[0], x[1], x[2]));
        match mesh.volume(0) {
            Err(MeshError::DegenerateElement { element_id, det, .. }) => {
                assert_eq!(element_id, 0);
                assert!(det < 0.0);
            }
            other => panic!("expected a degenerate element, got {:?}", other),
        }

        // collapsed onto a plane
        let flat = reference_element(ElementType::LinearBrick, |x| Vector3::new(x[0], x[1], 0.0));
        assert!(matches!(flat.volume(0), Err(MeshError::DegenerateElement { .. })));
        assert!(flat.total_volume().is_err());
    }

    #[test]
    fn non_finite_coordinates_are_reported() {
        let mut mesh = reference_element(ElementType::QuadraticTetrahedron, |x| x);
        mesh.nodes[3].coords.z = f64::NAN;

        match mesh.volume(0) {
            Err(MeshError::DegenerateElement { point_index, det, .. }) => {
                assert_eq!(point_index, 0);
                assert!(det.is_nan());
            }
            other => panic!("expected a degenerate element, got {:?}", other),
        }
        assert!(mesh.total_volume().is_err());
    }

    #[test]
    fn reference_tetrahedron_base_area() {
        let mesh = reference_element(ElementType::LinearTetrahedron, |x| x);
        assert_relative_eq!(mesh.oriented_area(0, 0), Vector3::new(0.0, 0.0, -0.5), epsilon = 1e-14);

        let scaled = reference_element(ElementType::LinearTetrahedron, |x| {
            x.component_mul(&Vector3::new(3.0, 4.0, 5.0))
        });
        assert_relative_eq!(scaled.oriented_area(0, 0), Vector3::new(0.0, 0.0, -0.5 * 12.0), epsilon = 1e-12);

        let theta: f64 = 1.23;
        let rot_x = Rotation3::from_axis_angle(&Vector3::x_axis(), theta);
        let rotated = reference_element(ElementType::LinearTetrahedron, |x| rot_x * x);
        assert_relative_eq!(
            rotated.oriented_area(0, 0),
            Vector3::new(0.0, -0.5 * -theta.sin(), -0.5 * theta.cos()),
            epsilon = 1e-14
        );
    }

    #[test]
    fn quadratic_tetrahedron_base_area_matches_linear() {
        let mesh = reference_element(ElementType::QuadraticTetrahedron, |x| x);
        assert_relative_eq!(mesh.oriented_area(0, 0), Vector3::new(0.0, 0.0, -0.5), epsilon = 1e-14);
    }

    #[test]
    fn closed_surfaces_have_zero_net_area() {
        let scale = Vector3::new(3.0, 4.0, 5.0);
        for et in ElementType::ALL {
            let mesh = reference_element(et, |x| rotation(0.4) * x.component_mul(&scale));
            let shape = et.shape();

            let net = (0..shape.num_faces()).fold(Vector3::zeros(), |acc, f| acc + mesh.oriented_area(0, f));
            assert!(net.norm() < 1e-12, "{}: net oriented area {:?}", et, net);

            // each face normal points away from the element's centroid
            let centroid_uvw = match shape.category {
                ShapeCategory::Brick => Vector3::zeros(),
                ShapeCategory::Tetrahedron => Vector3::new(0.75, 0.5, 0.25),
            };
            let centroid = mesh.map_to_physical(0, &centroid_uvw);
            for (f, face) in shape.faces().iter().enumerate() {
                let on_face = mesh.node(mesh.element(0).nodes[face.vertices[0]]).coords;
                assert!(mesh.oriented_area(0, f).dot(&(on_face - centroid)) > 0.0);
            }
        }
    }

    #[test]
    fn brick_face_areas() {
        let scale = Vector3::new(3.0, 4.0, 5.0);
        let mesh = reference_element(ElementType::QuadraticBrick, |x| x.component_mul(&scale));

        // reference faces have area 4; scaled by the two in-plane factors
        assert_relative_eq!(mesh.oriented_area(0, 0), Vector3::new(0.0, 0.0, -4.0 * 12.0), epsilon = 1e-10);
        assert_relative_eq!(mesh.oriented_area(0, 1), Vector3::new(0.0, 0.0, 4.0 * 12.0), epsilon = 1e-10);
        assert_relative_eq!(mesh.oriented_area(0, 2), Vector3::new(0.0, -4.0 * 15.0, 0.0), epsilon = 1e-10);
        assert_relative_eq!(mesh.oriented_area(0, 3), Vector3::new(4.0 * 20.0, 0.0, 0.0), epsilon = 1e-10);
    }

    #[test]
    fn isoparametric_map_reproduces_nodes() {
        let scale = Vector3::new(2.0, 1.0, 0.5);
        for et in ElementType::ALL {
            let mesh = reference_element(et, |x| rotation(0.9) * x.component_mul(&scale));
            let shape = et.shape();
            for i in 0..shape.num_vertices() {
                let mapped = mesh.map_to_physical(0, &shape.vertex(i));
                assert_relative_eq!(mapped, mesh.node(mesh.element(0).nodes[i]).coords, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn parallel_volumes_match_serial() {
        let mesh = two_brick_mesh();
        let volumes: Vec<f64> = mesh.element_volumes().into_iter().map(|v| v.unwrap()).collect();
        assert_eq!(volumes.len(), 2);
        for (element_id, v) in volumes.iter().enumerate() {
            assert_relative_eq!(*v, mesh.volume(element_id).unwrap());
            assert_relative_eq!(*v, 1.0, epsilon = 1e-14);
        }
        assert_relative_eq!(mesh.total_volume().unwrap(), 2.0, epsilon = 1e-14);

        // the shared face is seen with opposite orientation from either side
        let a = mesh.oriented_area(0, 3);
        let b = mesh.oriented_area(1, 5);
        assert_relative_eq!(a, -b, epsilon = 1e-14);
        assert_relative_eq!(a, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-14);
    }

    #[test]
    #[should_panic]
    fn face_index_out_of_range() {
        let mesh = two_brick_mesh();
        mesh.oriented_area(0, 6);
    }
}
