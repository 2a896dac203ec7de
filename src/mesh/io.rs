use super::{Mesh3, NodeId};
use crate::error::{MeshError, MeshResult};
use crate::shape::ElementType;

use json::{object, JsonValue};
use nalgebra::Point3;
use std::fs::{read_to_string, File};
use std::io::BufWriter;
use tracing::info;

impl Mesh3 {
    /// Construct a Mesh from a JSON file with the following format
    ///
    /// Node keys are their index in the "Nodes" array. The Node keys of each Element are listed in the
    /// local vertex order of its type.
    ///
    /// mesh.json
    /// ```JSON
    /// {
    ///     "Nodes": [
    ///         [0.0, 0.0, 0.0],
    ///         [1.0, 0.0, 0.0],
    ///         [1.0, 1.0, 0.0],
    ///         [1.0, 1.0, 1.0]
    ///     ],
    ///     "Elements": [
    ///         {
    ///             "type": "LinearTetrahedron",
    ///             "node_ids": [0, 1, 2, 3]
    ///         }
    ///     ]
    /// }
    /// ```
    pub fn from_file(path: impl AsRef<str>) -> MeshResult<Self> {
        let mesh_file_contents = read_to_string(path.as_ref())?;
        let mesh = Self::from_json_str(&mesh_file_contents)?;

        info!(
            "loaded Mesh from '{}' ({} Nodes, {} Elements)",
            path.as_ref(),
            mesh.num_nodes(),
            mesh.num_elements()
        );

        Ok(mesh)
    }

    /// Construct a Mesh from a JSON string (see [Mesh3::from_file] for the format)
    pub fn from_json_str(contents: &str) -> MeshResult<Self> {
        let mesh_json = json::parse(contents).map_err(|err| MeshError::parse(err.to_string()))?;

        let mut mesh = Self::new();
        for point in parse_node_information(&mesh_json)? {
            mesh.add_node(point);
        }
        for (element_type, node_ids) in parse_element_information(&mesh_json)? {
            mesh.try_add_element(element_type, &node_ids)?;
        }

        Ok(mesh)
    }

    /// Produce a Json Object that describes this Mesh
    pub fn to_json(&self) -> JsonValue {
        object! {
            "Nodes": JsonValue::from(
                self.nodes
                    .iter()
                    .map(|node| JsonValue::from(vec![node.coords.x, node.coords.y, node.coords.z]))
                    .collect::<Vec<_>>()
            ),
            "Elements": JsonValue::from(
                self.elements
                    .iter()
                    .map(|element| object! {
                        "type": element.element_type.name(),
                        "node_ids": JsonValue::from(element.nodes.to_vec()),
                    })
                    .collect::<Vec<_>>()
            ),
        }
    }

    /// Print the mesh to a JSON file specified by path.
    pub fn export_to_json(&self, path: impl AsRef<str>) -> MeshResult<()> {
        let f = File::create(path.as_ref())?;
        let mut w = BufWriter::new(&f);

        self.to_json().write_pretty(&mut w, 4)?;

        Ok(())
    }
}

fn parse_node_information(mesh_json: &JsonValue) -> MeshResult<Vec<Point3<f64>>> {
    if !mesh_json["Nodes"].is_array() {
        return Err(MeshError::parse("'Nodes' must be an array"));
    }

    mesh_json["Nodes"]
        .members()
        .enumerate()
        .map(|(node_id, json_point)| {
            let coords: Vec<f64> = json_point.members().filter_map(|c| c.as_f64()).collect();
            if !json_point.is_array() || coords.len() != 3 || json_point.len() != 3 {
                Err(MeshError::parse(format!(
                    "Node {} must be an array of 3 numbers",
                    node_id
                )))
            } else {
                Ok(Point3::new(coords[0], coords[1], coords[2]))
            }
        })
        .collect()
}

fn parse_element_information(mesh_json: &JsonValue) -> MeshResult<Vec<(ElementType, Vec<NodeId>)>> {
    if !mesh_json["Elements"].is_array() {
        return Err(MeshError::parse("'Elements' must be an array"));
    }

    mesh_json["Elements"]
        .members()
        .enumerate()
        .map(|(element_id, json_element)| {
            let element_type: ElementType = json_element["type"]
                .as_str()
                .ok_or_else(|| {
                    MeshError::parse(format!("Element {} is missing a 'type' string", element_id))
                })?
                .parse()?;

            let json_ids = &json_element["node_ids"];
            let node_ids: Vec<NodeId> = json_ids.members().filter_map(|id| id.as_usize()).collect();
            if !json_ids.is_array() || node_ids.len() != json_ids.len() {
                return Err(MeshError::parse(format!(
                    "Element {} must have an array of non-negative integer 'node_ids'",
                    element_id
                )));
            }

            Ok((element_type, node_ids))
        })
        .collect()
}
