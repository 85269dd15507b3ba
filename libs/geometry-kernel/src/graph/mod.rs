//! # Vertex Graph
//!
//! Transient adjacency view of a [`PolygonMesh`] used to coarsen it by edge
//! collapse. One node per mesh vertex; faces are carried along as index
//! cycles so the graph converts back into a mesh.
//!
//! ## Collapse Rule
//!
//! The shortest edge whose endpoints share at most two neighbours (the link
//! condition, which keeps a closed triangle mesh manifold) is contracted to
//! its midpoint. Faces left with fewer than three distinct corners vanish.


use std::collections::{BTreeSet, HashMap};

use crate::error::KernelResult;
use crate::math::Vec3;
use crate::mesh::PolygonMesh;
use config::constants::MIN_POLYGON_VERTICES;

/// Nodes are never collapsed below a tetrahedron.
const MIN_LIVE_NODES: usize = 4;

/// Neighbours two collapse endpoints may share.
const MAX_SHARED_NEIGHBOURS: usize = 2;

/// A mesh vertex and the vertices it shares an edge with.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Vertex position.
    pub position: Vec3,
    /// Indices of neighbouring nodes.
    pub adjacency: BTreeSet<usize>,
}

/// Edge-collapse graph over a mesh.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    faces: Vec<Vec<usize>>,
}

impl Graph {
    /// Builds the graph of `mesh`: one node per vertex, one adjacency per
    /// face edge.
    pub fn from_mesh(mesh: &PolygonMesh) -> Self {
        let mut nodes: Vec<Option<Node>> = mesh
            .vertices()
            .iter()
            .map(|&position| {
                Some(Node {
                    position,
                    adjacency: BTreeSet::new(),
                })
            })
            .collect();

        let mut faces = Vec::with_capacity(mesh.polygon_count());
        for face in mesh.polygons() {
            let corners = face.indices();
            for k in 0..corners.len() {
                let a = corners[k];
                let b = corners[(k + 1) % corners.len()];
                if a == b {
                    continue;
                }
                if let Some(node) = nodes[a].as_mut() {
                    node.adjacency.insert(b);
                }
                if let Some(node) = nodes[b].as_mut() {
                    node.adjacency.insert(a);
                }
            }
            faces.push(corners.to_vec());
        }

        Self { nodes, faces }
    }

    /// Node `index`, unless it was collapsed away.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    /// Number of nodes still present.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .map(|node| node.adjacency.len())
            .sum::<usize>()
            / 2
    }

    /// Collapses up to `count` edges, shortest first.
    ///
    /// Stops early when no edge passes the link condition or only a
    /// tetrahedron's worth of nodes is left. Returns the number collapsed.
    pub fn collapse_edges(&mut self, count: usize) -> usize {
        let mut collapsed = 0;
        while collapsed < count && self.node_count() > MIN_LIVE_NODES {
            let Some((keep, remove)) = self.shortest_collapsible_edge() else {
                log::debug!("no collapsible edge left after {collapsed} collapses");
                break;
            };
            self.collapse(keep, remove);
            collapsed += 1;
        }
        collapsed
    }

    /// Converts back into a mesh, renumbering the surviving nodes.
    pub fn to_mesh(&self) -> KernelResult<PolygonMesh> {
        let mut mesh = PolygonMesh::new();
        let mut remap: HashMap<usize, usize> = HashMap::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(node) = node {
                remap.insert(index, mesh.add_vertex(node.position));
            }
        }

        for face in &self.faces {
            let indices: Vec<usize> = face.iter().filter_map(|i| remap.get(i).copied()).collect();
            if indices.len() == face.len() && indices.len() >= MIN_POLYGON_VERTICES {
                mesh.add_polygon(indices)?;
            }
        }
        Ok(mesh)
    }

    fn shortest_collapsible_edge(&self) -> Option<(usize, usize)> {
        let mut edges: Vec<(f64, usize, usize)> = Vec::new();
        for (a, node) in self.nodes.iter().enumerate() {
            let Some(node) = node else { continue };
            for &b in node.adjacency.range((a + 1)..) {
                if let Some(other) = self.node(b) {
                    edges.push((node.position.distance_squared(other.position), a, b));
                }
            }
        }
        edges.sort_by(|x, y| x.0.total_cmp(&y.0));

        edges
            .into_iter()
            .map(|(_, a, b)| (a, b))
            .find(|&(a, b)| self.satisfies_link_condition(a, b))
    }

    fn satisfies_link_condition(&self, a: usize, b: usize) -> bool {
        match (self.node(a), self.node(b)) {
            (Some(na), Some(nb)) => {
                na.adjacency.intersection(&nb.adjacency).count() <= MAX_SHARED_NEIGHBOURS
            }
            _ => false,
        }
    }

    /// Contracts edge `keep`-`remove` onto `keep` at the midpoint.
    fn collapse(&mut self, keep: usize, remove: usize) {
        let Some(removed) = self.nodes.get_mut(remove).and_then(Option::take) else {
            return;
        };

        for &neighbour in &removed.adjacency {
            if let Some(node) = self.nodes.get_mut(neighbour).and_then(Option::as_mut) {
                node.adjacency.remove(&remove);
                if neighbour != keep {
                    node.adjacency.insert(keep);
                }
            }
        }

        if let Some(kept) = self.nodes.get_mut(keep).and_then(Option::as_mut) {
            kept.position = (kept.position + removed.position) * 0.5;
            kept.adjacency.remove(&remove);
            kept.adjacency
                .extend(removed.adjacency.iter().copied().filter(|&n| n != keep));
        }

        for face in &mut self.faces {
            for corner in face.iter_mut() {
                if *corner == remove {
                    *corner = keep;
                }
            }
            dedup_cycle(face);
        }
        self.faces.retain(|face| face.len() >= MIN_POLYGON_VERTICES);
    }
}

/// Drops corners equal to their successor, including across the wrap.
fn dedup_cycle(face: &mut Vec<usize>) {
    face.dedup();
    while face.len() > 1 && face.first() == face.last() {
        face.pop();
    }
}
