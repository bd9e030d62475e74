use log::warn;
use std::collections::{HashMap, HashSet};

/// Identity of a directed half-edge: the endpoint order is kept as given,
/// so (a, b) and (b, a) are distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectedEdgeKey {
    v: [i32; 2],
}

impl DirectedEdgeKey {
    pub fn new(v0: i32, v1: i32) -> Self {
        Self { v: [v0, v1] }
    }

    /// The stored endpoint pair, in construction order.
    pub fn endpoints(&self) -> [i32; 2] {
        self.v
    }
}

impl Default for DirectedEdgeKey {
    /// The "no edge" sentinel (-1, -1).
    fn default() -> Self {
        Self { v: [-1, -1] }
    }
}

/// Identity of an undirected mesh edge. The endpoints are stored in
/// (min, max) order, so (a, b) and (b, a) compare and hash as the same
/// edge regardless of traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UndirectedEdgeKey {
    v: [i32; 2],
}

impl UndirectedEdgeKey {
    pub fn new(v0: i32, v1: i32) -> Self {
        if v0 < v1 {
            Self { v: [v0, v1] }
        } else {
            Self { v: [v1, v0] }
        }
    }

    /// The stored endpoint pair, canonical (min, max) order.
    pub fn endpoints(&self) -> [i32; 2] {
        self.v
    }
}

impl Default for UndirectedEdgeKey {
    /// The "no edge" sentinel (-1, -1).
    fn default() -> Self {
        Self { v: [-1, -1] }
    }
}

/// Edge-sharing information for a triangle index buffer.
///
/// Maps every undirected edge to the triangles containing it, the basis for
/// adjacency queries (boundary detection, edge neighbors).
#[derive(Debug, Clone)]
pub struct EdgeTopology {
    /// For each undirected edge, the list of triangles that contain it.
    /// Boundary edges have exactly 1 entry.
    pub edge_triangles: HashMap<UndirectedEdgeKey, Vec<u32>>,
    /// True when no two triangles traverse a shared edge in the same
    /// direction. On a manifold mesh this means the winding is consistent.
    pub consistent_winding: bool,
}

impl EdgeTopology {
    /// Build edge topology from a flat triangle index buffer (stride 3).
    ///
    /// Triangles referencing a vertex index `>= vertex_count` are skipped
    /// with a warning rather than aborting the build.
    pub fn build(indices: &[u32], vertex_count: usize) -> Self {
        if indices.len() % 3 != 0 {
            warn!(
                "Index buffer length {} is not a multiple of 3; trailing indices ignored.",
                indices.len()
            );
        }

        let mut edge_triangles: HashMap<UndirectedEdgeKey, Vec<u32>> = HashMap::new();
        let mut half_edges: HashSet<DirectedEdgeKey> = HashSet::new();
        let mut consistent_winding = true;

        for (t, tri) in indices.chunks_exact(3).enumerate() {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            if a as usize >= vertex_count || b as usize >= vertex_count || c as usize >= vertex_count
            {
                warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    a, b, c, vertex_count
                );
                continue;
            }

            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                edge_triangles
                    .entry(UndirectedEdgeKey::new(v0 as i32, v1 as i32))
                    .or_default()
                    .push(t as u32);

                // A repeated half-edge means two faces traverse this edge
                // in the same direction.
                if !half_edges.insert(DirectedEdgeKey::new(v0 as i32, v1 as i32)) {
                    consistent_winding = false;
                }
            }
        }

        Self {
            edge_triangles,
            consistent_winding,
        }
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_triangles.len()
    }

    /// Triangles sharing the given edge. Empty for unknown edges.
    pub fn triangles_sharing(&self, edge: UndirectedEdgeKey) -> &[u32] {
        self.edge_triangles
            .get(&edge)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_triangles
            .values()
            .filter(|tris| tris.len() == 1)
            .count()
    }

    /// True if the mesh is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }
}
