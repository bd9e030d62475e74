use crate::core::geometry::Vertex;
use crate::core::topology::EdgeTopology;
use log::warn;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object, together
/// with its model-to-world transform.
pub struct Mesh {
    /// List of vertices.
    pub vertices: Vec<Vertex>,
    /// List of indices defining triangles (3 indices per triangle).
    pub indices: Vec<u32>,
    /// Model-to-world transform. Identity unless set.
    pub world_transform: Matrix4<f32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            world_transform: Matrix4::identity(),
        }
    }

    pub fn with_world_transform(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        world_transform: Matrix4<f32>,
    ) -> Self {
        Self {
            vertices,
            indices,
            world_transform,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The index triple of triangle `t`. Panics if `t >= triangle_count()`.
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let i = t * 3;
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }

    /// Edge-sharing topology of this mesh's index buffer.
    pub fn edge_topology(&self) -> EdgeTopology {
        EdgeTopology::build(&self.indices, self.vertices.len())
    }

    /// Computes smooth vertex normals by area-weighted averaging of face
    /// normals, replacing any existing normals. Vertices not referenced by
    /// any valid triangle get the default up normal (0, 1, 0).
    ///
    /// Winding is assumed Counter-Clockwise (CCW).
    pub fn compute_normals(&mut self) {
        let vertex_count = self.vertices.len();
        let mut normals = vec![Vector3::zeros(); vertex_count];

        for tri in self.indices.chunks_exact(3) {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;

            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                warn!(
                    "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                    i0, i1, i2, vertex_count
                );
                continue;
            }

            let p0 = self.vertices[i0].position;
            let edge1 = self.vertices[i1].position - p0;
            let edge2 = self.vertices[i2].position - p0;

            // Cross product length is 2x triangle area, which gives the
            // area weighting for free.
            let face_normal = edge1.cross(&edge2);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(&normals) {
            let len = normal.norm();
            vertex.normal = if len > 0.0 {
                normal / len
            } else {
                Vector3::y() // Default up vector
            };
        }
    }

    /// Creates a simple one-triangle mesh for testing purposes.
    ///
    /// Vertices are arranged in Counter-Clockwise (CCW) order in the XY
    /// plane, facing +Z, with texcoords matching the positions.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), normal, Vector2::new(0.0, 0.0)),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), normal, Vector2::new(1.0, 0.0)),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), normal, Vector2::new(0.0, 1.0)),
        ];

        let indices = vec![0, 1, 2];

        Self::new(vertices, indices)
    }
}
