use crate::core::math::tangent::compute_tangent;
use crate::scene::mesh::Mesh;
use log::{debug, warn};
use nalgebra::{Matrix4, Vector3, Vector4};

/// Computes the tangent-space light vector for every vertex of `mesh` and
/// stores it in the vertex `light_direction` slot.
///
/// `world_light_direction` is a homogeneous (w = 0) world-space vector
/// pointing in the direction the light travels. Per corner the pass derives
/// a tangent from the base texture parametrization, builds the right-handed
/// orthonormal frame {T, B, N} around the vertex normal, projects the
/// (negated, model-space) light direction into it and shifts the
/// coordinates into [0,1]^3 for storage. Corners whose parametrization is
/// degenerate store the raw surface normal instead, so bump mapping
/// degrades to flat-normal shading there.
///
/// Each vertex's frame comes from whichever triangle visits it first; the
/// result is deterministic for a fixed index buffer.
///
/// The caller must ensure exclusive access to the mesh for the duration of
/// the call.
pub fn compute_light_vectors(mesh: &mut Mesh, world_light_direction: Vector4<f32>) {
    // The light direction D is in world space. Negate it (U = -D points
    // from the surface toward the light), move it into model space and
    // normalize: the model-to-world transform may carry non-uniform scale.
    let inv_world = mesh.world_transform.try_inverse().unwrap_or_else(|| {
        warn!("Mesh world transform is not invertible; treating it as identity.");
        Matrix4::identity()
    });
    let projected = homogeneous_project(-(inv_world * world_light_direction));
    let model_light_direction = projected.try_normalize(0.0).unwrap_or_else(|| {
        warn!("Light direction transforms to zero; tangent-space projections will be zero.");
        projected
    });

    // Clear every output slot so the memoization below starts fresh.
    for vertex in &mut mesh.vertices {
        vertex.light_direction = None;
    }

    if mesh.indices.len() % 3 != 0 {
        warn!(
            "Index buffer length {} is not a multiple of 3; trailing indices ignored.",
            mesh.indices.len()
        );
    }

    let vertex_count = mesh.vertices.len();
    let mut fallbacks = 0usize;

    for tri in mesh.indices.chunks_exact(3) {
        let v = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if v[0] >= vertex_count || v[1] >= vertex_count || v[2] >= vertex_count {
            warn!(
                "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                v[0], v[1], v[2], vertex_count
            );
            continue;
        }

        for i in 0..3 {
            let v0 = v[i];
            if mesh.vertices[v0].light_direction.is_some() {
                // Already computed from an earlier triangle.
                continue;
            }

            // Cyclic successor and predecessor of this corner.
            let v1 = v[(i + 1) % 3];
            let v2 = v[(i + 2) % 3];

            let corner = mesh.vertices[v0];
            let next = mesh.vertices[v1];
            let prev = mesh.vertices[v2];
            let normal = corner.normal;

            let Some(tangent) = compute_tangent(
                corner.position,
                corner.base_texcoord,
                next.position,
                next.base_texcoord,
                prev.position,
                prev.base_texcoord,
            ) else {
                // The texture parametrization is not usable at this corner.
                // Fall back to the surface normal as the tangent-space
                // light vector.
                mesh.vertices[v0].light_direction = Some(normal);
                fallbacks += 1;
                continue;
            };

            // Project T into the tangent plane by projecting out the
            // surface normal, then make it unit length. A tangent parallel
            // to the normal has no tangential part left and takes the same
            // fallback as any other degeneracy.
            let in_plane = tangent - normal.dot(&tangent) * normal;
            let Some(tangent) = in_plane.try_normalize(0.0) else {
                mesh.vertices[v0].light_direction = Some(normal);
                fallbacks += 1;
                continue;
            };

            // {T, B, N} is a right-handed orthonormal set. U is represented
            // in it as U = (U.T)T + (U.B)B + (U.N)N.
            let bitangent = normal.cross(&tangent).normalize();
            let dot_ut = model_light_direction.dot(&tangent);
            let dot_ub = model_light_direction.dot(&bitangent);
            let dot_un = model_light_direction.dot(&normal);

            // Shift the [-1, 1] coordinates into [0, 1]^3 for storage.
            mesh.vertices[v0].light_direction = Some(Vector3::new(
                0.5 * (dot_ut + 1.0),
                0.5 * (dot_ub + 1.0),
                0.5 * (dot_un + 1.0),
            ));
        }
    }

    debug!(
        "Tangent-space light vectors computed for {} vertices ({} normal fallbacks).",
        mesh.vertices.len(),
        fallbacks
    );
}

/// Projects a homogeneous vector back to 3D. Directions (w = 0) pass
/// through unchanged; anything with a meaningful w divides by it.
fn homogeneous_project(v: Vector4<f32>) -> Vector3<f32> {
    if v.w.abs() > 1e-6 {
        v.xyz() / v.w
    } else {
        v.xyz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vertex;
    use crate::scene::light::DirectionalLight;
    use nalgebra::{Point3, Vector2};
    use std::f32::consts::FRAC_PI_2;

    const TOLERANCE: f32 = 1e-5;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn assert_vec3_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).norm() < TOLERANCE, "{a:?} != {b:?}");
    }

    // Light traveling straight down -Z onto the +Z-facing test triangle:
    // U = +Z coincides with every normal, encoding to (0.5, 0.5, 1.0).
    #[test]
    fn light_down_the_normal_encodes_to_half_half_one() {
        let mut mesh = Mesh::create_test_triangle();
        compute_light_vectors(&mut mesh, Vector4::new(0.0, 0.0, -1.0, 0.0));

        for vertex in &mesh.vertices {
            assert_vec3_eq(vertex.light_direction.unwrap(), Vector3::new(0.5, 0.5, 1.0));
        }
    }

    #[test]
    fn encoded_components_lie_in_unit_range() {
        let light = DirectionalLight::white(Vector3::new(0.3, -0.7, -0.2));
        let mut mesh = Mesh::create_test_triangle();
        compute_light_vectors(&mut mesh, light.world_direction());

        for vertex in &mesh.vertices {
            let encoded = vertex.light_direction.unwrap();
            for c in [encoded.x, encoded.y, encoded.z] {
                assert!((0.0..=1.0).contains(&c), "component {c} out of range");
            }
        }
    }

    #[test]
    fn degenerate_texcoords_fall_back_to_raw_normal() {
        init_logs();
        let mut mesh = Mesh::create_test_triangle();
        // Collapse the parametrization; every corner becomes degenerate.
        for vertex in &mut mesh.vertices {
            vertex.base_texcoord = Vector2::new(0.5, 0.5);
        }
        compute_light_vectors(&mut mesh, Vector4::new(1.0, 0.0, 0.0, 0.0));

        // The fallback is the surface normal itself, not a frame-encoded
        // value (which would have been (0.5, 0.5, ...) here).
        for vertex in &mesh.vertices {
            assert_vec3_eq(vertex.light_direction.unwrap(), vertex.normal);
        }
    }

    #[test]
    fn first_visiting_triangle_wins() {
        // Two triangles share vertex 0 but parametrize it differently:
        // triangle (0,1,2) yields T = +X there, triangle (0,2,3) T = -X.
        let normal = Vector3::new(0.0, 0.0, 1.0);
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), normal, Vector2::new(0.0, 0.0)),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), normal, Vector2::new(1.0, 0.0)),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), normal, Vector2::new(0.0, 1.0)),
            Vertex::new(Point3::new(-1.0, 0.0, 0.0), normal, Vector2::new(1.0, 0.0)),
        ];

        // U = +X in model space.
        let world_light = Vector4::new(-1.0, 0.0, 0.0, 0.0);

        let mut forward = Mesh::new(vertices.clone(), vec![0, 1, 2, 0, 2, 3]);
        compute_light_vectors(&mut forward, world_light);
        assert_vec3_eq(
            forward.vertices[0].light_direction.unwrap(),
            Vector3::new(1.0, 0.5, 0.5),
        );

        let mut reversed = Mesh::new(vertices, vec![0, 2, 3, 0, 1, 2]);
        compute_light_vectors(&mut reversed, world_light);
        assert_vec3_eq(
            reversed.vertices[0].light_direction.unwrap(),
            Vector3::new(0.0, 0.5, 0.5),
        );
    }

    #[test]
    fn non_uniform_scale_is_renormalized() {
        let mut mesh = Mesh::create_test_triangle();
        mesh.world_transform = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 5.0));
        compute_light_vectors(&mut mesh, Vector4::new(0.0, 0.0, -1.0, 0.0));

        // Without renormalization the inverse scale would leave |U| = 0.2
        // and the N component would encode to 0.6.
        for vertex in &mesh.vertices {
            assert_vec3_eq(vertex.light_direction.unwrap(), Vector3::new(0.5, 0.5, 1.0));
        }
    }

    #[test]
    fn world_rotation_is_undone_before_projection() {
        // Rotate the model 90 degrees about Y (model +Z faces world +X)
        // and shine the light against world +X; in model space that is
        // again straight down the normal.
        let mut mesh = Mesh::create_test_triangle();
        mesh.world_transform = Matrix4::new_rotation(Vector3::y() * FRAC_PI_2);
        compute_light_vectors(&mut mesh, Vector4::new(-1.0, 0.0, 0.0, 0.0));

        for vertex in &mesh.vertices {
            assert_vec3_eq(vertex.light_direction.unwrap(), Vector3::new(0.5, 0.5, 1.0));
        }
    }

    #[test]
    fn unreferenced_vertices_stay_uncomputed() {
        init_logs();
        let mut mesh = Mesh::create_test_triangle();
        mesh.vertices.push(Vertex::new(
            Point3::new(9.0, 9.0, 9.0),
            Vector3::z(),
            Vector2::new(0.0, 0.0),
        ));
        compute_light_vectors(&mut mesh, Vector4::new(0.0, 0.0, -1.0, 0.0));

        assert!(mesh.vertices[3].light_direction.is_none());
        assert!(mesh.vertices[..3].iter().all(|v| v.light_direction.is_some()));
    }
}
