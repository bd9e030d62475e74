use nalgebra::{Point3, Vector2, Vector3};

/// Represents a single vertex in 3D space.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Normal vector, unit length by convention.
    pub normal: Vector3<f32>,
    /// Texture coordinates (UV) of the base color map. The tangent frame is
    /// derived from this parametrization.
    pub base_texcoord: Vector2<f32>,
    /// Texture coordinates (UV) of the normal map. Not consumed by the
    /// tangent computation; carried for the shader's normal lookup.
    pub normal_texcoord: Vector2<f32>,
    /// Tangent-space light vector, written by the lighting pass.
    /// `None` until computed. Frame-encoded results lie in [0,1]^3;
    /// degenerate corners store the raw surface normal instead.
    pub light_direction: Option<Vector3<f32>>,
}

impl Vertex {
    /// Creates a vertex whose normal-map channel reuses the base UVs.
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, base_texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            normal,
            base_texcoord,
            normal_texcoord: base_texcoord,
            light_direction: None,
        }
    }

    /// Creates a vertex with a separate normal-map UV channel.
    pub fn with_channels(
        position: Point3<f32>,
        normal: Vector3<f32>,
        base_texcoord: Vector2<f32>,
        normal_texcoord: Vector2<f32>,
    ) -> Self {
        Self {
            position,
            normal,
            base_texcoord,
            normal_texcoord,
            light_direction: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vertex_shares_uvs_across_channels() {
        let v = Vertex::new(Point3::origin(), Vector3::z(), Vector2::new(0.25, 0.75));
        assert_eq!(v.normal_texcoord, v.base_texcoord);
        assert!(v.light_direction.is_none());
    }

    #[test]
    fn channels_can_differ() {
        let v = Vertex::with_channels(
            Point3::origin(),
            Vector3::z(),
            Vector2::new(0.25, 0.75),
            Vector2::new(0.5, 0.5),
        );
        assert_ne!(v.normal_texcoord, v.base_texcoord);
    }
}
