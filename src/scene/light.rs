use nalgebra::{Vector3, Vector4};

/// A light source that is infinitely far away (e.g., Sun). Rays are
/// parallel, so a single world-space direction describes the whole light.
///
/// `direction` is the direction the light travels, not the direction toward
/// the light.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    /// A plain white light of unit intensity.
    pub fn white(direction: Vector3<f32>) -> Self {
        Self::new(direction, Vector3::new(1.0, 1.0, 1.0), 1.0)
    }

    /// The world-space direction as a homogeneous vector (w = 0), the form
    /// consumed by the tangent-space lighting pass.
    pub fn world_direction(&self) -> Vector4<f32> {
        self.direction.to_homogeneous()
    }
}
