use nalgebra::{Point3, Vector2, Vector3};

const EPSILON: f32 = 1e-8;

/// Solves for the surface tangent dP/du at vertex p0 of a triangle, using
/// the texture parametrization of the three corners.
///
/// The edge vectors relate to the texcoord deltas by a 2x2 linear system;
/// when that system is well conditioned the analytic solution
/// `(dv1*dP2 - dv2*dP1) / (dv1*du2 - dv2*du1)` is returned. When the v
/// coordinate does not vary along edge p0->p1 the tangent degenerates to
/// the pure u-derivative `dP1 / du1`.
///
/// Returns `None` if the triangle cannot define a tangent direction:
/// - either edge at p0 has near-zero length (degenerate triangle), or
/// - the texture coordinates do not vary (no usable parametrization), or
/// - the corners are collinear in parameter space.
pub fn compute_tangent(
    position0: Point3<f32>,
    tcoord0: Vector2<f32>,
    position1: Point3<f32>,
    tcoord1: Vector2<f32>,
    position2: Point3<f32>,
    tcoord2: Vector2<f32>,
) -> Option<Vector3<f32>> {
    // Change in positions at the vertex P0.
    let delta_pos1 = position1 - position0;
    let delta_pos2 = position2 - position0;

    if delta_pos1.norm() <= EPSILON || delta_pos2.norm() <= EPSILON {
        // The triangle is degenerate.
        return None;
    }

    // Change in texture coordinates at P0 in the direction of edge P1-P0.
    let du1 = tcoord1.x - tcoord0.x;
    let dv1 = tcoord1.y - tcoord0.y;
    if dv1.abs() <= EPSILON {
        // No variation in the v coordinate along this edge.
        if du1.abs() <= EPSILON {
            // No variation in u either: degenerate parametric surface.
            return None;
        }

        // The variation is effectively all in u, so T = dP/du.
        return Some(delta_pos1 / du1);
    }

    // Change in texture coordinates at P0 in the direction of edge P2-P0.
    let du2 = tcoord2.x - tcoord0.x;
    let dv2 = tcoord2.y - tcoord0.y;
    let det = dv1 * du2 - dv2 * du1;
    if det.abs() <= EPSILON {
        // The corners are collinear in parameter space.
        return None;
    }

    Some((dv1 * delta_pos2 - dv2 * delta_pos1) / det)
}
