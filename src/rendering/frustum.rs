use macroquad::math::{Mat4, Vec3, Vec4};

/// View frustum as six inward-facing planes `(normal, d)`.
/// A point is inside when `dot(normal, p) + d >= 0` for every plane.
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract planes from a combined projection * view matrix
    /// (OpenGL clip space, `-w <= z <= w`).
    pub fn from_view_projection(m: &Mat4) -> Self {
        let (r0, r1, r2, r3) = (m.row(0), m.row(1), m.row(2), m.row(3));
        let planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r3 + r2, r3 - r2].map(normalize_plane);
        Self { planes }
    }

    /// Center-point test; voxels are not tested by their bounding box
    #[inline]
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(p) + plane.w >= 0.0)
    }
}

fn normalize_plane(plane: Vec4) -> Vec4 {
    let len = plane.truncate().length();
    if len > 0.0 { plane / len } else { plane }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_minus_z() -> Frustum {
        let proj = Mat4::perspective_rh_gl(75f32.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        Frustum::from_view_projection(&(proj * view))
    }

    #[test]
    fn test_point_in_front_is_inside() {
        let frustum = looking_down_minus_z();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
        assert!(frustum.contains_point(Vec3::new(2.0, -2.0, -10.0)));
    }

    #[test]
    fn test_points_outside_each_side() {
        let frustum = looking_down_minus_z();
        // Behind the camera
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
        // Closer than the near plane
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -0.05)));
        // Past the far plane
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -150.0)));
        // Far off to the sides
        assert!(!frustum.contains_point(Vec3::new(50.0, 0.0, -10.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, -50.0, -10.0)));
    }
}
