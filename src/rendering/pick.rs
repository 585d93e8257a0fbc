use macroquad::math::{Mat4, Vec2, Vec3};

use super::instances::Frame;

/// Half the edge length of a voxel cube
const HALF_EXTENT: f32 = 0.5;

/// A ray in world space. `direction` need not be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Distance along the ray to a unit cube centered at `center`, if hit.
    /// Slab test against the axis-aligned box.
    pub fn hit_cube(&self, center: Vec3) -> Option<f32> {
        let min = center - Vec3::splat(HALF_EXTENT);
        let max = center + Vec3::splat(HALF_EXTENT);
        let inv = self.direction.recip();

        let t0 = (min - self.origin) * inv;
        let t1 = (max - self.origin) * inv;
        let near = t0.min(t1).max_element();
        let far = t0.max(t1).min_element();

        (far >= near.max(0.0)).then_some(near.max(0.0))
    }
}

/// Ray through a screen point (pixels, origin top-left), from the near
/// plane toward the far plane of `view_projection`.
pub fn screen_ray(view_projection: &Mat4, screen: Vec2, screen_size: Vec2) -> Ray {
    let ndc = Vec2::new(
        2.0 * screen.x / screen_size.x - 1.0,
        1.0 - 2.0 * screen.y / screen_size.y,
    );
    let inverse = view_projection.inverse();
    let near = inverse.project_point3(ndc.extend(-1.0));
    let far = inverse.project_point3(ndc.extend(1.0));
    Ray::new(near, far - near)
}

/// Nearest voxel of the frame under the ray.
/// Returns the hit instance's world position, or None when nothing is hit.
pub fn hit_test(frame: &Frame, ray: &Ray) -> Option<Vec3> {
    frame
        .positions()
        .filter_map(|p| ray.hit_cube(p).map(|t| (t, p)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, p)| p)
}
