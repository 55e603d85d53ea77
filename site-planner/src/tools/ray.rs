use bevy::prelude::*;

use crate::engine::scene::site_model::Footprint;

/// Where a ray meets the plane `z = plane_z`, as the ray parameter and the
/// hit point on that plane. `None` when the ray is parallel to the plane or
/// the plane is behind the ray origin.
pub fn ray_plane_hit(ray: Ray3d, plane_z: f32) -> Option<(f32, Vec2)> {
    let direction = ray.direction.as_vec3();
    if direction.z.abs() <= f32::EPSILON {
        return None;
    }

    let t = (plane_z - ray.origin.z) / direction.z;
    if t < 0.0 {
        return None;
    }

    Some((t, (ray.origin + direction * t).truncate()))
}

/// Ray against a flat rectangle lying in the plane `z = plane_z`.
pub fn ray_hits_footprint(ray: Ray3d, footprint: &Footprint, plane_z: f32) -> Option<f32> {
    let (t, point) = ray_plane_hit(ray, plane_z)?;
    footprint.contains(point).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_ray(x: f32, y: f32) -> Ray3d {
        Ray3d::new(Vec3::new(x, y, 100.0), Dir3::NEG_Z)
    }

    #[test]
    fn test_plane_hit_below_origin() {
        let (t, point) = ray_plane_hit(down_ray(3.0, -4.0), 0.0).unwrap();
        assert_eq!(t, 100.0);
        assert_eq!(point, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        assert!(ray_plane_hit(down_ray(0.0, 0.0), 150.0).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::X);
        assert!(ray_plane_hit(ray, 0.0).is_none());
    }

    #[test]
    fn test_footprint_hit_and_miss() {
        let footprint = Footprint {
            size: Vec2::new(20.0, 10.0),
            center: Vec2::new(-30.0, 5.0),
        };
        assert!(ray_hits_footprint(down_ray(-35.0, 8.0), &footprint, 1.0).is_some());
        assert!(ray_hits_footprint(down_ray(-15.0, 8.0), &footprint, 1.0).is_none());
    }
}
