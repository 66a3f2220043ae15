use bevy::prelude::*;
use bevy::render::primitives::Aabb;

use super::pointer::PointerSample;

/// One intersection along the pick ray. `distance` is the ray parameter in
/// world units from the ray origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Unproject a pointer sample into a world-space ray through the camera.
/// Returns `None` while the camera's projection is not yet computed.
pub fn pick_ray(
    sample: PointerSample,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Ray3d> {
    // Bevy's NDC depth runs from 1.0 at the near plane toward 0.0 at the
    // far plane; an exact 0.0 degenerates under the inverse projection.
    let near = camera.ndc_to_world(camera_transform, sample.ndc.extend(1.0))?;
    let far = camera.ndc_to_world(camera_transform, sample.ndc.extend(f32::EPSILON))?;
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Intersect a ray against every candidate's bounds, nearest hit first.
/// An empty candidate set or a ray missing everything yields an empty list.
pub fn ray_pick(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (Entity, GlobalTransform, Aabb)>,
) -> Vec<PickHit> {
    let mut hits: Vec<PickHit> = candidates
        .into_iter()
        .filter_map(|(entity, transform, aabb)| {
            ray_hits_bounds(ray.origin, ray.direction.as_vec3(), transform, aabb)
                .map(|distance| PickHit { entity, distance })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Test the ray against one entity's bounds in mesh-local space. The
/// direction is transformed without renormalising, so the returned `t`
/// stays a world-ray parameter and is comparable across entities.
fn ray_hits_bounds(origin: Vec3, dir: Vec3, xf: GlobalTransform, aabb: Aabb) -> Option<f32> {
    let inv = xf.affine().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let min = Vec3::from(aabb.center - aabb.half_extents);
    let max = Vec3::from(aabb.center + aabb.half_extents);
    ray_aabb_hit_t(o_local, d_local, min, max)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax { std::mem::swap(&mut tmin, &mut tmax); }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax { std::mem::swap(&mut tymin, &mut tymax); }

    if (tmin > tymax) || (tymin > tmax) { return None; }
    if tymin > tmin { tmin = tymin; }
    if tymax < tmax { tmax = tymax; }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax { std::mem::swap(&mut tzmin, &mut tzmax); }

    if (tmin > tzmax) || (tzmin > tmax) { return None; }
    if tzmin > tmin { tmin = tzmin; }
    if tzmax < tmax { tmax = tzmax; }

    if tmax < 0.0 { return None; }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(world: &mut World, position: Vec3) -> (Entity, GlobalTransform, Aabb) {
        let entity = world.spawn_empty().id();
        (
            entity,
            Transform::from_translation(position).into(),
            Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5)),
        )
    }

    fn z_ray() -> Ray3d {
        Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::NEG_Z)
    }

    #[test]
    fn slab_test_hit_and_miss() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);

        let t = ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, min, max).unwrap();
        assert!((t - 4.0).abs() < 1e-6);

        assert!(ray_aabb_hit_t(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z, min, max).is_none());
        // Box entirely behind the origin.
        assert!(ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, min, max).is_none());
    }

    #[test]
    fn slab_test_from_inside_the_box() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hits_come_back_nearest_first() {
        let mut world = World::new();
        let far = unit_box_at(&mut world, Vec3::new(0.0, 0.0, -5.0));
        let near = unit_box_at(&mut world, Vec3::new(0.0, 0.0, 2.0));
        let off_ray = unit_box_at(&mut world, Vec3::new(8.0, 0.0, 0.0));

        let hits = ray_pick(z_ray(), [far, near, off_ray]);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, near.0);
        assert_eq!(hits[1].entity, far.0);
        assert!(hits[0].distance < hits[1].distance);
    }

    #[test]
    fn empty_candidate_set_yields_no_hits() {
        assert!(ray_pick(z_ray(), []).is_empty());
    }

    #[test]
    fn translated_entity_reports_world_distance() {
        let mut world = World::new();
        let target = unit_box_at(&mut world, Vec3::new(0.0, 0.0, 4.0));
        let hits = ray_pick(z_ray(), [target]);
        assert_eq!(hits.len(), 1);
        // Ray starts at z=10, box front face at z=4.5.
        assert!((hits[0].distance - 5.5).abs() < 1e-5);
    }
}
