//! Pointer -> zone resolution against the cube overlay.
//!
//! The overlay camera is orthographic and looks down -Z. A pointer ray is moved into
//! cube space, intersected with the unit cube `[-1, 1]^3`, and the hit point is then
//! classified: every in-plane coordinate that falls inside the bevel band next to a
//! face boundary constrains one more axis. One axis is a face, two an edge, three a
//! corner, so the most constrained zone wins wherever bands overlap.

use axes::AxisSystem;
use glam::{Vec2, Vec3};
use settings::DEFAULT_BEVEL_FRACTION;

use crate::placement::CubeTransform;
use crate::region::Zone;

/// Half size of the overlay's view volume in cube units. Wide enough that the
/// cube's diagonal (sqrt 3) never clips.
pub const OVERLAY_HALF_EXTENT: f32 = 1.8;

const RAY_START_Z: f32 = 10.0;
const DIR_EPSILON: f32 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Entry point of a ray into the unit cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeHit {
    pub point: Vec3,
    /// Index of the axis whose face was entered
    pub face_axis: usize,
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickingResolver {
    bevel_fraction: f32,
    axes: AxisSystem,
}

impl PickingResolver {
    pub fn new(bevel_fraction: f32, axes: AxisSystem) -> Self {
        Self {
            bevel_fraction,
            axes,
        }
    }

    /// In-plane coordinates beyond this magnitude fall in a bevel band.
    pub fn band_threshold(&self) -> f32 {
        1.0 - 2.0 * self.bevel_fraction
    }

    /// Resolve an overlay-local pointer position (`[-1, 1]`, +Y up) to a zone.
    pub fn pick(&self, local: Vec2, transform: &CubeTransform) -> Option<Zone> {
        let ray = overlay_ray(local, transform);
        let hit = intersect_unit_cube(&ray)?;
        Some(self.classify(&hit))
    }

    /// Zone under a hit point in world-aligned cube space.
    pub fn classify(&self, hit: &CubeHit) -> Zone {
        let canonical = self.axes.world_to_canonical(hit.point);
        let face_axis = dominant_axis(self.axes.world_to_canonical(unit(hit.face_axis)));

        let threshold = self.band_threshold();
        let mut signs = [0i8; 3];
        for (i, sign) in signs.iter_mut().enumerate() {
            let coord = canonical[i];
            if i == face_axis || coord.abs() > threshold {
                *sign = if coord < 0.0 { -1 } else { 1 };
            }
        }
        // Every sign triple with at least one non-zero entry names a zone.
        Zone::from_signs(signs).unwrap_or(Zone::Front)
    }
}

impl Default for PickingResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BEVEL_FRACTION, AxisSystem::default())
    }
}

/// Orthographic ray through `local`, expressed in cube space.
pub fn overlay_ray(local: Vec2, transform: &CubeTransform) -> Ray {
    let origin = Vec3::new(
        local.x * OVERLAY_HALF_EXTENT,
        local.y * OVERLAY_HALF_EXTENT,
        RAY_START_Z,
    );
    Ray {
        origin: transform.view_to_cube_point(origin),
        dir: transform.view_to_cube_dir(Vec3::NEG_Z),
    }
}

/// Slab test against `[-1, 1]^3`; returns the entry point.
pub fn intersect_unit_cube(ray: &Ray) -> Option<CubeHit> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut face_axis = None;

    for i in 0..3 {
        let o = ray.origin[i];
        let d = ray.dir[i];
        if d.abs() < DIR_EPSILON {
            if o.abs() > 1.0 {
                return None;
            }
            continue;
        }
        let t1 = (-1.0 - o) / d;
        let t2 = (1.0 - o) / d;
        let (lo, hi) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if lo > t_near {
            t_near = lo;
            face_axis = Some(i);
        }
        t_far = t_far.min(hi);
    }

    let face_axis = face_axis?;
    if t_near > t_far || t_near < 0.0 {
        return None;
    }
    Some(CubeHit {
        point: ray.origin + ray.dir * t_near,
        face_axis,
        distance: t_near,
    })
}

fn unit(index: usize) -> Vec3 {
    match index {
        0 => Vec3::X,
        1 => Vec3::Y,
        _ => Vec3::Z,
    }
}

fn dominant_axis(v: Vec3) -> usize {
    let a = v.abs();
    if a.x >= a.y && a.x >= a.z {
        0
    } else if a.y >= a.z {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use axes::AxisPreset;
    use glam::Quat;

    use super::*;
    use crate::mapper::OrientationMapper;
    use crate::region::{all_zones, ZoneKind};

    /// Overlay-local position whose ray hits the front face at (x, y) with identity transform.
    fn front_point(x: f32, y: f32) -> Vec2 {
        Vec2::new(x / OVERLAY_HALF_EXTENT, y / OVERLAY_HALF_EXTENT)
    }

    #[test]
    fn face_interior_resolves_to_face() {
        let resolver = PickingResolver::default();
        let transform = CubeTransform::default();
        for (x, y) in [(0.0, 0.0), (0.55, 0.55), (-0.55, 0.3), (0.0, -0.59)] {
            assert_eq!(
                resolver.pick(front_point(x, y), &transform),
                Some(Zone::Front),
                "({x}, {y})"
            );
        }
    }

    #[test]
    fn edge_bands_resolve_to_edges() {
        let resolver = PickingResolver::default();
        let transform = CubeTransform::default();
        let cases = [
            ((0.8, 0.0), Zone::FrontRight),
            ((-0.8, 0.2), Zone::FrontLeft),
            ((0.1, 0.9), Zone::TopFront),
            ((0.0, -0.7), Zone::BottomFront),
        ];
        for ((x, y), zone) in cases {
            assert_eq!(resolver.pick(front_point(x, y), &transform), Some(zone));
        }
    }

    #[test]
    fn corner_band_beats_edge_bands() {
        let resolver = PickingResolver::default();
        let transform = CubeTransform::default();
        let cases = [
            ((0.8, 0.8), Zone::TopFrontRight),
            ((-0.95, 0.65), Zone::TopFrontLeft),
            ((0.7, -0.9), Zone::BottomFrontRight),
            ((-0.7, -0.7), Zone::BottomFrontLeft),
        ];
        for ((x, y), zone) in cases {
            let picked = resolver.pick(front_point(x, y), &transform);
            assert_eq!(picked, Some(zone));
            assert_eq!(picked.map(Zone::kind), Some(ZoneKind::Corner));
        }
    }

    #[test]
    fn outside_the_cube_is_no_hit() {
        let resolver = PickingResolver::default();
        let transform = CubeTransform::default();
        assert_eq!(resolver.pick(front_point(1.2, 0.0), &transform), None);
        assert_eq!(resolver.pick(Vec2::new(0.95, 0.95), &transform), None);
    }

    #[test]
    fn picking_is_deterministic() {
        let resolver = PickingResolver::default();
        let transform = CubeTransform::from_camera(Quat::from_euler(
            glam::EulerRot::YXZ,
            0.4,
            -0.3,
            0.0,
        ));
        for i in 0..50 {
            let local = Vec2::new(i as f32 / 50.0 - 0.5, 0.3 - i as f32 / 80.0);
            assert_eq!(
                resolver.pick(local, &transform),
                resolver.pick(local, &transform)
            );
        }
    }

    #[test]
    fn center_pick_from_each_canonical_view_returns_that_zone() {
        for preset in AxisPreset::ALL {
            let axes = preset.axis_system();
            let mapper = OrientationMapper::new(axes);
            let resolver = PickingResolver::new(DEFAULT_BEVEL_FRACTION, axes);
            for zone in all_zones() {
                let transform = CubeTransform::from_camera(mapper.map(*zone).rotation());
                assert_eq!(
                    resolver.pick(Vec2::ZERO, &transform),
                    Some(*zone),
                    "{preset:?}"
                );
            }
        }
    }

    #[test]
    fn rotated_cube_shows_right_face() {
        let mapper = OrientationMapper::default();
        let resolver = PickingResolver::default();
        let transform = CubeTransform::from_camera(mapper.map(Zone::Right).rotation());
        // Screen right of the right face is the back of the cube.
        assert_eq!(
            resolver.pick(front_point(0.8, 0.0), &transform),
            Some(Zone::BackRight)
        );
        assert_eq!(
            resolver.pick(front_point(0.0, 0.8), &transform),
            Some(Zone::TopRight)
        );
    }

    #[test]
    fn front_view_neighbours_sit_where_they_belong() {
        for preset in AxisPreset::ALL {
            let axes = preset.axis_system();
            let mapper = OrientationMapper::new(axes);
            let resolver = PickingResolver::new(DEFAULT_BEVEL_FRACTION, axes);
            let transform = CubeTransform::from_camera(mapper.map(Zone::Front).rotation());

            let right = resolver.pick(front_point(0.8, 0.0), &transform);
            assert_eq!(right, Some(Zone::FrontRight), "{preset:?}");
            let left = resolver.pick(front_point(-0.8, 0.0), &transform);
            assert_eq!(left, Some(Zone::FrontLeft), "{preset:?}");
            let top = resolver.pick(front_point(0.0, 0.8), &transform);
            assert_eq!(top, Some(Zone::TopFront), "{preset:?}");
        }
    }

    #[test]
    fn narrower_bevels_shrink_edge_targets() {
        let transform = CubeTransform::default();
        let narrow = PickingResolver::new(0.05, AxisSystem::default());
        assert_eq!(narrow.pick(front_point(0.8, 0.0), &transform), Some(Zone::Front));
        assert_eq!(
            narrow.pick(front_point(0.95, 0.0), &transform),
            Some(Zone::FrontRight)
        );
    }
}
