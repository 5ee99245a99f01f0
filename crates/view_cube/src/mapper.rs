//! Zone -> camera orientation.
//!
//! A camera orientation rotates camera space (looking down -Z, +Y up) into world
//! space, the same convention the orbit camera uses.

use axes::AxisSystem;
use glam::{Mat3, Quat, Vec3};

use crate::region::Zone;

/// Below this squared cross length, forward counts as parallel to world up.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Canonical camera pose for one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationTarget {
    rotation: Quat,
}

impl OrientationTarget {
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Direction the camera looks in.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl From<OrientationTarget> for Quat {
    fn from(value: OrientationTarget) -> Self {
        value.rotation
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationMapper {
    axes: AxisSystem,
}

impl OrientationMapper {
    pub fn new(axes: AxisSystem) -> Self {
        Self { axes }
    }

    pub fn axis_system(&self) -> AxisSystem {
        self.axes
    }

    pub fn map(&self, zone: Zone) -> OrientationTarget {
        OrientationTarget {
            rotation: zone_orientation(zone, &self.axes),
        }
    }

    /// World-space point on the unit cube the zone sits on, before normalization.
    pub fn zone_offset(&self, zone: Zone) -> Vec3 {
        zone.axes()
            .iter()
            .fold(Vec3::ZERO, |acc, axis| acc + self.axes.to_world(*axis))
    }
}

/// Camera looks from the zone toward the cube center.
pub fn zone_orientation(zone: Zone, axes: &AxisSystem) -> Quat {
    let offset = OrientationMapper::new(*axes).zone_offset(zone);
    look_along(-offset.normalize(), axes)
}

/// Roll-free orientation looking along `forward`.
///
/// World up is used as the up hint. Looking straight down substitutes world back,
/// looking straight up substitutes world front, so the front face ends up at the
/// bottom (top view) or top (bottom view) of the screen.
pub fn look_along(forward: Vec3, axes: &AxisSystem) -> Quat {
    let world_up = axes.up_vec();
    let up_hint = if forward.cross(world_up).length_squared() < PARALLEL_EPSILON {
        if forward.dot(world_up) < 0.0 {
            axes.back_vec()
        } else {
            axes.front_vec()
        }
    } else {
        world_up
    };

    let right = forward.cross(up_hint).normalize();
    let up = right.cross(forward).normalize();
    let basis = Mat3::from_cols(right, up, -forward);
    Quat::from_mat3(&basis).normalize()
}
