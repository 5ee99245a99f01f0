use glam::{Quat, Vec2, Vec3};

/// Camera the view cube reads from and flies.
///
/// Orientation maps camera space (looking down -Z, +Y up) into world space.
pub trait DrivenCamera {
    fn orientation(&self) -> Quat;

    fn position(&self) -> Vec3;

    /// Point the camera orbits around.
    fn focus(&self) -> Vec3;

    fn set_pose(&mut self, orientation: Quat, position: Vec3);
}

/// Re-orient `camera` while keeping its distance to the focus point, so it
/// orbits rather than translates.
pub fn orbit_to<C: DrivenCamera + ?Sized>(camera: &mut C, orientation: Quat) {
    let focus = camera.focus();
    let distance = camera.position().distance(focus);
    let forward = orientation * Vec3::NEG_Z;
    camera.set_pose(orientation, focus - forward * distance);
}

/// Unit quaternions pass through untouched so exact targets stay bit-exact.
pub(crate) fn unit(q: Quat) -> Quat {
    if q.is_normalized() {
        q
    } else {
        q.normalize()
    }
}

/// Look-at camera with a free trackball orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    target: Vec3,
    radius: f32,
    orientation: Quat,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitCamera {
    pub fn new(target: Vec3, radius: f32, orientation: Quat) -> Self {
        Self {
            target,
            radius,
            orientation: unit(orientation),
            min_distance: 0.2,
            max_distance: 500.0,
        }
    }

    /// Camera positioned like the classic three-quarter startup view.
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let forward = (-offset).normalize_or_zero();
        let mut right = forward.cross(Vec3::Y);
        if right.length_squared() < 1e-6 {
            right = Vec3::X;
        }
        let right = right.normalize();
        let up = right.cross(forward).normalize();
        let orientation = Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward));
        Self::new(target, offset.length(), orientation)
    }

    pub fn with_distance_limits(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self.radius = self.radius.clamp(min_distance, max_distance);
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Camera-space trackball orbit: horizontal drag yaws around the camera's up,
    /// vertical drag pitches around its right. Full freedom, rolls included.
    pub fn orbit_trackball(&mut self, delta: Vec2, sensitivity: f32) {
        let sens = sensitivity * 0.005;
        let dx = delta.x * sens;
        let dy = -delta.y * sens;

        let right = (self.orientation * Vec3::X).normalize_or_zero();
        let up = (self.orientation * Vec3::Y).normalize_or_zero();
        if right.length_squared() == 0.0 || up.length_squared() == 0.0 {
            return;
        }

        let yaw_q = Quat::from_axis_angle(up, -dx);
        let pitch_q = Quat::from_axis_angle(right, dy);
        self.orientation = (yaw_q * pitch_q * self.orientation).normalize();
    }

    pub fn zoom(&mut self, amount: f32) {
        self.radius = (self.radius - amount).clamp(self.min_distance, self.max_distance);
    }
}

impl DrivenCamera for OrbitCamera {
    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn position(&self) -> Vec3 {
        let forward = self.orientation * Vec3::NEG_Z;
        self.target - forward * self.radius
    }

    fn focus(&self) -> Vec3 {
        self.target
    }

    fn set_pose(&mut self, orientation: Quat, position: Vec3) {
        self.orientation = unit(orientation);
        self.radius = position.distance(self.target);
    }
}
