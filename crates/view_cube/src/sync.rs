//! Per-frame driver tying the cube overlay to a live camera.
//!
//! The host forwards pointer events and calls [`ViewCube::frame`] once per
//! animation frame. Within a frame the cube is synced from the camera before any
//! queued activation turns into a fly-to request.

use std::time::{Duration, Instant};

use axes::AxisSystem;
use glam::{Quat, Vec2, Vec3};
use settings::ViewCubeSettings;
use tracing::{debug, trace, warn};

use crate::camera::{orbit_to, DrivenCamera};
use crate::error::{ViewCubeError, ViewCubeResult};
use crate::fly_to::{FlyStart, FlyToController};
use crate::mapper::OrientationMapper;
use crate::picking::PickingResolver;
use crate::placement::{CubePlacement, CubeTransform, ScreenRect};
use crate::region::Zone;

/// Rotation step for arrow clicks, in camera space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateDelta {
    pub degrees: f32,
    pub axis: RotateAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateAxis {
    /// Horizontal screen axis (pitch)
    ScreenX,
    /// Vertical screen axis (yaw)
    ScreenY,
    /// View axis (roll)
    ScreenZ,
}

impl RotateDelta {
    /// Orientation reached by applying this step to `current`.
    pub fn apply(&self, current: Quat) -> Quat {
        let axis = match self.axis {
            RotateAxis::ScreenX => current * Vec3::NEG_X,
            RotateAxis::ScreenY => current * Vec3::NEG_Y,
            RotateAxis::ScreenZ => current * Vec3::Z,
        };
        if axis.length_squared() <= 0.0 {
            return current;
        }
        let rotation = Quat::from_axis_angle(axis.normalize(), self.degrees.to_radians());
        (rotation * current).normalize()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Request {
    Zone(Zone),
    Rotate(RotateDelta),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCubeEvent {
    ZoneActivated { zone: Zone },
    FlyStarted { generation: u64, target: Quat },
    /// The driven camera was re-oriented.
    Change { orientation: Quat },
    FlyFinished { generation: u64 },
    FlySuperseded { generation: u64 },
    FlyCancelled { generation: u64 },
}

/// Result of one [`ViewCube::frame`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub events: Vec<ViewCubeEvent>,
    /// The host should render this frame
    pub repaint: bool,
}

impl FrameOutput {
    /// Latest camera orientation written this frame.
    pub fn change(&self) -> Option<Quat> {
        self.events.iter().rev().find_map(|event| match event {
            ViewCubeEvent::Change { orientation } => Some(*orientation),
            _ => None,
        })
    }
}

/// Coalesces change notifications into at most one pending frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    /// Returns true when the caller must schedule a new animation frame.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Consume the pending request at the start of a frame.
    pub fn begin_frame(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Debug)]
pub struct ViewCube {
    axes: AxisSystem,
    duration: Duration,
    rotate_step_degrees: f32,
    mapper: OrientationMapper,
    picker: PickingResolver,
    placement: CubePlacement,
    viewport: (u32, u32),
    transform: CubeTransform,
    fly: FlyToController,
    pending: Option<Request>,
    hovered: Option<Zone>,
    scheduler: FrameScheduler,
}

impl ViewCube {
    pub fn new(settings: &ViewCubeSettings) -> ViewCubeResult<Self> {
        settings
            .validate()
            .inspect_err(|err| warn!("rejecting view cube settings: {err}"))?;
        let axes = settings.axis_preset.axis_system();
        debug!(
            "view cube: {}, {} ms flights, {}px at {:?}",
            settings.axis_preset.label(),
            settings.animation.duration_ms,
            settings.placement.size_px,
            settings.placement.corner
        );
        Ok(Self {
            axes,
            duration: settings.animation.duration(),
            rotate_step_degrees: settings.rotate_step_degrees,
            mapper: OrientationMapper::new(axes),
            picker: PickingResolver::new(settings.picking.bevel_fraction, axes),
            placement: CubePlacement::from_settings(&settings.placement),
            viewport: (0, 0),
            transform: CubeTransform::default(),
            fly: FlyToController::new(settings.animation.easing),
            pending: None,
            hovered: None,
            scheduler: FrameScheduler::default(),
        })
    }

    pub fn axis_system(&self) -> AxisSystem {
        self.axes
    }

    pub fn mapper(&self) -> &OrientationMapper {
        &self.mapper
    }

    pub fn transform(&self) -> &CubeTransform {
        &self.transform
    }

    pub fn hovered(&self) -> Option<Zone> {
        self.hovered
    }

    pub fn is_animating(&self) -> bool {
        self.fly.is_active()
    }

    pub fn frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn set_viewport(&mut self, size: (u32, u32)) -> bool {
        self.viewport = size;
        self.scheduler.request()
    }

    /// Screen rectangle the host should draw the cube into.
    pub fn overlay_rect(&self) -> ScreenRect {
        self.placement.rect(self.viewport)
    }

    /// Zone under a pointer given in viewport pixels.
    pub fn pick(&self, pointer: Vec2) -> Option<Zone> {
        let local = self.placement.to_local(pointer, self.viewport)?;
        self.picker.pick(local, &self.transform)
    }

    /// Track hover; returns true when a new frame must be scheduled.
    pub fn pointer_moved(&mut self, pointer: Vec2) -> bool {
        let zone = self.pick(pointer);
        if zone == self.hovered {
            return false;
        }
        trace!("hovered zone {:?} -> {:?}", self.hovered, zone);
        self.hovered = zone;
        self.scheduler.request()
    }

    pub fn pointer_left(&mut self) -> bool {
        if self.hovered.take().is_some() {
            self.scheduler.request()
        } else {
            false
        }
    }

    /// Resolve a click. A miss changes nothing.
    pub fn pointer_clicked(&mut self, pointer: Vec2) -> Option<Zone> {
        let Some(zone) = self.pick(pointer) else {
            trace!("click at {pointer} missed the cube");
            return None;
        };
        self.activate(zone);
        Some(zone)
    }

    /// Queue a fly-to toward `zone` for the next frame. Later calls replace
    /// earlier ones queued in the same frame.
    pub fn activate(&mut self, zone: Zone) -> bool {
        debug!("zone {:?} activated", zone);
        self.pending = Some(Request::Zone(zone));
        self.scheduler.request()
    }

    pub fn activate_id(&mut self, id: u8) -> ViewCubeResult<bool> {
        let zone = Zone::from_id(id)?;
        Ok(self.activate(zone))
    }

    pub fn rotate(&mut self, delta: RotateDelta) -> bool {
        debug!("rotate {:?} by {} degrees", delta.axis, delta.degrees);
        self.pending = Some(Request::Rotate(delta));
        self.scheduler.request()
    }

    /// Rotate by the configured step; `positive` picks the direction.
    pub fn rotate_step(&mut self, axis: RotateAxis, positive: bool) -> bool {
        let degrees = if positive {
            self.rotate_step_degrees
        } else {
            -self.rotate_step_degrees
        };
        self.rotate(RotateDelta { degrees, axis })
    }

    /// The host's camera moved on its own (orbit, zoom, pan).
    pub fn notify_camera_changed(&mut self) -> bool {
        self.scheduler.request()
    }

    /// Stop any flight and drop queued requests.
    pub fn cancel(&mut self) -> Option<ViewCubeEvent> {
        self.pending = None;
        self.fly
            .cancel()
            .map(|generation| ViewCubeEvent::FlyCancelled { generation })
    }

    /// Run one frame against `camera`.
    pub fn frame<C: DrivenCamera + ?Sized>(&mut self, camera: &mut C, now: Instant) -> FrameOutput {
        let mut output = FrameOutput {
            repaint: self.scheduler.begin_frame(),
            ..FrameOutput::default()
        };

        self.transform.sync_to_camera(camera.orientation());

        if let Some(request) = self.pending.take() {
            self.start_flight(request, camera, now, &mut output);
        }

        if let Some(frame) = self.fly.tick(now) {
            self.apply(camera, frame.orientation, &mut output);
            if frame.finished {
                output.events.push(ViewCubeEvent::FlyFinished {
                    generation: frame.generation,
                });
            }
        }

        if self.fly.is_active() {
            self.scheduler.request();
        }
        output
    }

    fn start_flight<C: DrivenCamera + ?Sized>(
        &mut self,
        request: Request,
        camera: &mut C,
        now: Instant,
        output: &mut FrameOutput,
    ) {
        let current = camera.orientation();
        let target = match request {
            Request::Zone(zone) => {
                output.events.push(ViewCubeEvent::ZoneActivated { zone });
                self.mapper.map(zone).rotation()
            }
            Request::Rotate(delta) => delta.apply(current),
        };

        if let Some(ticket) = self.fly.ticket() {
            output.events.push(ViewCubeEvent::FlySuperseded {
                generation: ticket.generation(),
            });
        }

        let start = self.fly.request_fly_to(current, target, self.duration, now);
        output.events.push(ViewCubeEvent::FlyStarted {
            generation: start.generation(),
            target,
        });
        if let FlyStart::Resolved(frame) = start {
            self.apply(camera, frame.orientation, output);
            output.events.push(ViewCubeEvent::FlyFinished {
                generation: frame.generation,
            });
        }
    }

    fn apply<C: DrivenCamera + ?Sized>(
        &mut self,
        camera: &mut C,
        orientation: Quat,
        output: &mut FrameOutput,
    ) {
        orbit_to(camera, orientation);
        self.transform.sync_to_camera(orientation);
        output.events.push(ViewCubeEvent::Change { orientation });
        output.repaint = true;
    }
}

impl TryFrom<&ViewCubeSettings> for ViewCube {
    type Error = ViewCubeError;

    fn try_from(settings: &ViewCubeSettings) -> Result<Self, Self::Error> {
        ViewCube::new(settings)
    }
}

#[cfg(test)]
mod tests {
    use settings::ViewportCorner;

    use super::*;
    use crate::camera::OrbitCamera;

    fn test_settings() -> ViewCubeSettings {
        let mut settings = ViewCubeSettings::default();
        settings.placement.corner = ViewportCorner::TopLeft;
        settings.placement.size_px = 100;
        settings.placement.margin_px = 0;
        settings.animation.duration_ms = 200;
        settings
    }

    fn cube() -> ViewCube {
        let mut cube = ViewCube::new(&test_settings()).unwrap();
        cube.set_viewport((800, 600));
        cube
    }

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Vec3::ZERO, 5.0, Quat::IDENTITY)
    }

    #[test]
    fn scheduler_coalesces_notifications() {
        let mut scheduler = FrameScheduler::default();
        assert!(scheduler.request());
        assert!(!scheduler.request());
        assert!(!scheduler.request());
        assert!(scheduler.begin_frame());
        assert!(!scheduler.begin_frame());
        assert!(scheduler.request());
    }

    #[test]
    fn many_notifications_one_frame() {
        let mut cube = cube();
        let mut camera = camera();
        cube.frame(&mut camera, Instant::now());

        assert!(cube.notify_camera_changed());
        assert!(!cube.notify_camera_changed());
        assert!(!cube.pointer_moved(Vec2::new(700.0, 500.0)));
        assert!(cube.frame_pending());

        let output = cube.frame(&mut camera, Instant::now());
        assert!(output.repaint);
        assert!(!cube.frame_pending());
    }

    #[test]
    fn miss_is_a_no_op() {
        let mut cube = cube();
        let mut camera = camera();
        cube.frame(&mut camera, Instant::now());

        assert_eq!(cube.pointer_clicked(Vec2::new(400.0, 300.0)), None);
        assert_eq!(cube.pointer_clicked(Vec2::new(2.0, 2.0)), None);
        let output = cube.frame(&mut camera, Instant::now());
        assert!(output.events.is_empty());
        assert_eq!(camera.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn hover_tracks_zone_under_pointer() {
        let mut cube = cube();
        let mut camera = camera();
        cube.frame(&mut camera, Instant::now());

        assert!(cube.pointer_moved(Vec2::new(50.0, 50.0)));
        assert_eq!(cube.hovered(), Some(Zone::Front));
        cube.frame(&mut camera, Instant::now());
        assert!(!cube.pointer_moved(Vec2::new(51.0, 50.0)));
        assert!(cube.pointer_left());
        assert_eq!(cube.hovered(), None);
    }

    #[test]
    fn click_flies_camera_and_keeps_distance() {
        let t0 = Instant::now();
        let mut cube = cube();
        let mut camera = camera();
        cube.frame(&mut camera, t0);

        cube.activate(Zone::TopRight);
        let first = cube.frame(&mut camera, t0);
        assert!(matches!(
            first.events[0],
            ViewCubeEvent::ZoneActivated {
                zone: Zone::TopRight
            }
        ));
        assert!(cube.is_animating());
        assert!(cube.frame_pending());

        let last = cube.frame(&mut camera, t0 + Duration::from_millis(200));
        let target = cube.mapper().map(Zone::TopRight).rotation();
        assert_eq!(last.change(), Some(target));
        assert_eq!(camera.orientation(), target);
        assert!((camera.radius() - 5.0).abs() < 1e-4);
        assert_eq!(cube.transform().orientation, target.inverse());
        assert!(!cube.is_animating());
    }

    #[test]
    fn invalid_zone_id_is_rejected() {
        let mut cube = cube();
        assert!(matches!(
            cube.activate_id(42),
            Err(ViewCubeError::InvalidZone(42))
        ));
        assert!(cube.activate_id(3).is_ok());
    }

    #[test]
    fn default_settings_build_a_cube() {
        let cube = ViewCube::new(&ViewCubeSettings::default()).unwrap();
        assert!(!cube.is_animating());
        assert_eq!(cube.overlay_rect().size, 120.0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut settings = test_settings();
        settings.picking.bevel_fraction = 0.0;
        assert!(matches!(
            ViewCube::new(&settings),
            Err(ViewCubeError::Settings(_))
        ));
    }

    #[test]
    fn rotate_step_turns_about_screen_axis() {
        let t0 = Instant::now();
        let mut cube = cube();
        let mut camera = camera();

        cube.rotate_step(RotateAxis::ScreenY, true);
        cube.frame(&mut camera, t0);
        cube.frame(&mut camera, t0 + Duration::from_millis(250));

        let forward = camera.orientation() * Vec3::NEG_Z;
        let expected = Quat::from_rotation_y(-45f32.to_radians()) * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(expected, 1e-5), "{forward:?}");
    }

    #[test]
    fn cancel_stops_flight_in_place() {
        let t0 = Instant::now();
        let mut cube = cube();
        let mut camera = camera();

        cube.activate(Zone::Left);
        cube.frame(&mut camera, t0);
        cube.frame(&mut camera, t0 + Duration::from_millis(50));
        let halfway = camera.orientation();

        assert!(matches!(
            cube.cancel(),
            Some(ViewCubeEvent::FlyCancelled { .. })
        ));
        let output = cube.frame(&mut camera, t0 + Duration::from_millis(300));
        assert!(output.events.is_empty());
        assert_eq!(camera.orientation(), halfway);
        assert_eq!(cube.cancel(), None);
    }

    #[test]
    fn zero_duration_snaps_in_the_same_frame() {
        let mut settings = test_settings();
        settings.animation.duration_ms = 0;
        let mut cube = ViewCube::new(&settings).unwrap();
        let mut camera = camera();

        cube.activate(Zone::Bottom);
        let output = cube.frame(&mut camera, Instant::now());
        let target = cube.mapper().map(Zone::Bottom).rotation();
        assert_eq!(camera.orientation(), target);
        let changes = output
            .events
            .iter()
            .filter(|e| matches!(e, ViewCubeEvent::Change { .. }))
            .count();
        assert_eq!(changes, 1);
        assert!(matches!(
            output.events.last(),
            Some(ViewCubeEvent::FlyFinished { .. })
        ));
        assert!(!cube.is_animating());
    }
}
