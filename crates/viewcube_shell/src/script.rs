use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use glam::{Vec2, Vec3};
use settings::ViewCubeSettings;
use tracing::{info, warn};
use view_cube::{
    DrivenCamera, FrameOutput, OrbitCamera, RotateAxis, ViewCube, ViewCubeEvent, ViewCubeResult,
    Zone,
};

const FRAME: Duration = Duration::from_millis(16);
/// Safety net so a stuck animation cannot spin the session forever.
const MAX_FRAMES_PER_STEP: u32 = 600;

pub struct Session {
    cube: ViewCube,
    camera: OrbitCamera,
    now: Instant,
    frames: u64,
    repaints: u64,
}

impl Session {
    pub fn new(settings: &ViewCubeSettings, viewport: (u32, u32)) -> ViewCubeResult<Self> {
        let mut cube = ViewCube::new(settings)?;
        cube.set_viewport(viewport);
        Ok(Self {
            cube,
            camera: OrbitCamera::looking_from(Vec3::new(2.0, 2.0, 5.0), Vec3::Y * 0.5),
            now: Instant::now(),
            frames: 0,
            repaints: 0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.settle()?;
        let rect = self.cube.overlay_rect();
        info!(
            "overlay at ({:.0}, {:.0}), {:.0}px",
            rect.min.x, rect.min.y, rect.size
        );

        let center = rect.center();
        self.cube.pointer_moved(center);
        info!("hovering {:?}", self.cube.hovered());

        match self.cube.pointer_clicked(center) {
            Some(zone) => info!("clicked {:?}", zone),
            None => warn!("click at overlay center missed the cube"),
        }
        self.settle()?;
        self.report("after center click");

        // Corner first, then a face before the corner flight lands.
        self.cube.activate(Zone::TopFrontRight);
        self.step_frames(5);
        self.cube.activate(Zone::Right);
        self.settle()?;
        self.report("after interrupted corner flight");

        for _ in 0..30 {
            self.camera.orbit_trackball(Vec2::new(6.0, -2.0), 0.4);
            self.cube.notify_camera_changed();
            self.step_frames(1);
        }
        self.report("after free orbit");

        self.cube.rotate_step(RotateAxis::ScreenY, true);
        self.settle()?;
        self.report("after rotate step");

        self.cube.activate_id(1)?;
        self.settle()?;
        self.report("after activating zone 1");

        info!(
            "session done: {} frames, {} repaints",
            self.frames, self.repaints
        );
        Ok(())
    }

    fn step_frames(&mut self, count: u32) {
        for _ in 0..count {
            self.now += FRAME;
            let output = self.cube.frame(&mut self.camera, self.now);
            self.record(&output);
        }
    }

    /// Run frames until nothing is pending.
    fn settle(&mut self) -> Result<()> {
        for _ in 0..MAX_FRAMES_PER_STEP {
            if !self.cube.frame_pending() && !self.cube.is_animating() {
                return Ok(());
            }
            self.step_frames(1);
        }
        bail!("view cube still animating after {MAX_FRAMES_PER_STEP} frames")
    }

    fn record(&mut self, output: &FrameOutput) {
        self.frames += 1;
        if output.repaint {
            self.repaints += 1;
        }
        for event in &output.events {
            match event {
                ViewCubeEvent::Change { .. } => {}
                other => info!("frame {}: {:?}", self.frames, other),
            }
        }
    }

    fn report(&self, label: &str) {
        let forward = self.camera.orientation() * Vec3::NEG_Z;
        let position = self.camera.position();
        info!(
            "{label}: looking along ({:.3}, {:.3}, {:.3}) from ({:.3}, {:.3}, {:.3})",
            forward.x, forward.y, forward.z, position.x, position.y, position.z
        );
    }
}
