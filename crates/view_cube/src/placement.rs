//! Where the cube overlay sits on screen and how it is oriented.

use glam::{Quat, Vec2, Vec3};
use settings::{PlacementSettings, ViewportCorner};

/// Axis-aligned square in viewport pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub size: f32,
}

impl ScreenRect {
    pub fn center(&self) -> Vec2 {
        self.min + Vec2::splat(self.size * 0.5)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.min + Vec2::splat(self.size);
        point.cmpge(self.min).all() && point.cmple(max).all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubePlacement {
    pub corner: ViewportCorner,
    pub size_px: f32,
    pub margin_px: f32,
}

impl CubePlacement {
    pub fn from_settings(settings: &PlacementSettings) -> Self {
        Self {
            corner: settings.corner,
            size_px: settings.size_px as f32,
            margin_px: settings.margin_px as f32,
        }
    }

    /// Overlay rectangle for a viewport of `viewport` pixels.
    pub fn rect(&self, viewport: (u32, u32)) -> ScreenRect {
        let (w, h) = (viewport.0 as f32, viewport.1 as f32);
        let far_x = w - self.size_px - self.margin_px;
        let far_y = h - self.size_px - self.margin_px;
        let min = match self.corner {
            ViewportCorner::TopLeft => Vec2::new(self.margin_px, self.margin_px),
            ViewportCorner::TopRight => Vec2::new(far_x, self.margin_px),
            ViewportCorner::BottomLeft => Vec2::new(self.margin_px, far_y),
            ViewportCorner::BottomRight => Vec2::new(far_x, far_y),
        };
        ScreenRect {
            min,
            size: self.size_px,
        }
    }

    /// Pointer pixels -> overlay-local coordinates in [-1, 1] with +Y up.
    ///
    /// Returns `None` when the pointer is outside the overlay.
    pub fn to_local(&self, pointer: Vec2, viewport: (u32, u32)) -> Option<Vec2> {
        let rect = self.rect(viewport);
        if !rect.contains(pointer) {
            return None;
        }
        let half = rect.size * 0.5;
        let offset = pointer - rect.center();
        Some(Vec2::new(offset.x / half, -offset.y / half))
    }
}

impl Default for CubePlacement {
    fn default() -> Self {
        Self::from_settings(&PlacementSettings::default())
    }
}

/// Display rotation of the cube inside its overlay.
///
/// `orientation` rotates world-aligned cube coordinates into overlay view space,
/// where the overlay camera looks down -Z. Screen position and size live in
/// [`CubePlacement`]; the cube always spans `[-1, 1]` in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeTransform {
    pub orientation: Quat,
}

impl CubeTransform {
    /// The overlay shows the world as the camera sees it, so the cube turns by
    /// the inverse of the camera rotation.
    pub fn from_camera(camera_orientation: Quat) -> Self {
        Self {
            orientation: camera_orientation.inverse(),
        }
    }

    pub fn sync_to_camera(&mut self, camera_orientation: Quat) {
        self.orientation = camera_orientation.inverse();
    }

    pub fn view_to_cube_point(&self, point: Vec3) -> Vec3 {
        self.orientation.inverse() * point
    }

    pub fn view_to_cube_dir(&self, dir: Vec3) -> Vec3 {
        self.orientation.inverse() * dir
    }
}

impl Default for CubeTransform {
    fn default() -> Self {
        Self {
            orientation: Quat::IDENTITY,
        }
    }
}
