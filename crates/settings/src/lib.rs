use std::time::Duration;

use axes::AxisPreset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DURATION_MS: u32 = 250;
pub const DEFAULT_CUBE_SIZE_PX: u32 = 120;
pub const DEFAULT_BEVEL_FRACTION: f32 = 0.2;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bevel fraction must lie in (0, 0.5), got {0}")]
    BevelFraction(f32),
    #[error("cube size must be at least 1 pixel")]
    ZeroCubeSize,
    #[error("rotate step must be a finite, non-zero angle, got {0}")]
    RotateStep(f32),
}

/// Everything the view cube reads from its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewCubeSettings {
    pub animation: AnimationSettings,
    pub axis_preset: AxisPreset,
    pub placement: PlacementSettings,
    pub picking: PickingSettings,
    /// Angle applied by one rotate step (arrow click)
    pub rotate_step_degrees: f32,
}

impl ViewCubeSettings {
    /// Parse a JSON document; missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: ViewCubeSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let bevel = self.picking.bevel_fraction;
        if !(bevel > 0.0 && bevel < 0.5) {
            return Err(SettingsError::BevelFraction(bevel));
        }
        if self.placement.size_px == 0 {
            return Err(SettingsError::ZeroCubeSize);
        }
        let step = self.rotate_step_degrees;
        if !step.is_finite() || step == 0.0 {
            return Err(SettingsError::RotateStep(step));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Fly-to duration in milliseconds. 0 snaps immediately.
    pub duration_ms: u32,
    pub easing: Easing,
}

impl AnimationSettings {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

/// Monotonic curves with `apply(0) == 0` and `apply(1) == 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
    SmoothStep,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Viewport corner the cube overlay is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    pub corner: ViewportCorner,
    /// Edge length of the square overlay in pixels
    pub size_px: u32,
    /// Gap between the overlay and the viewport edges
    pub margin_px: u32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            corner: ViewportCorner::default(),
            size_px: DEFAULT_CUBE_SIZE_PX,
            margin_px: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingSettings {
    /// Width of the edge/corner band on each face, as a fraction of the face's edge length
    pub bevel_fraction: f32,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            bevel_fraction: DEFAULT_BEVEL_FRACTION,
        }
    }
}

impl Default for ViewCubeSettings {
    fn default() -> Self {
        Self {
            animation: AnimationSettings::default(),
            axis_preset: AxisPreset::default(),
            placement: PlacementSettings::default(),
            picking: PickingSettings::default(),
            rotate_step_degrees: 45.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let settings = ViewCubeSettings::from_json_str(
            r#"{ "axis_preset": "ZUp", "placement": { "corner": "TopLeft" } }"#,
        )
        .unwrap();
        assert_eq!(settings.axis_preset, AxisPreset::ZUp);
        assert_eq!(settings.placement.corner, ViewportCorner::TopLeft);
        assert_eq!(settings.placement.size_px, DEFAULT_CUBE_SIZE_PX);
        assert_eq!(settings.animation.duration(), Duration::from_millis(250));
    }

    #[test]
    fn defaults_are_valid() {
        let settings = ViewCubeSettings::default();
        assert_eq!(settings.rotate_step_degrees, 45.0);
        assert!(settings.validate().is_ok());
        assert_eq!(ViewCubeSettings::from_json_str("{}").unwrap(), settings);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = ViewCubeSettings::from_json_str(r#"{ "picking": { "bevel_fraction": 0.5 } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::BevelFraction(_)));

        let err = ViewCubeSettings::from_json_str(r#"{ "placement": { "size_px": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::ZeroCubeSize));

        let err = ViewCubeSettings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let json = ViewCubeSettings::default().to_json_string().unwrap();
        let parsed = ViewCubeSettings::from_json_str(&json).unwrap();
        assert_eq!(parsed, ViewCubeSettings::default());
    }

    #[test]
    fn easing_curves_hit_endpoints_and_increase() {
        for easing in [
            Easing::Linear,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
            Easing::SmoothStep,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            let mut last = 0.0;
            for step in 1..=100 {
                let value = easing.apply(step as f32 / 100.0);
                assert!(value >= last, "{easing:?} decreased at step {step}");
                last = value;
            }
        }
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }
}
