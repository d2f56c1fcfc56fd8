//! Static viewer configuration
//!
//! Preset target values, transition durations, and breakpoint thresholds are
//! deployment data, not code: every product viewer ships its own numbers.
//! The compiled-in default matches the t-shirt deployment; other deployments
//! supply JSON.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Device-width class resolved once per session from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidthClass {
    Narrow,
    Wide,
}

/// Material property targets for one surface finish preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinishTargets {
    pub roughness: f32,
    pub clearcoat: f32,
    pub reflectivity: f32,
    pub env_intensity: f32,
}

/// Camera positions for one width class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPresetTable {
    pub front: Vec3,
    pub back: Vec3,
    /// Session default position, restored when rotation is disabled
    pub home: Vec3,
}

/// Complete configuration table supplied at viewer initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub glossy: FinishTargets,
    pub rough: FinishTargets,
    /// Finish transition duration in seconds
    pub finish_duration: f32,
    /// Camera transition duration in seconds
    pub camera_duration: f32,
    /// Width threshold separating narrow from wide layouts, pixels
    pub breakpoint_px: f32,
    pub narrow: CameraPresetTable,
    pub wide: CameraPresetTable,
    /// Allowed texture tiling range per axis, `[min, max]`
    pub tiling_range: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            glossy: FinishTargets {
                roughness: constants::finish::GLOSSY_ROUGHNESS,
                clearcoat: constants::finish::GLOSSY_CLEARCOAT,
                reflectivity: constants::finish::GLOSSY_REFLECTIVITY,
                env_intensity: constants::finish::GLOSSY_ENV_INTENSITY,
            },
            rough: FinishTargets {
                roughness: constants::finish::ROUGH_ROUGHNESS,
                clearcoat: constants::finish::ROUGH_CLEARCOAT,
                reflectivity: constants::finish::ROUGH_REFLECTIVITY,
                env_intensity: constants::finish::ROUGH_ENV_INTENSITY,
            },
            finish_duration: constants::finish::TRANSITION_SECS,
            camera_duration: constants::camera::TRANSITION_SECS,
            breakpoint_px: constants::camera::BREAKPOINT_PX,
            narrow: CameraPresetTable {
                front: Vec3::from(constants::camera::FRONT_POSITION),
                back: Vec3::from(constants::camera::BACK_POSITION),
                home: Vec3::from(constants::camera::HOME_POSITION_NARROW),
            },
            wide: CameraPresetTable {
                front: Vec3::from(constants::camera::FRONT_POSITION),
                back: Vec3::from(constants::camera::BACK_POSITION),
                home: Vec3::from(constants::camera::HOME_POSITION_WIDE),
            },
            tiling_range: [constants::texture::MIN_TILING, constants::texture::MAX_TILING],
        }
    }
}

impl ViewerConfig {
    /// Load a deployment configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid viewer config: {}", e))
    }

    /// Resolve the width class for a viewport width in pixels.
    pub fn width_class(&self, viewport_width_px: f32) -> WidthClass {
        if viewport_width_px < self.breakpoint_px {
            WidthClass::Narrow
        } else {
            WidthClass::Wide
        }
    }

    /// Camera preset table for a width class.
    pub fn camera_table(&self, class: WidthClass) -> &CameraPresetTable {
        match class {
            WidthClass::Narrow => &self.narrow,
            WidthClass::Wide => &self.wide,
        }
    }

    /// Finish targets for a preset.
    pub fn finish_targets(&self, glossy: bool) -> &FinishTargets {
        if glossy {
            &self.glossy
        } else {
            &self.rough
        }
    }

    /// Clamp a raw tiling slider value into the configured range.
    pub fn clamp_tiling(&self, value: f32) -> f32 {
        value.clamp(self.tiling_range[0], self.tiling_range[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_deployment_constants() {
        let config = ViewerConfig::default();
        assert_eq!(config.glossy.roughness, 0.2);
        assert_eq!(config.glossy.env_intensity, 1.5);
        assert_eq!(config.rough.roughness, 1.0);
        assert_eq!(config.rough.env_intensity, 0.5);
        assert_eq!(config.finish_duration, 0.8);
        assert_eq!(config.camera_duration, 1.0);
        assert_eq!(config.narrow.home, Vec3::new(0.0, 0.5, 2.0));
        assert_eq!(config.wide.home, Vec3::new(0.0, 0.5, 1.5));
    }

    #[test]
    fn test_width_class_breakpoint() {
        let config = ViewerConfig::default();
        assert_eq!(config.width_class(320.0), WidthClass::Narrow);
        assert_eq!(config.width_class(767.9), WidthClass::Narrow);
        assert_eq!(config.width_class(768.0), WidthClass::Wide);
        assert_eq!(config.width_class(1920.0), WidthClass::Wide);
    }

    #[test]
    fn test_camera_table_lookup_is_exact() {
        let config = ViewerConfig::default();
        let narrow = config.camera_table(WidthClass::Narrow);
        let wide = config.camera_table(WidthClass::Wide);
        assert_eq!(narrow.front, wide.front);
        assert_ne!(narrow.home, wide.home);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(ViewerConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_from_json_accepts_deployment_table() {
        let json = serde_json::to_string(&ViewerConfig::default()).unwrap();
        let parsed = ViewerConfig::from_json(&json).unwrap();
        assert_eq!(parsed, ViewerConfig::default());
    }

    #[test]
    fn test_clamp_tiling() {
        let config = ViewerConfig::default();
        assert_eq!(config.clamp_tiling(0.0), 0.1);
        assert_eq!(config.clamp_tiling(3.0), 3.0);
        assert_eq!(config.clamp_tiling(50.0), 10.0);
    }
}
