//! Application-wide constants and default values
//!
//! Centralized location for the numeric defaults shared by the viewer
//! configuration, the demo application, and tests.

/// Surface finish preset constants
pub mod finish {
    /// Glossy preset target values
    pub const GLOSSY_ROUGHNESS: f32 = 0.2;
    pub const GLOSSY_CLEARCOAT: f32 = 0.2;
    pub const GLOSSY_REFLECTIVITY: f32 = 0.1;
    pub const GLOSSY_ENV_INTENSITY: f32 = 1.5;

    /// Rough preset target values
    pub const ROUGH_ROUGHNESS: f32 = 1.0;
    pub const ROUGH_CLEARCOAT: f32 = 0.0;
    pub const ROUGH_REFLECTIVITY: f32 = 0.0;
    pub const ROUGH_ENV_INTENSITY: f32 = 0.5;

    /// Duration of a finish preset transition in seconds
    pub const TRANSITION_SECS: f32 = 0.8;
}

/// Camera preset constants
pub mod camera {
    /// Front view position
    pub const FRONT_POSITION: [f32; 3] = [0.0, 1.0, 3.0];

    /// Back view position
    pub const BACK_POSITION: [f32; 3] = [0.0, 1.0, -2.0];

    /// Default (home) position for narrow viewports
    pub const HOME_POSITION_NARROW: [f32; 3] = [0.0, 0.5, 2.0];

    /// Default (home) position for wide viewports
    pub const HOME_POSITION_WIDE: [f32; 3] = [0.0, 0.5, 1.5];

    /// Viewport width threshold separating narrow from wide layouts (pixels)
    pub const BREAKPOINT_PX: f32 = 768.0;

    /// Duration of a camera preset transition in seconds
    pub const TRANSITION_SECS: f32 = 1.0;
}

/// Material defaults applied to freshly loaded meshes
pub mod material {
    /// Initial base color (white)
    pub const BASE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

    /// Initial roughness
    pub const ROUGHNESS: f32 = 0.8;

    /// Initial metalness
    pub const METALNESS: f32 = 0.0;
}

/// Texture slider constants
pub mod texture {
    /// Minimum tiling repeat per axis
    pub const MIN_TILING: f32 = 0.1;

    /// Maximum tiling repeat per axis
    pub const MAX_TILING: f32 = 10.0;
}

/// Demo UI sizing constants
pub mod ui {
    /// Width of the controls side panel
    pub const CONTROLS_PANEL_WIDTH: f32 = 280.0;

    /// Default window size for the demo application
    pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1280.0, 800.0];
}
