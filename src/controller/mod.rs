//! View state controller
//!
//! Single source of truth for the discrete preset state of one viewer
//! session. UI events never touch materials or the camera directly: they
//! call the operations here, which validate raw input, update [`ViewState`],
//! and submit transitions to the engine. Continuous changes go through the
//! engine; binary toggles and slider writes are applied immediately.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{ViewerConfig, WidthClass};
use crate::scene::target::TargetHandle;
use crate::scene::SceneHandles;
use crate::transition::{Easing, PropertyTransitionEngine, PropertyValue};

/// Finish preset requests accepted by [`ViewStateController::set_finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Finish {
    Glossy,
    Rough,
}

/// Finish label carried in [`ViewState`]. `Custom` is never produced by the
/// preset operations; it records that a direct material edit (color
/// override) has moved the surface away from both presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishPreset {
    Glossy,
    Rough,
    Custom,
}

/// Camera view requests accepted by [`ViewStateController::set_camera_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraView {
    Front,
    Back,
}

/// Camera framing label carried in [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraPreset {
    Front,
    Back,
    Custom,
}

/// Discrete preset state of one viewer session. Mutated only through the
/// controller's operations; lives for the session, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub shadows_enabled: bool,
    pub finish: FinishPreset,
    pub rotation_enabled: bool,
    pub active_texture: Option<String>,
    pub camera_preset: CameraPreset,
    pub color_override: Option<Vec3>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            shadows_enabled: true,
            finish: FinishPreset::Custom,
            rotation_enabled: true,
            active_texture: None,
            camera_preset: CameraPreset::Custom,
            color_override: None,
        }
    }
}

/// Errors rejected at the controller boundary. `ViewState` is unchanged and
/// nothing reaches the engine when these occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// Raw color input could not be parsed as `#rrggbb`
    InvalidColor(String),
    /// The requested texture id is not registered
    UnknownTexture(String),
    /// A slider supplied a non-finite value
    InvalidInput(String),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::InvalidColor(raw) => write!(f, "invalid color input '{}'", raw),
            ControllerError::UnknownTexture(id) => write!(f, "unknown texture '{}'", id),
            ControllerError::InvalidInput(what) => write!(f, "invalid input for {}", what),
        }
    }
}

/// Maps discrete UI intents onto transition submissions and immediate
/// target writes.
pub struct ViewStateController {
    state: ViewState,
    config: ViewerConfig,
    width_class: WidthClass,
    /// Session default camera position, captured once at construction
    home_position: Vec3,
    materials: Vec<TargetHandle>,
    camera: TargetHandle,
    stage: TargetHandle,
    textures: HashMap<String, TargetHandle>,
}

impl ViewStateController {
    /// Build a controller for a loaded scene.
    ///
    /// The width class is resolved once from `viewport_width_px` and the
    /// camera's current position becomes the session home position that
    /// [`toggle_rotation`](Self::toggle_rotation) returns to.
    pub fn new(config: ViewerConfig, scene: SceneHandles, viewport_width_px: f32) -> Self {
        let width_class = config.width_class(viewport_width_px);
        let home_position = scene
            .camera
            .upgrade()
            .and_then(|camera| camera.borrow().property("position"))
            .and_then(PropertyValue::as_vec3)
            .unwrap_or_else(|| {
                warn!("camera unavailable at init, falling back to configured home");
                config.camera_table(width_class).home
            });
        let active_texture = scene
            .materials
            .first()
            .and_then(TargetHandle::upgrade)
            .and_then(|material| material.borrow().binding("map"));

        info!(
            "view controller ready: width class {:?}, home {:?}",
            width_class, home_position
        );

        Self {
            state: ViewState {
                active_texture,
                ..ViewState::default()
            },
            config,
            width_class,
            home_position,
            materials: scene.materials,
            camera: scene.camera,
            stage: scene.stage,
            textures: scene.textures,
        }
    }

    /// Current preset state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Width class resolved at construction.
    pub fn width_class(&self) -> WidthClass {
        self.width_class
    }

    /// Animate every tracked material toward a finish preset.
    ///
    /// Repeated identical calls converge to the same state; an in-flight
    /// finish transition is replaced, never stacked, so two quick clicks
    /// head straight to the second preset without visiting the first.
    pub fn set_finish(&mut self, engine: &mut PropertyTransitionEngine, finish: Finish) -> &ViewState {
        let targets = self.config.finish_targets(finish == Finish::Glossy);
        let properties = [
            ("roughness", PropertyValue::Scalar(targets.roughness)),
            ("clearcoat", PropertyValue::Scalar(targets.clearcoat)),
            ("reflectivity", PropertyValue::Scalar(targets.reflectivity)),
            ("env_intensity", PropertyValue::Scalar(targets.env_intensity)),
        ];
        for material in &self.materials {
            if let Err(err) = engine.submit(
                material,
                &properties,
                self.config.finish_duration,
                Easing::EaseInOut,
            ) {
                warn!("finish transition skipped for '{}': {}", material.id(), err);
            }
        }
        self.state.finish = match finish {
            Finish::Glossy => FinishPreset::Glossy,
            Finish::Rough => FinishPreset::Rough,
        };
        debug!("finish preset -> {:?}", self.state.finish);
        &self.state
    }

    /// Animate the camera toward a preset framing for the session's width
    /// class. The coordinates are a configuration lookup, reproduced
    /// exactly as supplied.
    pub fn set_camera_view(
        &mut self,
        engine: &mut PropertyTransitionEngine,
        view: CameraView,
    ) -> &ViewState {
        let table = self.config.camera_table(self.width_class);
        let position = match view {
            CameraView::Front => table.front,
            CameraView::Back => table.back,
        };
        self.submit_camera_move(engine, position);
        self.state.camera_preset = match view {
            CameraView::Front => CameraPreset::Front,
            CameraView::Back => CameraPreset::Back,
        };
        debug!("camera preset -> {:?}", self.state.camera_preset);
        &self.state
    }

    /// Flip free rotation. Disabling returns the camera to the session home
    /// position; re-enabling submits nothing.
    pub fn toggle_rotation(&mut self, engine: &mut PropertyTransitionEngine) -> &ViewState {
        self.state.rotation_enabled = !self.state.rotation_enabled;
        if !self.state.rotation_enabled {
            let home = self.home_position;
            self.submit_camera_move(engine, home);
            self.state.camera_preset = CameraPreset::Custom;
        }
        debug!("rotation enabled -> {}", self.state.rotation_enabled);
        &self.state
    }

    /// Flip every tracked shadow flag immediately. Shadows are a binary
    /// rendering feature; the engine is not involved.
    pub fn toggle_shadows(&mut self) -> &ViewState {
        let enabled = !self.state.shadows_enabled;
        self.state.shadows_enabled = enabled;

        if let Some(stage) = self.stage.upgrade() {
            let mut stage = stage.borrow_mut();
            for flag in ["shadow_map_enabled", "light_cast_shadow", "ground_receive_shadow"] {
                if let Err(err) = stage.set_flag(flag, enabled) {
                    warn!("stage flag '{}' not applied: {}", flag, err);
                }
            }
        } else {
            warn!("stage disposed, shadow flags not applied");
        }
        for material in &self.materials {
            let Some(material) = material.upgrade() else {
                continue;
            };
            let mut material = material.borrow_mut();
            let _ = material.set_flag("cast_shadow", enabled);
            let _ = material.set_flag("receive_shadow", enabled);
        }
        debug!("shadows enabled -> {}", enabled);
        &self.state
    }

    /// Apply a raw `#rrggbb` color input to every tracked material.
    ///
    /// The write is immediate (no transition) and moves the finish label to
    /// `Custom`. Malformed input is rejected with `ViewState` untouched.
    pub fn set_color_hex(&mut self, raw: &str) -> Result<&ViewState, ControllerError> {
        let color = parse_hex_color(raw)
            .ok_or_else(|| ControllerError::InvalidColor(raw.to_string()))?;
        for material in &self.materials {
            let Some(material) = material.upgrade() else {
                continue;
            };
            let result = material
                .borrow_mut()
                .set_property("color", PropertyValue::Vec3(color));
            if let Err(err) = result {
                warn!("color not applied: {}", err);
            }
        }
        self.state.color_override = Some(color);
        self.state.finish = FinishPreset::Custom;
        debug!("color override -> {:?}", color);
        Ok(&self.state)
    }

    /// Bind a registered texture to every material map slot.
    pub fn set_texture(&mut self, id: &str) -> Result<&ViewState, ControllerError> {
        if !self.textures.contains_key(id) {
            return Err(ControllerError::UnknownTexture(id.to_string()));
        }
        for material in &self.materials {
            let Some(material) = material.upgrade() else {
                continue;
            };
            let result = material.borrow_mut().set_binding("map", id);
            if let Err(err) = result {
                warn!("texture not bound on material: {}", err);
            }
        }
        self.state.active_texture = Some(id.to_string());
        debug!("active texture -> '{}'", id);
        Ok(&self.state)
    }

    /// Register a texture handle produced by the loader at runtime (e.g. a
    /// user upload). Registration alone does not change the active texture.
    pub fn register_texture(&mut self, id: &str, handle: TargetHandle) {
        if self.textures.insert(id.to_string(), handle).is_some() {
            warn!("texture '{}' re-registered, previous handle replaced", id);
        } else {
            info!("texture '{}' registered", id);
        }
    }

    /// Registered texture ids, for UI listings.
    pub fn texture_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.textures.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Write clamped tiling values to the active texture.
    pub fn set_tiling(&mut self, x: f32, y: f32) -> Result<&ViewState, ControllerError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ControllerError::InvalidInput("tiling".to_string()));
        }
        let x = self.config.clamp_tiling(x);
        let y = self.config.clamp_tiling(y);
        self.write_active_texture(&[("repeat_x", x), ("repeat_y", y)]);
        Ok(&self.state)
    }

    /// Write a wrapped rotation (radians, pivot at texture center) to the
    /// active texture.
    pub fn set_texture_rotation(&mut self, radians: f32) -> Result<&ViewState, ControllerError> {
        if !radians.is_finite() {
            return Err(ControllerError::InvalidInput("texture rotation".to_string()));
        }
        let wrapped = radians.rem_euclid(std::f32::consts::TAU);
        self.write_active_texture(&[("rotation", wrapped)]);
        Ok(&self.state)
    }

    /// Record that the host's orbit input moved the camera off any preset.
    pub fn note_manual_camera(&mut self) -> &ViewState {
        self.state.camera_preset = CameraPreset::Custom;
        &self.state
    }

    fn submit_camera_move(&self, engine: &mut PropertyTransitionEngine, position: Vec3) {
        if let Err(err) = engine.submit(
            &self.camera,
            &[("position", PropertyValue::Vec3(position))],
            self.config.camera_duration,
            Easing::EaseInOut,
        ) {
            warn!("camera transition skipped: {}", err);
        }
    }

    fn write_active_texture(&self, values: &[(&str, f32)]) {
        let Some(id) = self.state.active_texture.as_deref() else {
            debug!("no active texture, slider write dropped");
            return;
        };
        let Some(texture) = self.textures.get(id).and_then(TargetHandle::upgrade) else {
            warn!("active texture '{}' disposed, slider write dropped", id);
            return;
        };
        let mut texture = texture.borrow_mut();
        for (name, value) in values {
            if let Err(err) = texture.set_property(name, PropertyValue::Scalar(*value)) {
                warn!("texture property '{}' not applied: {}", name, err);
            }
        }
    }
}

/// Parse a `#rrggbb` hex string into linear RGB channels in [0, 1].
fn parse_hex_color(raw: &str) -> Option<Vec3> {
    let hex = raw.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Vec3::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::loader::{build_scene, demo_descriptor};
    use crate::scene::ViewerScene;
    use crate::transition::PropertyTransitionEngine;

    fn setup(viewport_width: f32) -> (ViewerScene, ViewStateController, PropertyTransitionEngine) {
        let scene = build_scene(&demo_descriptor()).unwrap();
        scene.camera().borrow_mut().position = glam::Vec3::new(0.0, 0.5, 1.5);
        let controller =
            ViewStateController::new(ViewerConfig::default(), scene.handles(), viewport_width);
        (scene, controller, PropertyTransitionEngine::new())
    }

    #[test]
    fn test_set_finish_submits_one_transition_per_material() {
        let (scene, mut controller, mut engine) = setup(1280.0);
        controller.set_finish(&mut engine, Finish::Glossy);
        assert_eq!(engine.active_transitions(), scene.materials().len());
        for material in scene.materials() {
            assert_eq!(engine.active_transitions_for(material.borrow().id.as_str()), 1);
        }
        assert_eq!(controller.state().finish, FinishPreset::Glossy);
    }

    #[test]
    fn test_finish_glossy_then_rough_never_visits_glossy() {
        let (scene, mut controller, mut engine) = setup(1280.0);
        controller.set_finish(&mut engine, Finish::Glossy);
        controller.set_finish(&mut engine, Finish::Rough);

        // Replace-not-stack: still one transition per material
        assert_eq!(engine.active_transitions(), scene.materials().len());

        engine.advance(1.0);
        assert!(engine.is_idle());
        for material in scene.materials() {
            let material = material.borrow();
            assert_eq!(material.roughness, 1.0);
            assert_eq!(material.clearcoat, 0.0);
            assert_eq!(material.env_intensity, 0.5);
        }
        assert_eq!(controller.state().finish, FinishPreset::Rough);
    }

    #[test]
    fn test_camera_preset_uses_width_class_table() {
        let (scene, mut controller, mut engine) = setup(1280.0);
        controller.set_camera_view(&mut engine, CameraView::Front);
        engine.advance(1.0);
        assert_eq!(scene.camera().borrow().position, glam::Vec3::new(0.0, 1.0, 3.0));
        assert_eq!(controller.state().camera_preset, CameraPreset::Front);

        controller.set_camera_view(&mut engine, CameraView::Back);
        engine.advance(1.0);
        assert_eq!(scene.camera().borrow().position, glam::Vec3::new(0.0, 1.0, -2.0));
    }

    #[test]
    fn test_width_class_resolved_once_at_construction() {
        let (_scene, controller, _engine) = setup(500.0);
        assert_eq!(controller.width_class(), WidthClass::Narrow);
        let (_scene, controller, _engine) = setup(1920.0);
        assert_eq!(controller.width_class(), WidthClass::Wide);
    }

    #[test]
    fn test_toggle_rotation_twice_submits_one_return_transition() {
        let (scene, mut controller, mut engine) = setup(1280.0);

        // Disabling returns the camera home
        controller.toggle_rotation(&mut engine);
        assert!(!controller.state().rotation_enabled);
        assert_eq!(engine.active_transitions(), 1);

        // Re-enabling submits nothing new
        controller.toggle_rotation(&mut engine);
        assert!(controller.state().rotation_enabled);
        assert_eq!(engine.active_transitions(), 1);

        engine.advance(1.0);
        assert_eq!(scene.camera().borrow().position, glam::Vec3::new(0.0, 0.5, 1.5));
    }

    #[test]
    fn test_toggle_shadows_is_immediate_and_skips_engine() {
        let (scene, mut controller, mut engine) = setup(1280.0);
        controller.toggle_shadows();
        assert!(!controller.state().shadows_enabled);
        assert!(engine.is_idle());

        assert!(!scene.stage().borrow().shadow_map_enabled);
        assert!(!scene.stage().borrow().light_cast_shadow);
        assert!(!scene.stage().borrow().ground_receive_shadow);
        for material in scene.materials() {
            assert!(!material.borrow().cast_shadow);
            assert!(!material.borrow().receive_shadow);
        }

        controller.toggle_shadows();
        assert!(controller.state().shadows_enabled);
        assert!(scene.stage().borrow().shadow_map_enabled);
    }

    #[test]
    fn test_color_hex_applies_immediately_and_flags_custom() {
        let (scene, mut controller, mut engine) = setup(1280.0);
        controller.set_finish(&mut engine, Finish::Glossy);

        controller.set_color_hex("#ff0000").unwrap();
        assert_eq!(controller.state().color_override, Some(glam::Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(controller.state().finish, FinishPreset::Custom);
        for material in scene.materials() {
            assert_eq!(material.borrow().base_color, glam::Vec3::new(1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_malformed_color_leaves_state_unchanged() {
        let (_scene, mut controller, _engine) = setup(1280.0);
        let before = controller.state().clone();
        for raw in ["", "#ff000", "#ff00zz", "ff0000", "#ff00000"] {
            assert!(controller.set_color_hex(raw).is_err(), "accepted '{}'", raw);
            assert_eq!(controller.state(), &before);
        }
    }

    #[test]
    fn test_texture_swap_binds_and_flags_dirty() {
        let (scene, mut controller, _engine) = setup(1280.0);
        assert_eq!(controller.state().active_texture.as_deref(), Some("fabric"));

        controller.set_texture("print").unwrap();
        assert_eq!(controller.state().active_texture.as_deref(), Some("print"));
        for material in scene.materials() {
            let material = material.borrow();
            assert_eq!(material.map.as_deref(), Some("print"));
            assert!(material.needs_update);
        }
    }

    #[test]
    fn test_unknown_texture_is_rejected() {
        let (_scene, mut controller, _engine) = setup(1280.0);
        let before = controller.state().clone();
        assert_eq!(
            controller.set_texture("missing"),
            Err(ControllerError::UnknownTexture("missing".to_string()))
        );
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_tiling_is_clamped_into_configured_range() {
        let (scene, mut controller, _engine) = setup(1280.0);
        controller.set_tiling(0.0, 99.0).unwrap();
        let texture = scene.texture("fabric").unwrap().borrow();
        assert_eq!(texture.repeat_x, 0.1);
        assert_eq!(texture.repeat_y, 10.0);
    }

    #[test]
    fn test_non_finite_slider_input_is_rejected() {
        let (_scene, mut controller, _engine) = setup(1280.0);
        assert!(controller.set_tiling(f32::NAN, 1.0).is_err());
        assert!(controller.set_texture_rotation(f32::INFINITY).is_err());
    }

    #[test]
    fn test_texture_rotation_wraps() {
        let (scene, mut controller, _engine) = setup(1280.0);
        controller
            .set_texture_rotation(std::f32::consts::TAU + 1.0)
            .unwrap();
        let texture = scene.texture("fabric").unwrap().borrow();
        assert!((texture.rotation - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hex_parser() {
        assert_eq!(parse_hex_color("#ffffff"), Some(glam::Vec3::ONE));
        assert_eq!(parse_hex_color("#000000"), Some(glam::Vec3::ZERO));
        assert_eq!(
            parse_hex_color(" #336699 "),
            Some(glam::Vec3::new(0x33 as f32 / 255.0, 0x66 as f32 / 255.0, 0x99 as f32 / 255.0))
        );
        assert_eq!(parse_hex_color("#33669"), None);
    }
}
