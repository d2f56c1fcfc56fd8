//! Viewer session
//!
//! One `ViewerSession` per open viewer: it owns the transition engine, the
//! view state controller, and the loaded scene, and is the only thing the
//! host application needs to hold. There are no process-wide singletons;
//! dropping the session tears everything down.

use glam::Vec3;
use log::{debug, info};

use crate::config::ViewerConfig;
use crate::controller::{CameraView, ControllerError, Finish, ViewState, ViewStateController};
use crate::scene::target::PropertyTarget;
use crate::scene::types::TextureState;
use crate::scene::ViewerScene;
use crate::transition::{PropertyTransitionEngine, PropertyValue};

/// Session context wiring the engine, controller, and scene together.
///
/// Created at viewer start; the scene arrives later from the asset-loader
/// collaborator via [`attach_scene`](Self::attach_scene). Operations called
/// before the scene is attached are dropped with a debug log, matching the
/// silent best-effort failure policy of the viewer.
pub struct ViewerSession {
    config: ViewerConfig,
    viewport_width_px: f32,
    engine: PropertyTransitionEngine,
    controller: Option<ViewStateController>,
    scene: Option<ViewerScene>,
}

impl ViewerSession {
    /// Create an empty session. `viewport_width_px` selects the camera
    /// preset table and is resolved once, at scene attach.
    pub fn new(config: ViewerConfig, viewport_width_px: f32) -> Self {
        Self {
            config,
            viewport_width_px,
            engine: PropertyTransitionEngine::new(),
            controller: None,
            scene: None,
        }
    }

    /// Receive the loaded scene from the asset-loader collaborator.
    ///
    /// Positions the camera at the configured home for this session's width
    /// class, then builds the controller, which captures that position as
    /// the rotation-return default.
    pub fn attach_scene(&mut self, scene: ViewerScene) {
        let width_class = self.config.width_class(self.viewport_width_px);
        let home = self.config.camera_table(width_class).home;
        scene.camera().borrow_mut().position = home;

        let controller =
            ViewStateController::new(self.config.clone(), scene.handles(), self.viewport_width_px);
        info!("scene '{}' attached", scene.name());
        self.scene = Some(scene);
        self.controller = Some(controller);
    }

    /// Whether a scene has been attached.
    pub fn is_ready(&self) -> bool {
        self.controller.is_some()
    }

    /// Advance all in-flight transitions. Call once per rendered frame.
    pub fn advance(&mut self, delta_seconds: f32) {
        self.engine.advance(delta_seconds);
    }

    /// Whether any transition is still in flight.
    pub fn is_animating(&self) -> bool {
        !self.engine.is_idle()
    }

    /// Current preset state, if the scene is attached.
    pub fn state(&self) -> Option<&ViewState> {
        self.controller.as_ref().map(ViewStateController::state)
    }

    /// The attached scene, for read access by the host's preview.
    pub fn scene(&self) -> Option<&ViewerScene> {
        self.scene.as_ref()
    }

    /// Registered texture ids, for UI listings.
    pub fn texture_ids(&self) -> Vec<String> {
        self.controller
            .as_ref()
            .map(ViewStateController::texture_ids)
            .unwrap_or_default()
    }

    pub fn set_finish(&mut self, finish: Finish) {
        let Some(controller) = self.controller.as_mut() else {
            debug!("set_finish before scene attach, dropped");
            return;
        };
        controller.set_finish(&mut self.engine, finish);
    }

    pub fn set_camera_view(&mut self, view: CameraView) {
        let Some(controller) = self.controller.as_mut() else {
            debug!("set_camera_view before scene attach, dropped");
            return;
        };
        controller.set_camera_view(&mut self.engine, view);
    }

    pub fn toggle_rotation(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            debug!("toggle_rotation before scene attach, dropped");
            return;
        };
        controller.toggle_rotation(&mut self.engine);
    }

    pub fn toggle_shadows(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            debug!("toggle_shadows before scene attach, dropped");
            return;
        };
        controller.toggle_shadows();
    }

    pub fn set_color_hex(&mut self, raw: &str) -> Result<(), ControllerError> {
        let Some(controller) = self.controller.as_mut() else {
            debug!("set_color_hex before scene attach, dropped");
            return Ok(());
        };
        controller.set_color_hex(raw).map(|_| ())
    }

    pub fn set_texture(&mut self, id: &str) -> Result<(), ControllerError> {
        let Some(controller) = self.controller.as_mut() else {
            debug!("set_texture before scene attach, dropped");
            return Ok(());
        };
        controller.set_texture(id).map(|_| ())
    }

    pub fn set_tiling(&mut self, x: f32, y: f32) -> Result<(), ControllerError> {
        let Some(controller) = self.controller.as_mut() else {
            return Ok(());
        };
        controller.set_tiling(x, y).map(|_| ())
    }

    pub fn set_texture_rotation(&mut self, radians: f32) -> Result<(), ControllerError> {
        let Some(controller) = self.controller.as_mut() else {
            return Ok(());
        };
        controller.set_texture_rotation(radians).map(|_| ())
    }

    /// Register a freshly decoded texture (e.g. a user upload) and return
    /// whether registration happened. Does not change the active texture.
    pub fn register_texture(&mut self, id: &str) -> bool {
        let (Some(scene), Some(controller)) = (self.scene.as_mut(), self.controller.as_mut())
        else {
            debug!("register_texture before scene attach, dropped");
            return false;
        };
        let handle = scene.add_texture(TextureState::new(id));
        controller.register_texture(id, handle);
        true
    }

    /// Report a manual camera move from the host's orbit controls.
    pub fn note_manual_camera(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.note_manual_camera();
        }
    }

    /// Current camera position, for the host's preview.
    pub fn camera_position(&self) -> Option<Vec3> {
        self.scene
            .as_ref()
            .and_then(|scene| scene.camera().borrow().property("position").and_then(PropertyValue::as_vec3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{CameraPreset, FinishPreset};
    use crate::scene::loader::{build_scene, demo_descriptor};

    fn ready_session(viewport_width: f32) -> ViewerSession {
        let mut session = ViewerSession::new(ViewerConfig::default(), viewport_width);
        session.attach_scene(build_scene(&demo_descriptor()).unwrap());
        session
    }

    #[test]
    fn test_operations_before_attach_are_dropped() {
        let mut session = ViewerSession::new(ViewerConfig::default(), 1280.0);
        assert!(!session.is_ready());
        session.set_finish(Finish::Glossy);
        session.toggle_shadows();
        session.advance(1.0);
        assert!(session.state().is_none());
        assert!(!session.is_animating());
    }

    #[test]
    fn test_attach_positions_camera_at_width_class_home() {
        let narrow = ready_session(400.0);
        assert_eq!(narrow.camera_position(), Some(Vec3::new(0.0, 0.5, 2.0)));

        let wide = ready_session(1280.0);
        assert_eq!(wide.camera_position(), Some(Vec3::new(0.0, 0.5, 1.5)));
    }

    #[test]
    fn test_full_frame_loop_integration() {
        let mut session = ready_session(1280.0);

        session.set_finish(Finish::Glossy);
        session.set_camera_view(CameraView::Front);
        assert!(session.is_animating());

        // ~1.2s of 60fps frames covers the longest configured duration
        for _ in 0..72 {
            session.advance(1.0 / 60.0);
        }
        assert!(!session.is_animating());

        let scene = session.scene().unwrap();
        for material in scene.materials() {
            assert_eq!(material.borrow().roughness, 0.2);
        }
        assert_eq!(session.camera_position(), Some(Vec3::new(0.0, 1.0, 3.0)));
        let state = session.state().unwrap();
        assert_eq!(state.finish, FinishPreset::Glossy);
        assert_eq!(state.camera_preset, CameraPreset::Front);
    }

    #[test]
    fn test_registered_upload_becomes_swappable() {
        let mut session = ready_session(1280.0);
        assert!(session.register_texture("upload-1"));

        // Registration alone leaves the active texture unchanged
        assert_eq!(
            session.state().unwrap().active_texture.as_deref(),
            Some("fabric")
        );

        session.set_texture("upload-1").unwrap();
        assert_eq!(
            session.state().unwrap().active_texture.as_deref(),
            Some("upload-1")
        );
        assert!(session.texture_ids().contains(&"upload-1".to_string()));
    }

    #[test]
    fn test_session_teardown_drops_scene_targets() {
        let mut session = ready_session(1280.0);
        session.set_finish(Finish::Glossy);
        let scene = session.scene.take();
        drop(scene);

        // Transitions on disposed targets drain without panicking
        session.advance(0.5);
        session.advance(0.5);
        assert!(!session.is_animating());
    }
}
