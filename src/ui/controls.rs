//! Viewer controls panel

use egui::Ui;
use log::warn;

use crate::controller::{CameraView, Finish};
use crate::session::ViewerSession;

/// Side panel exposing the viewer's control set: shadows, finish presets,
/// camera views, rotation lock, color override, texture swap/upload, and
/// tiling/rotation sliders.
pub struct ControlsPanel {
    hex_input: String,
    tile_x: f32,
    tile_y: f32,
    texture_rotation: f32,
    last_rejected_color: Option<String>,
}

impl ControlsPanel {
    pub fn new() -> Self {
        Self {
            hex_input: "#ffffff".to_string(),
            tile_x: 1.0,
            tile_y: 1.0,
            texture_rotation: 0.0,
            last_rejected_color: None,
        }
    }

    /// Render the panel and forward widget events to the session.
    pub fn ui(&mut self, ui: &mut Ui, session: &mut ViewerSession) {
        ui.heading("Viewer Controls");
        ui.separator();

        if !session.is_ready() {
            ui.label("Loading model…");
            return;
        }

        self.scene_section(ui, session);
        ui.separator();
        self.finish_section(ui, session);
        ui.separator();
        self.camera_section(ui, session);
        ui.separator();
        self.color_section(ui, session);
        ui.separator();
        self.texture_section(ui, session);
        ui.separator();
        self.status_section(ui, session);
    }

    fn scene_section(&mut self, ui: &mut Ui, session: &mut ViewerSession) {
        let shadows = session
            .state()
            .map(|state| state.shadows_enabled)
            .unwrap_or(false);
        let label = if shadows { "Disable Shadows" } else { "Enable Shadows" };
        if ui.button(label).clicked() {
            session.toggle_shadows();
        }
    }

    fn finish_section(&mut self, ui: &mut Ui, session: &mut ViewerSession) {
        ui.label("Surface finish");
        ui.horizontal(|ui| {
            if ui.button("Glossy").clicked() {
                session.set_finish(Finish::Glossy);
            }
            if ui.button("Rough").clicked() {
                session.set_finish(Finish::Rough);
            }
        });
    }

    fn camera_section(&mut self, ui: &mut Ui, session: &mut ViewerSession) {
        ui.label("Camera");
        ui.horizontal(|ui| {
            if ui.button("Front View").clicked() {
                session.set_camera_view(CameraView::Front);
            }
            if ui.button("Back View").clicked() {
                session.set_camera_view(CameraView::Back);
            }
        });
        let rotation = session
            .state()
            .map(|state| state.rotation_enabled)
            .unwrap_or(true);
        let label = if rotation { "Lock Rotation" } else { "Unlock Rotation" };
        if ui.button(label).clicked() {
            session.toggle_rotation();
        }
    }

    fn color_section(&mut self, ui: &mut Ui, session: &mut ViewerSession) {
        ui.label("Model color");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.hex_input);
            if ui.button("Apply").clicked() {
                match session.set_color_hex(&self.hex_input) {
                    Ok(()) => self.last_rejected_color = None,
                    Err(err) => {
                        warn!("color input rejected: {}", err);
                        self.last_rejected_color = Some(self.hex_input.clone());
                    }
                }
            }
        });
        if let Some(rejected) = &self.last_rejected_color {
            ui.colored_label(egui::Color32::LIGHT_RED, format!("Not a color: {}", rejected));
        }
    }

    fn texture_section(&mut self, ui: &mut Ui, session: &mut ViewerSession) {
        ui.label("Texture");
        let active = session
            .state()
            .and_then(|state| state.active_texture.clone());
        ui.horizontal_wrapped(|ui| {
            for id in session.texture_ids() {
                let selected = active.as_deref() == Some(id.as_str());
                if ui.selectable_label(selected, id.as_str()).clicked() {
                    if let Err(err) = session.set_texture(&id) {
                        warn!("texture swap rejected: {}", err);
                    }
                }
            }
        });
        if ui.button("Upload…").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg"])
                .pick_file()
            {
                let id = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_else(|| "upload".to_string());
                if session.register_texture(&id) {
                    if let Err(err) = session.set_texture(&id) {
                        warn!("uploaded texture not applied: {}", err);
                    }
                }
            }
        }

        let tiling = crate::constants::texture::MIN_TILING..=crate::constants::texture::MAX_TILING;
        let mut tiling_changed = false;
        tiling_changed |= ui
            .add(egui::Slider::new(&mut self.tile_x, tiling.clone()).text("Tile X"))
            .changed();
        tiling_changed |= ui
            .add(egui::Slider::new(&mut self.tile_y, tiling).text("Tile Y"))
            .changed();
        if tiling_changed {
            if let Err(err) = session.set_tiling(self.tile_x, self.tile_y) {
                warn!("tiling rejected: {}", err);
            }
        }
        if ui
            .add(
                egui::Slider::new(&mut self.texture_rotation, 0.0..=std::f32::consts::TAU)
                    .text("Rotation"),
            )
            .changed()
        {
            if let Err(err) = session.set_texture_rotation(self.texture_rotation) {
                warn!("texture rotation rejected: {}", err);
            }
        }
    }

    fn status_section(&mut self, ui: &mut Ui, session: &ViewerSession) {
        let Some(state) = session.state() else {
            return;
        };
        ui.label("Status");
        ui.monospace(format!("finish:   {:?}", state.finish));
        ui.monospace(format!("camera:   {:?}", state.camera_preset));
        ui.monospace(format!("shadows:  {}", if state.shadows_enabled { "on" } else { "off" }));
        ui.monospace(format!("rotation: {}", if state.rotation_enabled { "free" } else { "locked" }));
        if let Some(texture) = &state.active_texture {
            ui.monospace(format!("texture:  {}", texture));
        }
    }
}

impl Default for ControlsPanel {
    fn default() -> Self {
        Self::new()
    }
}
