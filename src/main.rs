//! Vitrine - an interactive 3D product viewer
//!
//! Demo application: loads the built-in demo product, shows the viewer
//! control panel, and previews the animated material/camera state with a
//! flat egui swatch. A real deployment swaps the swatch for a GPU-backed
//! renderer reading the same scene targets.

use eframe::egui;
use egui::{Color32, Stroke};
use log::error;

use vitrine::config::ViewerConfig;
use vitrine::constants;
use vitrine::scene::loader;
use vitrine::session::ViewerSession;
use vitrine::ui::ControlsPanel;

/// Demo viewer application state.
struct ViewerApp {
    session: ViewerSession,
    controls: ControlsPanel,
}

impl ViewerApp {
    fn new() -> Self {
        let mut session = ViewerSession::new(
            ViewerConfig::default(),
            constants::ui::DEFAULT_WINDOW_SIZE[0],
        );
        // The demo "loader" completes synchronously; a real one hands the
        // scene over from an async task when decoding finishes
        match loader::build_scene(&loader::demo_descriptor()) {
            Ok(scene) => session.attach_scene(scene),
            Err(err) => error!("demo scene failed to load: {}", err),
        }
        Self {
            session,
            controls: ControlsPanel::new(),
        }
    }

    /// Paint a flat preview of the first material: base color fill, a
    /// gloss-dependent rim, and a shadow blob when shadows are on.
    fn paint_preview(&self, ui: &mut egui::Ui) {
        let (rect, _response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0, Color32::from_gray(240));

        let Some(scene) = self.session.scene() else {
            return;
        };
        let Some(material) = scene.materials().first() else {
            return;
        };
        let material = material.borrow();

        let color = Color32::from_rgb(
            (material.base_color.x * 255.0) as u8,
            (material.base_color.y * 255.0) as u8,
            (material.base_color.z * 255.0) as u8,
        );
        let center = rect.center();
        let radius = rect.size().min_elem() * 0.3;

        if scene.stage().borrow().shadow_map_enabled {
            painter.circle_filled(
                center + egui::vec2(0.0, radius * 1.2),
                radius * 0.8,
                Color32::from_black_alpha(40),
            );
        }

        painter.circle_filled(center, radius, color);

        // Rim brightness tracks the animated gloss cluster
        let gloss = (1.0 - material.roughness).clamp(0.0, 1.0);
        let rim = Color32::from_white_alpha((gloss * 200.0) as u8);
        painter.circle_stroke(center, radius, Stroke::new(2.0 + gloss * 4.0, rim));

        // Camera distance scales a simple zoom readout
        if let Some(position) = self.session.camera_position() {
            painter.text(
                rect.left_top() + egui::vec2(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                format!("camera ({:.1}, {:.1}, {:.1})", position.x, position.y, position.z),
                egui::FontId::monospace(12.0),
                Color32::DARK_GRAY,
            );
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt);
        self.session.advance(dt);

        egui::SidePanel::left("controls")
            .default_width(constants::ui::CONTROLS_PANEL_WIDTH)
            .show(ctx, |ui| {
                self.controls.ui(ui, &mut self.session);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.paint_preview(ui);
        });

        // Keep frames coming while transitions are in flight
        if self.session.is_animating() {
            ctx.request_repaint();
        }
    }
}

/// Application entry point.
fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(constants::ui::DEFAULT_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Vitrine",
        options,
        Box::new(|_cc| Ok(Box::new(ViewerApp::new()))),
    )
}
