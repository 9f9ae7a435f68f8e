use crate::controller::{ToolMode, TransformOp, ViewerSession};
use crate::scene::ShadingStyle;

/// One-shot requests raised by the control panel, handled by the app
/// after the UI pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct UiActions {
    pub load_model: bool,
    pub save_session: bool,
    pub load_session: bool,
    pub reset_camera: bool,
    pub reset_transform: bool,
}

pub struct UiState {
    status: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            status: String::new(),
        }
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    /// Build the control panel and collect the frame's requests. All
    /// session edits go through the session's public setters.
    pub fn panel(
        &mut self,
        ctx: &egui::Context,
        session: &mut ViewerSession,
        model_name: &str,
    ) -> UiActions {
        let mut actions = UiActions::default();

        egui::SidePanel::left("viewer_controls").show(ctx, |ui| {
            ui.heading("NPR Viewer");
            ui.label(format!("Model: {}", model_name));
            if ui.button("Load Model...").clicked() {
                actions.load_model = true;
            }
            ui.separator();

            let mut shading = session.shading();
            egui::ComboBox::from_label("Shading")
                .selected_text(shading.label())
                .show_ui(ui, |ui| {
                    for style in ShadingStyle::ALL {
                        ui.selectable_value(&mut shading, style, style.label());
                    }
                });
            session.set_shading(shading);
            ui.separator();

            ui.label("Tool");
            let mut tool = session.tool();
            for mode in ToolMode::ALL {
                ui.selectable_value(&mut tool, mode, mode.label());
            }
            session.set_tool(tool);

            if session.tool() == ToolMode::Object {
                let mut op = session.transform.op();
                egui::ComboBox::from_label("Operation")
                    .selected_text(op.label())
                    .show_ui(ui, |ui| {
                        for candidate in TransformOp::ALL {
                            ui.selectable_value(&mut op, candidate, candidate.label());
                        }
                    });
                session.transform.set_op(op);
            }
            ui.separator();

            let camera = &session.camera;
            ui.label(format!(
                "Camera: yaw {:.1} pitch {:.1} roll {:.1}",
                camera.yaw(),
                camera.pitch(),
                camera.roll()
            ));
            ui.label(format!("Orbit distance: {:.2}", camera.orbit_distance()));
            let scale = session.transform.scale();
            let rotation = session.transform.rotation();
            let translation = session.transform.translation();
            ui.label(format!(
                "Scale: {:.2} {:.2} {:.2}",
                scale.x, scale.y, scale.z
            ));
            ui.label(format!(
                "Rotation: {:.1} {:.1} {:.1}",
                rotation.x, rotation.y, rotation.z
            ));
            ui.label(format!(
                "Translation: {:.2} {:.2} {:.2}",
                translation.x, translation.y, translation.z
            ));
            ui.separator();

            if ui.button("Reset Camera").clicked() {
                actions.reset_camera = true;
            }
            if ui.button("Reset Object").clicked() {
                actions.reset_transform = true;
            }
            if ui.button("Save Session...").clicked() {
                actions.save_session = true;
            }
            if ui.button("Load Session...").clicked() {
                actions.load_session = true;
            }

            if !self.status.is_empty() {
                ui.separator();
                ui.label(&self.status);
            }
        });

        actions
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
