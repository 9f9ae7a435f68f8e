pub mod camera;
pub mod transform;

pub use camera::{OrbitCamera, PanDirection};
pub use transform::{ObjectTransform, TransformOp};

use crate::scene::ShadingStyle;

/// Which state machine the current pointer drag feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ToolMode {
    /// Full yaw + pitch camera gesture.
    Orbit,
    /// Yaw-only camera gesture.
    Rotate,
    /// Pitch-only camera gesture.
    Tilt,
    /// Roll about the view axis.
    Roll,
    /// Slide the orbit pivot in the view plane.
    Pan,
    /// Route the drag to the object transform's active operation.
    Object,
}

impl ToolMode {
    pub const ALL: [ToolMode; 6] = [
        ToolMode::Orbit,
        ToolMode::Rotate,
        ToolMode::Tilt,
        ToolMode::Roll,
        ToolMode::Pan,
        ToolMode::Object,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolMode::Orbit => "Orbit",
            ToolMode::Rotate => "Rotate",
            ToolMode::Tilt => "Tilt",
            ToolMode::Roll => "Roll",
            ToolMode::Pan => "Pan",
            ToolMode::Object => "Object",
        }
    }
}

/// All mutable viewer state for one session: one camera, one object
/// transform, the active tool, and the selected shading style. Owned by
/// the app and mutated from a single call site per frame; nothing in here
/// touches windowing or rendering.
pub struct ViewerSession {
    pub camera: OrbitCamera,
    pub transform: ObjectTransform,
    tool: ToolMode,
    shading: ShadingStyle,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self {
            camera: OrbitCamera::default(),
            transform: ObjectTransform::new(),
            tool: ToolMode::Orbit,
            shading: ShadingStyle::Standard,
        }
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
    }

    pub fn shading(&self) -> ShadingStyle {
        self.shading
    }

    pub fn set_shading(&mut self, shading: ShadingStyle) {
        self.shading = shading;
    }

    /// Route the frame's pointer delta to the selected state machine.
    pub fn pointer_delta(&mut self, dx: f32, dy: f32) {
        match self.tool {
            ToolMode::Orbit => self.camera.orbit(dx, dy, true),
            ToolMode::Rotate => self.camera.rotate(dx, true),
            ToolMode::Tilt => self.camera.tilt(dy, true),
            ToolMode::Roll => self.camera.roll_by(dx),
            ToolMode::Pan => self.camera.pan(dx, dy),
            ToolMode::Object => self.transform.pointer_delta(dx, dy),
        }
    }

    pub fn scroll(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    pub fn keyboard_pan(&mut self, direction: PanDirection, dt: f32) {
        self.camera.keyboard_pan(direction, dt);
    }

    /// Session-reset contract: invoked on the success branch of a model
    /// load so the new model is framed from the canonical angle. Only the
    /// camera resets; the object pose is kept until the user resets it.
    pub fn model_loaded(&mut self) {
        self.camera.reset_orientation();
        self.camera.set_orbit_target(glam::Vec3::ZERO);
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{ToolMode, TransformOp, ViewerSession};
    use glam::Vec3;

    #[test]
    fn pointer_delta_routes_to_the_selected_state_machine() {
        let mut session = ViewerSession::new();
        let yaw_before = session.camera.yaw();

        session.set_tool(ToolMode::Object);
        session.transform.set_op(TransformOp::TranslateX);
        session.pointer_delta(100.0, 40.0);
        assert_eq!(session.camera.yaw(), yaw_before);
        assert!((session.transform.translation().x - 1.0).abs() < 1e-5);

        session.set_tool(ToolMode::Rotate);
        session.pointer_delta(100.0, 40.0);
        assert!(session.camera.yaw() != yaw_before);
        // Rotate is yaw-only; pitch ignores the vertical delta.
        assert_eq!(session.camera.pitch(), 0.0);
        // The object did not move again.
        assert!((session.transform.translation().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn model_loaded_reframes_the_origin_but_keeps_the_object_pose() {
        let mut session = ViewerSession::new();
        session.set_tool(ToolMode::Orbit);
        session.pointer_delta(300.0, -80.0);
        session.scroll(2.0);
        session.set_tool(ToolMode::Object);
        session.transform.set_op(TransformOp::TranslateY);
        session.pointer_delta(0.0, 250.0);

        session.model_loaded();
        assert_eq!(session.camera.yaw(), -90.0);
        assert_eq!(session.camera.pitch(), 0.0);
        assert_eq!(session.camera.roll(), 0.0);
        assert_eq!(session.camera.target(), Vec3::ZERO);
        assert_eq!(session.camera.orbit_distance(), 3.0);
        // Camera-only reset: the object pose survives a model load.
        assert!((session.transform.translation().y - 2.5).abs() < 1e-5);
    }

    #[test]
    fn tool_changes_have_no_side_effects() {
        let mut session = ViewerSession::new();
        let eye = session.camera.position();
        for tool in ToolMode::ALL {
            session.set_tool(tool);
        }
        assert_eq!(session.camera.position(), eye);
        assert_eq!(session.transform.scale(), Vec3::ONE);
    }
}
