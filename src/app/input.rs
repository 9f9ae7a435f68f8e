use crate::scene::ShadingStyle;
use winit::keyboard::{KeyCode, PhysicalKey};

/// One-shot actions emitted on key press; held-movement state lives in the
/// boolean fields and is sampled every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    SetShading(ShadingStyle),
    ResetCamera,
    ResetTransform,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct InputState {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
}

impl InputState {
    pub fn handle_key(&mut self, key: PhysicalKey, pressed: bool) -> InputAction {
        match key {
            PhysicalKey::Code(KeyCode::KeyW) => self.move_forward = pressed,
            PhysicalKey::Code(KeyCode::KeyS) => self.move_backward = pressed,
            PhysicalKey::Code(KeyCode::KeyA) => self.move_left = pressed,
            PhysicalKey::Code(KeyCode::KeyD) => self.move_right = pressed,
            PhysicalKey::Code(KeyCode::Digit1) if pressed => {
                return InputAction::SetShading(ShadingStyle::Standard);
            }
            PhysicalKey::Code(KeyCode::Digit2) if pressed => {
                return InputAction::SetShading(ShadingStyle::Cel);
            }
            PhysicalKey::Code(KeyCode::Digit3) if pressed => {
                return InputAction::SetShading(ShadingStyle::Watercolor);
            }
            PhysicalKey::Code(KeyCode::Digit4) if pressed => {
                return InputAction::SetShading(ShadingStyle::Sketch);
            }
            PhysicalKey::Code(KeyCode::Home) if pressed => {
                return InputAction::ResetCamera;
            }
            PhysicalKey::Code(KeyCode::End) if pressed => {
                return InputAction::ResetTransform;
            }
            _ => {}
        }
        InputAction::None
    }
}
