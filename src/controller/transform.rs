use glam::{Mat4, Vec3};

const SCALE_SENSITIVITY: f32 = 0.01;
const ROTATION_SENSITIVITY: f32 = 0.5;
const TRANSLATION_SENSITIVITY: f32 = 0.01;
// Scale components are floored here so a gesture can never invert or
// flatten the mesh.
const SCALE_FLOOR: f32 = 0.01;

/// The axis/mode the next pointer gesture applies to. A persistent
/// selector, not a lifecycle: every transition is legal and switching has
/// no effect beyond future dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransformOp {
    ScaleX,
    ScaleY,
    ScaleZ,
    ScaleUniform,
    RotateX,
    RotateY,
    RotateZ,
    TranslateX,
    TranslateY,
    TranslateZ,
}

impl TransformOp {
    pub const ALL: [TransformOp; 10] = [
        TransformOp::ScaleX,
        TransformOp::ScaleY,
        TransformOp::ScaleZ,
        TransformOp::ScaleUniform,
        TransformOp::RotateX,
        TransformOp::RotateY,
        TransformOp::RotateZ,
        TransformOp::TranslateX,
        TransformOp::TranslateY,
        TransformOp::TranslateZ,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransformOp::ScaleX => "Scale X",
            TransformOp::ScaleY => "Scale Y",
            TransformOp::ScaleZ => "Scale Z",
            TransformOp::ScaleUniform => "Scale Uniform",
            TransformOp::RotateX => "Rotate X",
            TransformOp::RotateY => "Rotate Y",
            TransformOp::RotateZ => "Rotate Z",
            TransformOp::TranslateX => "Translate X",
            TransformOp::TranslateY => "Translate Y",
            TransformOp::TranslateZ => "Translate Z",
        }
    }
}

/// Object pose: component-wise scale, Euler rotation in degrees (each
/// component kept in [0, 360)), and an unconstrained translation, mutated
/// through the active operation selector.
#[derive(Debug, Clone, Copy)]
pub struct ObjectTransform {
    scale: Vec3,
    rotation: Vec3,
    translation: Vec3,
    op: TransformOp,
}

impl ObjectTransform {
    pub fn new() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            translation: Vec3::ZERO,
            op: TransformOp::ScaleUniform,
        }
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn op(&self) -> TransformOp {
        self.op
    }

    pub fn set_op(&mut self, op: TransformOp) {
        self.op = op;
    }

    /// Route a pointer delta to the active operation. Delta components the
    /// operation does not use are ignored.
    pub fn pointer_delta(&mut self, dx: f32, dy: f32) {
        match self.op {
            TransformOp::ScaleX | TransformOp::ScaleY | TransformOp::ScaleZ
            | TransformOp::ScaleUniform => self.apply_scale(dy),
            TransformOp::RotateX | TransformOp::RotateY | TransformOp::RotateZ => {
                self.apply_rotation(dx)
            }
            TransformOp::TranslateX | TransformOp::TranslateY | TransformOp::TranslateZ => {
                self.apply_translation(dx, dy)
            }
        }
    }

    fn apply_scale(&mut self, dy: f32) {
        let delta = dy * SCALE_SENSITIVITY;
        match self.op {
            TransformOp::ScaleX => self.scale.x = (self.scale.x + delta).max(SCALE_FLOOR),
            TransformOp::ScaleY => self.scale.y = (self.scale.y + delta).max(SCALE_FLOOR),
            TransformOp::ScaleZ => self.scale.z = (self.scale.z + delta).max(SCALE_FLOOR),
            TransformOp::ScaleUniform => {
                // Multiplicative so repeated gestures compound instead of
                // saturating against the floor.
                let factor = (1.0 + delta).max(SCALE_FLOOR);
                self.scale *= factor;
            }
            _ => {}
        }
    }

    fn apply_rotation(&mut self, dx: f32) {
        let delta = dx * ROTATION_SENSITIVITY;
        match self.op {
            TransformOp::RotateX => self.rotation.x = (self.rotation.x + delta).rem_euclid(360.0),
            TransformOp::RotateY => self.rotation.y = (self.rotation.y + delta).rem_euclid(360.0),
            TransformOp::RotateZ => self.rotation.z = (self.rotation.z + delta).rem_euclid(360.0),
            _ => {}
        }
    }

    fn apply_translation(&mut self, dx: f32, dy: f32) {
        match self.op {
            TransformOp::TranslateX => self.translation.x += dx * TRANSLATION_SENSITIVITY,
            TransformOp::TranslateY => self.translation.y += dy * TRANSLATION_SENSITIVITY,
            // Dragging right pulls the object toward the viewer: the sign
            // flip on Z is intentional depth mapping, not a typo.
            TransformOp::TranslateZ => self.translation.z -= dx * TRANSLATION_SENSITIVITY,
            _ => {}
        }
    }

    /// Compose translate * rotX * rotY * rotZ * scale. The X,Y,Z rotation
    /// order is load-bearing; rotations do not commute.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_scale(self.scale)
    }

    pub fn reset(&mut self) {
        self.scale = Vec3::ONE;
        self.rotation = Vec3::ZERO;
        self.translation = Vec3::ZERO;
    }

    /// Restore a pose from a snapshot through the same clamping/wrapping
    /// the gestures use.
    pub fn set_pose(&mut self, scale: Vec3, rotation: Vec3, translation: Vec3) {
        self.scale = scale.max(Vec3::splat(SCALE_FLOOR));
        self.rotation = Vec3::new(
            rotation.x.rem_euclid(360.0),
            rotation.y.rem_euclid(360.0),
            rotation.z.rem_euclid(360.0),
        );
        self.translation = translation;
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::new()
    }
}
