use crate::controller::{ToolMode, TransformOp, ViewerSession};
use crate::scene::ShadingStyle;
use glam::Vec3;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SerializationError>;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub target: [f32; 3],
    pub orbit_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectPose {
    pub scale: [f32; 3],
    pub rotation: [f32; 3],
    pub translation: [f32; 3],
}

/// Everything needed to rebuild a viewer session: the loaded model path,
/// shading/tool selections, and both poses. Derived state (eye position,
/// basis vectors) is not stored; restoring goes through the public
/// camera/transform API so the invariants are re-established.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    pub model_path: Option<String>,
    pub shading: ShadingStyle,
    pub tool: ToolMode,
    pub transform_op: TransformOp,
    pub camera: CameraPose,
    pub transform: ObjectPose,
}

impl SessionSnapshot {
    pub fn capture(session: &ViewerSession, model_path: Option<&str>) -> Self {
        Self {
            model_path: model_path.map(str::to_string),
            shading: session.shading(),
            tool: session.tool(),
            transform_op: session.transform.op(),
            camera: CameraPose {
                yaw: session.camera.yaw(),
                pitch: session.camera.pitch(),
                roll: session.camera.roll(),
                target: session.camera.target().to_array(),
                orbit_distance: session.camera.orbit_distance(),
            },
            transform: ObjectPose {
                scale: session.transform.scale().to_array(),
                rotation: session.transform.rotation().to_array(),
                translation: session.transform.translation().to_array(),
            },
        }
    }

    pub fn restore(&self, session: &mut ViewerSession) {
        session.set_shading(self.shading);
        session.set_tool(self.tool);
        session.transform.set_op(self.transform_op);
        session.camera.set_pose(
            self.camera.yaw,
            self.camera.pitch,
            self.camera.roll,
            Vec3::from_array(self.camera.target),
            self.camera.orbit_distance,
        );
        session.transform.set_pose(
            Vec3::from_array(self.transform.scale),
            Vec3::from_array(self.transform.rotation),
            Vec3::from_array(self.transform.translation),
        );
    }
}

pub fn save_snapshot_to_file(snapshot: &SessionSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_snapshot_from_file(path: &Path) -> Result<SessionSnapshot> {
    let json = std::fs::read_to_string(path)?;
    let snapshot: SessionSnapshot = serde_json::from_str(&json)?;
    Ok(snapshot)
}
