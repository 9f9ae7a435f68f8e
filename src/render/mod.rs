use crate::app::egui_host::EguiFrameOutput;
use crate::controller::ViewerSession;
use crate::scene::{MeshData, ShadingStyle};
use glam::{Mat4, Vec3};

const FOV_Y_DEG: f32 = 45.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;
// Fixed key light, matching the viewer's shader setup.
const LIGHT_POS: Vec3 = Vec3::new(1.2, 1.0, 2.0);

/// Everything the render collaborator needs for one frame, assembled from
/// the session once per frame. Eye and view direction ride along for
/// lighting placement.
#[derive(Debug, Clone, Copy)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub model: Mat4,
    pub eye: Vec3,
    pub view_front: Vec3,
    pub light_pos: Vec3,
    pub light_color: Vec3,
    pub time: f32,
    pub shading: ShadingStyle,
}

impl FrameUniforms {
    pub fn assemble(session: &ViewerSession, aspect: f32, time: f32) -> Self {
        Self {
            view: session.camera.view_matrix(),
            projection: projection_matrix(FOV_Y_DEG, aspect),
            model: session.transform.model_matrix(),
            eye: session.camera.position(),
            view_front: session.camera.front(),
            light_pos: LIGHT_POS,
            light_color: Vec3::ONE,
            time,
            shading: session.shading(),
        }
    }
}

pub fn projection_matrix(fov_y_deg: f32, aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_y_deg.to_radians(), aspect.max(1e-3), NEAR_PLANE, FAR_PLANE)
}

/// Drawing boundary. The app uploads meshes once and hands uniforms plus
/// tessellated UI output over every frame; implementations own all GPU
/// and shader-program state.
pub trait RenderBackend {
    fn upload_mesh(&mut self, mesh: &MeshData);
    fn clear_meshes(&mut self);
    fn draw(&mut self, frame: &FrameUniforms);
    fn paint_ui(&mut self, _ui: &EguiFrameOutput) {}
}

/// Backend that draws nothing: logs uploads and counts frames. Default
/// until a GPU backend is plugged in, and what the tests run against.
#[derive(Default)]
pub struct HeadlessBackend {
    uploaded_meshes: Vec<String>,
    frames_drawn: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploaded_meshes(&self) -> &[String] {
        &self.uploaded_meshes
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload_mesh(&mut self, mesh: &MeshData) {
        log::debug!(
            "upload mesh '{}': {} vertices, {} triangles",
            mesh.name,
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        self.uploaded_meshes.push(mesh.name.clone());
    }

    fn clear_meshes(&mut self) {
        self.uploaded_meshes.clear();
    }

    fn draw(&mut self, frame: &FrameUniforms) {
        self.frames_drawn += 1;
        if self.frames_drawn == 1 {
            log::debug!("first frame: shading {:?}, eye {:?}", frame.shading, frame.eye);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{projection_matrix, FrameUniforms, HeadlessBackend, RenderBackend};
    use crate::controller::{ToolMode, ViewerSession};
    use crate::scene::{unit_cube, ShadingStyle};
    use glam::Vec3;

    #[test]
    fn uniforms_mirror_the_session_state_machines() {
        let mut session = ViewerSession::new();
        session.set_tool(ToolMode::Orbit);
        session.pointer_delta(40.0, -10.0);
        session.set_shading(ShadingStyle::Cel);

        let frame = FrameUniforms::assemble(&session, 16.0 / 9.0, 1.25);
        assert_eq!(frame.view, session.camera.view_matrix());
        assert_eq!(frame.model, session.transform.model_matrix());
        assert_eq!(frame.eye, session.camera.position());
        assert_eq!(frame.view_front, session.camera.front());
        assert_eq!(frame.shading, ShadingStyle::Cel);
        assert_eq!(frame.time, 1.25);
    }

    #[test]
    fn projection_keeps_points_inside_the_frustum() {
        let projection = projection_matrix(45.0, 1.0);
        let view = ViewerSession::new().camera.view_matrix();
        let clip = projection * view;
        let projected = clip.project_point3(Vec3::ZERO);
        assert!(projected.x.abs() < 1.0);
        assert!(projected.y.abs() < 1.0);
        assert!(projected.z.abs() <= 1.0);
    }

    #[test]
    fn headless_backend_tracks_uploads_and_frames() {
        let mut backend = HeadlessBackend::new();
        backend.upload_mesh(&unit_cube());
        assert_eq!(backend.uploaded_meshes(), ["cube"]);

        let session = ViewerSession::new();
        let frame = FrameUniforms::assemble(&session, 1.0, 0.0);
        backend.draw(&frame);
        backend.draw(&frame);
        assert_eq!(backend.frames_drawn(), 2);

        backend.clear_meshes();
        assert!(backend.uploaded_meshes().is_empty());
    }
}
