pub mod egui_host;
mod input;
mod timing;

use crate::assets;
use crate::controller::{PanDirection, ViewerSession};
use crate::render::{FrameUniforms, HeadlessBackend, RenderBackend};
use crate::scene::serialization::{self, SessionSnapshot};
use crate::scene::{ground_grid, unit_cube, MeshData};
use crate::ui::{UiActions, UiState};
use egui_host::EguiHost;
use input::{InputAction, InputState};
use timing::FrameTiming;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

const WINDOW_TITLE: &str = "NPR Viewer";

pub struct App {
    window: Option<Arc<Window>>,
    session: ViewerSession,
    ui: UiState,
    egui: Option<EguiHost>,
    backend: Box<dyn RenderBackend>,
    meshes: Vec<MeshData>,
    model_path: Option<PathBuf>,
    input: InputState,
    mouse_pos: Option<(f32, f32)>,
    dragging: bool,
    timing: FrameTiming,
    target_frame_duration: Duration,
    next_frame_time: Instant,
    started_at: Instant,
}

impl App {
    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        Self {
            window: None,
            session: ViewerSession::new(),
            ui: UiState::new(),
            egui: None,
            backend,
            // Placeholders until a model is loaded.
            meshes: vec![unit_cube(), ground_grid(3.0, 12)],
            model_path: None,
            input: InputState::default(),
            mouse_pos: None,
            dragging: false,
            timing: FrameTiming::new(WINDOW_TITLE.to_string()),
            target_frame_duration: Duration::from_millis(16),
            next_frame_time: Instant::now(),
            started_at: Instant::now(),
        }
    }

    fn update_target_frame_duration(&mut self, window: &Window) {
        let mut target = Duration::from_millis(16);
        if let Some(monitor) = window.current_monitor() {
            if let Some(millihz) = monitor.refresh_rate_millihertz() {
                let hz = millihz as f32 / 1000.0;
                if hz > 1.0 {
                    target = Duration::from_secs_f32(1.0 / hz);
                }
            }
        }
        self.target_frame_duration = target;
        self.next_frame_time = Instant::now() + self.target_frame_duration;
    }

    fn upload_meshes(&mut self) {
        self.backend.clear_meshes();
        for mesh in &self.meshes {
            self.backend.upload_mesh(mesh);
        }
    }

    /// Apply held keyboard movement for this frame. Free-fly nudges that
    /// temporarily detach the eye from the orbit sphere.
    fn update_camera(&mut self) {
        let dt = self.timing.frame_dt;
        if self.input.move_forward {
            self.session.keyboard_pan(PanDirection::Forward, dt);
        }
        if self.input.move_backward {
            self.session.keyboard_pan(PanDirection::Backward, dt);
        }
        if self.input.move_left {
            self.session.keyboard_pan(PanDirection::Left, dt);
        }
        if self.input.move_right {
            self.session.keyboard_pan(PanDirection::Right, dt);
        }
    }

    fn model_label(&self) -> String {
        self.model_path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| "cube + grid (placeholder)".to_string())
    }

    fn render_frame(&mut self) {
        let frame_start = Instant::now();
        self.timing
            .update(self.window.as_ref().map(|w| w.as_ref()), frame_start);
        self.update_camera();

        let Some(window) = self.window.clone() else {
            return;
        };
        let mut actions = UiActions::default();
        let model_label = self.model_label();
        let ui_output = if let Some(egui) = self.egui.as_mut() {
            let session = &mut self.session;
            let ui_state = &mut self.ui;
            Some(egui.run_ui(&window, |ctx| {
                actions = ui_state.panel(ctx, session, &model_label);
            }))
        } else {
            None
        };

        self.handle_actions(actions);

        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let time = self.started_at.elapsed().as_secs_f32();
        let frame = FrameUniforms::assemble(&self.session, aspect, time);
        self.backend.draw(&frame);
        if let Some(ui_output) = &ui_output {
            self.backend.paint_ui(ui_output);
        }
    }

    fn handle_actions(&mut self, actions: UiActions) {
        if actions.load_model {
            self.handle_load_model_action();
        }
        if actions.reset_camera {
            self.session.camera.reset_orientation();
        }
        if actions.reset_transform {
            self.session.transform.reset();
        }
        if actions.save_session {
            self.handle_save_session_action();
        }
        if actions.load_session {
            self.handle_load_session_action();
        }
    }

    fn handle_load_model_action(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Wavefront OBJ", &["obj"])
            .pick_file()
        else {
            return;
        };
        self.load_model(&path, true);
    }

    /// Import a model; on the success branch the session-reset contract
    /// fires (camera reframes the origin). `reset_camera` is false when a
    /// snapshot restore will supply the pose right after.
    fn load_model(&mut self, path: &Path, reset_camera: bool) {
        log::info!("Loading model: {}", path.display());
        match assets::load_obj(path) {
            Ok(model) => {
                log::info!(
                    "Loaded '{}': {} meshes, {} textures, center {:?} extent {:?}",
                    model.name,
                    model.meshes.len(),
                    model.textures.len(),
                    model.center,
                    model.extent
                );
                self.ui.set_status(format!(
                    "Loaded {} ({} meshes)",
                    model.name,
                    model.meshes.len()
                ));
                self.meshes = model.meshes;
                self.model_path = Some(path.to_path_buf());
                self.upload_meshes();
                if reset_camera {
                    self.session.model_loaded();
                }
            }
            Err(err) => {
                log::warn!("Failed to load model {}: {}", path.display(), err);
                self.ui.set_status(format!("Load failed:\n{}", err));
            }
        }
    }

    fn handle_save_session_action(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Session", &["json"])
            .set_file_name("session.json")
            .save_file()
        else {
            return;
        };
        let model_path = self
            .model_path
            .as_deref()
            .and_then(|p| p.to_str())
            .map(str::to_string);
        let snapshot = SessionSnapshot::capture(&self.session, model_path.as_deref());
        if let Err(err) = serialization::save_snapshot_to_file(&snapshot, &path) {
            log::warn!("Failed to save session: {}", err);
            self.ui.set_status(format!("Save failed:\n{}", err));
        } else {
            self.ui.set_status(format!("Session saved to {}", path.display()));
        }
    }

    fn handle_load_session_action(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Session", &["json"])
            .pick_file()
        else {
            return;
        };
        let snapshot = match serialization::load_snapshot_from_file(&path) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("Failed to load session: {}", err);
                self.ui.set_status(format!("Session load failed:\n{}", err));
                return;
            }
        };
        if let Some(model_path) = snapshot.model_path.clone() {
            // The snapshot pose replaces the post-load camera reset.
            self.load_model(Path::new(&model_path), false);
        }
        snapshot.restore(&mut self.session);
        log::info!("Session restored from {}", path.display());
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(1280u32, 720u32))
            .with_resizable(true);

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        self.egui = Some(EguiHost::new(&window));
        self.upload_meshes();
        self.update_target_frame_duration(&window);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let mut ui_consumed = false;
        if let (Some(egui), Some(window)) = (self.egui.as_mut(), self.window.as_ref()) {
            ui_consumed = egui.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }
                if ui_consumed {
                    return;
                }
                let pressed = event.state == ElementState::Pressed;
                match self.input.handle_key(event.physical_key, pressed) {
                    InputAction::SetShading(style) => self.session.set_shading(style),
                    InputAction::ResetCamera => self.session.camera.reset_orientation(),
                    InputAction::ResetTransform => self.session.transform.reset(),
                    InputAction::None => {}
                }
            }
            WindowEvent::Resized(_) => {
                if let Some(window) = self.window.clone() {
                    self.update_target_frame_duration(&window);
                }
            }
            WindowEvent::Moved(_) => {
                if let Some(window) = self.window.clone() {
                    self.update_target_frame_duration(&window);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = (position.x as f32, position.y as f32);
                if let Some((last_x, last_y)) = self.mouse_pos {
                    if self.dragging && !ui_consumed {
                        // Vertical axis reversed: screen y grows downward.
                        let dx = pos.0 - last_x;
                        let dy = last_y - pos.1;
                        self.session.pointer_delta(dx, dy);
                    }
                }
                self.mouse_pos = Some(pos);
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_pos = None;
                self.dragging = false;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    let pressed = state == ElementState::Pressed;
                    let ui_wants_pointer = self
                        .egui
                        .as_ref()
                        .map(|egui| egui.wants_pointer_input())
                        .unwrap_or(false);
                    self.dragging = pressed && !ui_wants_pointer;
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if ui_consumed {
                    return;
                }
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.05,
                };
                if scroll != 0.0 {
                    self.session.scroll(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame_time {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            self.next_frame_time = now + self.target_frame_duration;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame_time));
    }
}

pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("NPR Viewer - orbit with the mouse, 1-4 to switch shading");
    log::info!("Press ESC or close the window to exit");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(Box::new(HeadlessBackend::new()));
    event_loop.run_app(&mut app).expect("Event loop error");

    log::info!("Goodbye");
}
