use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glam::Vec2;
use tracing_subscriber::EnvFilter;

mod flower;
mod renderer;
mod ui;

use flower::{FlowerMesh, PRESETS, generate, io, obj, randomize};
use renderer::{Camera, GpuState, generate_axes_vertices, mesh_fits_gpu};
use ui::state::DisplayMode;
use ui::{RenderStats, UiActions, UiState, apply_theme, draw_help_overlay, draw_side_panel};

struct InputState {
    forward: f32,
    right: f32,
    up: f32,
    mouse_captured: bool,
    mouse_delta: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            forward: 0.0,
            right: 0.0,
            up: 0.0,
            mouse_captured: false,
            mouse_delta: Vec2::ZERO,
        }
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    ui_state: UiState,
    input: InputState,

    /// CPU-side copy of the last good mesh; OBJ export reads it and a
    /// failed rebuild leaves it (and the GPU buffers) untouched.
    current_mesh: Option<FlowerMesh>,
    last_error: Option<String>,

    fps: f32,
    rebuild_ms: f32,
    axes_uploaded: bool,

    last_frame: Instant,
    frame_count: u32,
    fps_timer: Instant,

    last_vsync_state: bool,
    last_frame_time: Instant,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::default(),
            ui_state: UiState::default(),
            input: InputState::default(),

            current_mesh: None,
            last_error: None,

            fps: 0.0,
            rebuild_ms: 0.0,
            axes_uploaded: false,

            last_frame: Instant::now(),
            frame_count: 0,
            fps_timer: Instant::now(),

            last_vsync_state: true,
            last_frame_time: Instant::now(),
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) {
        let gpu = pollster::block_on(GpuState::new(window.clone()));

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
    }

    fn rebuild_mesh(&mut self) {
        let Some(gpu) = &mut self.gpu else { return };

        let start = Instant::now();
        match generate(&self.ui_state.params, self.ui_state.color1, self.ui_state.color2) {
            Ok(mut mesh) => {
                // Imported files can describe grids past the slider bounds;
                // a mesh the buffers cannot hold is an error, not a partial
                // upload.
                if !mesh_fits_gpu(&mesh) {
                    let msg = format!(
                        "Mesh too large to display: {} vertices (limit {})",
                        mesh.vertex_count(),
                        renderer::gpu::MAX_FLOWER_VERTICES,
                    );
                    tracing::warn!("{msg}");
                    self.last_error = Some(msg);
                    self.ui_state.mesh_dirty = false;
                    return;
                }

                mesh.compute_vertex_normals();
                gpu.flower_buffers.upload_flower(&gpu.queue, &mesh);

                self.rebuild_ms = start.elapsed().as_secs_f32() * 1000.0;
                tracing::debug!(
                    vertices = mesh.vertex_count(),
                    triangles = mesh.triangle_count(),
                    ms = self.rebuild_ms,
                    "mesh rebuilt"
                );

                self.current_mesh = Some(mesh);
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!("mesh rebuild failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
        self.ui_state.mesh_dirty = false;
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_count += 1;
        if self.fps_timer.elapsed().as_secs_f32() >= 1.0 {
            self.fps = self.frame_count as f32 / self.fps_timer.elapsed().as_secs_f32();
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }

        self.camera.set_mode(self.ui_state.camera_mode);
        self.camera
            .process_keyboard(self.input.forward, self.input.right, self.input.up, dt);

        if self.input.mouse_captured {
            self.camera.process_mouse_movement(self.input.mouse_delta);
        }
        self.input.mouse_delta = Vec2::ZERO;

        if self.ui_state.mesh_dirty {
            self.rebuild_mesh();
        }

        if !self.axes_uploaded {
            if let Some(gpu) = &mut self.gpu {
                let verts = generate_axes_vertices(250.0, 64, 300.0);
                gpu.flower_buffers.upload_axes(&gpu.queue, &verts);
                self.axes_uploaded = true;
            }
        }
    }

    fn render(&mut self) {
        if self.ui_state.fps_cap_enabled {
            let frame_duration = Duration::from_secs_f64(1.0 / self.ui_state.fps_cap as f64);
            let elapsed = self.last_frame_time.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }
        self.last_frame_time = Instant::now();

        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let stats = RenderStats {
            fps: self.fps,
            vertex_count: self
                .current_mesh
                .as_ref()
                .map_or(0, FlowerMesh::vertex_count),
            triangle_count: self
                .current_mesh
                .as_ref()
                .map_or(0, FlowerMesh::triangle_count),
            rebuild_ms: self.rebuild_ms,
        };

        let camera_pos = self.camera.position.to_array();
        let camera_speed = self.camera.move_speed;
        let last_error = self.last_error.clone();

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &stats, &last_error);
            draw_help_overlay(ctx, camera_pos, camera_speed);
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                panic!("Out of GPU memory");
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_camera(&self.camera);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        match self.ui_state.display_mode {
            DisplayMode::Shaded => {
                gpu.render_shaded(&view, &mut encoder, self.ui_state.show_axes)
            }
            DisplayMode::Points => {
                gpu.render_points(&view, &mut encoder, self.ui_state.show_axes)
            }
        }

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.randomize {
            self.randomize_flower();
        }

        if let Some(i) = actions.load_preset {
            let preset = &PRESETS[i];
            self.ui_state.params = preset.params;
            self.ui_state.color1 = preset.color1;
            self.ui_state.color2 = preset.color2;
            self.ui_state.selected_preset = Some(i);
            self.ui_state.mesh_dirty = true;
        }

        if actions.export_params {
            self.export_params();
        }

        if actions.import_params {
            self.import_params();
        }

        if actions.export_obj {
            self.export_obj();
        }

        if actions.reset_view {
            self.camera.reset_view();
        }
    }

    fn randomize_flower(&mut self) {
        let mut rng = rand::rng();
        randomize(
            &mut self.ui_state.params,
            &mut self.ui_state.color1,
            &mut self.ui_state.color2,
            &self.ui_state.locks,
            &mut rng,
        );
        self.ui_state.selected_preset = None;
        self.ui_state.mesh_dirty = true;
    }

    fn export_params(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("ProceduralFlower.json")
            .save_file()
        else {
            return;
        };

        let result = io::export_json(
            &self.ui_state.params,
            self.ui_state.color1,
            self.ui_state.color2,
        )
        .map_err(|e| e.to_string())
        .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

        match result {
            Ok(()) => tracing::info!("exported parameters to {}", path.display()),
            Err(e) => {
                tracing::error!("parameter export failed: {e}");
                self.last_error = Some(format!("Export failed: {e}"));
            }
        }
    }

    fn import_params(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };

        let result = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|data| io::import_json(&data).map_err(|e| e.to_string()));

        match result {
            Ok((params, color1, color2)) => {
                tracing::info!("imported parameters from {}", path.display());
                self.ui_state.params = params;
                self.ui_state.color1 = color1;
                self.ui_state.color2 = color2;
                self.ui_state.selected_preset = None;
                self.ui_state.mesh_dirty = true;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!("parameter import failed: {e}");
                self.last_error = Some(format!("Import failed: {e}"));
            }
        }
    }

    fn export_obj(&mut self) {
        let Some(mesh) = &self.current_mesh else {
            self.last_error = Some("No mesh to export yet".to_string());
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("Wavefront OBJ", &["obj"])
            .set_file_name("ProceduralFlower.obj")
            .save_file()
        else {
            return;
        };

        match std::fs::write(&path, obj::export_obj(mesh)) {
            Ok(()) => tracing::info!("exported mesh to {}", path.display()),
            Err(e) => {
                tracing::error!("mesh export failed: {e}");
                self.last_error = Some(format!("Export failed: {e}"));
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let value = if pressed { 1.0 } else { 0.0 };

        match key {
            KeyCode::KeyW | KeyCode::KeyZ => self.input.forward = value,
            KeyCode::KeyS => self.input.forward = -value,
            KeyCode::KeyA | KeyCode::KeyQ => self.input.right = -value,
            KeyCode::KeyD => self.input.right = value,
            KeyCode::Space => self.input.up = value,
            KeyCode::ShiftLeft | KeyCode::ControlLeft => self.input.up = -value,
            KeyCode::KeyR if pressed => self.randomize_flower(),
            KeyCode::Escape if pressed => {
                self.input.mouse_captured = false;
                if let Some(window) = &self.window {
                    let _ = window.set_cursor_grab(winit::window::CursorGrabMode::None);
                    window.set_cursor_visible(true);
                }
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title("Flora 3D - Parametric Flower Generator")
            .with_inner_size(PhysicalSize::new(1600, 900));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
        self.init_gpu(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera
                        .set_aspect(size.width as f32, size.height as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(key, event.state == ElementState::Pressed);
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => {
                self.input.mouse_captured = state == ElementState::Pressed;

                if let Some(window) = &self.window {
                    if self.input.mouse_captured {
                        let _ = window.set_cursor_grab(winit::window::CursorGrabMode::Confined);
                        window.set_cursor_visible(false);
                    } else {
                        let _ = window.set_cursor_grab(winit::window::CursorGrabMode::None);
                        window.set_cursor_visible(true);
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: winit::event::DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.input.mouse_captured {
                self.input.mouse_delta.x += delta.0 as f32;
                self.input.mouse_delta.y += delta.1 as f32;
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).unwrap();
}
