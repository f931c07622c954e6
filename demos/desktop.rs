use std::sync::Arc;
use std::time::Instant;

use gaze::gui::eye_control_panel;
use gaze::{EyeParams, EyeRenderer, Face, FaceConfig};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

struct App {
    state: Option<AppState>,
}

struct AppState {
    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    renderer: EyeRenderer,
    face: Face,
    mouse_position: Option<winit::dpi::PhysicalPosition<f64>>,
    last_frame: Instant,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl AppState {
    fn load_config_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("json", &["json"])
            .pick_file()
        else {
            return;
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| FaceConfig::from_json(&json).map_err(|e| e.to_string()))
            .and_then(|config| config.apply_to(&mut self.face).map_err(|e| e.to_string()));
        if let Err(e) = loaded {
            log::error!("failed to load config from {}: {e}", path.display());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Gaze")
                        .with_inner_size(winit::dpi::LogicalSize::new(800, 400)),
                )
                .unwrap(),
        );

        let state = pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let surface = instance.create_surface(window.clone()).unwrap();

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .unwrap();

            let (device, queue) = adapter
                .request_device(
                    &wgpu::DeviceDescriptor {
                        label: Some("gaze_device"),
                        ..Default::default()
                    },
                    None,
                )
                .await
                .unwrap();

            let size = window.inner_size();
            let caps = surface.get_capabilities(&adapter);
            let format = caps.formats[0];

            let surface_config = wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width: size.width.max(1),
                height: size.height.max(1),
                present_mode: wgpu::PresentMode::AutoVsync,
                alpha_mode: caps.alpha_modes[0],
                view_formats: vec![],
                desired_maximum_frame_latency: 2,
            };
            surface.configure(&device, &surface_config);

            let renderer = EyeRenderer::new(&device, format);
            let face = Face::new(size.width.max(1) as f32, size.height.max(1) as f32);

            // egui setup
            let egui_ctx = egui::Context::default();
            let egui_state = egui_winit::State::new(
                egui_ctx.clone(),
                egui_ctx.viewport_id(),
                &window,
                Some(window.scale_factor() as f32),
                None,
                None,
            );
            let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

            AppState {
                window,
                device,
                queue,
                surface,
                surface_config,
                renderer,
                face,
                mouse_position: None,
                last_frame: Instant::now(),
                egui_ctx,
                egui_state,
                egui_renderer,
            }
        });

        self.state = Some(state);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Pass events to egui first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                state.surface_config.width = new_size.width.max(1);
                state.surface_config.height = new_size.height.max(1);
                state
                    .surface
                    .configure(&state.device, &state.surface_config);
                state.face.resize(
                    state.surface_config.width as f32,
                    state.surface_config.height as f32,
                );
                state.window.request_redraw();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => event_loop.exit(),
                Key::Named(NamedKey::Space) => state.face.trigger_blink(),
                Key::Character(c) => match c.as_str() {
                    "n" => state.face.set_emotion("neutral"),
                    "a" => state.face.set_emotion("angry"),
                    "o" => state.load_config_dialog(),
                    _ => {}
                },
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                state.mouse_position = Some(position);
            }
            WindowEvent::RedrawRequested => {
                let output = match state.surface.get_current_texture() {
                    Ok(output) => output,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state
                            .surface
                            .configure(&state.device, &state.surface_config);
                        return;
                    }
                    Err(e) => {
                        log::error!("surface error: {e:?}");
                        return;
                    }
                };

                let dt = state.last_frame.elapsed().as_secs_f32();
                state.last_frame = Instant::now();

                // Mouse position -> gaze intent, normalized around the
                // screen center.
                if let Some(pos) = state.mouse_position {
                    let cx = state.surface_config.width as f64 / 2.0;
                    let cy = state.surface_config.height as f64 / 2.0;
                    let gaze_x = ((pos.x - cx) / cx).clamp(-1.0, 1.0) as f32;
                    let gaze_y = ((pos.y - cy) / cy).clamp(-1.0, 1.0) as f32;
                    state.face.set_gaze(gaze_x, gaze_y);
                }

                state.face.update(dt);
                let params = EyeParams::compose(state.face.state(), state.face.geometry());

                // --- egui frame ---
                let raw_input = state.egui_state.take_egui_input(&state.window);
                let full_output = state.egui_ctx.run(raw_input, |ctx| {
                    eye_control_panel(ctx, &mut state.face);
                });

                state
                    .egui_state
                    .handle_platform_output(&state.window, full_output.platform_output);

                let paint_jobs = state
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                // Update egui textures
                for (id, delta) in &full_output.textures_delta.set {
                    state
                        .egui_renderer
                        .update_texture(&state.device, &state.queue, *id, delta);
                }

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [state.surface_config.width, state.surface_config.height],
                    pixels_per_point: state.window.scale_factor() as f32,
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                let mut encoder =
                    state
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("gaze_encoder"),
                        });

                // Update egui buffers
                state.egui_renderer.update_buffers(
                    &state.device,
                    &state.queue,
                    &mut encoder,
                    &paint_jobs,
                    &screen_descriptor,
                );

                // Render eyes + egui overlay in the same pass
                {
                    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("gaze_render_pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    state.queue.write_buffer(
                        state.renderer.uniform_buffer(),
                        0,
                        bytemuck::bytes_of(&params),
                    );
                    pass.set_pipeline(state.renderer.pipeline());
                    pass.set_bind_group(0, state.renderer.bind_group(), &[]);
                    pass.draw(0..3, 0..1);

                    // Draw egui overlay
                    state.egui_renderer.render(
                        &mut pass.forget_lifetime(),
                        &paint_jobs,
                        &screen_descriptor,
                    );
                }

                // Free egui textures
                for id in &full_output.textures_delta.free {
                    state.egui_renderer.free_texture(id);
                }

                state.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                state.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().unwrap();
    let mut app = App { state: None };
    event_loop.run_app(&mut app).unwrap();
}
