//! DVD screensaver -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Each `RedrawRequested`
//! runs one frame in fixed order:
//!
//!   1. input phase -- arrow-key nudge applied directly to the sprite, clamped
//!   2. physics phase -- one velocity step with boundary reflection
//!   3. render -- clear, bind, upload the sprite uniform, one draw, present
//!
//! There is no delta-time scaling: the sprite moves by exactly its velocity
//! each presented frame, and Fifo presentation paces the loop to the display
//! refresh interval.
//!
//! Startup failures (window, context, shaders, texture) are fatal: they are
//! recorded on the `App`, the loop exits, and `main` reports them with a
//! non-zero status.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use dvd_core::input::{InputState, Key};
use dvd_core::rng::Rng;
use dvd_core::sprite::{launch_velocity, Bounds, Sprite};
use dvd_core::time::FrameClock;
use dvd_platform::window::PlatformConfig;
use dvd_render::pipeline::{GROUP_CAMERA, GROUP_SPRITE, GROUP_TEXTURE};
use dvd_render::{
    load_shader, AnchorVertex, GpuContext, ScreenCamera, SpritePipeline, SpriteUniform, Texture,
};

const WINDOW_TITLE: &str = "DVD";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const VERT_SHADER_PATH: &str = "assets/shaders/sprite.vert.wgsl";
const FRAG_SHADER_PATH: &str = "assets/shaders/sprite.frag.wgsl";
const TEXTURE_PATH: &str = "assets/textures/logo.png";
/// Pixels per frame, for both the launch speed and the manual nudge.
const MOVE_SPEED: f32 = 4.0;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};
/// Log a smoothed frame-rate sample every this many frames.
const FPS_LOG_INTERVAL: u64 = 600;

/// All mutable state, constructed in `ApplicationHandler::resumed` once the
/// window and GPU surface are available.
///
/// Field order doubles as the release order: simulation state first, then
/// GPU resources, then the context, then the window, so dropping the struct
/// unwinds window/context/resource acquisition back-to-front exactly once.
struct ScreensaverState {
    // --- Simulation -------------------------------------------------------
    input: InputState,
    clock: FrameClock,
    bounds: Bounds,
    sprite: Sprite,

    // --- GPU resources (dropped before the context below) -----------------
    pipeline: SpritePipeline,
    texture: Texture,
    anchor_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    sprite_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    sprite_bind_group: wgpu::BindGroup,

    // --- Context, then the window it draws to -----------------------------
    gpu: GpuContext,
    window: Arc<Window>,
}

impl ScreensaverState {
    fn new(window: Arc<Window>, rng: &mut Rng) -> Result<Self> {
        let gpu = GpuContext::new(window.clone()).context("graphics context setup failed")?;

        let vert_module = load_shader(&gpu.device, Path::new(VERT_SHADER_PATH))
            .context("vertex shader setup failed")?;
        let frag_module = load_shader(&gpu.device, Path::new(FRAG_SHADER_PATH))
            .context("fragment shader setup failed")?;
        let pipeline =
            SpritePipeline::new(&gpu.device, gpu.surface_format, &vert_module, &frag_module)
                .context("sprite pipeline setup failed")?;

        let texture = Texture::from_file(&gpu.device, &gpu.queue, Path::new(TEXTURE_PATH))
            .context("sprite texture setup failed")?;

        let bounds = Bounds {
            width: WINDOW_WIDTH as f32,
            height: WINDOW_HEIGHT as f32,
        };
        let sprite = Sprite::new(
            texture.size.0,
            texture.size.1,
            Vec2::new(bounds.width / 2.0, bounds.height / 2.0),
            launch_velocity(rng, MOVE_SPEED),
        );
        log::info!(
            "Sprite launched at {} with velocity {}",
            sprite.position,
            sprite.velocity
        );

        // A single anchor point; the vertex stage fans it out into the quad.
        let anchor_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Anchor Vertex Buffer"),
                contents: bytemuck::cast_slice(&[AnchorVertex {
                    position: [0.0, 0.0],
                }]),
                usage: wgpu::BufferUsages::VERTEX,
            });

        // The camera never moves, so its uniform is written exactly once.
        let camera = ScreenCamera::new(WINDOW_WIDTH, WINDOW_HEIGHT);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let sprite_uniform = SpriteUniform::new(sprite.transform(), sprite.point_size());
        let sprite_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Uniform Buffer"),
                contents: bytemuck::cast_slice(&[sprite_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let texture_bind_group = pipeline.create_texture_bind_group(&gpu.device, &texture);
        let sprite_bind_group = pipeline.create_sprite_bind_group(&gpu.device, &sprite_buffer);

        let state = Self {
            input: InputState::new(),
            clock: FrameClock::new(),
            bounds,
            sprite,
            pipeline,
            texture,
            anchor_buffer,
            camera_buffer,
            sprite_buffer,
            camera_bind_group,
            texture_bind_group,
            sprite_bind_group,
            gpu,
            window,
        };
        log::info!(
            "Renderer ready: {}x{} texture, {} byte camera uniform",
            state.texture.size.0,
            state.texture.size.1,
            state.camera_buffer.size()
        );
        Ok(state)
    }

    fn render_frame(&mut self) -> Result<()> {
        let sprite_uniform = SpriteUniform::new(self.sprite.transform(), self.sprite.point_size());
        self.gpu.queue.write_buffer(
            &self.sprite_buffer,
            0,
            bytemuck::cast_slice(&[sprite_uniform]),
        );

        let Some((output, view)) = self
            .gpu
            .begin_frame()
            .context("frame acquisition failed")?
        else {
            // Recoverable surface hiccup; skip this frame.
            return Ok(());
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.pipeline.render_pipeline);
            render_pass.set_bind_group(GROUP_CAMERA, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(GROUP_TEXTURE, &self.texture_bind_group, &[]);
            render_pass.set_bind_group(GROUP_SPRITE, &self.sprite_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.anchor_buffer.slice(..));
            // One sprite: four strip corners fanned out from the anchor.
            render_pass.draw(0..4, 0..1);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

struct App {
    config: PlatformConfig,
    rng: Rng,
    state: Option<ScreensaverState>,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig {
                title: WINDOW_TITLE.to_string(),
                width: WINDOW_WIDTH,
                height: WINDOW_HEIGHT,
            },
            rng: Rng::from_clock(),
            state: None,
            fatal: None,
        }
    }

    /// Release everything: GPU resources, then the context, then the window
    /// (the state struct's field order). Safe to call again, and safe to call
    /// when initialization never completed.
    fn shutdown(&mut self) {
        if self.state.take().is_some() {
            log::info!("Renderer resources released");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window = match dvd_platform::window::create_window(event_loop, &self.config) {
            Ok(window) => window,
            Err(err) => {
                log::error!("failed to create window: {err:#}");
                self.fatal = Some(err);
                event_loop.exit();
                return;
            }
        };

        match ScreensaverState::new(window, &mut self.rng) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("initialization failed: {err:#}");
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                // The window is not resizable, but DPI and compositor changes
                // still arrive here. Only the surface follows; the camera and
                // the bounce bounds stay the fixed window constants.
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                state.clock.begin_frame();
                if state.clock.frame_count % FPS_LOG_INTERVAL == 0 {
                    log::debug!("{:.1} fps (smoothed)", state.clock.smoothed_fps);
                }

                if state.input.is_just_pressed(Key::Q) {
                    log::info!("Quit key pressed, exiting.");
                    event_loop.exit();
                    return;
                }

                // Input phase: manual nudge, clamped to the window.
                let nudge = nudge_vector(&state.input);
                if nudge != Vec2::ZERO {
                    state.sprite.nudge(nudge, state.bounds);
                }

                // Physics phase: one velocity step per presented frame.
                state.sprite.step(state.bounds);

                if let Err(err) = state.render_frame() {
                    log::error!("render failed: {err:#}");
                    self.fatal = Some(err);
                    event_loop.exit();
                    return;
                }

                state.input.end_frame();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::KeyQ => Some(Key::Q),
        _ => None,
    }
}

/// Displacement for the input phase, assembled from the held arrow keys.
/// Up is negative y: world coordinates are window pixels, y growing down.
fn nudge_vector(input: &InputState) -> Vec2 {
    let mut nudge = Vec2::ZERO;
    if input.is_held(Key::Left) {
        nudge.x -= MOVE_SPEED;
    }
    if input.is_held(Key::Right) {
        nudge.x += MOVE_SPEED;
    }
    if input.is_held(Key::Up) {
        nudge.y -= MOVE_SPEED;
    }
    if input.is_held(Key::Down) {
        nudge.y += MOVE_SPEED;
    }
    nudge
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("DVD screensaver starting...");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).context("event loop error")?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => {
            log::info!("Goodbye.");
            Ok(())
        }
    }
}
