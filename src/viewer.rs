//! Viewer builder and runner.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::ViewerError;
use crate::gpu::GpuState;
use crate::session::Session;
use crate::time::Time;
use crate::trail::DEFAULT_CAPACITY;

/// A Lorenz attractor viewer.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```no_run
/// use lorenz_trail::Viewer;
///
/// Viewer::new()
///     .with_capacity(20_000)
///     .with_title("Lorenz")
///     .run()
///     .expect("viewer failed");
/// ```
pub struct Viewer {
    capacity: usize,
    title: String,
    window_size: (u32, u32),
}

impl Viewer {
    /// Create a viewer with default settings.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            title: "Lorenz Attractor".to_string(),
            window_size: (1280, 720),
        }
    }

    /// Set the number of trail vertices kept before the trail restarts.
    ///
    /// Values below 1 are raised to 1.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Open the window and animate until it is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        log::info!("Starting with trail capacity {}", self.capacity);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which mouse drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
}

struct App {
    config: Viewer,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    session: Session,
    time: Time,
    drag: Option<Drag>,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<ViewerError>,
}

impl App {
    fn new(config: Viewer) -> Self {
        let session = Session::new(config.capacity);
        Self {
            config,
            window: None,
            gpu_state: None,
            session,
            time: Time::new(),
            drag: None,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let (width, height) = self.config.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let gpu_state = pollster::block_on(GpuState::new(window, self.session.trail_mut()))?;
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        let frame = self.session.tick();
        gpu_state.upload_trail(self.session.trail_mut());

        // The pipeline already refused trails longer than u32::MAX.
        let draw_count = u32::try_from(frame.draw_count).unwrap_or(u32::MAX);
        match gpu_state.render(draw_count, frame.marker.to_vec3()) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if self.time.update() {
            log::debug!(
                "{:.1} fps ({:.2} ms last frame), {} ticks in {:.0}s, drawing {} vertices",
                self.time.fps(),
                self.time.delta() * 1000.0,
                self.session.ticks(),
                self.time.elapsed(),
                frame.draw_count
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let drag = match button {
                    MouseButton::Left => Some(Drag::Rotate),
                    MouseButton::Right => Some(Drag::Pan),
                    _ => None,
                };
                if let Some(drag) = drag {
                    if state == ElementState::Pressed {
                        self.drag = Some(drag);
                    } else if self.drag == Some(drag) {
                        self.drag = None;
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(drag) = self.drag {
                    if let (Some((last_x, last_y)), Some(gpu_state)) =
                        (self.last_mouse_pos, &mut self.gpu_state)
                    {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        let height = gpu_state.viewport_height();

                        match drag {
                            Drag::Rotate => gpu_state.camera.rotate(dx, dy),
                            Drag::Pan => gpu_state.camera.pan(dx, dy, height),
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
