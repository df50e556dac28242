mod camera;
mod marker;
mod mesh;
mod shaders;
mod trails;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use camera::Camera;

use crate::error::GpuError;
use crate::trail::TrailBuffer;
use marker::MarkerPipeline;
use trails::TrailPipeline;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Radius of the marker sphere in world units.
const MARKER_RADIUS: f32 = 0.5;
const POINT_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
const POINT_LIGHT_INTENSITY: f32 = 1.0;
const AMBIENT_INTENSITY: f32 = 1.0;
const EMISSIVE_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const EMISSIVE_INTENSITY: f32 = 2.0;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    marker: [f32; 4],
    light: [f32; 4],
    ambient: [f32; 4],
    emissive: [f32; 4],
}

impl Uniforms {
    fn new(view_proj: glam::Mat4, marker: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            marker: marker.extend(MARKER_RADIUS).to_array(),
            light: POINT_LIGHT_POSITION.extend(POINT_LIGHT_INTENSITY).to_array(),
            ambient: Vec3::ONE.extend(AMBIENT_INTENSITY).to_array(),
            emissive: EMISSIVE_COLOR.extend(EMISSIVE_INTENSITY).to_array(),
        }
    }
}

/// Window surface plus everything needed to draw the trail and marker.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    trail: TrailPipeline,
    marker: MarkerPipeline,
    pub camera: Camera,
}

impl GpuState {
    /// Set up the device for `window` and upload the initial trail.
    pub async fn new(window: Arc<Window>, trail: &mut TrailBuffer) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        log::info!("Surface format {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        let camera = Camera::new();
        let aspect = config.width as f32 / config.height as f32;
        let uniforms = Uniforms::new(camera.view_proj(aspect), Vec3::ZERO);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let trail_pipeline = TrailPipeline::new(
            &device,
            &queue,
            &uniform_bind_group_layout,
            config.format,
            trail,
        )?;
        let marker = MarkerPipeline::new(&device, &uniform_bind_group_layout, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            uniform_bind_group,
            depth_texture,
            trail: trail_pipeline,
            marker,
            camera,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
            log::debug!("Resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Reconfigure the surface at its current size.
    pub fn reconfigure(&mut self) {
        self.resize(winit::dpi::PhysicalSize {
            width: self.config.width,
            height: self.config.height,
        });
    }

    /// Height of the surface in physical pixels.
    pub fn viewport_height(&self) -> f32 {
        self.config.height as f32
    }

    /// Send the trail's changed vertices to the GPU.
    pub fn upload_trail(&mut self, trail: &mut TrailBuffer) {
        self.trail.upload(&self.queue, trail);
    }

    fn update_uniforms(&mut self, marker: Vec3) {
        let aspect = self.config.width as f32 / self.config.height as f32;
        let uniforms = Uniforms::new(self.camera.view_proj(aspect), marker);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Draw `0..draw_count` trail vertices and the marker at `marker`.
    pub fn render(&mut self, draw_count: u32, marker: Vec3) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms(marker);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            self.trail.draw(&mut render_pass, draw_count);
            self.marker.draw(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_pack_marker_and_lights() {
        let uniforms = Uniforms::new(glam::Mat4::IDENTITY, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(uniforms.marker, [1.0, 2.0, 3.0, MARKER_RADIUS]);
        assert_eq!(uniforms.light, [10.0, 10.0, 10.0, 1.0]);
        assert_eq!(uniforms.emissive, [1.0, 0.0, 0.0, 2.0]);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }
}
