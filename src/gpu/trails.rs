//! Line-strip rendering of the attractor trail.
//!
//! Positions and colors are uploaded into two vertex buffers sized for the
//! full trail capacity. Only the span written since the previous frame is
//! re-uploaded.

use glam::Vec3;

use super::DEPTH_FORMAT;
use crate::error::GpuError;
use crate::trail::TrailBuffer;

/// Bytes per trail vertex attribute (`Float32x3`).
const VERTEX_STRIDE: wgpu::BufferAddress = std::mem::size_of::<Vec3>() as wgpu::BufferAddress;

/// Largest trail whose vertex buffers fit in `max_buffer_size` bytes and
/// whose vertex count fits a `u32` draw range.
fn max_trail_vertices(max_buffer_size: u64) -> usize {
    let by_buffer = (max_buffer_size / VERTEX_STRIDE).min(u64::from(u32::MAX));
    usize::try_from(by_buffer).unwrap_or(usize::MAX)
}

/// Vertex count of a trail the device can hold.
fn checked_capacity(capacity: usize, max_buffer_size: u64) -> Result<u32, GpuError> {
    let max_vertices = max_trail_vertices(max_buffer_size);
    match u32::try_from(capacity) {
        Ok(count) if capacity <= max_vertices => Ok(count),
        _ => Err(GpuError::TrailTooLarge {
            capacity,
            max_vertices,
        }),
    }
}

/// GPU resources for the trail.
pub struct TrailPipeline {
    /// Trail positions, one `Float32x3` per vertex.
    position_buffer: wgpu::Buffer,
    /// Trail colors, parallel to the positions.
    color_buffer: wgpu::Buffer,
    pipeline: wgpu::RenderPipeline,
    capacity: u32,
}

impl TrailPipeline {
    /// Create the buffers and pipeline, uploading the current trail contents.
    ///
    /// Fails if the trail is larger than the device's buffer size limit.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniform_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
        trail: &mut TrailBuffer,
    ) -> Result<Self, GpuError> {
        let capacity = trail.capacity();
        let vertex_count = checked_capacity(capacity, device.limits().max_buffer_size)?;
        let buffer_size = capacity as wgpu::BufferAddress * VERTEX_STRIDE;

        let position_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Trail Position Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let color_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Trail Color Buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Trail Shader"),
            source: wgpu::ShaderSource::Wgsl(super::shaders::trail_shader().into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Trail Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Trail Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: VERTEX_STRIDE,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3, // position
                        }],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: VERTEX_STRIDE,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x3, // color
                        }],
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let state = Self {
            position_buffer,
            color_buffer,
            pipeline,
            capacity: vertex_count,
        };
        state.upload_range(queue, trail, 0..capacity);
        trail.take_dirty();
        Ok(state)
    }

    /// Write the trail's dirty span, if any, to the vertex buffers.
    pub fn upload(&self, queue: &wgpu::Queue, trail: &mut TrailBuffer) {
        if let Some(span) = trail.take_dirty() {
            self.upload_range(queue, trail, span);
        }
    }

    fn upload_range(
        &self,
        queue: &wgpu::Queue,
        trail: &TrailBuffer,
        span: std::ops::Range<usize>,
    ) {
        if span.is_empty() {
            return;
        }
        let offset = span.start as wgpu::BufferAddress * VERTEX_STRIDE;
        queue.write_buffer(
            &self.position_buffer,
            offset,
            bytemuck::cast_slice(&trail.positions()[span.clone()]),
        );
        queue.write_buffer(
            &self.color_buffer,
            offset,
            bytemuck::cast_slice(&trail.colors()[span]),
        );
    }

    /// Draw vertices `0..draw_count` as one connected line.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, draw_count: u32) {
        let count = draw_count.min(self.capacity);
        if count < 2 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.color_buffer.slice(..));
        render_pass.draw(0..count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_trail_fits_default_limits() {
        let max = wgpu::Limits::default().max_buffer_size;
        assert_eq!(checked_capacity(20_000, max).unwrap(), 20_000);
    }

    #[test]
    fn test_capacity_limited_by_buffer_size() {
        let max = wgpu::Limits::default().max_buffer_size;
        let max_vertices = max_trail_vertices(max);
        assert!(max_vertices as u64 * VERTEX_STRIDE <= max);

        assert!(checked_capacity(max_vertices, max).is_ok());
        match checked_capacity(max_vertices + 1, max) {
            Err(GpuError::TrailTooLarge {
                capacity,
                max_vertices: limit,
            }) => {
                assert_eq!(capacity, max_vertices + 1);
                assert_eq!(limit, max_vertices);
            }
            other => panic!("expected TrailTooLarge, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_capacity_limited_by_u32_draw_range() {
        let max_vertices = max_trail_vertices(u64::MAX);
        assert_eq!(max_vertices, u32::MAX as usize);
        assert!(checked_capacity(max_vertices, u64::MAX).is_ok());
        #[cfg(target_pointer_width = "64")]
        assert!(checked_capacity(max_vertices + 1, u64::MAX).is_err());
    }
}
