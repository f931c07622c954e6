use crate::geometry::{EyeGeometry, Side};
use crate::state::{EyebrowShape, FrameState};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EyeParams {
    pub left_center: [f32; 2],
    pub right_center: [f32; 2],
    /// Full outer width/height of one eye, in pixels.
    pub eye_size: [f32; 2],
    pub inner_offset: [f32; 2],
    pub outer_offset: [f32; 2],
    pub highlight_pos: [f32; 2],
    pub highlight_bounce: [f32; 2],
    /// Pixel-space jitter applied to both eyes.
    pub shake: [f32; 2],
    pub eye_color: [f32; 3],
    pub ring_inner_ratio: f32,
    pub bg_color: [f32; 3],
    pub highlight_scale: f32,
    /// Top/bottom eyelid closure.
    pub eyelid: [f32; 2],
    /// Eyebrow lift and the angry-shape flag (0.0 or 1.0).
    pub eyebrow: [f32; 2],
}

impl Default for EyeParams {
    fn default() -> Self {
        Self {
            left_center: [224.0, 200.0],
            right_center: [576.0, 200.0],
            eye_size: [176.0, 176.0],
            inner_offset: [0.0, 0.0],
            outer_offset: [0.0, 0.0],
            highlight_pos: [0.3, -0.3],
            highlight_bounce: [0.0, 0.0],
            shake: [0.0, 0.0],
            eye_color: [0.7, 0.7, 0.7],
            ring_inner_ratio: 0.65,
            bg_color: [0.0, 0.0, 0.0],
            highlight_scale: 1.0,
            eyelid: [0.0, 0.0],
            eyebrow: [0.0, 0.0],
        }
    }
}

impl EyeParams {
    /// Build the frame's uniform data from the state and geometry. The
    /// per-eye offset composition (ring lag, aperture punch, highlight
    /// bounce) happens in the shader; this just flattens the state.
    pub fn compose(state: &FrameState, geometry: &EyeGeometry) -> Self {
        Self {
            left_center: geometry.eye_center(Side::Left, state),
            right_center: geometry.eye_center(Side::Right, state),
            eye_size: geometry.eye_dimensions(state),
            inner_offset: [state.inner_hole_offset_x, state.inner_hole_offset_y],
            outer_offset: [state.outer_ring_offset_x, state.outer_ring_offset_y],
            highlight_pos: [state.highlight_x, state.highlight_y],
            highlight_bounce: [state.highlight_bounce_x, state.highlight_bounce_y],
            shake: [state.shake_x, state.shake_y],
            eye_color: state.color,
            ring_inner_ratio: state.ring_inner_ratio,
            bg_color: [0.0, 0.0, 0.0],
            highlight_scale: state.highlight_scale,
            eyelid: [state.eyelid_top, state.eyelid_btm],
            eyebrow: [
                state.eyebrow_lift,
                match state.eyebrow_shape {
                    EyebrowShape::Angry => 1.0,
                    EyebrowShape::Arc => 0.0,
                },
            ],
        }
    }
}

pub struct EyeRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl EyeRenderer {
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("eye_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/eye.wgsl").into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("eye_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("eye_uniform_buffer"),
            size: std::mem::size_of::<EyeParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("eye_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("eye_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("eye_render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn uniform_buffer(&self) -> &wgpu::Buffer {
        &self.uniform_buffer
    }

    /// Standalone pass: upload `params` and draw both eyes over a cleared
    /// background. Integrations sharing a pass (e.g. with a GUI overlay) use
    /// the accessors instead.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        queue: &wgpu::Queue,
        params: &EyeParams,
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(params));

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("eye_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
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

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_layout_matches_shader_struct_size() {
        // 28 floats, tightly packed; the WGSL struct mirrors this exactly.
        assert_eq!(std::mem::size_of::<EyeParams>(), 112);
    }

    #[test]
    fn compose_flattens_state_and_geometry() {
        let mut state = FrameState::default();
        state.gaze_x = 1.0;
        state.eyebrow_shape = EyebrowShape::Angry;
        state.shake_x = 1.5;
        let geometry = EyeGeometry::new(800.0, 400.0);

        let params = EyeParams::compose(&state, &geometry);
        assert_eq!(params.right_center, geometry.eye_center(Side::Right, &state));
        assert_eq!(params.eye_size, geometry.eye_dimensions(&state));
        assert_eq!(params.eyebrow[1], 1.0);
        assert_eq!(params.shake, [1.5, 0.0]);
    }
}
