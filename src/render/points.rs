// Instanced sprite clouds: one quad per particle, positions and colours in
// per-instance vertex buffers.

use super::helpers;
use glam::{Mat4, Vec3};
use trashworld_core::ParticleBuffer;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) offset_size: [f32; 4],
    pub(crate) tint: [f32; 4],
    pub(crate) viewport: [f32; 4],
}

impl PointUniforms {
    pub(crate) fn new(
        view_proj: Mat4,
        offset: Vec3,
        size: f32,
        tint: Vec3,
        opacity: f32,
        viewport: [f32; 3],
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            offset_size: offset.extend(size).to_array(),
            tint: tint.extend(opacity).to_array(),
            viewport: [viewport[0], viewport[1], viewport[2], 0.0],
        }
    }
}

const VEC3_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;

/// GPU copy of one cloud. Capacity is fixed at creation; a different count
/// means a new cloud.
pub(crate) struct PointCloud {
    pub(crate) positions: wgpu::Buffer,
    pub(crate) colors: wgpu::Buffer,
    pub(crate) uniforms: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) count: u32,
}

impl PointCloud {
    /// Upload positions and per-particle colours.
    pub(crate) fn with_colors(
        device: &wgpu::Device,
        layer: &PointsLayer,
        label: &str,
        buffer: &ParticleBuffer,
    ) -> Self {
        Self::create(
            device,
            layer,
            label,
            buffer.position_bytes(),
            buffer.attribute_bytes(),
            buffer.len(),
        )
    }

    /// Upload positions; every particle is drawn in the tint colour.
    pub(crate) fn uniform_color(
        device: &wgpu::Device,
        layer: &PointsLayer,
        label: &str,
        buffer: &ParticleBuffer,
    ) -> Self {
        let white = vec![Vec3::ONE; buffer.len()];
        Self::create(
            device,
            layer,
            label,
            buffer.position_bytes(),
            bytemuck::cast_slice(&white),
            buffer.len(),
        )
    }

    fn create(
        device: &wgpu::Device,
        layer: &PointsLayer,
        label: &str,
        positions: &[u8],
        colors: &[u8],
        count: usize,
    ) -> Self {
        let positions = helpers::dynamic_vertex_buffer(device, label, positions);
        let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: colors,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let (uniforms, bind_group) = helpers::uniform_binding(
            device,
            &layer.bgl,
            label,
            std::mem::size_of::<PointUniforms>(),
        );
        Self {
            positions,
            colors,
            uniforms,
            bind_group,
            count: count as u32,
        }
    }

    pub(crate) fn destroy(&self) {
        self.positions.destroy();
        self.colors.destroy();
        self.uniforms.destroy();
    }
}

pub(crate) struct PointsLayer {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) bgl: wgpu::BindGroupLayout,
    pub(crate) quad_vb: wgpu::Buffer,
}

impl PointsLayer {
    pub(crate) fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(trashworld_core::POINTS_WGSL.into()),
        });
        let bgl = helpers::uniform_bind_group_layout(device, "points_bgl");
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        // Two triangles spanning [-0.5, 0.5]
        let quad: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("points_quad_vb"),
            contents: bytemuck::cast_slice(&quad),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: VEC3_STRIDE,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: VEC3_STRIDE,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 2,
                }],
            },
        ];
        // Additive like the galaxy material; depth is read but never written.
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent::OVER,
        };
        let pipeline = helpers::make_pipeline(
            device,
            "points_pipeline",
            &pl,
            &shader,
            "vs_points",
            "fs_points",
            &buffers,
            format,
            Some(additive),
            false,
        );
        Self {
            pipeline,
            bgl,
            quad_vb,
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, cloud: &PointCloud) {
        if cloud.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &cloud.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, cloud.positions.slice(..));
        rpass.set_vertex_buffer(2, cloud.colors.slice(..));
        rpass.draw(0..6, 0..cloud.count);
    }
}
