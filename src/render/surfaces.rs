// Flag, water and grille: static plane meshes whose motion lives in the
// vertex shaders, driven by uniforms copied from the scene each frame.

use super::helpers;
use super::mesh::{self, PlaneMesh, SurfaceVertex};
use crate::constants::*;
use glam::{Mat4, Quat, Vec3};
use std::f64::consts::TAU;
use trashworld_core::{DirectionalLight, Scene};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SurfaceUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    light: [f32; 4],
    color: [f32; 4],
    color2: [f32; 4],
    params: [f32; 4],
}

impl SurfaceUniforms {
    fn new(view_proj: Mat4, model: Mat4, light: &DirectionalLight) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            light: light.position.extend(light.intensity).to_array(),
            color: [0.0; 4],
            color2: [0.0; 4],
            params: [0.0; 4],
        }
    }
}

// The water shader advances its phase at 1.5 rad per time unit.
const WATER_PHASE_PERIOD: f64 = TAU / 1.5;

struct SurfaceMesh {
    vb: wgpu::Buffer,
    ib: wgpu::Buffer,
    index_count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    model: Mat4,
}

impl SurfaceMesh {
    fn new(
        device: &wgpu::Device,
        bgl: &wgpu::BindGroupLayout,
        label: &str,
        plane: &PlaneMesh,
        model: Mat4,
    ) -> Self {
        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&plane.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&plane.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let (uniforms, bind_group) = helpers::uniform_binding(
            device,
            bgl,
            label,
            std::mem::size_of::<SurfaceUniforms>(),
        );
        Self {
            vb,
            ib,
            index_count: plane.index_count(),
            uniforms,
            bind_group,
            model,
        }
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vb.slice(..));
        rpass.set_index_buffer(self.ib.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

pub(crate) struct SurfacesLayer {
    flag_pipeline: wgpu::RenderPipeline,
    water_pipeline: wgpu::RenderPipeline,
    grille_pipeline: wgpu::RenderPipeline,
    flag: SurfaceMesh,
    water: SurfaceMesh,
    grille: SurfaceMesh,
}

impl SurfacesLayer {
    pub(crate) fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let bgl = helpers::uniform_bind_group_layout(device, "surface_bgl");
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("surface_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SurfaceVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
        }];
        let pipeline = |label: &str, src: &'static str, vs: &str, fs: &str, opaque: bool| {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(src.into()),
            });
            let blend = if opaque {
                None
            } else {
                Some(wgpu::BlendState::ALPHA_BLENDING)
            };
            helpers::make_pipeline(
                device, label, &pl, &shader, vs, fs, &buffers, format, blend, opaque,
            )
        };
        let flag_pipeline = pipeline(
            "flag_pipeline",
            trashworld_core::FLAG_WGSL,
            "vs_flag",
            "fs_flag",
            true,
        );
        let water_pipeline = pipeline(
            "water_pipeline",
            trashworld_core::WATER_WGSL,
            "vs_water",
            "fs_water",
            false,
        );
        let grille_pipeline = pipeline(
            "grille_pipeline",
            trashworld_core::GRILLE_WGSL,
            "vs_grille",
            "fs_grille",
            false,
        );

        let flag = SurfaceMesh::new(
            device,
            &bgl,
            "flag",
            &mesh::plane_xy(FLAG_WIDTH, FLAG_HEIGHT, FLAG_SEGMENTS, FLAG_SEGMENTS),
            Mat4::from_translation(Vec3::from_array(FLAG_POSITION)),
        );
        let water = SurfaceMesh::new(
            device,
            &bgl,
            "water",
            &mesh::plane_xz(WATER_SIZE, WATER_SIZE, WATER_SEGMENTS, WATER_SEGMENTS),
            Mat4::from_translation(Vec3::from_array(WATER_POSITION)),
        );
        let grille = SurfaceMesh::new(
            device,
            &bgl,
            "grille",
            &mesh::plane_xy(GRILLE_SIZE, GRILLE_SIZE, GRILLE_SEGMENTS, GRILLE_SEGMENTS),
            Mat4::from_rotation_translation(
                Quat::from_euler(
                    glam::EulerRot::XYZ,
                    GRILLE_ROTATION_X,
                    GRILLE_ROTATION_Y,
                    0.0,
                ),
                Vec3::from_array(GRILLE_POSITION),
            ),
        );

        Self {
            flag_pipeline,
            water_pipeline,
            grille_pipeline,
            flag,
            water,
            grille,
        }
    }

    /// Copy the driver state for this frame into the uniform buffers.
    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, scene: &Scene, view_proj: Mat4) {
        let light = &scene.light;

        let f = scene.flag.uniforms();
        let mut u = SurfaceUniforms::new(view_proj, self.flag.model, light);
        u.color = f.base_color.extend(1.0).to_array();
        u.params = [
            f.time.rem_euclid(TAU) as f32,
            f.freq_x,
            f.freq_y,
            f.roughness,
        ];
        queue.write_buffer(&self.flag.uniforms, 0, bytemuck::bytes_of(&u));

        let w = scene.water.uniforms();
        let mut u = SurfaceUniforms::new(view_proj, self.water.model, light);
        u.light = w.light_position.extend(light.intensity).to_array();
        u.color = w.water_color.extend(w.opacity).to_array();
        u.color2 = w.shallow_color.extend(1.0).to_array();
        u.params = [w.time.rem_euclid(WATER_PHASE_PERIOD) as f32, 0.0, 0.0, 0.0];
        queue.write_buffer(&self.water.uniforms, 0, bytemuck::bytes_of(&u));

        let g = &scene.grille;
        let mut u = SurfaceUniforms::new(view_proj, self.grille.model, light);
        u.color = g.color_a.extend(1.0).to_array();
        u.color2 = g.color_b.extend(1.0).to_array();
        u.params = [g.grid_size, 0.0, 0.0, 0.0];
        queue.write_buffer(&self.grille.uniforms, 0, bytemuck::bytes_of(&u));
    }

    /// Opaque flag first, then the translucent sheets.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.flag.draw(rpass, &self.flag_pipeline);
        self.water.draw(rpass, &self.water_pipeline);
        self.grille.draw(rpass, &self.grille_pipeline);
    }
}
