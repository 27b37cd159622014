use glam::Vec3;
use trashworld_core::{
    rgb_from_hex, Camera, FrameTime, Scene, SceneRenderer, DUST_HEX, DUST_OPACITY,
    DUST_POINT_SIZE,
};
use web_sys as web;

use crate::constants::*;

mod helpers;
pub(crate) mod mesh;
mod points;
mod surfaces;

use points::{PointCloud, PointUniforms, PointsLayer};
use surfaces::SurfacesLayer;

// ===================== WebGPU state =====================

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: (wgpu::Texture, wgpu::TextureView),

    points: PointsLayer,
    surfaces: SurfacesLayer,
    dust: Option<PointCloud>,
    galaxy: Option<PointCloud>,
    galaxy_generation: u64,

    camera: Camera,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth = helpers::create_depth_texture(&device, width, height);
        let points = PointsLayer::new(&device, format);
        let surfaces = SurfacesLayer::new(&device, format);

        let mut camera = Camera::default();
        camera.set_viewport(width, height);

        log::info!("[gpu] ready {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            points,
            surfaces,
            dust: None,
            galaxy: None,
            galaxy_generation: 0,
            camera,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.0.destroy();
            self.depth = helpers::create_depth_texture(&self.device, width, height);
            self.camera.set_viewport(width, height);
        }
    }

    /// Bring the GPU clouds in line with the scene. A new galaxy generation
    /// replaces the old buffers; otherwise only dirty positions are rewritten.
    fn sync_clouds(&mut self, scene: &Scene) {
        let generation = scene.galaxy.generation();
        if self.galaxy.is_none() || generation != self.galaxy_generation {
            if let Some(old) = self.galaxy.take() {
                old.destroy();
            }
            self.galaxy = scene.galaxy.geometry().map(|g| {
                PointCloud::with_colors(&self.device, &self.points, "galaxy", g.buffer())
            });
            self.galaxy_generation = generation;
        } else if let (Some(cloud), Some(g)) = (&self.galaxy, scene.galaxy.geometry()) {
            if g.buffer().is_dirty() {
                self.queue
                    .write_buffer(&cloud.positions, 0, g.buffer().position_bytes());
            }
        }

        match &self.dust {
            None => {
                self.dust = Some(PointCloud::uniform_color(
                    &self.device,
                    &self.points,
                    "dust",
                    scene.dust.buffer(),
                ));
            }
            Some(cloud) => {
                if scene.dust.buffer().is_dirty() {
                    self.queue
                        .write_buffer(&cloud.positions, 0, scene.dust.buffer().position_bytes());
                }
            }
        }
    }

    fn write_point_uniforms(&self, scene: &Scene) {
        let view_proj = self.camera.view_projection();
        let viewport = [self.width as f32, self.height as f32, MIN_POINT_PX];
        if let (Some(cloud), Some(g)) = (&self.galaxy, scene.galaxy.geometry()) {
            let u = PointUniforms::new(
                view_proj,
                scene.galaxy.world_position(),
                g.params().size,
                Vec3::ONE,
                GALAXY_OPACITY,
                viewport,
            );
            self.queue
                .write_buffer(&cloud.uniforms, 0, bytemuck::bytes_of(&u));
        }
        if let Some(cloud) = &self.dust {
            let u = PointUniforms::new(
                view_proj,
                Vec3::ZERO,
                DUST_POINT_SIZE,
                rgb_from_hex(DUST_HEX),
                DUST_OPACITY,
                viewport,
            );
            self.queue
                .write_buffer(&cloud.uniforms, 0, bytemuck::bytes_of(&u));
        }
    }

    pub fn render_scene(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        self.sync_clouds(scene);
        self.write_point_uniforms(scene);
        self.surfaces
            .write_uniforms(&self.queue, scene, self.camera.view_projection());

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.1,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.surfaces.draw(&mut rpass);
            if let Some(cloud) = &self.dust {
                self.points.draw(&mut rpass, cloud);
            }
            if let Some(cloud) = &self.galaxy {
                self.points.draw(&mut rpass, cloud);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl SceneRenderer for GpuState<'_> {
    fn render(&mut self, scene: &Scene, _time: FrameTime) -> anyhow::Result<()> {
        match self.render_scene(scene) {
            Ok(()) => Ok(()),
            // Surface went stale (resize, tab switch): reconfigure and skip this frame.
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!("surface error: {e}")),
        }
    }
}
