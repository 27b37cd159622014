// Plane grids for the shader surfaces. Pure math, no GPU handles.

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct PlaneMesh {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl PlaneMesh {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Upright `width x height` plane in XY, centred on the origin.
pub fn plane_xy(width: f32, height: f32, segments_x: u32, segments_y: u32) -> PlaneMesh {
    grid(segments_x, segments_y, |u, v| {
        [(u - 0.5) * width, (v - 0.5) * height, 0.0]
    })
}

/// Flat `width x depth` plane in XZ, facing +Y.
pub fn plane_xz(width: f32, depth: f32, segments_x: u32, segments_z: u32) -> PlaneMesh {
    grid(segments_x, segments_z, |u, v| {
        [(u - 0.5) * width, 0.0, (0.5 - v) * depth]
    })
}

fn grid(sx: u32, sy: u32, place: impl Fn(f32, f32) -> [f32; 3]) -> PlaneMesh {
    let sx = sx.max(1);
    let sy = sy.max(1);
    let cols = sx + 1;
    let mut vertices = Vec::with_capacity((cols * (sy + 1)) as usize);
    for j in 0..=sy {
        let v = j as f32 / sy as f32;
        for i in 0..=sx {
            let u = i as f32 / sx as f32;
            vertices.push(SurfaceVertex {
                position: place(u, v),
                uv: [u, v],
            });
        }
    }
    let mut indices = Vec::with_capacity((sx * sy * 6) as usize);
    for j in 0..sy {
        for i in 0..sx {
            let a = j * cols + i;
            let b = a + 1;
            let c = a + cols;
            let d = c + 1;
            // counter-clockwise seen from the front face
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
    PlaneMesh { vertices, indices }
}
