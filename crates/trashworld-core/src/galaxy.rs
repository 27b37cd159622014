//! Regenerable spiral point cloud with a per-frame vertical wave.
//!
//! Generation is all-or-nothing: parameters are validated and the new buffers
//! are fully built before the previous geometry is dropped. The wave never
//! touches the frozen baseline, so applying it for the same elapsed time always
//! produces the same live buffer.

use crate::buffer::{reserve_points, ParticleBuffer};
use crate::constants::{GALAXY_SPIN_OFFSET_SCALE, GALAXY_WAVE_DISTANCE_FREQ};
use crate::error::SceneResult;
use crate::params::GalaxyParameters;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Everything produced by one generation pass.
#[derive(Clone, Debug)]
pub struct GalaxyGeometry {
    params: GalaxyParameters,
    buffer: ParticleBuffer,
    original_positions: Vec<Vec3>,
}

impl GalaxyGeometry {
    /// Build a spiral cloud from `params`, biasing the twist by `time_offset`.
    pub fn build<R: Rng + ?Sized>(
        params: &GalaxyParameters,
        time_offset: f64,
        rng: &mut R,
    ) -> SceneResult<Self> {
        params.validate()?;
        let count = params.count;
        let mut positions = reserve_points(count)?;
        let mut colors = reserve_points(count)?;

        // folded in f64 so a long-running phase keeps its fraction
        let spin_offset = (time_offset * GALAXY_SPIN_OFFSET_SCALE as f64)
            .rem_euclid(std::f64::consts::TAU) as f32;
        let branches = params.branches as f32;
        for i in 0..count {
            let radius = rng.gen_range(0.0..params.radius);
            let spin_angle = radius * params.spin + spin_offset;
            let branch_angle = (i as u32 % params.branches) as f32 / branches * TAU;

            let jx = jitter(rng, params);
            let jy = jitter(rng, params);
            let jz = jitter(rng, params);

            let angle = branch_angle + spin_angle;
            positions.push(Vec3::new(
                angle.cos() * radius + jx,
                jy,
                angle.sin() * radius + jz,
            ));
            colors.push(
                params
                    .inside_color
                    .lerp(params.outside_color, radius / params.radius),
            );
        }

        let original_positions = positions.clone();
        Ok(Self {
            params: params.clone(),
            buffer: ParticleBuffer::from_parts(positions, colors)?,
            original_positions,
        })
    }

    #[inline]
    pub fn params(&self) -> &GalaxyParameters {
        &self.params
    }

    #[inline]
    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    #[inline]
    pub fn original_positions(&self) -> &[Vec3] {
        &self.original_positions
    }
}

/// Signed falloff jitter: most draws land near zero, a sparse tail strays far.
#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, params: &GalaxyParameters) -> f32 {
    let magnitude = rng.gen::<f32>().powf(params.randomness_power);
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    sign * magnitude * params.randomness
}

#[derive(Debug, Default)]
pub struct GalaxyField {
    geometry: Option<GalaxyGeometry>,
    position: Vec3,
    phase: f64,
    generation: u64,
}

impl GalaxyField {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Replace the current cloud with a freshly generated one.
    ///
    /// On error the previous geometry is left exactly as it was.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        params: &GalaxyParameters,
        time_offset: f64,
        rng: &mut R,
    ) -> SceneResult<()> {
        let next = GalaxyGeometry::build(params, time_offset, rng)?;
        // release before install
        if let Some(old) = self.geometry.take() {
            log::debug!(
                "[galaxy] releasing generation {} ({} points)",
                self.generation,
                old.buffer.len()
            );
            drop(old);
        }
        self.geometry = Some(next);
        self.generation += 1;
        log::info!(
            "[galaxy] generation {} installed: {} points, {} branches, radius {:.2}",
            self.generation,
            params.count,
            params.branches,
            params.radius
        );
        Ok(())
    }

    /// Regenerate with the galaxy's own phase accumulator as the twist offset.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        params: &GalaxyParameters,
        rng: &mut R,
    ) -> SceneResult<()> {
        self.generate(params, self.phase, rng)
    }

    pub fn advance_phase(&mut self, step: f32) {
        self.phase += step as f64;
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Displace every point vertically from its baseline.
    ///
    /// `elapsed` must come from a clock that never resets.
    pub fn apply_wave(&mut self, elapsed: f64) {
        let Some(geo) = self.geometry.as_mut() else {
            return;
        };
        let p = &geo.params;
        let time_phase = (elapsed * p.wave_speed as f64).rem_euclid(std::f64::consts::TAU);
        let height = p.wave_height;
        let inv_radius = 1.0 / p.radius;

        let (live, _) = geo.buffer.split_mut();
        for (dst, base) in live.iter_mut().zip(geo.original_positions.iter()) {
            dst.y = base.y + wave_offset(*base, time_phase, height, inv_radius);
        }
    }

    pub fn set_world_position(&mut self, position: Vec3) {
        self.position = position;
    }

    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn geometry(&self) -> Option<&GalaxyGeometry> {
        self.geometry.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_none()
    }

    /// Number of points in the live buffer (0 when nothing is generated).
    pub fn len(&self) -> usize {
        self.geometry.as_ref().map_or(0, |g| g.buffer.len())
    }

    /// Bumped on every install so renderers know to rebuild their buffers.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mark_uploaded(&mut self) {
        if let Some(geo) = self.geometry.as_mut() {
            geo.buffer.mark_uploaded();
        }
    }
}

/// Vertical wave displacement for one baseline point.
///
/// `time_phase` is `elapsed * wave_speed`, already reduced modulo 2π.
#[inline]
pub fn wave_offset(base: Vec3, time_phase: f64, height: f32, inv_radius: f32) -> f32 {
    let distance = (base.x * base.x + base.z * base.z).sqrt();
    let s = (distance as f64 * GALAXY_WAVE_DISTANCE_FREQ as f64 + time_phase).sin() as f32;
    s * height * (1.0 - distance * inv_radius)
}
