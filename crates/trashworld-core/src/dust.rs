use crate::buffer::{reserve_points, ParticleBuffer};
use crate::error::{ConfigError, SceneResult};
use glam::Vec3;
use rand::Rng;

/// Drifting dust inside a cube of side `area_size` centred on the origin.
///
/// Particles bounce off the cube faces by flipping the offending velocity
/// component. A particle may sit up to one step outside the cube on the tick
/// it turns around.
#[derive(Clone, Debug)]
pub struct DustField {
    buffer: ParticleBuffer,
    area_size: f32,
    max_speed: f32,
}

impl DustField {
    pub fn initialize<R: Rng + ?Sized>(
        count: usize,
        area_size: f32,
        max_speed: f32,
        rng: &mut R,
    ) -> SceneResult<Self> {
        if count == 0 {
            return Err(ConfigError::EmptyDust.into());
        }
        if !(area_size.is_finite() && area_size > 0.0) {
            return Err(ConfigError::NonPositiveArea(area_size).into());
        }
        if !(max_speed.is_finite() && max_speed >= 0.0) {
            return Err(ConfigError::InvalidDustSpeed(max_speed).into());
        }

        let half = area_size / 2.0;
        let mut positions = reserve_points(count)?;
        let mut velocities = reserve_points(count)?;
        for _ in 0..count {
            positions.push(Vec3::new(
                rng.gen::<f32>() * area_size - half,
                rng.gen::<f32>() * area_size - half,
                rng.gen::<f32>() * area_size - half,
            ));
            velocities.push(Vec3::new(
                random_speed(rng, max_speed),
                random_speed(rng, max_speed),
                random_speed(rng, max_speed),
            ));
        }
        log::info!("[dust] {count} particles in a {area_size}-unit cube");
        Ok(Self {
            buffer: ParticleBuffer::from_parts(positions, velocities)?,
            area_size,
            max_speed,
        })
    }

    /// Advance every particle by one step and reflect at the cube faces.
    pub fn tick(&mut self) {
        let half = self.area_size / 2.0;
        let (positions, velocities) = self.buffer.split_mut();
        for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
            *p += *v;
            if p.x > half || p.x < -half {
                v.x = -v.x;
            }
            if p.y > half || p.y < -half {
                v.y = -v.y;
            }
            if p.z > half || p.z < -half {
                v.z = -v.z;
            }
        }
    }

    #[inline]
    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        self.buffer.positions()
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        self.buffer.attribute()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn area_size(&self) -> f32 {
        self.area_size
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn mark_uploaded(&mut self) {
        self.buffer.mark_uploaded();
    }
}

#[inline]
fn random_speed<R: Rng + ?Sized>(rng: &mut R, max_speed: f32) -> f32 {
    rng.gen::<f32>() * 2.0 * max_speed - max_speed
}
