//! Uniform state for the animated surfaces.
//!
//! The frame loop is the only writer of the time uniforms. Panels may change
//! the static parameters through the setters. The light position is always
//! handed in explicitly; no driver holds on to the scene light.

use crate::constants::*;
use glam::{Vec3, Vec4};
use smallvec::{smallvec, SmallVec};

/// Value stored under a uniform name, as consumed by name-keyed materials.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec3(Vec3),
    Vec4(Vec4),
}

pub type NamedUniforms = SmallVec<[(&'static str, UniformValue); 8]>;

#[derive(Clone, Debug, PartialEq)]
pub struct FlagUniforms {
    pub time: f64,
    pub freq_x: f32,
    pub freq_y: f32,
    pub roughness: f32,
    pub light_position: Vec3,
    pub base_color: Vec3,
}

/// Drives the waving flag. Time grows by `delta * speed` once per frame.
#[derive(Clone, Debug)]
pub struct FlagDriver {
    uniforms: FlagUniforms,
    speed: f32,
}

impl FlagDriver {
    pub fn new(speed: f32, light_position: Vec3) -> Self {
        Self {
            uniforms: FlagUniforms {
                time: 0.0,
                freq_x: FLAG_FREQ_X,
                freq_y: FLAG_FREQ_Y,
                roughness: FLAG_ROUGHNESS,
                light_position,
                base_color: rgb_from_hex(FLAG_HEX),
            },
            speed,
        }
    }

    pub fn advance(&mut self, delta_sec: f32, light_position: Vec3) {
        self.uniforms.time += (delta_sec * self.speed) as f64;
        self.uniforms.light_position = light_position;
    }

    pub fn set_frequencies(&mut self, freq_x: f32, freq_y: f32) {
        self.uniforms.freq_x = freq_x;
        self.uniforms.freq_y = freq_y;
    }

    pub fn set_roughness(&mut self, roughness: f32) {
        self.uniforms.roughness = roughness;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn uniforms(&self) -> &FlagUniforms {
        &self.uniforms
    }

    pub fn uniform_values(&self) -> NamedUniforms {
        let u = &self.uniforms;
        smallvec![
            ("time", UniformValue::F32(u.time as f32)),
            ("freqX", UniformValue::F32(u.freq_x)),
            ("freqY", UniformValue::F32(u.freq_y)),
            ("roughness", UniformValue::F32(u.roughness)),
            ("lightPosition", UniformValue::Vec3(u.light_position)),
            ("baseColor", UniformValue::Vec3(u.base_color)),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaterUniforms {
    pub time: f64,
    pub light_position: Vec3,
    pub water_color: Vec3,
    pub shallow_color: Vec3,
    pub opacity: f32,
}

/// Drives the sea. Its time is the absolute master-clock elapsed time.
#[derive(Clone, Debug)]
pub struct WaterDriver {
    uniforms: WaterUniforms,
}

impl WaterDriver {
    pub fn new(water_color: Vec3, light_position: Vec3) -> Self {
        Self {
            uniforms: WaterUniforms {
                time: 0.0,
                light_position,
                water_color,
                shallow_color: WATER_SHALLOW_COLOR,
                opacity: WATER_OPACITY,
            },
        }
    }

    pub fn sync(&mut self, elapsed: f64, light_position: Vec3) {
        self.uniforms.time = elapsed;
        self.uniforms.light_position = light_position;
    }

    pub fn set_water_color(&mut self, color: Vec3) {
        self.uniforms.water_color = color;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.uniforms.opacity = opacity.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn uniforms(&self) -> &WaterUniforms {
        &self.uniforms
    }

    pub fn uniform_values(&self) -> NamedUniforms {
        let u = &self.uniforms;
        smallvec![
            ("time", UniformValue::F32(u.time as f32)),
            ("lightPosition", UniformValue::Vec3(u.light_position)),
            ("waterColor", UniformValue::Vec3(u.water_color)),
            (
                "shallowColor",
                UniformValue::Vec4(u.shallow_color.extend(u.opacity))
            ),
        ]
    }
}

/// Static neon grid drawn on the speaker front.
#[derive(Clone, Debug, PartialEq)]
pub struct GrilleUniforms {
    pub grid_size: f32,
    pub color_a: Vec3,
    pub color_b: Vec3,
}

impl Default for GrilleUniforms {
    fn default() -> Self {
        Self {
            grid_size: GRILLE_GRID_SIZE,
            color_a: GRILLE_COLOR_A,
            color_b: GRILLE_COLOR_B,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: LIGHT_POSITION,
            intensity: LIGHT_INTENSITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_time_advances_once_per_call() {
        let mut flag = FlagDriver::new(6.0, Vec3::ONE);
        flag.advance(0.5, Vec3::ONE);
        assert!((flag.uniforms().time - 3.0).abs() < 1e-9);
        flag.advance(0.25, Vec3::X);
        assert!((flag.uniforms().time - 4.5).abs() < 1e-9);
        assert_eq!(flag.uniforms().light_position, Vec3::X);
    }

    #[test]
    fn water_time_tracks_elapsed_not_deltas() {
        let mut water = WaterDriver::new(WATER_COLOR, Vec3::ZERO);
        water.sync(10.0, Vec3::Y);
        water.sync(12.5, Vec3::Y);
        assert_eq!(water.uniforms().time, 12.5);
        assert_eq!(water.uniforms().light_position, Vec3::Y);
    }

    #[test]
    fn named_uniforms_fit_inline() {
        let flag = FlagDriver::new(1.0, Vec3::ZERO);
        let values = flag.uniform_values();
        assert!(!values.spilled());
        assert!(values.iter().any(|(n, _)| *n == "freqX"));
    }
}
