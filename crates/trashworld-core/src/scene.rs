use crate::constants::*;
use crate::dust::DustField;
use crate::error::SceneResult;
use crate::galaxy::GalaxyField;
use crate::models::ModelRegistry;
use crate::params::GalaxyParameters;
use crate::uniforms::{DirectionalLight, FlagDriver, GrilleUniforms, WaterDriver};
use glam::Vec3;
use rand::Rng;

/// Start-up configuration for one session.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub galaxy: GalaxyParameters,
    pub galaxy_position: Vec3,
    pub phase_step: f32,
    pub dust_count: usize,
    pub dust_area_size: f32,
    pub dust_max_speed: f32,
    pub flag_speed: f32,
    pub light: DirectionalLight,
    pub water_color: Vec3,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            galaxy: GalaxyParameters::default(),
            galaxy_position: GALAXY_POSITION,
            phase_step: PHASE_STEP,
            dust_count: DUST_COUNT,
            dust_area_size: DUST_AREA_SIZE,
            dust_max_speed: DUST_MAX_SPEED,
            flag_speed: FLAG_TIME_SPEED,
            light: DirectionalLight::default(),
            water_color: WATER_COLOR,
            seed: DEFAULT_SEED,
        }
    }
}

/// Every entity the frame loop updates. Fields never reference each other.
#[derive(Debug)]
pub struct Scene {
    pub galaxy: GalaxyField,
    pub dust: DustField,
    pub flag: FlagDriver,
    pub water: WaterDriver,
    pub grille: GrilleUniforms,
    pub light: DirectionalLight,
    pub models: ModelRegistry,
}

impl Scene {
    /// Build the dust field and the first galaxy.
    pub fn build<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> SceneResult<Self> {
        let dust = DustField::initialize(
            config.dust_count,
            config.dust_area_size,
            config.dust_max_speed,
            rng,
        )?;
        let mut galaxy = GalaxyField::new(config.galaxy_position);
        galaxy.generate(&config.galaxy, 0.0, rng)?;
        Ok(Self {
            galaxy,
            dust,
            flag: FlagDriver::new(config.flag_speed, config.light.position),
            water: WaterDriver::new(config.water_color, config.light.position),
            grille: GrilleUniforms::default(),
            light: config.light,
            models: ModelRegistry::new(),
        })
    }

    /// Clear every dirty flag after the renderer consumed the frame.
    pub fn mark_uploaded(&mut self) {
        self.galaxy.mark_uploaded();
        self.dust.mark_uploaded();
    }
}
