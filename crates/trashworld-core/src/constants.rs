use glam::Vec3;

// Scene tuning constants shared by the core and the web frontend.

// Particle buffers
pub const MAX_PARTICLES: usize = 2_000_000; // host ceiling for a single point cloud

// Galaxy defaults
pub const GALAXY_COUNT: usize = 90_500;
pub const GALAXY_POINT_SIZE: f32 = 0.01;
pub const GALAXY_RADIUS: f32 = 100.0;
pub const GALAXY_BRANCHES: u32 = 3;
pub const GALAXY_SPIN: f32 = -5.0; // radians per unit radius
pub const GALAXY_RANDOMNESS: f32 = 2.0;
pub const GALAXY_RANDOMNESS_POWER: f32 = 3.0;
pub const GALAXY_INSIDE_HEX: u32 = 0x031901;
pub const GALAXY_OUTSIDE_HEX: u32 = 0x040b05;
pub const GALAXY_WAVE_SPEED: f32 = 11.0;
pub const GALAXY_WAVE_HEIGHT: f32 = 0.2;
pub const GALAXY_POSITION: Vec3 = Vec3::new(-150.0, -100.0, 10.0);
pub const GALAXY_SPIN_OFFSET_SCALE: f32 = 0.1; // phase -> initial twist at generation time
pub const GALAXY_WAVE_DISTANCE_FREQ: f32 = 2.0;
pub const PHASE_STEP: f32 = 0.02; // phase accumulated per frame

// Dust defaults
pub const DUST_COUNT: usize = 5_000;
pub const DUST_AREA_SIZE: f32 = 700.0; // cube side, centered at origin
pub const DUST_MAX_SPEED: f32 = 0.1; // per axis, units per tick
pub const DUST_HEX: u32 = 0xa39d83;
pub const DUST_POINT_SIZE: f32 = 0.5;
pub const DUST_OPACITY: f32 = 0.7;

// Flag surface
pub const FLAG_TIME_SPEED: f32 = 6.0; // time units per second
pub const FLAG_FREQ_X: f32 = 0.5;
pub const FLAG_FREQ_Y: f32 = 0.6;
pub const FLAG_ROUGHNESS: f32 = 0.0;
pub const FLAG_HEX: u32 = 0xd8452e;

// Water surface
pub const WATER_COLOR: Vec3 = Vec3::new(0.4, 0.3, 0.3);
pub const WATER_SHALLOW_COLOR: Vec3 = Vec3::new(95.0 / 255.0, 156.0 / 255.0, 107.0 / 255.0);
pub const WATER_OPACITY: f32 = 0.5;

// Neon grille
pub const GRILLE_GRID_SIZE: f32 = 10.0;
pub const GRILLE_COLOR_A: Vec3 = Vec3::new(0.0, 1.0, 1.0); // cyan
pub const GRILLE_COLOR_B: Vec3 = Vec3::new(1.0, 0.0, 1.0); // magenta

// Lighting
pub const LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const LIGHT_INTENSITY: f32 = 1.0;
pub const AMBIENT_HEX: u32 = 0xe0fbff;

// Randomness
pub const DEFAULT_SEED: u64 = 0x7124_5ca1;

/// Convert a packed `0xRRGGBB` value into a 0..1 RGB vector.
#[inline]
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Parse `#rrggbb` (or `rrggbb`) as used by colour pickers.
pub fn parse_hex_color(s: &str) -> Option<Vec3> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(rgb_from_hex)
}
