// Host-side layout and presentation constants for the web frontend.

pub const CANVAS_ID: &str = "app-canvas";

// Background
pub const CLEAR_COLOR: [f64; 3] = [0.003, 0.004, 0.008];

// Point sprites never shrink below this many pixels
pub const MIN_POINT_PX: f32 = 1.0;
pub const GALAXY_OPACITY: f32 = 1.0;

// Flag cloth
pub const FLAG_WIDTH: f32 = 14.0;
pub const FLAG_HEIGHT: f32 = 9.0;
pub const FLAG_SEGMENTS: u32 = 50;
pub const FLAG_POSITION: [f32; 3] = [63.4, 9.5, 0.2];

// Water sheet lying in the XZ plane
pub const WATER_SIZE: f32 = 900.0;
pub const WATER_SEGMENTS: u32 = 256;
pub const WATER_POSITION: [f32; 3] = [0.0, -100.0, 0.0];

// Speaker grille panel
pub const GRILLE_SIZE: f32 = 60.0;
pub const GRILLE_SEGMENTS: u32 = 1;
pub const GRILLE_POSITION: [f32; 3] = [154.0, -20.0, 134.0];
pub const GRILLE_ROTATION_X: f32 = 40.0 * std::f32::consts::PI / 450.0;
pub const GRILLE_ROTATION_Y: f32 = 40.0 * std::f32::consts::PI / 70.0;

// Attribute names on panel inputs
pub const GALAXY_INPUT_ATTR: &str = "data-galaxy";
pub const FLAG_INPUT_ATTR: &str = "data-flag";
pub const LIGHT_INPUT_ATTR: &str = "data-light";
pub const WATER_INPUT_ATTR: &str = "data-water";
