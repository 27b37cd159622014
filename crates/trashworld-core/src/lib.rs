pub mod buffer;
pub mod camera;
pub mod clock;
pub mod constants;
pub mod dust;
pub mod error;
pub mod galaxy;
pub mod gltf;
pub mod models;
pub mod params;
pub mod scene;
pub mod scene_loop;
pub mod uniforms;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub static FLAG_WGSL: &str = include_str!("../shaders/flag.wgsl");
pub static WATER_WGSL: &str = include_str!("../shaders/water.wgsl");
pub static GRILLE_WGSL: &str = include_str!("../shaders/grille.wgsl");

pub use buffer::ParticleBuffer;
pub use camera::Camera;
pub use clock::{Clock, FrameTime, ManualClock, MasterClock};
pub use constants::*;
pub use dust::DustField;
pub use error::{ConfigError, ResourceLoadError, SceneError, SceneResult};
pub use galaxy::{GalaxyField, GalaxyGeometry};
pub use models::*;
pub use params::{GalaxyParam, GalaxyParameters, ParamRange};
pub use scene::{Scene, SceneConfig};
pub use scene_loop::{LoopControl, LoopState, SceneLoop, SceneRenderer};
pub use uniforms::*;
