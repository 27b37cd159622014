// Panel input decoding. Maps a `data-*` tag, its key and the raw input value
// onto one scene edit. Pure, so it is tested on the host.

use glam::Vec3;
use trashworld_core::{parse_hex_color, Clock, GalaxyParam, SceneLoop};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelCommand {
    Galaxy(GalaxyParam, f32),
    GalaxyInside(Vec3),
    GalaxyOutside(Vec3),
    FlagFreqX(f32),
    FlagFreqY(f32),
    Light(Axis, f32),
    LightIntensity(f32),
    WaterColor(Vec3),
}

impl PanelCommand {
    /// Decode one input. `group` is the tag (`galaxy`, `flag`, `light`,
    /// `water`); unknown keys and unparsable values give `None`.
    pub fn parse(group: &str, key: &str, value: &str) -> Option<Self> {
        let number = || value.trim().parse::<f32>().ok().filter(|v| v.is_finite());
        let color = || parse_hex_color(value);
        match (group, key) {
            ("galaxy", "inside-color") => color().map(Self::GalaxyInside),
            ("galaxy", "outside-color") => color().map(Self::GalaxyOutside),
            ("galaxy", k) => {
                let param = GalaxyParam::from_key(k)?;
                number().map(|v| Self::Galaxy(param, v))
            }
            ("flag", "freq-x") => number().map(Self::FlagFreqX),
            ("flag", "freq-y") => number().map(Self::FlagFreqY),
            ("light", "x") => number().map(|v| Self::Light(Axis::X, v)),
            ("light", "y") => number().map(|v| Self::Light(Axis::Y, v)),
            ("light", "z") => number().map(|v| Self::Light(Axis::Z, v)),
            ("light", "intensity") => number().map(Self::LightIntensity),
            ("water", "color") => color().map(Self::WaterColor),
            _ => None,
        }
    }

    /// Whether releasing the control should regenerate the galaxy.
    pub fn commits_galaxy(&self) -> bool {
        matches!(
            self,
            Self::Galaxy(..) | Self::GalaxyInside(_) | Self::GalaxyOutside(_)
        )
    }

    pub fn apply<C: Clock>(self, scene_loop: &mut SceneLoop<C>) {
        match self {
            Self::Galaxy(param, v) => scene_loop.set_galaxy_param(param, v),
            Self::GalaxyInside(c) => {
                let outside = scene_loop.galaxy_draft().outside_color;
                scene_loop.set_galaxy_colors(c, outside);
            }
            Self::GalaxyOutside(c) => {
                let inside = scene_loop.galaxy_draft().inside_color;
                scene_loop.set_galaxy_colors(inside, c);
            }
            Self::FlagFreqX(v) => {
                let fy = scene_loop.scene().flag.uniforms().freq_y;
                scene_loop.set_flag_frequencies(v, fy);
            }
            Self::FlagFreqY(v) => {
                let fx = scene_loop.scene().flag.uniforms().freq_x;
                scene_loop.set_flag_frequencies(fx, v);
            }
            Self::Light(axis, v) => {
                let mut p = scene_loop.scene().light.position;
                match axis {
                    Axis::X => p.x = v,
                    Axis::Y => p.y = v,
                    Axis::Z => p.z = v,
                }
                scene_loop.set_light_position(p);
            }
            Self::LightIntensity(v) => scene_loop.set_light_intensity(v),
            Self::WaterColor(c) => scene_loop.set_water_color(c),
        }
    }
}
