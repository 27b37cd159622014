//! Galaxy generation parameters and the ranges a tuning panel should offer.

use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParameters {
    pub count: usize,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Vec3,
    pub outside_color: Vec3,
    pub wave_speed: f32,
    pub wave_height: f32,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: GALAXY_COUNT,
            size: GALAXY_POINT_SIZE,
            radius: GALAXY_RADIUS,
            branches: GALAXY_BRANCHES,
            spin: GALAXY_SPIN,
            randomness: GALAXY_RANDOMNESS,
            randomness_power: GALAXY_RANDOMNESS_POWER,
            inside_color: rgb_from_hex(GALAXY_INSIDE_HEX),
            outside_color: rgb_from_hex(GALAXY_OUTSIDE_HEX),
            wave_speed: GALAXY_WAVE_SPEED,
            wave_height: GALAXY_WAVE_HEIGHT,
        }
    }
}

impl GalaxyParameters {
    /// Reject parameter sets that would divide by zero or build degenerate geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::EmptyGalaxy);
        }
        if self.branches < 2 {
            return Err(ConfigError::TooFewBranches(self.branches));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius(self.radius));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ConfigError::NonPositiveSize(self.size));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(ConfigError::NegativeRandomness(self.randomness));
        }
        if !(self.randomness_power.is_finite() && self.randomness_power >= 1.0) {
            return Err(ConfigError::RandomnessPowerBelowOne(self.randomness_power));
        }
        for (field, value) in [
            ("spin", self.spin),
            ("wave_speed", self.wave_speed),
            ("wave_height", self.wave_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        for (field, color) in [
            ("inside_color", self.inside_color),
            ("outside_color", self.outside_color),
        ] {
            if !color.is_finite() {
                return Err(ConfigError::NonFiniteColor(field));
            }
        }
        Ok(())
    }

    /// Write one scalar parameter. Integer parameters are rounded.
    pub fn set(&mut self, param: GalaxyParam, value: f32) {
        match param {
            GalaxyParam::Count => self.count = value.round().max(0.0) as usize,
            GalaxyParam::Size => self.size = value,
            GalaxyParam::Radius => self.radius = value,
            GalaxyParam::Branches => self.branches = value.round().max(0.0) as u32,
            GalaxyParam::Spin => self.spin = value,
            GalaxyParam::Randomness => self.randomness = value,
            GalaxyParam::RandomnessPower => self.randomness_power = value,
            GalaxyParam::WaveSpeed => self.wave_speed = value,
            GalaxyParam::WaveHeight => self.wave_height = value,
        }
    }

    pub fn get(&self, param: GalaxyParam) -> f32 {
        match param {
            GalaxyParam::Count => self.count as f32,
            GalaxyParam::Size => self.size,
            GalaxyParam::Radius => self.radius,
            GalaxyParam::Branches => self.branches as f32,
            GalaxyParam::Spin => self.spin,
            GalaxyParam::Randomness => self.randomness,
            GalaxyParam::RandomnessPower => self.randomness_power,
            GalaxyParam::WaveSpeed => self.wave_speed,
            GalaxyParam::WaveHeight => self.wave_height,
        }
    }
}

/// Scalar galaxy parameters a panel can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GalaxyParam {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    WaveSpeed,
    WaveHeight,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl GalaxyParam {
    pub const ALL: [GalaxyParam; 9] = [
        GalaxyParam::Count,
        GalaxyParam::Size,
        GalaxyParam::Radius,
        GalaxyParam::Branches,
        GalaxyParam::Spin,
        GalaxyParam::Randomness,
        GalaxyParam::RandomnessPower,
        GalaxyParam::WaveSpeed,
        GalaxyParam::WaveHeight,
    ];

    /// Key used in markup (`data-galaxy="..."`).
    pub fn key(self) -> &'static str {
        match self {
            GalaxyParam::Count => "count",
            GalaxyParam::Size => "size",
            GalaxyParam::Radius => "radius",
            GalaxyParam::Branches => "branches",
            GalaxyParam::Spin => "spin",
            GalaxyParam::Randomness => "randomness",
            GalaxyParam::RandomnessPower => "randomness-power",
            GalaxyParam::WaveSpeed => "wave-speed",
            GalaxyParam::WaveHeight => "wave-height",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn range(self) -> ParamRange {
        let (min, max, step) = match self {
            GalaxyParam::Count => (100.0, 200_000.0, 100.0),
            GalaxyParam::Size => (0.001, 0.1, 0.001),
            GalaxyParam::Radius => (0.01, 100.0, 0.01),
            GalaxyParam::Branches => (2.0, 20.0, 1.0),
            GalaxyParam::Spin => (-5.0, 5.0, 0.001),
            GalaxyParam::Randomness => (0.0, 2.0, 0.001),
            GalaxyParam::RandomnessPower => (1.0, 10.0, 0.001),
            GalaxyParam::WaveSpeed => (0.0, 5.0, 0.1),
            GalaxyParam::WaveHeight => (0.0, 2.0, 0.1),
        };
        ParamRange { min, max, step }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GalaxyParameters::default().validate().is_ok());
    }

    #[test]
    fn validation_catches_each_degenerate_field() {
        let base = GalaxyParameters::default();
        let cases: [(fn(&mut GalaxyParameters), ConfigError); 14] = [
            (|p: &mut GalaxyParameters| p.count = 0, ConfigError::EmptyGalaxy),
            (|p: &mut GalaxyParameters| p.branches = 1, ConfigError::TooFewBranches(1)),
            (|p: &mut GalaxyParameters| p.radius = 0.0, ConfigError::NonPositiveRadius(0.0)),
            (|p: &mut GalaxyParameters| p.randomness = -1.0, ConfigError::NegativeRandomness(-1.0)),
            (|p: &mut GalaxyParameters| p.randomness_power = 0.5, ConfigError::RandomnessPowerBelowOne(0.5)),
            (|p: &mut GalaxyParameters| p.size = 0.0, ConfigError::NonPositiveSize(0.0)),
            (|p: &mut GalaxyParameters| p.size = f32::INFINITY, ConfigError::NonPositiveSize(f32::INFINITY)),
            (|p: &mut GalaxyParameters| p.randomness = f32::INFINITY, ConfigError::NegativeRandomness(f32::INFINITY)),
            (|p: &mut GalaxyParameters| p.randomness_power = f32::INFINITY, ConfigError::RandomnessPowerBelowOne(f32::INFINITY)),
            (|p: &mut GalaxyParameters| p.spin = f32::NEG_INFINITY, ConfigError::NonFinite { field: "spin", value: f32::NEG_INFINITY }),
            (|p: &mut GalaxyParameters| p.wave_speed = f32::INFINITY, ConfigError::NonFinite { field: "wave_speed", value: f32::INFINITY }),
            (|p: &mut GalaxyParameters| p.wave_height = f32::INFINITY, ConfigError::NonFinite { field: "wave_height", value: f32::INFINITY }),
            (|p: &mut GalaxyParameters| p.inside_color = Vec3::INFINITY, ConfigError::NonFiniteColor("inside_color")),
            (|p: &mut GalaxyParameters| p.outside_color.y = f32::INFINITY, ConfigError::NonFiniteColor("outside_color")),
        ];
        for (edit, expected) in cases {
            let mut p = base.clone();
            edit(&mut p);
            assert_eq!(p.validate(), Err(expected));
        }
    }

    #[test]
    fn nan_radius_is_rejected() {
        let mut p = GalaxyParameters::default();
        p.radius = f32::NAN;
        assert!(matches!(p.validate(), Err(ConfigError::NonPositiveRadius(_))));
    }

    #[test]
    fn nan_wave_and_randomness_are_rejected() {
        let edits: [fn(&mut GalaxyParameters); 4] = [
            |p: &mut GalaxyParameters| p.wave_height = f32::NAN,
            |p: &mut GalaxyParameters| p.wave_speed = f32::NAN,
            |p: &mut GalaxyParameters| p.randomness = f32::NAN,
            |p: &mut GalaxyParameters| p.size = f32::NAN,
        ];
        for edit in edits {
            let mut p = GalaxyParameters::default();
            edit(&mut p);
            assert!(p.validate().is_err(), "{p:?}");
        }
    }

    #[test]
    fn set_rounds_integer_params() {
        let mut p = GalaxyParameters::default();
        p.set(GalaxyParam::Branches, 4.6);
        p.set(GalaxyParam::Count, 1234.4);
        assert_eq!(p.branches, 5);
        assert_eq!(p.count, 1234);
        assert_eq!(p.get(GalaxyParam::Branches), 5.0);
    }

    #[test]
    fn keys_round_trip_and_ranges_are_ordered() {
        for p in GalaxyParam::ALL {
            assert_eq!(GalaxyParam::from_key(p.key()), Some(p));
            let r = p.range();
            assert!(r.min < r.max && r.step > 0.0, "{p:?}");
        }
        assert_eq!(GalaxyParam::from_key("nope"), None);
    }
}
