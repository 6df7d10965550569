//! Built-in asteroid material presets with a typical impact scenario each.

use serde::Serialize;

use crate::impact::ImpactParameters;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialPreset {
    pub id: &'static str,
    pub name: &'static str,
    /// kg/m³
    pub density: f64,
    /// m/s
    pub typical_speed: f64,
    /// m
    pub typical_diameter: f64,
}

impl MaterialPreset {
    pub fn scenario(&self) -> ImpactParameters {
        ImpactParameters::new(self.density, self.typical_speed, self.typical_diameter)
    }
}

pub const PRESETS: &[MaterialPreset] = &[
    MaterialPreset {
        id: "iron",
        name: "Iron",
        density: 7800.0,
        typical_speed: 17_000.0,
        typical_diameter: 50.0,
    },
    MaterialPreset {
        id: "stony",
        name: "Stony",
        density: 3000.0,
        typical_speed: 20_000.0,
        typical_diameter: 200.0,
    },
    MaterialPreset {
        id: "carbonaceous",
        name: "Carbonaceous",
        density: 2000.0,
        typical_speed: 15_000.0,
        typical_diameter: 10.0,
    },
];

/// Case-insensitive lookup by preset id.
pub fn find_preset(id: &str) -> Option<&'static MaterialPreset> {
    let id = id.trim();
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// The iron scenario doubles as the interactive prompt defaults.
pub fn default_scenario() -> ImpactParameters {
    PRESETS[0].scenario()
}
