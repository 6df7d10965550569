//! Post-computation modifier for the kind of surface that is struck.
//!
//! The calculator itself knows nothing about location. A water impact dissipates
//! part of the blast into the ocean, so the map view scales the radii down after
//! the core computation and re-derives the classification from the result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::impact::calculator::{DamageClassification, ImpactReport};

/// Fraction of each land radius that survives a water impact.
pub const WATER_RADIUS_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Land,
    Water,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Water => "water",
        }
    }

    pub fn radius_factor(&self) -> f64 {
        match self {
            Self::Land => 1.0,
            Self::Water => WATER_RADIUS_FACTOR,
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSurface(pub String);

impl fmt::Display for UnknownSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown surface '{}', expected 'land' or 'water'", self.0)
    }
}

impl std::error::Error for UnknownSurface {}

impl FromStr for Surface {
    type Err = UnknownSurface;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "land" => Ok(Self::Land),
            "water" => Ok(Self::Water),
            other => Err(UnknownSurface(other.to_string())),
        }
    }
}

/// Scale the radii of `report` for `surface`. Kinetic energy is unchanged.
pub fn apply_surface(report: ImpactReport, surface: Surface) -> ImpactReport {
    if surface == Surface::Land {
        return report;
    }
    let factor = surface.radius_factor();
    let severe_radius_km = report.severe_radius_km * factor;
    let moderate_radius_km = report.moderate_radius_km * factor;
    ImpactReport {
        kinetic_energy_joules: report.kinetic_energy_joules,
        severe_radius_km,
        moderate_radius_km,
        light_radius_km: report.light_radius_km * factor,
        damage_classification: DamageClassification::from_radii(
            severe_radius_km,
            moderate_radius_km,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::calculator::compute;

    #[test]
    fn land_is_identity() {
        let report = compute(3000.0, 20000.0, 1000.0).unwrap();
        assert_eq!(apply_surface(report, Surface::Land), report);
    }

    #[test]
    fn water_halves_radii_and_reclassifies() {
        // moderate radius ≈ 2.72 km on land
        let report = compute(3000.0, 20000.0, 1000.0).unwrap();
        assert_eq!(report.damage_classification, DamageClassification::Moderate);

        let wet = apply_surface(report, Surface::Water);
        assert_eq!(wet.kinetic_energy_joules, report.kinetic_energy_joules);
        assert!((wet.light_radius_km - report.light_radius_km / 2.0).abs() < 1e-12);
        assert_eq!(wet.damage_classification, DamageClassification::Light);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Water".parse::<Surface>(), Ok(Surface::Water));
        assert_eq!(" land ".parse::<Surface>(), Ok(Surface::Land));
        assert!("lava".parse::<Surface>().is_err());
        assert_eq!(
            "ocean".parse::<Surface>(),
            Err(UnknownSurface("ocean".to_string()))
        );
    }
}
