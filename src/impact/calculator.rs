//! Closed-form impact estimate.
//!
//! Kinetic energy of a spherical body, E = (π/12)·ρ·D³·v², and damage radii
//! that scale with the cube root of that energy, R = k·E^(1/3). Each severity
//! level has its own coefficient `k`; radii are reported in kilometres.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impact::error::{ImpactError, Parameter};

pub const SEVERE_COEFFICIENT: f64 = 1.8e-4;
pub const MODERATE_COEFFICIENT: f64 = 4.0e-4;
pub const LIGHT_COEFFICIENT: f64 = 8.0e-4;

/// Severe radius (km) above which the impact is classified `Severe`.
pub const SEVERE_THRESHOLD_KM: f64 = 5.0;
/// Moderate radius (km) above which the impact is classified `Moderate`.
pub const MODERATE_THRESHOLD_KM: f64 = 2.0;

const METRES_PER_KM: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageClassification {
    Severe,
    Moderate,
    Light,
}

impl DamageClassification {
    /// First match wins: severe radius is checked before moderate.
    pub fn from_radii(severe_radius_km: f64, moderate_radius_km: f64) -> Self {
        if severe_radius_km > SEVERE_THRESHOLD_KM {
            Self::Severe
        } else if moderate_radius_km > MODERATE_THRESHOLD_KM {
            Self::Moderate
        } else {
            Self::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severe => "Severe",
            Self::Moderate => "Moderate",
            Self::Light => "Light",
        }
    }
}

impl fmt::Display for DamageClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactParameters {
    /// kg/m³
    pub density: f64,
    /// m/s
    pub speed: f64,
    /// m
    pub diameter: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub kinetic_energy_joules: f64,
    pub severe_radius_km: f64,
    pub moderate_radius_km: f64,
    pub light_radius_km: f64,
    pub damage_classification: DamageClassification,
}

impl ImpactParameters {
    pub fn new(density: f64, speed: f64, diameter: f64) -> Self {
        Self {
            density,
            speed,
            diameter,
        }
    }

    /// Parse all three values from user text, density first.
    pub fn from_text(density: &str, speed: &str, diameter: &str) -> Result<Self, ImpactError> {
        Ok(Self {
            density: parse_quantity(Parameter::Density, density)?,
            speed: parse_quantity(Parameter::Speed, speed)?,
            diameter: parse_quantity(Parameter::Diameter, diameter)?,
        })
    }

    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Density => self.density,
            Parameter::Speed => self.speed,
            Parameter::Diameter => self.diameter,
        }
    }

    /// Fails on the first invalid field in density, speed, diameter order.
    pub fn validate(&self) -> Result<(), ImpactError> {
        match self.issues().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every invalid field, in density, speed, diameter order.
    pub fn issues(&self) -> Vec<ImpactError> {
        Parameter::ALL
            .iter()
            .filter_map(|&parameter| check_value(parameter, self.value(parameter)).err())
            .collect()
    }

    pub fn kinetic_energy(&self) -> f64 {
        (PI / 12.0) * self.density * self.diameter.powi(3) * self.speed.powi(2)
    }

    /// Validates each field, then rejects combinations whose energy leaves the
    /// finite positive range of `f64`.
    pub fn compute(&self) -> Result<ImpactReport, ImpactError> {
        self.validate()?;

        let kinetic_energy = self.kinetic_energy();
        if !kinetic_energy.is_finite() || kinetic_energy <= 0.0 {
            return Err(ImpactError::EnergyOutOfRange(kinetic_energy));
        }
        let cube_root = kinetic_energy.powf(1.0 / 3.0);

        let severe_radius_km = SEVERE_COEFFICIENT * cube_root / METRES_PER_KM;
        let moderate_radius_km = MODERATE_COEFFICIENT * cube_root / METRES_PER_KM;
        let light_radius_km = LIGHT_COEFFICIENT * cube_root / METRES_PER_KM;

        Ok(ImpactReport {
            kinetic_energy_joules: kinetic_energy,
            severe_radius_km,
            moderate_radius_km,
            light_radius_km,
            damage_classification: DamageClassification::from_radii(
                severe_radius_km,
                moderate_radius_km,
            ),
        })
    }
}

/// Compute the impact report for a body of the given density (kg/m³),
/// speed (m/s) and diameter (m).
pub fn compute(density: f64, speed: f64, diameter: f64) -> Result<ImpactReport, ImpactError> {
    ImpactParameters::new(density, speed, diameter).compute()
}

/// Parse one input from text. Surrounding whitespace is ignored.
pub fn parse_quantity(parameter: Parameter, raw: &str) -> Result<f64, ImpactError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ImpactError::not_numeric(parameter, trimmed))?;
    check_value(parameter, value)
}

fn check_value(parameter: Parameter, value: f64) -> Result<f64, ImpactError> {
    if !value.is_finite() {
        return Err(ImpactError::not_numeric(parameter, value.to_string()));
    }
    if value <= 0.0 {
        return Err(ImpactError::not_positive(parameter, value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::error::InvalidReason;

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(
            DamageClassification::from_radii(5.0, 100.0),
            DamageClassification::Moderate
        );
        assert_eq!(
            DamageClassification::from_radii(5.000_001, 0.0),
            DamageClassification::Severe
        );
        assert_eq!(
            DamageClassification::from_radii(0.0, 2.0),
            DamageClassification::Light
        );
    }

    #[test]
    fn severe_check_runs_before_moderate() {
        assert_eq!(
            DamageClassification::from_radii(6.0, 1.0),
            DamageClassification::Severe
        );
    }

    #[test]
    fn nan_and_infinity_are_not_numeric() {
        let err = compute(f64::NAN, 1.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            ImpactError::InvalidInput {
                parameter: Parameter::Density,
                reason: InvalidReason::NotNumeric(_)
            }
        ));
        let err = compute(1.0, f64::INFINITY, 1.0).unwrap_err();
        assert_eq!(err.parameter(), Some(Parameter::Speed));
    }

    #[test]
    fn parse_quantity_trims_and_rejects_text() {
        assert_eq!(parse_quantity(Parameter::Speed, " 17000 \n"), Ok(17000.0));
        assert_eq!(
            parse_quantity(Parameter::Speed, "invalid"),
            Err(ImpactError::not_numeric(Parameter::Speed, "invalid"))
        );
        assert_eq!(
            parse_quantity(Parameter::Diameter, "0"),
            Err(ImpactError::not_positive(Parameter::Diameter, 0.0))
        );
    }

    #[test]
    fn issues_lists_every_bad_field() {
        let params = ImpactParameters::new(-1.0, 0.0, f64::NAN);
        let fields: Vec<_> = params.issues().iter().filter_map(ImpactError::parameter).collect();
        assert_eq!(
            fields,
            vec![Parameter::Density, Parameter::Speed, Parameter::Diameter]
        );
        assert_eq!(
            params.validate().unwrap_err().parameter(),
            Some(Parameter::Density)
        );
    }

    #[test]
    fn overflowing_energy_is_rejected() {
        let err = compute(1e300, 1e10, 1e10).unwrap_err();
        assert!(matches!(err, ImpactError::EnergyOutOfRange(e) if e.is_infinite()));
    }

    #[test]
    fn underflowing_energy_is_rejected() {
        let err = compute(1e-300, 1e-300, 1e-10).unwrap_err();
        assert_eq!(err, ImpactError::EnergyOutOfRange(0.0));
    }

    #[test]
    fn tiny_but_representable_energy_keeps_radii_ordered() {
        let report = compute(1e-100, 1e-50, 1e-30).unwrap();
        assert!(report.kinetic_energy_joules > 0.0);
        assert!(report.severe_radius_km > 0.0);
        assert!(report.severe_radius_km < report.moderate_radius_km);
        assert!(report.moderate_radius_km < report.light_radius_km);
    }
}
