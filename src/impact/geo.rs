//! Map-side helpers: where an impact lands and which damage ring covers a point.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impact::calculator::ImpactReport;

/// Mean Earth radius (IUGG), in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactSite {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, value } => {
                let bound = if *field == "latitude" { 90 } else { 180 };
                write!(f, "{field} {value} is outside [-{bound}, {bound}]")
            }
        }
    }
}

impl std::error::Error for GeoError {}

impl ImpactSite {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let site = Self {
            latitude,
            longitude,
        };
        site.validate()?;
        Ok(site)
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::OutOfRange {
                field: "latitude",
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::OutOfRange {
                field: "longitude",
                value: self.longitude,
            });
        }
        Ok(())
    }
}

/// Great-circle distance between two sites in kilometres.
pub fn haversine_km(a: ImpactSite, b: ImpactSite) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageZone {
    Severe,
    Moderate,
    Light,
}

impl DamageZone {
    pub fn radius_km(&self, report: &ImpactReport) -> f64 {
        match self {
            Self::Severe => report.severe_radius_km,
            Self::Moderate => report.moderate_radius_km,
            Self::Light => report.light_radius_km,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Severe => "#d7191c",
            Self::Moderate => "#fdae61",
            Self::Light => "#ffffbf",
        }
    }
}

/// Innermost zone around `site` that contains `point`, if any.
pub fn zone_at(report: &ImpactReport, site: ImpactSite, point: ImpactSite) -> Option<DamageZone> {
    let distance = haversine_km(site, point);
    [DamageZone::Severe, DamageZone::Moderate, DamageZone::Light]
        .into_iter()
        .find(|zone| distance <= zone.radius_km(report))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageCircle {
    pub zone: DamageZone,
    pub radius_m: f64,
    pub color: &'static str,
}

/// Circles for drawing, outermost first so inner rings paint on top.
pub fn damage_circles(report: &ImpactReport) -> [DamageCircle; 3] {
    [DamageZone::Light, DamageZone::Moderate, DamageZone::Severe].map(|zone| DamageCircle {
        zone,
        radius_m: zone.radius_km(report) * 1000.0,
        color: zone.color(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::calculator::DamageClassification;

    fn report() -> ImpactReport {
        ImpactReport {
            kinetic_energy_joules: 1.0,
            severe_radius_km: 10.0,
            moderate_radius_km: 50.0,
            light_radius_km: 100.0,
            damage_classification: DamageClassification::Severe,
        }
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        let a = ImpactSite::new(0.0, 0.0).unwrap();
        let b = ImpactSite::new(1.0, 0.0).unwrap();
        assert!((haversine_km(a, b) - 111.195).abs() < 0.01);
        assert_eq!(haversine_km(a, a), 0.0);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(ImpactSite::new(91.0, 0.0).is_err());
        assert!(ImpactSite::new(0.0, -180.5).is_err());
        assert!(ImpactSite::new(f64::NAN, 0.0).is_err());
        assert!(ImpactSite::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn zone_at_picks_innermost_ring() {
        let site = ImpactSite::new(0.0, 0.0).unwrap();
        // ~0.09° of latitude per 10 km
        let near = ImpactSite::new(0.05, 0.0).unwrap();
        let mid = ImpactSite::new(0.3, 0.0).unwrap();
        let far = ImpactSite::new(0.8, 0.0).unwrap();
        let outside = ImpactSite::new(2.0, 0.0).unwrap();
        let r = report();
        assert_eq!(zone_at(&r, site, near), Some(DamageZone::Severe));
        assert_eq!(zone_at(&r, site, mid), Some(DamageZone::Moderate));
        assert_eq!(zone_at(&r, site, far), Some(DamageZone::Light));
        assert_eq!(zone_at(&r, site, outside), None);
    }

    #[test]
    fn circles_are_outermost_first_in_metres() {
        let circles = damage_circles(&report());
        assert_eq!(circles[0].zone, DamageZone::Light);
        assert_eq!(circles[0].radius_m, 100_000.0);
        assert_eq!(circles[2].zone, DamageZone::Severe);
    }
}
