pub mod calculator;
pub mod error;
pub mod geo;
pub mod surface;

pub use calculator::{
    compute, parse_quantity, DamageClassification, ImpactParameters, ImpactReport,
    LIGHT_COEFFICIENT, MODERATE_COEFFICIENT, MODERATE_THRESHOLD_KM, SEVERE_COEFFICIENT,
    SEVERE_THRESHOLD_KM,
};
pub use error::{ImpactError, InvalidReason, Parameter};
pub use geo::{
    damage_circles, haversine_km, zone_at, DamageCircle, DamageZone, GeoError, ImpactSite,
    EARTH_RADIUS_KM,
};
pub use surface::{apply_surface, Surface, UnknownSurface, WATER_RADIUS_FACTOR};
