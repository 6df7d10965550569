use std::collections::HashMap;
use std::fmt;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::impact::{
    apply_surface, damage_circles, haversine_km, parse_quantity, zone_at, DamageCircle,
    DamageZone, GeoError, ImpactError, ImpactParameters, ImpactReport, ImpactSite, Parameter,
    Surface,
};
use crate::materials::PRESETS;

#[derive(Debug, Clone, Deserialize)]
pub struct ImpactRequest {
    pub density: f64,
    pub speed: f64,
    pub diameter: f64,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub site: Option<ImpactSite>,
}

impl ImpactRequest {
    fn parameters(&self) -> ImpactParameters {
        ImpactParameters::new(self.density, self.speed, self.diameter)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRequest {
    #[serde(flatten)]
    pub impact: ImpactRequest,
    pub point: ImpactSite,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpactResponse {
    pub status: &'static str,
    pub request_id: String,
    pub parameters: ImpactParameters,
    pub surface: Surface,
    pub report: ImpactReport,
    pub circles: [DamageCircle; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<ImpactSite>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneResponse {
    pub status: &'static str,
    pub request_id: String,
    pub site: ImpactSite,
    pub point: ImpactSite,
    pub distance_km: f64,
    pub zone: Option<DamageZone>,
    pub report: ImpactReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

#[derive(Debug)]
pub enum ApiError {
    Parse(String),
    Validation(Vec<ValidationIssue>),
    NotFound,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Invalid request body: {msg}"),
            Self::Validation(issues) => write!(f, "validation failed: {} field(s)", issues.len()),
            Self::NotFound => write!(f, "Route not found"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    status: "error",
                    message: "Validation failed",
                    errors,
                }),
            )
                .into_response(),
            Self::Parse(_) => error_response(StatusCode::BAD_REQUEST, &self.to_string()),
            Self::NotFound => error_response(StatusCode::NOT_FOUND, &self.to_string()),
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "status": "error", "message": message })),
    )
        .into_response()
}

fn impact_issue(err: &ImpactError) -> ValidationIssue {
    ValidationIssue {
        field: err.parameter().map_or("parameters", |p| p.as_str()),
        messages: vec![err.detail()],
    }
}

fn geo_issue(prefix: &'static str, err: &GeoError) -> ValidationIssue {
    let GeoError::OutOfRange { field, .. } = err;
    let field = match (prefix, *field) {
        ("site", "latitude") => "site.latitude",
        ("site", _) => "site.longitude",
        (_, "latitude") => "point.latitude",
        _ => "point.longitude",
    };
    ValidationIssue {
        field,
        messages: vec![err.to_string()],
    }
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validate and evaluate an impact request.
pub fn evaluate_impact(request: &ImpactRequest) -> Result<ImpactResponse, ApiError> {
    let params = request.parameters();
    let mut errors: Vec<ValidationIssue> = params.issues().iter().map(impact_issue).collect();
    if let Some(site) = &request.site {
        if let Err(err) = site.validate() {
            errors.push(geo_issue("site", &err));
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let report = params
        .compute()
        .map_err(|err| ApiError::Validation(vec![impact_issue(&err)]))?;
    let report = apply_surface(report, request.surface);

    Ok(ImpactResponse {
        status: "ok",
        request_id: new_request_id(),
        parameters: params,
        surface: request.surface,
        report,
        circles: damage_circles(&report),
        site: request.site,
    })
}

/// Evaluate an impact and locate `point` relative to its site.
pub fn evaluate_zone(request: &ZoneRequest) -> Result<ZoneResponse, ApiError> {
    let Some(site) = request.impact.site else {
        return Err(ApiError::Validation(vec![ValidationIssue {
            field: "site",
            messages: vec!["is required".to_string()],
        }]));
    };
    let mut errors = Vec::new();
    let impact = match evaluate_impact(&request.impact) {
        Ok(impact) => Some(impact),
        Err(ApiError::Validation(issues)) => {
            errors.extend(issues);
            None
        }
        Err(err) => return Err(err),
    };
    if let Err(err) = request.point.validate() {
        errors.push(geo_issue("point", &err));
    }
    let impact = match impact {
        Some(impact) if errors.is_empty() => impact,
        _ => return Err(ApiError::Validation(errors)),
    };

    Ok(ZoneResponse {
        status: "ok",
        request_id: impact.request_id,
        site,
        point: request.point,
        distance_km: haversine_km(site, request.point),
        zone: zone_at(&impact.report, site, request.point),
        report: impact.report,
    })
}

/// Build an [ImpactRequest] from query parameters. Each numeric field is parsed
/// as text so non-numeric values are reported per field.
pub fn impact_request_from_query(
    query: &HashMap<String, String>,
) -> Result<ImpactRequest, ApiError> {
    let mut errors = Vec::new();
    let mut values = [0.0_f64; 3];
    for (slot, parameter) in values.iter_mut().zip(Parameter::ALL) {
        match query.get(parameter.as_str()) {
            None => errors.push(ValidationIssue {
                field: parameter.as_str(),
                messages: vec!["is required".to_string()],
            }),
            Some(raw) => match parse_quantity(parameter, raw) {
                Ok(value) => *slot = value,
                Err(err) => errors.push(impact_issue(&err)),
            },
        }
    }

    let surface = match query.get("surface") {
        None => Surface::Land,
        Some(raw) => match raw.parse::<Surface>() {
            Ok(surface) => surface,
            Err(err) => {
                errors.push(ValidationIssue {
                    field: "surface",
                    messages: vec![err.to_string()],
                });
                Surface::Land
            }
        },
    };

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let [density, speed, diameter] = values;
    Ok(ImpactRequest {
        density,
        speed,
        diameter,
        surface,
        site: None,
    })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "impactor-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn impact_post(body: String) -> Result<Json<ImpactResponse>, ApiError> {
    let request: ImpactRequest = serde_json::from_str(&body)?;
    let response = evaluate_impact(&request)?;
    tracing::info!(
        request_id = %response.request_id,
        classification = %response.report.damage_classification,
        "impact evaluated"
    );
    Ok(Json(response))
}

pub async fn impact_get(
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<ImpactResponse>, ApiError> {
    let request = impact_request_from_query(&query)?;
    Ok(Json(evaluate_impact(&request)?))
}

pub async fn zone_post(body: String) -> Result<Json<ZoneResponse>, ApiError> {
    let request: ZoneRequest = serde_json::from_str(&body)?;
    Ok(Json(evaluate_zone(&request)?))
}

pub async fn presets() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "presets": PRESETS }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
