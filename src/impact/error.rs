//! Validation errors for impact inputs.

use std::fmt;

use serde::Serialize;

/// The three scalar inputs of an impact computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Density,
    Speed,
    Diameter,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [Self::Density, Self::Speed, Self::Diameter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Density => "density",
            Self::Speed => "speed",
            Self::Diameter => "diameter",
        }
    }

    /// Capitalized label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Density => "Density",
            Self::Speed => "Speed",
            Self::Diameter => "Diameter",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Density => "kg/m³",
            Self::Speed => "m/s",
            Self::Diameter => "m",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidReason {
    /// Raw text that did not parse, or a NaN/infinite value rendered as text.
    NotNumeric(String),
    /// Parsed but zero or negative.
    NotPositive(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImpactError {
    InvalidInput {
        parameter: Parameter,
        reason: InvalidReason,
    },
    /// Each input is valid on its own but the kinetic energy overflows to
    /// infinity or underflows to zero.
    EnergyOutOfRange(f64),
}

impl ImpactError {
    pub fn not_numeric(parameter: Parameter, raw: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter,
            reason: InvalidReason::NotNumeric(raw.into()),
        }
    }

    pub fn not_positive(parameter: Parameter, value: f64) -> Self {
        Self::InvalidInput {
            parameter,
            reason: InvalidReason::NotPositive(value),
        }
    }

    /// The offending input, or `None` when only the combination is at fault.
    pub fn parameter(&self) -> Option<Parameter> {
        match self {
            Self::InvalidInput { parameter, .. } => Some(*parameter),
            Self::EnergyOutOfRange(_) => None,
        }
    }

    /// Short message without the field name, for per-field validation payloads.
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidInput {
                reason: InvalidReason::NotNumeric(raw),
                ..
            } => format!("must be a numeric value, got '{raw}'"),
            Self::InvalidInput {
                reason: InvalidReason::NotPositive(_),
                ..
            } => "must be positive".to_string(),
            Self::EnergyOutOfRange(_) => {
                "combine to a kinetic energy outside the representable range".to_string()
            }
        }
    }
}

impl fmt::Display for ImpactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                parameter,
                reason: InvalidReason::NotNumeric(raw),
            } => write!(f, "{} must be a numeric value, got '{raw}'", parameter.label()),
            Self::InvalidInput {
                parameter,
                reason: InvalidReason::NotPositive(_),
            } => write!(f, "{} must be positive", parameter.label()),
            Self::EnergyOutOfRange(energy) => write!(
                f,
                "Parameters produce a kinetic energy of {energy} J, outside the representable range"
            ),
        }
    }
}

impl std::error::Error for ImpactError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            ImpactError::not_positive(Parameter::Density, -1.0).to_string(),
            "Density must be positive"
        );
        assert_eq!(
            ImpactError::not_numeric(Parameter::Speed, "fast").to_string(),
            "Speed must be a numeric value, got 'fast'"
        );
    }

    #[test]
    fn detail_omits_field_name() {
        let err = ImpactError::not_positive(Parameter::Diameter, 0.0);
        assert_eq!(err.parameter(), Some(Parameter::Diameter));
        assert_eq!(err.detail(), "must be positive");
    }

    #[test]
    fn energy_out_of_range_has_no_single_field() {
        let err = ImpactError::EnergyOutOfRange(f64::INFINITY);
        assert_eq!(err.parameter(), None);
        assert!(err.to_string().contains("outside the representable range"));
    }
}
