//! CSV export of sweep rows.

use std::io::Write;

use serde::Serialize;

use crate::sweep::grid::{SweepError, SweepOutcome, SweepRow};

#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    density: f64,
    speed: f64,
    diameter: f64,
    kinetic_energy_joules: Option<f64>,
    severe_radius_km: Option<f64>,
    moderate_radius_km: Option<f64>,
    light_radius_km: Option<f64>,
    damage_classification: Option<&'static str>,
    error: Option<&'a str>,
}

impl<'a> From<&'a SweepRow> for CsvRecord<'a> {
    fn from(row: &'a SweepRow) -> Self {
        let p = row.parameters;
        match &row.outcome {
            Ok(report) => Self {
                density: p.density,
                speed: p.speed,
                diameter: p.diameter,
                kinetic_energy_joules: Some(report.kinetic_energy_joules),
                severe_radius_km: Some(report.severe_radius_km),
                moderate_radius_km: Some(report.moderate_radius_km),
                light_radius_km: Some(report.light_radius_km),
                damage_classification: Some(report.damage_classification.as_str()),
                error: None,
            },
            Err(message) => Self {
                density: p.density,
                speed: p.speed,
                diameter: p.diameter,
                kinetic_energy_joules: None,
                severe_radius_km: None,
                moderate_radius_km: None,
                light_radius_km: None,
                damage_classification: None,
                error: Some(message.as_str()),
            },
        }
    }
}

/// Write one header row and one row per combination. Rejected rows leave the
/// result columns empty and fill `error`.
pub fn write_csv<W: Write>(outcome: &SweepOutcome, writer: W) -> Result<(), SweepError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &outcome.rows {
        csv_writer.serialize(CsvRecord::from(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}
