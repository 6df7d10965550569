//! Parameter grids: every density × speed × diameter combination, evaluated in parallel.

use std::fmt;
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::impact::{apply_surface, ImpactParameters, ImpactReport, Surface};
use crate::sweep::pool::WorkerPool;

/// A sweep definition as written in a YAML grid file.
///
/// ```yaml
/// densities: [2000, 3000, 7800]
/// speeds: [11000, 17000, 25000]
/// diameters: [10, 50, 200]
/// surface: water   # optional, default land
/// workers: 4       # optional, default all cores
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub densities: Vec<f64>,
    pub speeds: Vec<f64>,
    pub diameters: Vec<f64>,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub workers: Option<usize>,
}

#[derive(Debug)]
pub enum SweepError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Csv(csv::Error),
    EmptyAxis(&'static str),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Yaml(e) => write!(f, "invalid grid file: {e}"),
            Self::Csv(e) => write!(f, "csv export failed: {e}"),
            Self::EmptyAxis(axis) => write!(f, "grid axis '{axis}' must list at least one value"),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Yaml(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::EmptyAxis(_) => None,
        }
    }
}

impl From<std::io::Error> for SweepError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for SweepError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<csv::Error> for SweepError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl SweepGrid {
    pub fn from_yaml(raw: &str) -> Result<Self, SweepError> {
        let grid: SweepGrid = serde_yaml::from_str(raw)?;
        grid.check_axes()?;
        Ok(grid)
    }

    fn check_axes(&self) -> Result<(), SweepError> {
        if self.densities.is_empty() {
            return Err(SweepError::EmptyAxis("densities"));
        }
        if self.speeds.is_empty() {
            return Err(SweepError::EmptyAxis("speeds"));
        }
        if self.diameters.is_empty() {
            return Err(SweepError::EmptyAxis("diameters"));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.densities.len() * self.speeds.len() * self.diameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Combinations in row-major order: density outermost, diameter innermost.
    pub fn combinations(&self) -> Vec<ImpactParameters> {
        let mut out = Vec::with_capacity(self.len());
        for &density in &self.densities {
            for &speed in &self.speeds {
                for &diameter in &self.diameters {
                    out.push(ImpactParameters::new(density, speed, diameter));
                }
            }
        }
        out
    }
}

pub fn load_grid(path: impl AsRef<Path>) -> Result<SweepGrid, SweepError> {
    let raw = fs::read_to_string(path)?;
    SweepGrid::from_yaml(&raw)
}

/// One evaluated combination. Invalid inputs keep their error instead of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub parameters: ImpactParameters,
    pub outcome: Result<ImpactReport, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepSummary {
    pub total: usize,
    pub severe: usize,
    pub moderate: usize,
    pub light: usize,
    pub rejected: usize,
    pub surface: Surface,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub surface: Surface,
    pub rows: Vec<SweepRow>,
}

impl SweepOutcome {
    pub fn summary(&self) -> SweepSummary {
        use crate::impact::DamageClassification as C;

        let mut summary = SweepSummary {
            total: self.rows.len(),
            surface: self.surface,
            generated_at: chrono::Utc::now().to_rfc3339(),
            ..SweepSummary::default()
        };
        for row in &self.rows {
            match &row.outcome {
                Ok(report) => match report.damage_classification {
                    C::Severe => summary.severe += 1,
                    C::Moderate => summary.moderate += 1,
                    C::Light => summary.light += 1,
                },
                Err(_) => summary.rejected += 1,
            }
        }
        summary
    }
}

/// Evaluate every combination of `grid`. Row order matches [SweepGrid::combinations].
pub fn run_sweep(grid: &SweepGrid, pool: &WorkerPool) -> SweepOutcome {
    let surface = grid.surface;
    let combinations = grid.combinations();
    tracing::debug!(combinations = combinations.len(), workers = pool.workers, "running sweep");

    let rows = pool.install(|| {
        combinations
            .par_iter()
            .map(|params| SweepRow {
                parameters: *params,
                outcome: params
                    .compute()
                    .map(|report| apply_surface(report, surface))
                    .map_err(|err| err.to_string()),
            })
            .collect()
    });

    SweepOutcome { surface, rows }
}
