//! Plain-text impact summary for terminal output.

use std::fmt::Write as _;

use crate::impact::{ImpactParameters, ImpactReport, Surface};

const RULE_WIDTH: usize = 60;

/// Render the boxed summary printed by the `calc` and `interactive` commands.
pub fn render_summary(params: &ImpactParameters, report: &ImpactReport) -> String {
    render_summary_on(params, report, Surface::Land)
}

/// Same as [render_summary], with a surface line when the impact is not on land.
pub fn render_summary_on(
    params: &ImpactParameters,
    report: &ImpactReport,
    surface: Surface,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "ASTEROID IMPACT ANALYSIS");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Input Parameters:");
    let _ = writeln!(out, "  Density:    {} kg/m³", format_thousands(params.density));
    let _ = writeln!(out, "  Speed:      {} m/s", format_thousands(params.speed));
    let _ = writeln!(out, "  Diameter:   {} m", format_thousands(params.diameter));
    if surface != Surface::Land {
        let _ = writeln!(out, "  Surface:    {surface}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Calculated Results:");
    let _ = writeln!(
        out,
        "  Kinetic Energy: {} Joules",
        format_scientific(report.kinetic_energy_joules, 2)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Impact Radii:");
    let _ = writeln!(out, "  Severe Damage:   {:.2} km", report.severe_radius_km);
    let _ = writeln!(out, "  Moderate Damage: {:.2} km", report.moderate_radius_km);
    let _ = writeln!(out, "  Light Damage:    {:.2} km", report.light_radius_km);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Overall Classification: {}",
        report.damage_classification
    );
    let _ = writeln!(out, "{rule}");
    out
}

/// Round to an integer and group digits by thousands: `17000.4` -> `17,000`.
pub fn format_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && digits != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

/// Scientific notation with a signed, at-least-two-digit exponent: `7.38e+16`.
pub fn format_scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}
