use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};

use serde::Serialize;

use crate::config::Config;
use crate::impact::{
    apply_surface, parse_quantity, ImpactError, ImpactParameters, ImpactReport, InvalidReason,
    Parameter, Surface,
};
use crate::materials::{default_scenario, find_preset, PRESETS};
use crate::server;
use crate::summary::{render_summary, render_summary_on};
use crate::sweep::{load_grid, run_sweep, write_csv, SweepError, WorkerPool};

pub const USAGE: &str = "usage: impactor <calc|interactive|presets|sweep|serve>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Calc,
    Interactive,
    Presets,
    Sweep,
    Serve,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("calc") => Some(Command::Calc),
        Some("interactive") => Some(Command::Interactive),
        Some("presets") => Some(Command::Presets),
        Some("sweep") => Some(Command::Sweep),
        Some("serve") => Some(Command::Serve),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Calc) => handle_calc(args),
        Some(Command::Interactive) => handle_interactive(),
        Some(Command::Presets) => handle_presets(),
        Some(Command::Sweep) => handle_sweep(args),
        Some(Command::Serve) => handle_serve(),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Table,
}

#[derive(Debug, Serialize)]
struct CalcOutput {
    parameters: ImpactParameters,
    surface: Surface,
    report: ImpactReport,
}

fn handle_calc(args: &[String]) -> i32 {
    const CALC_USAGE: &str =
        "usage: impactor calc (<density> <speed> <diameter> | --preset <id>) [--json|--table] [--surface land|water]";

    let mut format = OutputFormat::Text;
    let mut surface = Surface::Land;
    let mut preset = None;
    let mut positional: Vec<&str> = Vec::new();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--json" => format = OutputFormat::Json,
            "--table" => format = OutputFormat::Table,
            "--surface" => {
                let Some(raw) = rest.next() else {
                    eprintln!("{CALC_USAGE}");
                    return 2;
                };
                match raw.parse::<Surface>() {
                    Ok(parsed) => surface = parsed,
                    Err(err) => {
                        eprintln!("error: {err}");
                        return 2;
                    }
                }
            }
            "--preset" => {
                let Some(id) = rest.next() else {
                    eprintln!("{CALC_USAGE}");
                    return 2;
                };
                let Some(found) = find_preset(id) else {
                    eprintln!("error: unknown preset '{id}'");
                    return 2;
                };
                preset = Some(found);
            }
            other => positional.push(other),
        }
    }

    let parsed = match (preset, positional.as_slice()) {
        (Some(preset), []) => Ok(preset.scenario()),
        (None, [density, speed, diameter]) => {
            ImpactParameters::from_text(density, speed, diameter)
        }
        _ => {
            eprintln!("{CALC_USAGE}");
            return 2;
        }
    };
    let params = match parsed {
        Ok(params) => params,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    let report = match params.compute() {
        Ok(report) => apply_surface(report, surface),
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    tracing::debug!(?params, %surface, classification = %report.damage_classification, "calc");

    match format {
        OutputFormat::Text => print!("{}", render_summary_on(&params, &report, surface)),
        OutputFormat::Table => {
            println!("density\tspeed\tdiameter\tkinetic_energy_joules\tsevere_radius_km\tmoderate_radius_km\tlight_radius_km\tdamage_classification");
            println!(
                "{}\t{}\t{}\t{:e}\t{:.6}\t{:.6}\t{:.6}\t{}",
                params.density,
                params.speed,
                params.diameter,
                report.kinetic_energy_joules,
                report.severe_radius_km,
                report.moderate_radius_km,
                report.light_radius_km,
                report.damage_classification
            );
        }
        OutputFormat::Json => {
            let output = CalcOutput {
                parameters: params,
                surface,
                report,
            };
            match serde_json::to_string_pretty(&output) {
                Ok(payload) => println!("{payload}"),
                Err(err) => {
                    eprintln!("failed to serialize impact report: {err}");
                    return 1;
                }
            }
        }
    }
    0
}

fn handle_interactive() -> i32 {
    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_interactive(stdin.lock(), stdout.lock()) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("An error occurred: {err}");
            1
        }
    }
}

fn handle_presets() -> i32 {
    match serde_json::to_string_pretty(PRESETS) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize presets: {err}");
            1
        }
    }
}

fn handle_sweep(args: &[String]) -> i32 {
    let Some(grid_path) = args.get(2) else {
        eprintln!("usage: impactor sweep <grid.yaml> [output.csv]");
        return 2;
    };

    let grid = match load_grid(grid_path) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("sweep failed: {err}");
            return 1;
        }
    };
    let pool = WorkerPool::with_workers(grid.workers.unwrap_or_else(|| Config::from_env().workers));
    let outcome = run_sweep(&grid, &pool);
    let summary = outcome.summary();

    let written = match args.get(3) {
        Some(out_path) => File::create(out_path)
            .map_err(SweepError::from)
            .and_then(|file| write_csv(&outcome, BufWriter::new(file))),
        None => write_csv(&outcome, io::stdout().lock()),
    };
    if let Err(err) = written {
        eprintln!("sweep failed: {err}");
        return 1;
    }

    tracing::info!(
        total = summary.total,
        severe = summary.severe,
        moderate = summary.moderate,
        light = summary.light,
        rejected = summary.rejected,
        "sweep complete"
    );
    if args.get(3).is_some() {
        match serde_json::to_string_pretty(&summary) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize sweep summary: {err}");
                return 1;
            }
        }
    }
    0
}

fn handle_serve() -> i32 {
    let config = Config::from_env();
    match server::run_server(&config) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!(%err, "server error");
            eprintln!("server error: {err}");
            1
        }
    }
}

/// Prompt-driven session: each round prints the banner, reads three values
/// (empty line keeps the default), prints the summary, and offers another round. End of input ends the session.
pub fn run_interactive<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    loop {
        writeln!(output, "Asteroid Impact Calculator")?;
        writeln!(output, "{}", "=".repeat(50))?;
        writeln!(output, "Enter asteroid parameters (or press Enter for defaults):")?;
        writeln!(output)?;

        let Some(params) = prompt_parameters(&mut input, &mut output)? else {
            writeln!(output, "\n\nCalculator interrupted by user. Goodbye!")?;
            return Ok(());
        };
        writeln!(output)?;
        match params.compute() {
            Ok(report) => write!(output, "{}", render_summary(&params, &report))?,
            Err(err) => writeln!(output, "Error: {err}")?,
        }

        loop {
            write!(output, "\nRun another calculation? (y/n): ")?;
            output.flush()?;
            let Some(answer) = read_line(&mut input)? else {
                writeln!(output, "\n\nCalculator interrupted by user. Goodbye!")?;
                return Ok(());
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => {
                    writeln!(output)?;
                    break;
                }
                "n" | "no" => {
                    writeln!(output, "Thank you for using the Asteroid Impact Calculator!")?;
                    return Ok(());
                }
                _ => writeln!(output, "Please enter 'y' for yes or 'n' for no.")?,
            }
        }
    }
}

fn prompt_parameters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<ImpactParameters>> {
    let defaults = default_scenario();
    let mut values = [0.0_f64; 3];
    for (slot, parameter) in values.iter_mut().zip(Parameter::ALL) {
        let prompt = match parameter {
            Parameter::Density => "Density (kg/m³) [default: 7800 for iron]: ",
            Parameter::Speed => "Speed (m/s) [default: 17000]: ",
            Parameter::Diameter => "Diameter (meters) [default: 50]: ",
        };
        match prompt_value(input, output, parameter, prompt, defaults.value(parameter))? {
            Some(value) => *slot = value,
            None => return Ok(None),
        }
    }
    let [density, speed, diameter] = values;
    Ok(Some(ImpactParameters::new(density, speed, diameter)))
}

fn prompt_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    parameter: Parameter,
    prompt: &str,
    default: f64,
) -> io::Result<Option<f64>> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            return Ok(Some(default));
        }
        match parse_quantity(parameter, &line) {
            Ok(value) => return Ok(Some(value)),
            Err(ImpactError::InvalidInput {
                reason: InvalidReason::NotPositive(_),
                ..
            }) => writeln!(
                output,
                "{} must be positive. Please try again.",
                parameter.label()
            )?,
            Err(ImpactError::InvalidInput {
                reason: InvalidReason::NotNumeric(_),
                ..
            }) => writeln!(output, "Please enter a valid number.")?,
            Err(err @ ImpactError::EnergyOutOfRange(_)) => writeln!(output, "{err}")?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> String {
        let mut out = Vec::new();
        run_interactive(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_command_recognizes_subcommands() {
        let args = |s: &str| vec!["impactor".to_string(), s.to_string()];
        assert_eq!(parse_command(&args("calc")), Some(Command::Calc));
        assert_eq!(parse_command(&args("sweep")), Some(Command::Sweep));
        assert_eq!(parse_command(&args("bogus")), None);
        assert_eq!(parse_command(&["impactor".to_string()]), None);
    }

    #[test]
    fn interactive_uses_defaults_on_empty_lines() {
        let out = session("\n\n\nn\n");
        assert!(out.contains("Density:    7,800 kg/m³"));
        assert!(out.contains("Speed:      17,000 m/s"));
        assert!(out.contains("Diameter:   50 m"));
        assert!(out.contains("Overall Classification: Light"));
        assert!(out.ends_with("Thank you for using the Asteroid Impact Calculator!\n"));
    }

    #[test]
    fn interactive_reprompts_on_bad_values() {
        let out = session("abc\n-5\n3000\n20000\n200\nno\n");
        assert!(out.contains("Please enter a valid number."));
        assert!(out.contains("Density must be positive. Please try again."));
        assert!(out.contains("Density:    3,000 kg/m³"));
    }

    #[test]
    fn interactive_reports_unrepresentable_energy() {
        let out = session("1e300
1e10
1e10
n
");
        assert!(out.contains("Error: Parameters produce a kinetic energy of inf J"));
        assert!(!out.contains("ASTEROID IMPACT ANALYSIS"));
    }

    #[test]
    fn interactive_loops_until_no_and_stops_on_eof() {
        let out = session("\n\n\nmaybe\ny\n\n\n\n");
        assert!(out.contains("Please enter 'y' for yes or 'n' for no."));
        assert_eq!(out.matches("ASTEROID IMPACT ANALYSIS").count(), 2);
        assert_eq!(out.matches("Enter asteroid parameters").count(), 2);
        assert!(out.contains("Calculator interrupted by user. Goodbye!"));
    }
}
