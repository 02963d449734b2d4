//! # Interactive Prompts
//!
//! Console questions with defaults. An empty answer takes the default; an
//! answer that is not a number takes the default with a warning.

use crate::config::{ProtocolConfig, SampleConfig};
use osmodry_core::{ProcessError, Stage};
use std::io::{BufRead, Write};

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

fn io_error(e: std::io::Error) -> ProcessError {
    ProcessError::IoError(e.to_string())
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String, ProcessError> {
        write!(self.output, "{}", question).map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(io_error)?;
        Ok(line.trim().to_string())
    }

    /// Ask for a number, falling back to `default`.
    pub fn float(&mut self, prompt: &str, default: f64) -> Result<f64, ProcessError> {
        let answer = self.ask(&format!("{} (default: {}): ", prompt, default))?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<f64>() {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(answer = %answer, "Invalid number, using default {}", default);
                writeln!(self.output, "Invalid input. Using default.").map_err(io_error)?;
                Ok(default)
            }
        }
    }

    /// Ask a yes/no question; only "yes" or "y" count as yes.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, ProcessError> {
        let answer = self.ask(&format!("{} (yes/no): ", prompt))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "yes" | "y"))
    }
}

/// Walk through the standard candy protocol, asking for every parameter.
///
/// Sample, one osmosis stage, one drying stage, then an optional second
/// drying stage.
pub fn collect_protocol<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<ProtocolConfig, ProcessError> {
    let defaults = ProtocolConfig::default();

    let sample = SampleConfig {
        initial_weight: prompter.float(
            "Enter initial weight of banana pseudostem core (grams)",
            defaults.sample.initial_weight,
        )?,
        initial_moisture: prompter.float(
            "Enter initial moisture content (%)",
            defaults.sample.initial_moisture,
        )?,
    };

    let brix = prompter.float("Enter Brix level of sugar solution", 50.0)?;
    let osmosis_hours = prompter.float("Enter duration of osmosis (hours)", 6.0)?;

    let temperature = prompter.float("Enter drying temperature for Stage 1 (°C)", 60.0)?;
    let drying_hours = prompter.float("Enter drying duration for Stage 1 (hours)", 5.0)?;

    let mut stages = vec![
        Stage::osmosis(brix, osmosis_hours),
        Stage::drying(temperature, drying_hours),
    ];

    if prompter.confirm("Do you want to add another drying stage?")? {
        let temperature = prompter.float("Enter drying temperature for Stage 2 (°C)", 70.0)?;
        let hours = prompter.float("Enter drying duration for Stage 2 (hours)", 3.0)?;
        stages.push(Stage::drying(temperature, hours));
    }

    Ok(ProtocolConfig {
        sample,
        stages,
        output: defaults.output,
    })
}
