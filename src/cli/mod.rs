//! Command-line parsing for the survival predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! form, the handler and the model code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{PassengerClass, PassengerInput, Port, Sex, DEFAULT_AGE, DEFAULT_FARE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "titanic", version, about = "Titanic Survival Prediction System")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form (default).
    Tui(TuiArgs),
    /// Predict survival for one passenger and print the result.
    Predict(PredictArgs),
    /// Describe the model artifact.
    Info(ModelArgs),
}

/// Artifact location shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Model artifact JSON (default: $TITANIC_MODEL, else model/titanic_survival_model.json).
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Write logs to this file (the terminal is owned by the form).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Passenger class (1 = 1st, 2 = 2nd, 3 = 3rd).
    #[arg(long, value_enum, default_value = "3")]
    pub class: PassengerClass,

    /// Gender.
    #[arg(long, value_enum, default_value_t = Sex::Male)]
    pub sex: Sex,

    /// Age in years.
    #[arg(long, default_value_t = DEFAULT_AGE, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub age: u8,

    /// Ticket fare.
    #[arg(long, default_value_t = DEFAULT_FARE, value_parser = parse_fare)]
    pub fare: f64,

    /// Port of embarkation (C = Cherbourg, Q = Queenstown, S = Southampton).
    #[arg(long, value_enum, default_value = "S")]
    pub embarked: Port,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    pub fn passenger(&self) -> PassengerInput {
        PassengerInput::new(self.class, self.sex, self.age, self.fare, self.embarked)
    }
}

fn parse_fare(s: &str) -> Result<f64, String> {
    let fare: f64 = s.parse().map_err(|e| format!("invalid fare '{s}': {e}"))?;
    if !fare.is_finite() || fare < 0.0 {
        return Err(format!("fare must be a non-negative number (got {s})"));
    }
    Ok(fare)
}
