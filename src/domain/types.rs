//! Shared domain types.
//!
//! Passenger attributes are modelled as closed enums wherever the form offers a
//! fixed set of choices, so an out-of-domain value cannot be constructed.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Column names of the training schema, in training order.
pub const TRAINING_COLUMNS: [&str; 5] = ["Pclass", "Sex", "Age", "Fare", "Embarked"];

/// Default artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "model/titanic_survival_model.json";

pub const AGE_MIN: u8 = 0;
pub const AGE_MAX: u8 = 100;
pub const DEFAULT_AGE: u8 = 25;
pub const DEFAULT_FARE: f64 = 15.0;

/// Ticket class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(into = "u8", try_from = "u8")]
pub enum PassengerClass {
    #[value(name = "1")]
    First,
    #[value(name = "2")]
    Second,
    #[value(name = "3")]
    Third,
}

impl PassengerClass {
    pub const ALL: [PassengerClass; 3] = [
        PassengerClass::First,
        PassengerClass::Second,
        PassengerClass::Third,
    ];

    pub fn number(self) -> u8 {
        match self {
            PassengerClass::First => 1,
            PassengerClass::Second => 2,
            PassengerClass::Third => 3,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PassengerClass::First => "1st",
            PassengerClass::Second => "2nd",
            PassengerClass::Third => "3rd",
        }
    }
}

impl From<PassengerClass> for u8 {
    fn from(class: PassengerClass) -> Self {
        class.number()
    }
}

impl TryFrom<u8> for PassengerClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PassengerClass::First),
            2 => Ok(PassengerClass::Second),
            3 => Ok(PassengerClass::Third),
            other => Err(format!("passenger class must be 1, 2 or 3 (got {other})")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Category label as it appears in the training data.
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Port of embarkation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Port {
    #[value(name = "C", alias = "c")]
    #[serde(rename = "C")]
    Cherbourg,
    #[value(name = "Q", alias = "q")]
    #[serde(rename = "Q")]
    Queenstown,
    #[value(name = "S", alias = "s")]
    #[serde(rename = "S")]
    Southampton,
}

impl Port {
    pub const ALL: [Port; 3] = [Port::Cherbourg, Port::Queenstown, Port::Southampton];

    /// One-letter code used by the training data.
    pub fn code(self) -> &'static str {
        match self {
            Port::Cherbourg => "C",
            Port::Queenstown => "Q",
            Port::Southampton => "S",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Port::Cherbourg => "Cherbourg",
            Port::Queenstown => "Queenstown",
            Port::Southampton => "Southampton",
        }
    }
}

/// Attributes of one passenger, as collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassengerInput {
    pub class: PassengerClass,
    pub sex: Sex,
    pub age: u8,
    pub fare: f64,
    pub embarked: Port,
}

impl PassengerInput {
    /// Build an input, clamping age to `[0, 100]` and fare to `[0, ∞)`.
    pub fn new(class: PassengerClass, sex: Sex, age: u8, fare: f64, embarked: Port) -> Self {
        Self {
            class,
            sex,
            age: clamp_age(i64::from(age)),
            fare: clamp_fare(fare),
            embarked,
        }
    }

    /// The single-row record handed to the classifier.
    ///
    /// Column names and order follow [`TRAINING_COLUMNS`].
    pub fn to_record(&self) -> Record {
        Record {
            cells: vec![
                (TRAINING_COLUMNS[0], Value::Int(i64::from(self.class.number()))),
                (TRAINING_COLUMNS[1], Value::Str(self.sex.code())),
                (TRAINING_COLUMNS[2], Value::Int(i64::from(self.age))),
                (TRAINING_COLUMNS[3], Value::Float(self.fare)),
                (TRAINING_COLUMNS[4], Value::Str(self.embarked.code())),
            ],
        }
    }
}

impl Default for PassengerInput {
    /// Regression baseline passenger: 3rd class male, 25, fare 15.0, Southampton.
    fn default() -> Self {
        Self {
            class: PassengerClass::Third,
            sex: Sex::Male,
            age: DEFAULT_AGE,
            fare: DEFAULT_FARE,
            embarked: Port::Southampton,
        }
    }
}

pub fn clamp_age(age: i64) -> u8 {
    // Bounded by AGE_MAX, so the cast cannot truncate.
    age.clamp(i64::from(AGE_MIN), i64::from(AGE_MAX)) as u8
}

pub fn clamp_fare(fare: f64) -> f64 {
    if fare.is_nan() { 0.0 } else { fare.max(0.0) }
}

/// A single cell value in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(&'static str),
}

impl Value {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Str(_) => None,
        }
    }

    /// Category label used for one-hot matching (`3`, `male`, `S`).
    pub fn as_category(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
        }
    }
}

/// Single-row table with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    cells: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.cells.iter().map(|(name, _)| *name).collect()
    }
}

/// Outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub survived: bool,
    /// Probability of the "survived" class (index 1), in `[0, 1]`.
    pub survival_probability: f64,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub log_file: Option<PathBuf>,
}
