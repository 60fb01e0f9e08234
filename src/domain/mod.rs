//! Domain types used throughout the application.
//!
//! This module defines:
//!
//! - passenger attribute enums (`PassengerClass`, `Sex`, `Port`)
//! - the form input (`PassengerInput`) and the classifier record (`Record`)
//! - prediction output (`PredictionResult`) and runtime configuration

pub mod types;

pub use types::*;
