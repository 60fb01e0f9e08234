//! `titanic-predictor` library crate.
//!
//! The binary (`titanic`) is a thin wrapper around this library so that:
//!
//! - the form, handler and model code are testable without a terminal
//! - the classifier sits behind a trait and can be swapped without touching the UI

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod tui;
