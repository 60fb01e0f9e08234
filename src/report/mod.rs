//! Reporting utilities: formatted prediction output.

pub mod format;

pub use format::*;
