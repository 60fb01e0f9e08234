//! Input/output helpers.
//!
//! - model artifact JSON read (`artifact`)

pub mod artifact;

pub use artifact::*;
