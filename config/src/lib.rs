//! # Config Crate
//!
//! Centralized tolerance constants for the geometry kernel.
//! All magic numbers used by hull construction, polygon simplification and
//! mesh serialization are defined here so that every module compares
//! floating-point values against the same thresholds.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, PLANE_THICKNESS};
//!
//! // Use EPSILON for generic floating-point comparisons
//! let value: f64 = 1e-9;
//! assert!(value.abs() < EPSILON);
//!
//! // Use PLANE_THICKNESS for front/back classification against a plane
//! assert!(PLANE_THICKNESS > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Tolerance Policy**: Near-equal values are treated as equal, never as errors
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
pub mod precision;

pub use precision::KernelConfig;

#[cfg(test)]
mod tests;
