//! Tolerance bundle passed to convex hull construction when the caller wants
//! a precision other than the defaults.

use crate::constants::{EPSILON, PLANE_THICKNESS};

/// Precision configuration for geometric operations.
///
/// # Example
///
/// ```rust
/// use config::KernelConfig;
///
/// let config = KernelConfig::default();
/// assert!(config.plane_thickness > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Tolerance for point/edge coincidence tests
    pub epsilon: f64,
    /// Thickness used for front/back plane classification
    pub plane_thickness: f64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            plane_thickness: PLANE_THICKNESS,
        }
    }
}

impl KernelConfig {
    /// Creates a tight configuration for small, well-conditioned models.
    pub fn precise() -> Self {
        Self {
            epsilon: 1e-9,
            plane_thickness: 1e-9,
        }
    }

    /// Creates a loose configuration for noisy scanned or large-scale input.
    pub fn coarse() -> Self {
        Self {
            epsilon: 1e-4,
            plane_thickness: 1e-4,
        }
    }
}
