//! # Kernel Errors
//!
//! Error types for hull construction, polygon processing and mesh
//! serialization.
//!
//! ## Error Policy
//!
//! - Precondition violations (degenerate seeds, too few points) fail without
//!   mutating the target
//! - Tolerance decisions are policy and never surface here
//! - Malformed input leaves the target mesh cleared

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur inside the geometry kernel.
///
/// ## Example
///
/// ```rust
/// use geometry_kernel::{KernelError, PolygonMesh, Vec3};
///
/// let mut mesh = PolygonMesh::new();
/// let flat = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
/// match mesh.generate_convex_hull(&flat) {
///     Err(KernelError::DegenerateGeometry { .. }) => {}
///     other => panic!("expected a degenerate seed, got {other:?}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum KernelError {
    /// Input geometry cannot support the operation (coplanar seed, too few points)
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry {
        /// What was degenerate
        message: String,
    },

    /// A polygon references a vertex outside the mesh vertex array
    #[error("Vertex index {index} out of range (vertex count: {count})")]
    IndexOutOfRange {
        /// Offending index
        index: i64,
        /// Number of vertices available
        count: usize,
    },

    /// The fixed-block arena has no free blocks left
    #[error("Arena exhausted: all {capacity} blocks in use")]
    ArenaExhausted {
        /// Number of blocks the arena was created with
        capacity: usize,
    },

    /// A handle was stale, out of range, or already freed
    #[error("Invalid arena handle: slot {index}, generation {generation}")]
    InvalidHandle {
        /// Slot index carried by the handle
        index: usize,
        /// Generation carried by the handle
        generation: u32,
    },

    /// Recursive splitting could not find a valid chord
    #[error("Tessellation failed: {message}")]
    TessellationFailed {
        /// Why no split was possible
        message: String,
    },

    /// Structurally invalid serialized mesh
    #[error("Malformed mesh data: {message}")]
    MalformedData {
        /// What was wrong with the input
        message: String,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary stream failed to read or write
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KernelError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a tessellation failure.
    pub fn tessellation(message: impl Into<String>) -> Self {
        Self::TessellationFailed {
            message: message.into(),
        }
    }

    /// Creates a malformed data error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData {
            message: message.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

// =============================================================================
// TESTS
// =============================================================================
