//! # Configuration Constants
//!
//! Centralized constants for the geometry kernel. All tolerance values,
//! arena sizing and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Polygon**: Convexity and area tolerances used by simplification
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance: coincident points, collinear edges, zero-length
/// chords and similar tests.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-9));
/// ```
pub const EPSILON: f64 = 1e-6;

/// Thickness of a plane when classifying points as front, back or on-plane.
///
/// The expanding polytope treats a point as "in front" of a hull face only
/// when its signed distance exceeds this value.
///
/// # Example
///
/// ```rust
/// use config::constants::PLANE_THICKNESS;
///
/// let signed_distance = 5e-7;
/// let in_front = signed_distance > PLANE_THICKNESS;
/// assert!(!in_front);
/// ```
pub const PLANE_THICKNESS: f64 = 1e-6;

/// Smallest normalized volume accepted for a hull seed tetrahedron.
///
/// The determinant is divided by the lengths of the three edges leaving the
/// first corner, so the threshold does not depend on the scale of the input.
/// Four points whose ratio falls below this are treated as coplanar.
pub const MIN_SEED_VOLUME: f64 = 1e-9;

// =============================================================================
// POLYGON CONSTANTS
// =============================================================================

/// Angular tolerance (radians) for convexity classification.
///
/// A vertex only counts as concave when it turns against the polygon's
/// winding by more than this angle, so nearly straight vertices stay convex.
///
/// # Example
///
/// ```rust
/// use config::constants::CONVEXITY_TOLERANCE;
///
/// let turn_angle = -1e-5;
/// let concave = turn_angle < -CONVEXITY_TOLERANCE;
/// assert!(!concave);
/// ```
pub const CONVEXITY_TOLERANCE: f64 = 1e-4;

/// Relative tolerance for the area-preservation check of polygon compression.
///
/// # Example
///
/// ```rust
/// use config::constants::AREA_RELATIVE_TOLERANCE;
///
/// let before = 2.0_f64;
/// let after = 2.0005_f64;
/// assert!((before - after).abs() <= AREA_RELATIVE_TOLERANCE * before);
/// ```
pub const AREA_RELATIVE_TOLERANCE: f64 = 1e-3;

/// Minimum number of vertices for a polygon to enclose an area.
pub const MIN_POLYGON_VERTICES: usize = 3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices accepted when restoring a mesh.
///
/// Safety limit to prevent memory exhaustion from corrupt binary headers.
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of polygons accepted when restoring a mesh.
pub const MAX_POLYGONS: usize = 10_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-9));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Number of triangle blocks to reserve for hulling `point_count` points.
///
/// A convex polytope with `v` vertices has at most `2v - 4` triangular faces.
/// While a point is absorbed the live list also holds part of the new cone
/// before its internal faces cancel, so four times the face bound is reserved.
///
/// # Example
///
/// ```rust
/// use config::constants::hull_triangle_budget;
///
/// assert_eq!(hull_triangle_budget(4), 16);
/// assert_eq!(hull_triangle_budget(10), 64);
/// ```
pub fn hull_triangle_budget(point_count: usize) -> usize {
    let faces = (2 * point_count).saturating_sub(4).max(4);
    faces * 4
}
