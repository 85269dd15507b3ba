//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;
use crate::KernelConfig;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_plane_thickness_matches_hull_tolerance() {
    assert_eq!(PLANE_THICKNESS, 1e-6);
}

#[test]
fn test_seed_volume_is_tiny() {
    assert!(MIN_SEED_VOLUME > 0.0);
    assert!(MIN_SEED_VOLUME < EPSILON);
}

// =============================================================================
// POLYGON TESTS
// =============================================================================

#[test]
fn test_area_tolerance_is_relative_per_mille() {
    assert_eq!(AREA_RELATIVE_TOLERANCE, 1e-3);
}

#[test]
fn test_min_polygon_vertices_is_triangle() {
    assert_eq!(MIN_POLYGON_VERTICES, 3);
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_approx_zero() {
    assert!(approx_zero(-EPSILON / 2.0));
    assert!(!approx_zero(EPSILON * 2.0));
}

#[test]
fn test_hull_triangle_budget_grows_with_points() {
    assert!(hull_triangle_budget(1000) > hull_triangle_budget(10));
    // Never below one tetrahedron worth of blocks
    assert!(hull_triangle_budget(0) >= 4);
}

// =============================================================================
// KERNEL CONFIG TESTS
// =============================================================================

#[test]
fn test_kernel_config_default() {
    let config = KernelConfig::default();
    assert_eq!(config.epsilon, EPSILON);
    assert_eq!(config.plane_thickness, PLANE_THICKNESS);
}

#[test]
fn test_kernel_config_precise_is_tighter() {
    let precise = KernelConfig::precise();
    let default = KernelConfig::default();
    assert!(precise.epsilon < default.epsilon);
    assert!(precise.plane_thickness < default.plane_thickness);
}

#[test]
fn test_kernel_config_coarse_is_looser() {
    let coarse = KernelConfig::coarse();
    let default = KernelConfig::default();
    assert!(coarse.epsilon > default.epsilon);
    assert!(coarse.plane_thickness > default.plane_thickness);
}
