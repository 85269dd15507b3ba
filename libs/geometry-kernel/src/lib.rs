//! # Geometry Kernel
//!
//! Convex hulls and polygon-mesh simplification for collision-shape
//! generation. All math is `f64` with tolerance-bounded comparisons; the
//! tolerances themselves live in the `config` crate.
//!
//! ## Architecture
//!
//! ```text
//! point cloud → ExpandingPolytope → PolygonMesh (triangles)
//!                                        ↓ simplify_faces
//!                          Polygon::compress / tessellate
//!                                        ↓
//!                              PolygonMesh (merged faces)
//! ```
//!
//! ## Algorithms
//!
//! - **3D hull**: expanding polytope with reversed-triangle cancellation,
//!   triangles held in a fixed-block arena
//! - **Planar hull**: divide and conquer over projected points
//! - **Simplification**: coplanar pair merging to a fixed point, grouped by
//!   plane and processed in parallel
//! - **Tessellation**: recursive chord splitting into convex pieces or
//!   triangles
//! - **Coarsening**: shortest-edge collapse over a vertex graph
//!
//! ## Usage
//!
//! ```rust
//! use geometry_kernel::{PolygonMesh, Vec3};
//!
//! let cube: Vec<Vec3> = (0..8)
//!     .map(|i| Vec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
//!     .collect();
//!
//! let mut mesh = PolygonMesh::new();
//! mesh.generate_convex_hull(&cube)?;
//! assert_eq!(mesh.polygon_count(), 12);
//!
//! mesh.simplify_faces(true, 1e-6)?;
//! assert_eq!(mesh.polygon_count(), 6);
//! # Ok::<(), geometry_kernel::KernelError>(())
//! ```

pub mod epa;
pub mod error;
pub mod graph;
pub mod math;
pub mod mesh;
pub mod polygon;

pub use epa::{ExpandingPolytope, Triangle, TriangleArena};
pub use error::{KernelError, KernelResult};
pub use graph::{Graph, Node};
pub use math::{Aabb, LineSegment, Plane, Ray, Side, Vec3};
pub use mesh::{MeshPolygon, PolygonMesh, RayHit};
pub use polygon::{ConvexityInfo, Polygon};

pub use config::KernelConfig;
