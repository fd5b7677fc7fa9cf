// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Steptess Geometry
//!
//! Tessellation of schema-described B-rep geometry into indexed triangle
//! meshes. The entity graph comes from `steptess-model`; this crate turns
//! its faces, boundary loops and curves into welded vertices and triangle
//! faces suitable for rendering and further geometric processing.
//!
//! ## Pipeline
//!
//! For every face of a shell:
//!
//! 1. **Loop assembly**: each boundary (outer first, holes after) is
//!    resolved to an ordered, deduplicated 3D point sequence, sampling
//!    curves through [`CurveSampler`] where the loop is an edge chain.
//! 2. **Projection**: the outer loop's Newell normal picks one
//!    axis-aligned [`ProjectionPlane`] for the whole face; winding is
//!    normalized (outer counter-clockwise, holes clockwise).
//! 3. **Hole incorporation**: holes are bridged into the outer boundary,
//!    yielding one simple polygon; on failure the outer loop alone is
//!    used and the face is reported as degraded.
//! 4. **Triangulation**: ear clipping plus a Delaunay edge-flip
//!    improvement pass.
//! 5. **Welding**: vertices are deduplicated by exact coordinate key
//!    into the shared per-shell [`PolygonMesh`].
//!
//! Conversion is single-threaded and synchronous; the mesh accumulator is
//! the only mutable state and is always passed explicitly. Recoverable
//! problems go to a [`Diagnostics`] stream instead of failing the run, so
//! malformed models still come out as partial meshes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use steptess_geometry::{Diagnostics, FaceConverter, TessellationSettings};
//! use steptess_model::InMemoryStore;
//!
//! let settings = TessellationSettings::default();
//! let converter = FaceConverter::new(&settings, &store);
//! let mut diag = Diagnostics::new();
//!
//! let (mesh, outcome) = converter.convert_shell(&shell, &placement, &mut diag)?;
//! println!("{} triangles, {} issues", mesh.triangle_count(), diag.len());
//! ```

pub mod curve;
pub mod diagnostics;
pub mod error;
pub mod face;
pub mod geom;
pub mod loops;
pub mod mesh;
pub mod projection;
pub mod settings;
pub mod spline;
pub mod surface;
pub mod triangulate;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

// Re-export main types
pub use curve::{angle_on_circle, CurveSampler, SampledCurve};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Error, Result};
pub use face::{FaceConverter, FaceSetOutcome, FaceStatus};
pub use mesh::{MeshData, PolygonMesh, PolylineData};
pub use projection::{normalize_winding, project_loop, select_plane, ProjectionPlane};
pub use settings::TessellationSettings;
pub use surface::{convert_advanced_face_list, convert_surface};
pub use triangulate::{improve, incorporate_holes, triangulate};
