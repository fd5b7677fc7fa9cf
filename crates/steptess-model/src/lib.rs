// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Steptess Model
//!
//! Typed entity definitions and the read-only entity store for STEP-style
//! B-rep tessellation. The exchange-file parser (out of scope for this
//! workspace) populates an [`EntityStore`] implementation; the geometry
//! crate consumes it through narrow, read-only accessors and never mutates
//! or outlives the store.
//!
//! The deep polymorphic schema hierarchy of the exchange format is modeled
//! as closed tagged variants ([`CurveKind`], [`LoopKind`], [`SurfaceKind`])
//! so that dispatch is an exhaustive `match` and unhandled variants are
//! visible at compile time. Cross-entity references are plain [`EntityId`]
//! indices resolved through the store.
//!
//! Coordinates held by entities are in raw file units; unit factors are
//! applied downstream during sampling.

pub mod curve;
pub mod error;
pub mod store;
pub mod surface;
pub mod topology;
pub mod types;

pub use curve::{
    BSplineCurve, CircleCurve, CompositeCurve, CompositeSegment, CurveEntity, CurveKind,
    EllipseCurve, LineCurve, LineVector, PolylineCurve, TrimSelect, TrimmedCurve,
    UnsupportedCurve,
};
pub use error::{ModelError, Result};
pub use store::{EntityStore, EntityStoreExt, GeomEntity, InMemoryStore};
pub use surface::{PlaneSurface, SurfaceEntity, SurfaceKind};
pub use topology::{
    EdgeEntity, EdgeKind, FaceBound, FaceEntity, LoopEntity, LoopKind, OrientedEdge, ShellEntity,
};
pub use types::EntityId;

// Re-export nalgebra types used in entity payloads for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
