// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topological entities: loops, edges, faces, shells

use crate::EntityId;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A boundary loop entity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoopEntity {
    pub id: EntityId,
    pub kind: LoopKind,
}

impl LoopEntity {
    pub fn new(id: impl Into<EntityId>, kind: LoopKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            LoopKind::Poly { .. } => "PolyLoop",
            LoopKind::Edge { .. } => "EdgeLoop",
        }
    }
}

/// Loop geometry: either an explicit polygon or a chain of oriented edges
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LoopKind {
    /// Explicit cartesian polygon, raw file units, possibly explicitly
    /// closed with a repeated last point
    Poly { points: Vec<Point3<f64>> },
    /// Ordered chain of oriented edges whose curves provide the geometry
    Edge { edges: Vec<OrientedEdge> },
}

/// Edge reference with traversal orientation
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OrientedEdge {
    pub edge: EntityId,
    pub orientation: bool,
}

/// An edge entity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeEntity {
    pub id: EntityId,
    pub kind: EdgeKind,
}

impl EdgeEntity {
    pub fn new(id: impl Into<EntityId>, kind: EdgeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            EdgeKind::Curve { .. } => "EdgeCurve",
            EdgeKind::SubEdge { .. } => "SubEdge",
            EdgeKind::Vertex { .. } => "VertexEdge",
        }
    }
}

/// Edge geometry variants
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Plain curve-backed edge
    Curve { geometry: EntityId, same_sense: bool },
    /// Portion of another edge; not evaluated
    SubEdge { parent: EntityId },
    /// Edge carrying only vertex points; cartesian start point if present
    Vertex { start: Option<Point3<f64>> },
}

/// One boundary definition of a face
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FaceBound {
    pub id: EntityId,
    /// Referenced loop entity
    pub bound: EntityId,
    /// true = loop winding already consistent with its role
    pub orientation: bool,
    /// Outer bounds are sorted to the front before conversion
    pub is_outer: bool,
}

/// Face entity: one outer bound plus inner (hole) bounds
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaceEntity {
    pub id: EntityId,
    pub bounds: Vec<FaceBound>,
}

impl FaceEntity {
    pub fn new(id: impl Into<EntityId>, bounds: Vec<FaceBound>) -> Self {
        Self {
            id: id.into(),
            bounds,
        }
    }
}

/// Open or closed shell: an ordered face list
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShellEntity {
    pub id: EntityId,
    pub faces: Vec<EntityId>,
    pub closed: bool,
}

impl ShellEntity {
    pub fn new(id: impl Into<EntityId>, faces: Vec<EntityId>, closed: bool) -> Self {
        Self {
            id: id.into(),
            faces,
            closed,
        }
    }
}
