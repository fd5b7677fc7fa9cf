// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curve entity variants
//!
//! One closed enum per abstraction level instead of a dynamic type
//! hierarchy. Each variant carries its own analytic parameters. Fields
//! that the schema marks required but which malformed files routinely
//! omit (a line's direction vector, a conic's position) are `Option` so
//! the sampler can report them as missing attributes instead of failing
//! the whole conversion.

use crate::EntityId;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A curve entity: identifier plus tagged payload
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurveEntity {
    pub id: EntityId,
    pub kind: CurveKind,
}

impl CurveEntity {
    pub fn new(id: impl Into<EntityId>, kind: CurveKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Schema kind name, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            CurveKind::Line(_) => "Line",
            CurveKind::Polyline(_) => "Polyline",
            CurveKind::Circle(_) => "Circle",
            CurveKind::Ellipse(_) => "Ellipse",
            CurveKind::BSpline(_) => "BSplineCurve",
            CurveKind::Composite(_) => "CompositeCurve",
            CurveKind::Trimmed(_) => "TrimmedCurve",
            CurveKind::Unsupported(u) => u.name(),
        }
    }
}

/// Closed set of curve variants understood by the sampler
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CurveKind {
    Line(LineCurve),
    Polyline(PolylineCurve),
    Circle(CircleCurve),
    Ellipse(EllipseCurve),
    BSpline(BSplineCurve),
    Composite(CompositeCurve),
    Trimmed(TrimmedCurve),
    /// Recognized in the schema but not implemented by the sampler
    Unsupported(UnsupportedCurve),
}

/// Infinite line: base point plus direction vector with magnitude
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineCurve {
    /// Base point of the line, raw file units
    pub point: Point3<f64>,
    /// Direction vector; required by the schema but checked at sampling time
    pub direction: Option<LineVector>,
}

/// Direction-with-magnitude pair of a line entity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineVector {
    /// Orientation ratios; not necessarily normalized
    pub orientation: Vector3<f64>,
    /// Length measure in raw file units
    pub magnitude: f64,
}

/// Explicit point sequence
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolylineCurve {
    pub points: Vec<Point3<f64>>,
}

/// Circle with placement and radius
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CircleCurve {
    /// Composed placement matrix (local x/y in columns, center in the
    /// translation column), already in output units
    pub position: Option<Matrix4<f64>>,
    /// Radius in raw file units
    pub radius: f64,
}

/// Ellipse with placement and two semi-axes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EllipseCurve {
    pub position: Option<Matrix4<f64>>,
    /// First semi-axis (local x), raw file units
    pub semi_axis1: Option<f64>,
    /// Second semi-axis (local y), raw file units
    pub semi_axis2: Option<f64>,
}

/// B-spline curve given by degree and control points
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BSplineCurve {
    pub degree: usize,
    pub control_points: Vec<Point3<f64>>,
}

/// Ordered chain of segments, each referring to a parent curve
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompositeCurve {
    pub segments: Vec<CompositeSegment>,
}

/// One segment of a composite curve
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CompositeSegment {
    /// Curve entity providing this segment's geometry
    pub parent_curve: EntityId,
    pub same_sense: bool,
}

/// Basis curve restricted to a parameter or point sub-range
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrimmedCurve {
    pub basis_curve: EntityId,
    pub trim1: Option<TrimSelect>,
    pub trim2: Option<TrimSelect>,
    /// Whether the trimmed curve follows the basis curve's parametric
    /// direction
    pub sense_agreement: bool,
}

/// Trim boundary: a parameter value, or a cartesian point to be projected
/// onto the curve
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum TrimSelect {
    /// Angle (conics) or line parameter, raw file units
    Parameter(f64),
    /// Point expected to lie on the curve, raw file units
    Cartesian(Point3<f64>),
}

/// Schema variants the sampler deliberately does not evaluate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsupportedCurve {
    OffsetCurve,
    Pcurve,
    SurfaceCurve,
    IndexedPolyCurve,
}

impl UnsupportedCurve {
    pub fn name(&self) -> &'static str {
        match self {
            UnsupportedCurve::OffsetCurve => "OffsetCurve",
            UnsupportedCurve::Pcurve => "Pcurve",
            UnsupportedCurve::SurfaceCurve => "SurfaceCurve",
            UnsupportedCurve::IndexedPolyCurve => "IndexedPolyCurve",
        }
    }
}
