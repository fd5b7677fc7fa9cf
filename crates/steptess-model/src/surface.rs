// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface entity variants
//!
//! Only planes are evaluated downstream. The remaining variants are kept
//! in the closed set so the converter can name them in diagnostics when
//! it skips them.

use crate::EntityId;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// A surface entity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurfaceEntity {
    pub id: EntityId,
    pub kind: SurfaceKind,
}

impl SurfaceEntity {
    pub fn new(id: impl Into<EntityId>, kind: SurfaceKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            SurfaceKind::Plane(_) => "Plane",
            SurfaceKind::Cylindrical { .. } => "CylindricalSurface",
            SurfaceKind::Spherical { .. } => "SphericalSurface",
            SurfaceKind::Toroidal { .. } => "ToroidalSurface",
            SurfaceKind::BSplineSurface => "BSplineSurface",
            SurfaceKind::RectangularTrimmed { .. } => "RectangularTrimmedSurface",
            SurfaceKind::CurveBoundedPlane { .. } => "CurveBoundedPlane",
            SurfaceKind::LinearExtrusion => "SurfaceOfLinearExtrusion",
            SurfaceKind::Revolution => "SurfaceOfRevolution",
        }
    }
}

/// Closed set of surface variants
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SurfaceKind {
    Plane(PlaneSurface),
    Cylindrical {
        position: Option<Matrix4<f64>>,
        radius: f64,
    },
    Spherical {
        position: Option<Matrix4<f64>>,
        radius: f64,
    },
    Toroidal {
        position: Option<Matrix4<f64>>,
        major_radius: f64,
        minor_radius: f64,
    },
    BSplineSurface,
    RectangularTrimmed {
        basis_surface: EntityId,
    },
    CurveBoundedPlane {
        basis_surface: EntityId,
        outer_boundary: EntityId,
        inner_boundaries: Vec<EntityId>,
    },
    LinearExtrusion,
    Revolution,
}

/// Unbounded plane with placement
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaneSurface {
    pub position: Option<Matrix4<f64>>,
}
