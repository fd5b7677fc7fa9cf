// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface conversion
//!
//! Only planes produce geometry: an unbounded plane is represented by a
//! large bounded rectangle outline, for use as a half-space boundary.
//! Curved and swept surface variants are deliberate stubs: they report a
//! diagnostic, emit nothing, and never fail the conversion.

use crate::diagnostics::Diagnostics;
use crate::mesh::PolylineData;
use nalgebra::{Matrix4, Point3};
use steptess_model::{EntityId, EntityStore, SurfaceEntity, SurfaceKind};

const COMPONENT: &str = "SurfaceConverter";

/// Half-extent of the rectangle standing in for an unbounded plane
const PLANE_SPAN: f64 = 50.0;

/// Convert a surface entity into outline polylines
///
/// `pos` is the composed placement of the surrounding representation item;
/// a surface's own placement is applied on top of it.
pub fn convert_surface(
    store: &dyn EntityStore,
    surface: &SurfaceEntity,
    pos: &Matrix4<f64>,
    out: &mut PolylineData,
    diag: &mut Diagnostics,
) {
    match &surface.kind {
        SurfaceKind::Plane(plane) => {
            let matrix = match &plane.position {
                Some(position) => pos * position,
                None => *pos,
            };

            //  1----0     big rectangular plane
            //  |    |     ^ y
            //  |    |     |
            //  2----3     ---> x
            let corners = [
                Point3::new(PLANE_SPAN, PLANE_SPAN, 0.0),
                Point3::new(-PLANE_SPAN, PLANE_SPAN, 0.0),
                Point3::new(-PLANE_SPAN, -PLANE_SPAN, 0.0),
                Point3::new(PLANE_SPAN, -PLANE_SPAN, 0.0),
            ]
            .map(|corner| matrix.transform_point(&corner));
            out.add_polyline(&corners);
        }
        SurfaceKind::RectangularTrimmed { basis_surface } => {
            // the basis surface outline stands in for the trimmed patch
            if let Some(basis) = store.surface(*basis_surface) {
                convert_surface(store, basis, pos, out, diag);
            }
            diag.report(
                COMPONENT,
                surface.kind_name(),
                surface.id,
                "surface trimming not implemented",
            );
        }
        SurfaceKind::Cylindrical { .. }
        | SurfaceKind::Spherical { .. }
        | SurfaceKind::Toroidal { .. }
        | SurfaceKind::BSplineSurface
        | SurfaceKind::CurveBoundedPlane { .. }
        | SurfaceKind::LinearExtrusion
        | SurfaceKind::Revolution => {
            diag.report(
                COMPONENT,
                surface.kind_name(),
                surface.id,
                "surface variant not implemented",
            );
        }
    }
}

/// Advanced (curved-face) B-rep face lists are not supported
///
/// Kept as an explicit no-op so callers can route advanced shells here
/// without special-casing.
pub fn convert_advanced_face_list(
    _faces: &[EntityId],
    _pos: &Matrix4<f64>,
    _out: &mut PolylineData,
    _diag: &mut Diagnostics,
) {
}
