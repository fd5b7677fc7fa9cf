// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Projection of 3D boundary loops onto a working 2D plane
//!
//! The plane is chosen once per face from the outer loop's normal and
//! reused for every hole, so that all loops share one 2D frame. Winding is
//! normalized so the outer loop runs counter-clockwise and holes run
//! clockwise in that frame.

use crate::geom;
use nalgebra::{Point2, Point3};

/// Axis-aligned projection plane, named by the coordinates it keeps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionPlane {
    /// Drop x, keep (y, z); chosen when |nx| dominates
    Yz,
    /// Drop y, keep (x, z); chosen when |ny| dominates
    Xz,
    /// Drop z, keep (x, y); chosen when |nz| dominates
    Xy,
}

/// Pick the projection plane whose normal best aligns with the loop normal
///
/// Ties break in evaluation order nx, ny, nz (first maximum wins). Returns
/// `None` for a degenerate (zero) normal.
pub fn select_plane(normal: &nalgebra::Vector3<f64>) -> Option<ProjectionPlane> {
    let nx = normal.x.abs();
    let ny = normal.y.abs();
    let nz = normal.z.abs();

    let n_max = nx.max(ny).max(nz);
    if n_max <= 0.0 {
        return None;
    }

    if n_max == nx {
        Some(ProjectionPlane::Yz)
    } else if n_max == ny {
        Some(ProjectionPlane::Xz)
    } else {
        Some(ProjectionPlane::Xy)
    }
}

/// Project loop points onto the chosen plane by dropping one axis
pub fn project_loop(plane: ProjectionPlane, points: &[Point3<f64>]) -> Vec<Point2<f64>> {
    points
        .iter()
        .map(|p| match plane {
            ProjectionPlane::Yz => Point2::new(p.y, p.z),
            ProjectionPlane::Xz => Point2::new(p.x, p.z),
            ProjectionPlane::Xy => Point2::new(p.x, p.y),
        })
        .collect()
}

/// Normalize the winding of one projected loop, in place
///
/// `bound_index` 0 is the outer boundary: it is reversed (2D and paired 3D
/// points together) when it winds clockwise, and the reversal is reported
/// back so triangle emission can flip winding to stay outward-facing.
/// Inner boundaries (holes) are reversed when they wind counter-clockwise,
/// since holes must wind opposite to the outer loop.
///
/// Returns whether the outer loop was reversed.
pub fn normalize_winding(
    bound_index: usize,
    points_2d: &mut Vec<Point2<f64>>,
    points_3d: &mut Vec<Point3<f64>>,
) -> bool {
    let normal_2d = geom::polygon_normal_2d(points_2d);

    if bound_index == 0 {
        if normal_2d.z < 0.0 {
            points_2d.reverse();
            points_3d.reverse();
            return true;
        }
    } else if normal_2d.z > 0.0 {
        points_2d.reverse();
        points_3d.reverse();
    }
    false
}
