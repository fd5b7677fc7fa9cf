// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point and vector utilities

use nalgebra::{Point2, Point3, Vector3};

/// Absolute tolerance for duplicate-point comparisons
pub const DUPLICATE_EPS: f64 = 1e-8;

/// Absolute tolerance for accepting a trim point as lying on a curve
pub const TRIM_EPS: f64 = 1e-4;

/// Component-wise coincidence test at [`DUPLICATE_EPS`]
#[inline]
pub fn points_coincide(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    (a.x - b.x).abs() < DUPLICATE_EPS
        && (a.y - b.y).abs() < DUPLICATE_EPS
        && (a.z - b.z).abs() < DUPLICATE_EPS
}

/// Polygon normal via Newell's method
///
/// Returns the normalized normal, or the zero vector when the polygon is
/// degenerate (collinear points, fewer than 3 vertices). Callers treat a
/// zero result as non-projectable.
pub fn polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    if n < 3 {
        return Vector3::zeros();
    }

    let mut normal = Vector3::<f64>::zeros();
    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];

        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    let len = normal.norm();
    if len > 1e-10 {
        normal / len
    } else {
        Vector3::zeros()
    }
}

/// Normal of a 2D polygon, embedded in 3D
///
/// Only the z component is meaningful: its sign gives the winding order
/// (positive = counter-clockwise) and its magnitude is twice the enclosed
/// area.
pub fn polygon_normal_2d(points: &[Point2<f64>]) -> Vector3<f64> {
    let n = points.len();
    let mut z = 0.0;
    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];
        z += current.x * next.y - next.x * current.y;
    }
    Vector3::new(0.0, 0.0, z)
}

/// Orthogonal projection of `point` onto the infinite line through
/// `origin` with direction `direction`
#[inline]
pub fn closest_point_on_line(
    point: &Point3<f64>,
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
) -> Point3<f64> {
    let denom = direction.dot(direction);
    if denom < 1e-30 {
        return *origin;
    }
    let t = (point - origin).dot(direction) / denom;
    origin + direction * t
}

/// Append a sampled point run to a curve under construction
///
/// Drops the run's first point when it coincides with the curve's current
/// last point, so consecutive segments of a composite curve share their
/// junction vertex only once.
pub fn append_points_to_curve(points: &[Point3<f64>], target: &mut Vec<Point3<f64>>) {
    let mut iter = points.iter();
    if let (Some(last), Some(first)) = (target.last(), points.first()) {
        if points_coincide(last, first) {
            iter.next();
        }
    }
    target.extend(iter.copied());
}
