// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! B-spline curve evaluation
//!
//! Clamped uniform knot vector plus de Boor evaluation. Knot vectors
//! supplied by the exchange file are not interpreted (the with-knots
//! schema variants are unsupported); every spline is treated as
//! quasi-uniform over its control points.

use nalgebra::Point3;

/// Clamped (open) uniform knot vector for `num_points` control points
///
/// The resulting vector has `num_points + degree + 1` entries over the
/// parameter range [0, 1].
fn uniform_knots(num_points: usize, degree: usize) -> Vec<f64> {
    let mut knots = Vec::with_capacity(num_points + degree + 1);
    let interior = num_points - degree;

    for _ in 0..=degree {
        knots.push(0.0);
    }
    for i in 1..interior {
        knots.push(i as f64 / interior as f64);
    }
    for _ in 0..=degree {
        knots.push(1.0);
    }
    knots
}

/// Index of the knot span containing `t`
fn find_span(num_points: usize, degree: usize, t: f64, knots: &[f64]) -> usize {
    if t >= knots[num_points] {
        return num_points - 1;
    }
    let mut span = degree;
    while span < num_points - 1 && t >= knots[span + 1] {
        span += 1;
    }
    span
}

/// Point on the spline at parameter `t` in [0, 1] via de Boor's algorithm
fn de_boor(degree: usize, control_points: &[Point3<f64>], knots: &[f64], t: f64) -> Point3<f64> {
    let span = find_span(control_points.len(), degree, t, knots);

    let mut d: Vec<_> = (0..=degree)
        .map(|j| control_points[j + span - degree].coords)
        .collect();

    for r in 1..=degree {
        for j in (r..=degree).rev() {
            let i = j + span - degree;
            let denom = knots[i + degree - r + 1] - knots[i];
            let alpha = if denom.abs() < 1e-12 {
                0.0
            } else {
                (t - knots[i]) / denom
            };
            d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
        }
    }

    Point3::from(d[degree])
}

/// Sample a B-spline curve at `num_points` uniformly spaced parameters
///
/// The degree is clamped to the control-point count; fewer than two
/// control points yield the points unchanged.
pub fn sample_bspline(
    degree: usize,
    control_points: &[Point3<f64>],
    num_points: usize,
) -> Vec<Point3<f64>> {
    if control_points.len() < 2 || num_points < 2 {
        return control_points.to_vec();
    }

    let degree = degree.clamp(1, control_points.len() - 1);
    let knots = uniform_knots(control_points.len(), degree);

    (0..num_points)
        .map(|i| {
            let t = i as f64 / (num_points - 1) as f64;
            de_boor(degree, control_points, &knots, t)
        })
        .collect()
}
