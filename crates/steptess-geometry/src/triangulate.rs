// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hole incorporation and polygon triangulation
//!
//! Input loops come pre-normalized from the projector: the outer boundary
//! winds counter-clockwise, holes wind clockwise. Holes are spliced into
//! the outer boundary through non-crossing bridge edges, producing one
//! simple polygon addressed as (loop-index, vertex-index) pairs into the
//! original per-loop arrays. The merged polygon is triangulated by ear
//! clipping and then improved by Delaunay edge flips, which swap diagonals
//! without changing the triangle count.

use crate::error::{Error, Result};
use crate::geom::DUPLICATE_EPS;
use nalgebra::Point2;
use rustc_hash::FxHashMap;

const AREA_EPS: f64 = 1e-12;

/// z component of (b − a) × (c − a)
#[inline]
fn cross(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[inline]
fn coincide(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    (a.x - b.x).abs() < DUPLICATE_EPS && (a.y - b.y).abs() < DUPLICATE_EPS
}

/// Proper (interior-to-interior) segment crossing test
///
/// Touching at an endpoint or running collinearly does not count; bridge
/// edges share endpoints with the loops they connect.
fn segments_properly_intersect(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    ((d1 > AREA_EPS && d2 < -AREA_EPS) || (d1 < -AREA_EPS && d2 > AREA_EPS))
        && ((d3 > AREA_EPS && d4 < -AREA_EPS) || (d3 < -AREA_EPS && d4 > AREA_EPS))
}

/// Point-in-triangle test, boundary inclusive, for a CCW triangle
fn point_in_triangle(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> bool {
    cross(a, b, p) >= -AREA_EPS && cross(b, c, p) >= -AREA_EPS && cross(c, a, p) >= -AREA_EPS
}

/// Even-odd point-in-polygon test
///
/// Works on the weakly simple merged polygon too: the two traversals of a
/// zero-width bridge channel cancel out in the crossing parity.
fn point_in_polygon(p: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Merge an outer boundary and its holes into one simple polygon
///
/// `loops[0]` is the outer boundary (counter-clockwise); the remaining
/// loops are holes (clockwise). For each hole a bridge vertex pair is
/// searched, nearest pair first, that connects the hole to the merged
/// boundary without properly crossing any edge of the merged polygon or of
/// any hole; the hole's vertex cycle is spliced in at the bridge. Bridge
/// vertices appear twice in the output, which is the expected shape for
/// the downstream ear clipper.
///
/// Holes with fewer than 3 vertices are ignored. Fails when a hole cannot
/// be bridged (self-intersecting or out-of-bounds input).
pub fn incorporate_holes(loops: &[Vec<Point2<f64>>]) -> Result<Vec<(usize, usize)>> {
    let Some(outer) = loops.first() else {
        return Err(Error::triangulation("no outer boundary"));
    };
    if outer.len() < 3 {
        return Err(Error::degenerate("outer boundary has fewer than 3 vertices"));
    }

    let mut merged: Vec<(usize, usize)> = (0..outer.len()).map(|i| (0, i)).collect();

    // process holes rightmost first; later bridges may attach to earlier ones
    let mut hole_order: Vec<usize> = (1..loops.len()).filter(|&i| loops[i].len() >= 3).collect();
    hole_order.sort_by(|&a, &b| {
        let max_x = |l: &[Point2<f64>]| l.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        max_x(&loops[b])
            .partial_cmp(&max_x(&loops[a]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for &hole_index in &hole_order {
        let hole = &loops[hole_index];
        let pending: Vec<&Vec<Point2<f64>>> = hole_order
            .iter()
            .filter(|&&other| {
                other == hole_index || !merged.iter().any(|&(li, _)| li == other)
            })
            .map(|&other| &loops[other])
            .collect();

        // candidate bridges ordered by squared length
        let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
        for (position, &(loop_i, vertex_i)) in merged.iter().enumerate() {
            let p = loops[loop_i][vertex_i];
            for (hole_vertex, q) in hole.iter().enumerate() {
                candidates.push(((p - q).norm_squared(), position, hole_vertex));
            }
        }
        candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let merged_points: Vec<Point2<f64>> =
            merged.iter().map(|&(li, vi)| loops[li][vi]).collect();

        let mut bridged = false;
        for &(distance_sq, position, hole_vertex) in &candidates {
            if distance_sq < DUPLICATE_EPS * DUPLICATE_EPS {
                continue;
            }
            let p = merged_points[position];
            let q = hole[hole_vertex];
            if !bridge_is_clear(&p, &q, &merged_points, &pending) {
                continue;
            }

            // splice the hole cycle in after the bridge vertex, closing it
            // back through both bridge endpoints
            let (loop_i, vertex_i) = merged[position];
            let mut insertion: Vec<(usize, usize)> = Vec::with_capacity(hole.len() + 2);
            for k in 0..hole.len() {
                insertion.push((hole_index, (hole_vertex + k) % hole.len()));
            }
            insertion.push((hole_index, hole_vertex));
            insertion.push((loop_i, vertex_i));
            merged.splice(position + 1..position + 1, insertion);
            bridged = true;
            break;
        }

        if !bridged {
            return Err(Error::triangulation(format!(
                "no bridge found for hole loop {hole_index}"
            )));
        }
    }

    Ok(merged)
}

/// Whether a bridge candidate crosses any existing boundary
fn bridge_is_clear(
    p: &Point2<f64>,
    q: &Point2<f64>,
    merged_points: &[Point2<f64>],
    pending_holes: &[&Vec<Point2<f64>>],
) -> bool {
    let n = merged_points.len();
    for i in 0..n {
        let a = &merged_points[i];
        let b = &merged_points[(i + 1) % n];
        if segments_properly_intersect(p, q, a, b) {
            return false;
        }
    }
    // the bridge must stay inside the region still to be filled
    let midpoint = Point2::new((p.x + q.x) / 2.0, (p.y + q.y) / 2.0);
    if !point_in_polygon(&midpoint, merged_points) {
        return false;
    }
    for hole in pending_holes {
        let m = hole.len();
        for i in 0..m {
            let a = &hole[i];
            let b = &hole[(i + 1) % m];
            if segments_properly_intersect(p, q, a, b) {
                return false;
            }
        }
    }
    true
}

/// Triangulate a simple counter-clockwise polygon by ear clipping
///
/// Handles the duplicated bridge vertices produced by hole incorporation.
/// On degenerate no-ear configurations the most convex corner is clipped
/// anyway, so malformed input still yields a best-effort triangle set
/// rather than an endless loop.
pub fn triangulate(points: &[Point2<f64>]) -> Result<Vec<[usize; 3]>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::degenerate("fewer than 3 vertices to triangulate"));
    }
    if n == 3 {
        return Ok(vec![[0, 1, 2]]);
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let count = remaining.len();
        let mut clipped = false;

        for k in 0..count {
            let prev = remaining[(k + count - 1) % count];
            let current = remaining[k];
            let next = remaining[(k + 1) % count];

            if is_ear(points, &remaining, prev, current, next) {
                triangles.push([prev, current, next]);
                remaining.remove(k);
                clipped = true;
                break;
            }
        }

        if !clipped {
            // no strict ear left: clip the most convex corner to keep going
            let mut best_k = 0;
            let mut best_cross = f64::NEG_INFINITY;
            for k in 0..count {
                let a = &points[remaining[(k + count - 1) % count]];
                let b = &points[remaining[k]];
                let c = &points[remaining[(k + 1) % count]];
                let cr = cross(a, b, c);
                if cr > best_cross {
                    best_cross = cr;
                    best_k = k;
                }
            }
            let prev = remaining[(best_k + count - 1) % count];
            let current = remaining[best_k];
            let next = remaining[(best_k + 1) % count];
            triangles.push([prev, current, next]);
            remaining.remove(best_k);
        }
    }

    triangles.push([remaining[0], remaining[1], remaining[2]]);
    Ok(triangles)
}

fn is_ear(points: &[Point2<f64>], remaining: &[usize], prev: usize, current: usize, next: usize) -> bool {
    let a = &points[prev];
    let b = &points[current];
    let c = &points[next];

    if cross(a, b, c) <= AREA_EPS {
        return false; // reflex or collinear corner
    }

    for &other in remaining {
        if other == prev || other == current || other == next {
            continue;
        }
        let p = &points[other];
        // duplicates of the corners (bridge copies) never block an ear
        if coincide(p, a) || coincide(p, b) || coincide(p, c) {
            continue;
        }
        if point_in_triangle(p, a, b, c) {
            return false;
        }
    }
    true
}

/// Strict incircle test for a CCW triangle (a, b, c)
fn in_circumcircle(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
    d: &Point2<f64>,
) -> bool {
    let (ax, ay) = (a.x - d.x, a.y - d.y);
    let (bx, by) = (b.x - d.x, b.y - d.y);
    let (cx, cy) = (c.x - d.x, c.y - d.y);

    let det = (ax * ax + ay * ay) * (bx * cy - cx * by)
        - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);

    det > 1e-10
}

fn directed_edge_position(tri: &[usize; 3], from: usize, to: usize) -> Option<usize> {
    (0..3).find(|&e| tri[e] == from && tri[(e + 1) % 3] == to)
}

/// Improve triangulation quality by Delaunay edge flips
///
/// Interior edges whose opposite vertex lies strictly inside the
/// circumcircle of the neighboring triangle are flipped, provided the
/// containing quad is convex (the diagonals cross). Triangle count never
/// changes; passes repeat until a fixed point or the pass limit.
pub fn improve(points: &[Point2<f64>], triangles: &mut [[usize; 3]]) {
    if triangles.len() < 2 {
        return;
    }

    const MAX_PASSES: usize = 8;
    for _ in 0..MAX_PASSES {
        let mut edge_map: FxHashMap<(usize, usize), Vec<usize>> = FxHashMap::default();
        for (t, tri) in triangles.iter().enumerate() {
            for e in 0..3 {
                let a = tri[e];
                let b = tri[(e + 1) % 3];
                edge_map.entry((a.min(b), a.max(b))).or_default().push(t);
            }
        }

        let mut dirty = vec![false; triangles.len()];
        let mut flipped_any = false;

        for (&(a, b), users) in edge_map.iter() {
            if users.len() != 2 {
                continue; // boundary edge
            }
            let (mut t1, mut t2) = (users[0], users[1]);
            if dirty[t1] || dirty[t2] {
                continue;
            }

            // orient so t1 holds the directed edge a -> b
            if directed_edge_position(&triangles[t1], a, b).is_none() {
                std::mem::swap(&mut t1, &mut t2);
            }
            let Some(e1) = directed_edge_position(&triangles[t1], a, b) else {
                continue;
            };
            let Some(e2) = directed_edge_position(&triangles[t2], b, a) else {
                continue;
            };
            let c = triangles[t1][(e1 + 2) % 3];
            let d = triangles[t2][(e2 + 2) % 3];
            if c == d {
                continue;
            }

            let (pa, pb, pc, pd) = (&points[a], &points[b], &points[c], &points[d]);
            // flip only convex quads, i.e. when the diagonals cross
            if !segments_properly_intersect(pc, pd, pa, pb) {
                continue;
            }
            if !in_circumcircle(pa, pb, pc, pd) {
                continue;
            }

            triangles[t1] = [a, d, c];
            triangles[t2] = [d, b, c];
            dirty[t1] = true;
            dirty[t2] = true;
            flipped_any = true;
        }

        if !flipped_any {
            break;
        }
    }
}
