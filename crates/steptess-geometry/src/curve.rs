// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curve sampling
//!
//! Turns a curve entity (possibly trimmed, possibly composite) into an
//! ordered, densified point sequence. Missing required attributes and
//! unsupported variants never fail the conversion: they are reported to
//! the diagnostics sink and sampling returns whatever points were already
//! accumulated.

use crate::diagnostics::Diagnostics;
use crate::geom::{self, TRIM_EPS};
use crate::settings::TessellationSettings;
use crate::spline;
use nalgebra::{Point3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use steptess_model::{
    CircleCurve, CurveEntity, CurveKind, EllipseCurve, EntityStore, LineCurve, TrimSelect,
};

const COMPONENT: &str = "CurveSampler";

/// Recursion bound for composite/trimmed curve nesting. Exchange files can
/// in principle contain reference cycles; past this depth sampling stops
/// with a diagnostic.
const MAX_CURVE_DEPTH: u32 = 32;

/// Result of sampling one curve
#[derive(Clone, Debug, Default)]
pub struct SampledCurve {
    /// Ordered points approximating the curve, output units
    pub points: Vec<Point3<f64>>,
    /// Start point of each sampled segment, in segment order
    pub segment_starts: Vec<Point3<f64>>,
}

/// Samples curve entities against a store and settings
pub struct CurveSampler<'a> {
    settings: &'a TessellationSettings,
    store: &'a dyn EntityStore,
}

impl<'a> CurveSampler<'a> {
    pub fn new(settings: &'a TessellationSettings, store: &'a dyn EntityStore) -> Self {
        Self { settings, store }
    }

    pub fn settings(&self) -> &TessellationSettings {
        self.settings
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store
    }

    /// Sample a curve over its full range
    pub fn sample(&self, curve: &CurveEntity, diag: &mut Diagnostics) -> SampledCurve {
        self.sample_trimmed(curve, None, None, true, diag)
    }

    /// Sample a curve restricted by trim selectors
    pub fn sample_trimmed(
        &self,
        curve: &CurveEntity,
        trim1: Option<&TrimSelect>,
        trim2: Option<&TrimSelect>,
        sense_agreement: bool,
        diag: &mut Diagnostics,
    ) -> SampledCurve {
        let mut sampled = SampledCurve::default();
        self.sample_into(
            curve,
            trim1,
            trim2,
            sense_agreement,
            0,
            &mut sampled.points,
            &mut sampled.segment_starts,
            diag,
        );
        sampled
    }

    #[allow(clippy::too_many_arguments)]
    fn sample_into(
        &self,
        curve: &CurveEntity,
        trim1: Option<&TrimSelect>,
        trim2: Option<&TrimSelect>,
        sense_agreement: bool,
        depth: u32,
        points: &mut Vec<Point3<f64>>,
        segment_starts: &mut Vec<Point3<f64>>,
        diag: &mut Diagnostics,
    ) {
        if depth > MAX_CURVE_DEPTH {
            diag.report(
                COMPONENT,
                curve.kind_name(),
                curve.id,
                "curve nesting exceeds depth limit, possible reference cycle",
            );
            return;
        }

        match &curve.kind {
            CurveKind::Line(line) => {
                self.sample_line(curve, line, trim1, trim2, points, segment_starts, diag)
            }
            CurveKind::Polyline(polyline) => {
                if polyline.points.is_empty() {
                    return;
                }
                let lf = self.settings.length_factor;
                let scaled: Vec<Point3<f64>> = polyline
                    .points
                    .iter()
                    .map(|p| Point3::from(p.coords * lf))
                    .collect();
                segment_starts.push(scaled[0]);
                points.extend_from_slice(&scaled);
            }
            CurveKind::Circle(circle) => self.sample_circle(
                curve,
                circle,
                trim1,
                trim2,
                sense_agreement,
                points,
                segment_starts,
                diag,
            ),
            CurveKind::Ellipse(ellipse) => {
                self.sample_ellipse(curve, ellipse, points, segment_starts, diag)
            }
            CurveKind::BSpline(bspline) => {
                if bspline.control_points.len() < 2 {
                    diag.report(
                        COMPONENT,
                        "BSplineCurve",
                        curve.id,
                        "not enough control points",
                    );
                    return;
                }
                let lf = self.settings.length_factor;
                let control: Vec<Point3<f64>> = bspline
                    .control_points
                    .iter()
                    .map(|p| Point3::from(p.coords * lf))
                    .collect();
                let sampled = spline::sample_bspline(
                    bspline.degree,
                    &control,
                    self.settings.vertices_per_circle as usize,
                );
                if let Some(first) = sampled.first() {
                    segment_starts.push(*first);
                }
                geom::append_points_to_curve(&sampled, points);
            }
            CurveKind::Composite(composite) => {
                for segment in &composite.segments {
                    let Some(child) = self.store.curve(segment.parent_curve) else {
                        diag.report(
                            COMPONENT,
                            "CompositeCurve",
                            curve.id,
                            format!("segment curve {} not found", segment.parent_curve),
                        );
                        return;
                    };
                    let mut segment_points = Vec::new();
                    self.sample_into(
                        child,
                        None,
                        None,
                        true,
                        depth + 1,
                        &mut segment_points,
                        segment_starts,
                        diag,
                    );
                    if !segment_points.is_empty() {
                        geom::append_points_to_curve(&segment_points, points);
                    }
                }
            }
            CurveKind::Trimmed(trimmed) => {
                let Some(basis) = self.store.curve(trimmed.basis_curve) else {
                    diag.report(
                        COMPONENT,
                        "TrimmedCurve",
                        curve.id,
                        format!("basis curve {} not found", trimmed.basis_curve),
                    );
                    return;
                };
                let mut basis_points = Vec::new();
                self.sample_into(
                    basis,
                    trimmed.trim1.as_ref(),
                    trimmed.trim2.as_ref(),
                    trimmed.sense_agreement,
                    depth + 1,
                    &mut basis_points,
                    segment_starts,
                    diag,
                );
                geom::append_points_to_curve(&basis_points, points);
            }
            CurveKind::Unsupported(unsupported) => {
                diag.report(
                    COMPONENT,
                    unsupported.name(),
                    curve.id,
                    "curve variant not implemented",
                );
            }
        }
    }

    fn sample_line(
        &self,
        entity: &CurveEntity,
        line: &LineCurve,
        trim1: Option<&TrimSelect>,
        trim2: Option<&TrimSelect>,
        points: &mut Vec<Point3<f64>>,
        segment_starts: &mut Vec<Point3<f64>>,
        diag: &mut Diagnostics,
    ) {
        let Some(vector) = &line.direction else {
            diag.report(COMPONENT, "Line", entity.id, "no direction vector");
            return;
        };
        if vector.orientation.norm() < 1e-12 {
            diag.report(COMPONENT, "Line", entity.id, "zero-length direction");
            return;
        }

        let lf = self.settings.length_factor;
        let mut origin = Point3::from(line.point.coords * lf);
        let direction = vector.orientation.normalize();
        let magnitude = vector.magnitude * lf;

        match trim1 {
            Some(TrimSelect::Parameter(param)) => {
                origin += direction * (param * lf);
            }
            Some(TrimSelect::Cartesian(point)) => {
                let trim_point = Point3::from(point.coords * lf);
                let closest = geom::closest_point_on_line(&trim_point, &origin, &direction);
                if (closest - trim_point).norm() < TRIM_EPS {
                    origin = trim_point;
                }
                // off-line trim points are ignored, origin stays untrimmed
            }
            None => {}
        }

        let mut end = origin + direction * magnitude;
        match trim2 {
            Some(TrimSelect::Parameter(param)) => {
                end = origin + direction * (param * lf);
            }
            Some(TrimSelect::Cartesian(point)) => {
                let trim_point = Point3::from(point.coords * lf);
                let closest = geom::closest_point_on_line(&trim_point, &origin, &direction);
                if (closest - trim_point).norm() < TRIM_EPS {
                    end = trim_point;
                }
            }
            None => {}
        }

        geom::append_points_to_curve(&[origin, end], points);
        segment_starts.push(origin);
    }

    #[allow(clippy::too_many_arguments)]
    fn sample_circle(
        &self,
        entity: &CurveEntity,
        circle: &CircleCurve,
        trim1: Option<&TrimSelect>,
        trim2: Option<&TrimSelect>,
        sense_agreement: bool,
        points: &mut Vec<Point3<f64>>,
        segment_starts: &mut Vec<Point3<f64>>,
        diag: &mut Diagnostics,
    ) {
        let Some(position) = &circle.position else {
            diag.report(COMPONENT, "Circle", entity.id, "no position");
            return;
        };

        let lf = self.settings.length_factor;
        let radius = circle.radius * lf;
        let center = position.transform_point(&Point3::origin());

        let trim_angle1 = self.resolve_circle_trim(entity, trim1, &center, radius, 0.0, diag);
        let trim_angle2 = self.resolve_circle_trim(entity, trim2, &center, radius, TAU, diag);

        let start_angle = trim_angle1;
        let mut opening_angle = if sense_agreement {
            if trim_angle1 < trim_angle2 {
                trim_angle2 - trim_angle1
            } else {
                // arc passes the zero angle
                trim_angle2 - trim_angle1 + TAU
            }
        } else if trim_angle1 > trim_angle2 {
            trim_angle2 - trim_angle1
        } else {
            trim_angle2 - trim_angle1 - TAU
        };

        if opening_angle > 0.0 {
            while opening_angle > TAU {
                opening_angle -= TAU;
            }
        } else {
            while opening_angle < -TAU {
                opening_angle += TAU;
            }
        }

        let mut num_segments =
            (self.settings.vertices_per_circle as f64 * (opening_angle.abs() / TAU)) as u32;
        if num_segments < self.settings.min_vertices_per_arc {
            num_segments = self.settings.min_vertices_per_arc;
        }
        let num_segments = num_segments.max(2);

        let mut arc_points = Vec::with_capacity(num_segments as usize);
        for i in 0..num_segments {
            let angle = start_angle + opening_angle * (i as f64 / (num_segments - 1) as f64);
            let local = Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
            arc_points.push(position.transform_point(&local));
        }

        segment_starts.push(arc_points[0]);
        geom::append_points_to_curve(&arc_points, points);
    }

    /// Resolve a circle trim selector to an angle in radians
    fn resolve_circle_trim(
        &self,
        entity: &CurveEntity,
        trim: Option<&TrimSelect>,
        center: &Point3<f64>,
        radius: f64,
        default: f64,
        diag: &mut Diagnostics,
    ) -> f64 {
        match trim {
            Some(TrimSelect::Parameter(param)) => param * self.settings.angle_factor,
            Some(TrimSelect::Cartesian(point)) => {
                let trim_point = Point3::from(point.coords * self.settings.length_factor);
                let angle = angle_on_circle(center, radius, &trim_point);
                if angle < 0.0 {
                    diag.report(
                        COMPONENT,
                        "Circle",
                        entity.id,
                        "trim point does not lie on the circle",
                    );
                    default
                } else {
                    angle
                }
            }
            None => default,
        }
    }

    fn sample_ellipse(
        &self,
        entity: &CurveEntity,
        ellipse: &EllipseCurve,
        points: &mut Vec<Point3<f64>>,
        segment_starts: &mut Vec<Point3<f64>>,
        diag: &mut Diagnostics,
    ) {
        let Some(position) = &ellipse.position else {
            diag.report(COMPONENT, "Ellipse", entity.id, "no position");
            return;
        };
        let (Some(semi_axis1), Some(semi_axis2)) = (ellipse.semi_axis1, ellipse.semi_axis2) else {
            diag.report(COMPONENT, "Ellipse", entity.id, "missing semi-axis");
            return;
        };

        let lf = self.settings.length_factor;
        let x_radius = semi_axis1 * lf;
        let y_radius = semi_axis2 * lf;

        // Trimming is not supported for ellipses: always a full closed
        // sweep of vertices_per_circle points.
        let num_segments = self.settings.vertices_per_circle.max(3);
        let mut ellipse_points = Vec::with_capacity(num_segments as usize);
        for i in 0..num_segments {
            let angle = TAU * (i as f64 / num_segments as f64);
            let local = Point3::new(x_radius * angle.cos(), y_radius * angle.sin(), 0.0);
            ellipse_points.push(position.transform_point(&local));
        }

        segment_starts.push(ellipse_points[0]);
        geom::append_points_to_curve(&ellipse_points, points);
    }
}

/// Angle of `point` on the circle around `center` with `radius`
///
/// Returns −1.0 when the point's distance from the center deviates from
/// the radius by more than the trim tolerance; otherwise the angle in
/// [0, 2π). The near-right-angle case (cos ≈ 0) is resolved from the sign
/// of the y component to avoid instability.
pub fn angle_on_circle(center: &Point3<f64>, radius: f64, point: &Point3<f64>) -> f64 {
    let mut result_angle = -1.0;
    let center_to_point = point - center;

    if (center_to_point.norm() - radius).abs() < TRIM_EPS {
        let direction = center_to_point.normalize();
        let cos_angle = direction.dot(&Vector3::x());

        if cos_angle.abs() < TRIM_EPS {
            if center_to_point.y > 0.0 {
                result_angle = FRAC_PI_2;
            } else if center_to_point.y < 0.0 {
                result_angle = PI * 1.5;
            }
        } else if center_to_point.y > 0.0 {
            result_angle = cos_angle.acos();
        } else if center_to_point.y < 0.0 {
            result_angle = TAU - cos_angle.acos();
        } else {
            // exactly on the x axis
            result_angle = if cos_angle > 0.0 { 0.0 } else { PI };
        }
    }
    result_angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Matrix4;
    use steptess_model::{
        BSplineCurve, CompositeCurve, CompositeSegment, InMemoryStore, LineVector, PolylineCurve,
        TrimmedCurve, UnsupportedCurve,
    };

    fn line_entity(id: u32, magnitude: f64) -> CurveEntity {
        CurveEntity::new(
            id,
            CurveKind::Line(LineCurve {
                point: Point3::new(0.0, 0.0, 0.0),
                direction: Some(LineVector {
                    orientation: Vector3::new(1.0, 0.0, 0.0),
                    magnitude,
                }),
            }),
        )
    }

    fn circle_entity(id: u32, radius: f64) -> CurveEntity {
        CurveEntity::new(
            id,
            CurveKind::Circle(CircleCurve {
                position: Some(Matrix4::identity()),
                radius,
            }),
        )
    }

    #[test]
    fn test_line_untrimmed_two_points() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let sampled = sampler.sample(&line_entity(1, 10.0), &mut diag);

        assert_eq!(sampled.points.len(), 2);
        assert_relative_eq!(sampled.points[0].x, 0.0);
        assert_relative_eq!(sampled.points[1].x, 10.0);
        assert_relative_eq!(sampled.points[1].y, 0.0);
        assert_eq!(sampled.segment_starts.len(), 1);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_line_missing_direction_reported() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let entity = CurveEntity::new(
            2,
            CurveKind::Line(LineCurve {
                point: Point3::new(0.0, 0.0, 0.0),
                direction: None,
            }),
        );
        let sampled = sampler.sample(&entity, &mut diag);

        assert!(sampled.points.is_empty());
        assert_eq!(diag.len(), 1);
        assert!(diag.lines().next().unwrap().contains("Line #2"));
    }

    #[test]
    fn test_line_cartesian_trim_off_line_ignored() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let trim1 = TrimSelect::Cartesian(Point3::new(2.0, 5.0, 0.0));
        let sampled = sampler.sample_trimmed(
            &line_entity(3, 10.0),
            Some(&trim1),
            None,
            true,
            &mut diag,
        );

        // trim point is 5 units off the line, so the origin stays untrimmed
        assert_relative_eq!(sampled.points[0].x, 0.0);
    }

    #[test]
    fn test_line_cartesian_trim_on_line_applied() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let trim1 = TrimSelect::Cartesian(Point3::new(2.0, 0.0, 0.0));
        let trim2 = TrimSelect::Cartesian(Point3::new(7.0, 0.0, 0.0));
        let sampled = sampler.sample_trimmed(
            &line_entity(4, 10.0),
            Some(&trim1),
            Some(&trim2),
            true,
            &mut diag,
        );

        assert_relative_eq!(sampled.points[0].x, 2.0);
        assert_relative_eq!(sampled.points[1].x, 7.0);
    }

    #[test]
    fn test_circle_half_arc_point_count() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let trim1 = TrimSelect::Parameter(0.0);
        let trim2 = TrimSelect::Parameter(PI);
        let sampled = sampler.sample_trimmed(
            &circle_entity(5, 1.0),
            Some(&trim1),
            Some(&trim2),
            true,
            &mut diag,
        );

        let expected = (settings.vertices_per_circle as f64 * 0.5) as u32;
        let expected = expected.max(settings.min_vertices_per_arc) as usize;
        assert_eq!(sampled.points.len(), expected);
        // end point of the half arc is (-1, 0)
        let last = sampled.points.last().unwrap();
        assert_relative_eq!(last.x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(last.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_circle_sense_disagreement_sweeps_backwards() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let trim1 = TrimSelect::Parameter(0.0);
        let trim2 = TrimSelect::Parameter(PI);
        let sampled = sampler.sample_trimmed(
            &circle_entity(6, 1.0),
            Some(&trim1),
            Some(&trim2),
            false,
            &mut diag,
        );

        // opening is -π: second point dips below the x axis
        assert!(sampled.points[1].y < 0.0);
    }

    #[test]
    fn test_circle_trim_roundtrip_through_angle_on_circle() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let trim1 = TrimSelect::Parameter(0.25);
        let trim2 = TrimSelect::Parameter(2.5);
        let sampled = sampler.sample_trimmed(
            &circle_entity(7, 2.0),
            Some(&trim1),
            Some(&trim2),
            true,
            &mut diag,
        );

        let center = Point3::new(0.0, 0.0, 0.0);
        let first = angle_on_circle(&center, 2.0, &sampled.points[0]);
        let last = angle_on_circle(&center, 2.0, sampled.points.last().unwrap());
        assert_relative_eq!(first, 0.25, epsilon = 1e-6);
        assert_relative_eq!(last, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_angle_on_circle_rejects_off_circle_point() {
        let center = Point3::new(1.0, 1.0, 0.0);
        let angle = angle_on_circle(&center, 2.0, &Point3::new(5.0, 1.0, 0.0));
        assert_relative_eq!(angle, -1.0);
    }

    #[test]
    fn test_angle_on_circle_quadrants() {
        let center = Point3::new(0.0, 0.0, 0.0);
        assert_relative_eq!(angle_on_circle(&center, 1.0, &Point3::new(1.0, 0.0, 0.0)), 0.0);
        assert_relative_eq!(
            angle_on_circle(&center, 1.0, &Point3::new(0.0, 1.0, 0.0)),
            FRAC_PI_2
        );
        assert_relative_eq!(
            angle_on_circle(&center, 1.0, &Point3::new(-1.0, 0.0, 0.0)),
            PI
        );
        assert_relative_eq!(
            angle_on_circle(&center, 1.0, &Point3::new(0.0, -1.0, 0.0)),
            PI * 1.5
        );
    }

    #[test]
    fn test_ellipse_full_sweep() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let entity = CurveEntity::new(
            8,
            CurveKind::Ellipse(EllipseCurve {
                position: Some(Matrix4::identity()),
                semi_axis1: Some(3.0),
                semi_axis2: Some(1.0),
            }),
        );
        let sampled = sampler.sample(&entity, &mut diag);

        assert_eq!(
            sampled.points.len(),
            settings.vertices_per_circle as usize
        );
        assert_relative_eq!(sampled.points[0].x, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ellipse_missing_axis_reported() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let entity = CurveEntity::new(
            9,
            CurveKind::Ellipse(EllipseCurve {
                position: Some(Matrix4::identity()),
                semi_axis1: Some(3.0),
                semi_axis2: None,
            }),
        );
        let sampled = sampler.sample(&entity, &mut diag);

        assert!(sampled.points.is_empty());
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_polyline_scaled_points() {
        let settings = TessellationSettings::with_unit_factors(0.001, 1.0);
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let entity = CurveEntity::new(
            10,
            CurveKind::Polyline(PolylineCurve {
                points: vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1000.0, 0.0, 0.0),
                    Point3::new(1000.0, 2000.0, 0.0),
                ],
            }),
        );
        let sampled = sampler.sample(&entity, &mut diag);

        assert_eq!(sampled.points.len(), 3);
        assert_relative_eq!(sampled.points[1].x, 1.0);
        assert_relative_eq!(sampled.points[2].y, 2.0);
        assert_eq!(sampled.segment_starts.len(), 1);
    }

    #[test]
    fn test_composite_concatenates_and_dedups_junctions() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let first = store.insert_curve(CurveEntity::new(
            11,
            CurveKind::Polyline(PolylineCurve {
                points: vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            }),
        ));
        let second = store.insert_curve(CurveEntity::new(
            12,
            CurveKind::Polyline(PolylineCurve {
                points: vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
            }),
        ));

        let composite = CurveEntity::new(
            13,
            CurveKind::Composite(CompositeCurve {
                segments: vec![
                    CompositeSegment {
                        parent_curve: first,
                        same_sense: true,
                    },
                    CompositeSegment {
                        parent_curve: second,
                        same_sense: true,
                    },
                ],
            }),
        );

        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();
        let sampled = sampler.sample(&composite, &mut diag);

        // shared junction (1,0,0) appears once
        assert_eq!(sampled.points.len(), 3);
        assert_eq!(sampled.segment_starts.len(), 2);
    }

    #[test]
    fn test_trimmed_curve_substitutes_trims() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let basis = store.insert_curve(line_entity(14, 10.0));

        let trimmed = CurveEntity::new(
            15,
            CurveKind::Trimmed(TrimmedCurve {
                basis_curve: basis,
                trim1: Some(TrimSelect::Parameter(2.0)),
                trim2: Some(TrimSelect::Parameter(8.0)),
                sense_agreement: true,
            }),
        );

        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();
        let sampled = sampler.sample(&trimmed, &mut diag);

        assert_eq!(sampled.points.len(), 2);
        assert_relative_eq!(sampled.points[0].x, 2.0);
        assert_relative_eq!(sampled.points[1].x, 8.0);
    }

    #[test]
    fn test_cyclic_composite_bounded() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        // curve #20 contains itself as its only segment
        store.insert_curve(CurveEntity::new(
            20,
            CurveKind::Composite(CompositeCurve {
                segments: vec![CompositeSegment {
                    parent_curve: steptess_model::EntityId(20),
                    same_sense: true,
                }],
            }),
        ));

        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();
        let entity = store.curve(steptess_model::EntityId(20)).unwrap();
        let sampled = sampler.sample(entity, &mut diag);

        assert!(sampled.points.is_empty());
        assert!(!diag.is_empty());
        assert!(diag.lines().any(|l| l.contains("depth limit")));
    }

    #[test]
    fn test_bspline_sampled_at_circle_density() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let entity = CurveEntity::new(
            22,
            CurveKind::BSpline(BSplineCurve {
                degree: 2,
                control_points: vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 2.0, 0.0),
                    Point3::new(2.0, 0.0, 0.0),
                ],
            }),
        );
        let sampled = sampler.sample(&entity, &mut diag);

        assert_eq!(
            sampled.points.len(),
            settings.vertices_per_circle as usize
        );
        assert_relative_eq!(sampled.points[0].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sampled.points.last().unwrap().x, 2.0, epsilon = 1e-12);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_unsupported_variant_empty_with_diagnostic() {
        let settings = TessellationSettings::default();
        let store = InMemoryStore::new();
        let sampler = CurveSampler::new(&settings, &store);
        let mut diag = Diagnostics::new();

        let entity = CurveEntity::new(
            21,
            CurveKind::Unsupported(UnsupportedCurve::OffsetCurve),
        );
        let sampled = sampler.sample(&entity, &mut diag);

        assert!(sampled.points.is_empty());
        assert_eq!(diag.len(), 1);
        assert!(diag.lines().next().unwrap().contains("OffsetCurve"));
    }
}
