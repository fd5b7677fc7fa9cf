// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loop assembly
//!
//! Converts one topological loop into an ordered, deduplicated 3D point
//! sequence. Polygon loops copy and clean their explicit points; edge
//! chains sample each edge's curve in order.

use crate::curve::CurveSampler;
use crate::diagnostics::Diagnostics;
use crate::geom;
use nalgebra::Point3;
use steptess_model::{EdgeKind, EntityStore, LoopEntity, LoopKind};

const COMPONENT: &str = "LoopAssembler";

impl CurveSampler<'_> {
    /// Assemble a loop entity into its 3D point sequence
    ///
    /// Polygon loops: points are unit-scaled, consecutive duplicates are
    /// elided, and an explicit closing point (first == last) is dropped.
    /// Edge loops: each edge's curve is sampled untrimmed and concatenated
    /// in edge order, sharing junction vertices; edges without plain curve
    /// geometry are skipped with a diagnostic.
    pub fn assemble_loop(
        &self,
        loop_entity: &LoopEntity,
        diag: &mut Diagnostics,
    ) -> Vec<Point3<f64>> {
        match &loop_entity.kind {
            LoopKind::Poly { points } => {
                let lf = self.settings().length_factor;
                let mut loop_points: Vec<Point3<f64>> = Vec::with_capacity(points.len());

                for point in points {
                    let vertex = Point3::from(point.coords * lf);
                    if let Some(previous) = loop_points.last() {
                        if geom::points_coincide(previous, &vertex) {
                            continue;
                        }
                    }
                    loop_points.push(vertex);
                }

                // drop explicit closing points
                while loop_points.len() > 2 {
                    let first = loop_points[0];
                    let last = *loop_points.last().unwrap();
                    if geom::points_coincide(&first, &last) {
                        loop_points.pop();
                    } else {
                        break;
                    }
                }

                loop_points
            }
            LoopKind::Edge { edges } => {
                let mut loop_points: Vec<Point3<f64>> = Vec::new();

                for oriented_edge in edges {
                    let Some(edge) = self.store().edge(oriented_edge.edge) else {
                        diag.report(
                            COMPONENT,
                            "EdgeLoop",
                            loop_entity.id,
                            format!("edge {} not found", oriented_edge.edge),
                        );
                        continue;
                    };

                    match &edge.kind {
                        EdgeKind::Curve { geometry, .. } => {
                            let Some(curve) = self.store().curve(*geometry) else {
                                diag.report(
                                    COMPONENT,
                                    "EdgeCurve",
                                    edge.id,
                                    format!("edge geometry {geometry} not found"),
                                );
                                continue;
                            };
                            let sampled = self.sample(curve, diag);
                            geom::append_points_to_curve(&sampled.points, &mut loop_points);
                        }
                        EdgeKind::SubEdge { .. } => {
                            diag.report(COMPONENT, "SubEdge", edge.id, "sub-edges not implemented");
                        }
                        EdgeKind::Vertex { .. } => {
                            diag.report(
                                COMPONENT,
                                "VertexEdge",
                                edge.id,
                                "vertex-only edge skipped",
                            );
                        }
                    }
                }

                loop_points
            }
        }
    }
}
