// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face and face-list conversion
//!
//! Drives the full tessellation pipeline for one face: assemble each
//! boundary loop (outer first, holes after), project everything onto one
//! working plane chosen from the outer loop, incorporate the holes,
//! triangulate, and weld the result into the shared per-shell mesh.
//!
//! Failure granularity follows the face structure: a broken hole degrades
//! the face, a broken outer boundary empties it, and an empty face is the
//! only thing that fails a face-list conversion.

use crate::curve::CurveSampler;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::geom;
use crate::mesh::PolygonMesh;
use crate::projection::{self, ProjectionPlane};
use crate::settings::TessellationSettings;
use crate::triangulate;
use nalgebra::{Matrix4, Point2, Point3};
use steptess_model::{EntityId, EntityStore, FaceBound, FaceEntity, ShellEntity};

const COMPONENT: &str = "FaceConverter";

/// Result of converting a single face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceStatus {
    /// All boundaries converted
    Complete,
    /// Face emitted best-effort with holes dropped or loops skipped
    Degraded,
    /// No usable polygon data at all
    Empty,
}

/// Result of converting a face list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceSetOutcome {
    Complete,
    /// Some faces were emitted in degraded form
    Partial { degraded_faces: usize },
}

/// Converts faces of a shell into a welded triangle mesh
pub struct FaceConverter<'a> {
    sampler: CurveSampler<'a>,
}

impl<'a> FaceConverter<'a> {
    pub fn new(settings: &'a TessellationSettings, store: &'a dyn EntityStore) -> Self {
        Self {
            sampler: CurveSampler::new(settings, store),
        }
    }

    pub fn sampler(&self) -> &CurveSampler<'a> {
        &self.sampler
    }

    /// Convert a whole shell into a fresh mesh
    pub fn convert_shell(
        &self,
        shell: &ShellEntity,
        pos: &Matrix4<f64>,
        diag: &mut Diagnostics,
    ) -> Result<(PolygonMesh, FaceSetOutcome)> {
        let mut mesh = PolygonMesh::new();
        let outcome = self.convert_face_list(&shell.faces, pos, &mut mesh, diag)?;
        Ok((mesh, outcome))
    }

    /// Convert an ordered face list into the shared mesh accumulator
    ///
    /// Faces are processed strictly sequentially; the accumulator is the
    /// single shared mutable state of a conversion. A face that yields no
    /// polygon data at all fails the whole call with the face ID range;
    /// everything already welded into `mesh` stays valid.
    pub fn convert_face_list(
        &self,
        faces: &[EntityId],
        pos: &Matrix4<f64>,
        mesh: &mut PolygonMesh,
        diag: &mut Diagnostics,
    ) -> Result<FaceSetOutcome> {
        let (Some(&first), Some(&last)) = (faces.first(), faces.last()) else {
            return Ok(FaceSetOutcome::Complete);
        };

        let mut degraded_faces = 0usize;

        for &face_id in faces {
            let Some(face) = self.sampler.store().face(face_id) else {
                diag.report(COMPONENT, "Face", face_id, "face entity not found");
                return Err(Error::FaceListConversion { first, last });
            };

            match self.convert_face(face, pos, mesh, diag) {
                FaceStatus::Complete => {}
                FaceStatus::Degraded => degraded_faces += 1,
                FaceStatus::Empty => {
                    return Err(Error::FaceListConversion { first, last });
                }
            }
        }

        if degraded_faces == 0 {
            Ok(FaceSetOutcome::Complete)
        } else {
            Ok(FaceSetOutcome::Partial { degraded_faces })
        }
    }

    /// Convert one face into the shared mesh accumulator
    pub fn convert_face(
        &self,
        face: &FaceEntity,
        pos: &Matrix4<f64>,
        mesh: &mut PolygonMesh,
        diag: &mut Diagnostics,
    ) -> FaceStatus {
        // outer boundary must come first; holes keep their relative order
        let mut bounds: Vec<&FaceBound> = Vec::with_capacity(face.bounds.len());
        for bound in &face.bounds {
            if bound.is_outer {
                bounds.insert(0, bound);
            } else {
                bounds.push(bound);
            }
        }

        let mut face_vertices_2d: Vec<Vec<Point2<f64>>> = Vec::new();
        let mut face_vertices_3d: Vec<Vec<Point3<f64>>> = Vec::new();
        let mut plane: Option<ProjectionPlane> = None;
        let mut face_loop_reversed = false;
        let mut degraded = false;

        for (bound_index, bound) in bounds.iter().enumerate() {
            let Some(loop_entity) = self.sampler.store().boundary_loop(bound.bound) else {
                diag.report(
                    COMPONENT,
                    "Face",
                    face.id,
                    format!("loop {} not found", bound.bound),
                );
                if bound_index == 0 {
                    break;
                }
                continue;
            };

            let mut loop_points = self.sampler.assemble_loop(loop_entity, diag);
            for vertex in &mut loop_points {
                *vertex = pos.transform_point(vertex);
            }

            if loop_points.len() < 3 {
                diag.report(
                    COMPONENT,
                    "Face",
                    face.id,
                    format!("loop {} has fewer than 3 vertices", loop_entity.id),
                );
                if bound_index == 0 {
                    break;
                }
                continue;
            }

            if !bound.orientation {
                loop_points.reverse();
            }

            // a lone triangle needs no projection or triangulation
            if bound_index == 0 && bounds.len() == 1 && loop_points.len() == 3 {
                let i0 = mesh.weld_vertex(&loop_points[0]);
                let i1 = mesh.weld_vertex(&loop_points[1]);
                let i2 = mesh.weld_vertex(&loop_points[2]);
                mesh.add_triangle(i0, i1, i2, false);
                return FaceStatus::Complete;
            }

            if bound_index == 0 {
                let normal = geom::polygon_normal(&loop_points);
                plane = projection::select_plane(&normal);
                if plane.is_none() {
                    diag.report(
                        COMPONENT,
                        "Face",
                        face.id,
                        "outer loop has no projectable normal",
                    );
                    break;
                }
            }
            let Some(plane) = plane else { break };

            let mut loop_2d = projection::project_loop(plane, &loop_points);
            if loop_2d.len() < 3 {
                degraded = true;
                diag.report(
                    COMPONENT,
                    "Face",
                    face.id,
                    format!("projected loop {} collapsed", loop_entity.id),
                );
                continue;
            }

            let reversed = projection::normalize_winding(bound_index, &mut loop_2d, &mut loop_points);
            if bound_index == 0 && reversed {
                face_loop_reversed = true;
            }

            face_vertices_2d.push(loop_2d);
            face_vertices_3d.push(loop_points);
        }

        if face_vertices_2d.is_empty() {
            return FaceStatus::Empty;
        }

        // merge holes into the outer boundary; on failure fall back to the
        // outer loop alone so the face is still emitted best-effort
        let (merged_2d, merged_3d) = match triangulate::incorporate_holes(&face_vertices_2d) {
            Ok(pairs) => {
                let merged_2d: Vec<Point2<f64>> = pairs
                    .iter()
                    .map(|&(loop_i, vertex_i)| face_vertices_2d[loop_i][vertex_i])
                    .collect();
                let merged_3d: Vec<Point3<f64>> = pairs
                    .iter()
                    .map(|&(loop_i, vertex_i)| face_vertices_3d[loop_i][vertex_i])
                    .collect();
                (merged_2d, merged_3d)
            }
            Err(error) => {
                degraded = true;
                diag.report(
                    COMPONENT,
                    "Face",
                    face.id,
                    format!("hole incorporation failed ({error}), holes dropped"),
                );
                (face_vertices_2d[0].clone(), face_vertices_3d[0].clone())
            }
        };

        match self.triangulate_face(&merged_2d, &merged_3d, face_loop_reversed, mesh) {
            Ok(()) => {
                if degraded {
                    FaceStatus::Degraded
                } else {
                    FaceStatus::Complete
                }
            }
            Err(error) => {
                diag.report(
                    COMPONENT,
                    "Face",
                    face.id,
                    format!("triangulation failed: {error}"),
                );
                FaceStatus::Empty
            }
        }
    }

    /// Triangulate a merged boundary and weld it into the mesh
    fn triangulate_face(
        &self,
        vertices_2d: &[Point2<f64>],
        vertices_3d: &[Point3<f64>],
        face_loop_reversed: bool,
        mesh: &mut PolygonMesh,
    ) -> Result<()> {
        let mut triangles = triangulate::triangulate(vertices_2d)?;
        triangulate::improve(vertices_2d, &mut triangles);

        let mesh_indices: Vec<u32> = vertices_3d
            .iter()
            .map(|vertex| mesh.weld_vertex(vertex))
            .collect();

        for tri in triangles {
            mesh.add_triangle(
                mesh_indices[tri[0]],
                mesh_indices[tri[1]],
                mesh_indices[tri[2]],
                face_loop_reversed,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use steptess_model::{InMemoryStore, LoopEntity, LoopKind};

    fn poly_loop(id: u32, points: Vec<Point3<f64>>) -> LoopEntity {
        LoopEntity::new(id, LoopKind::Poly { points })
    }

    fn bound(id: u32, loop_id: EntityId, is_outer: bool) -> FaceBound {
        FaceBound {
            id: EntityId(id),
            bound: loop_id,
            orientation: true,
            is_outer,
        }
    }

    fn mesh_area(mesh: &PolygonMesh) -> f64 {
        mesh.triangles()
            .iter()
            .map(|t| {
                let a = mesh.vertices()[t[0] as usize];
                let b = mesh.vertices()[t[1] as usize];
                let c = mesh.vertices()[t[2] as usize];
                (b - a).cross(&(c - a)).norm() / 2.0
            })
            .sum()
    }

    #[test]
    fn test_triangle_face_fast_path() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let loop_id = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        ));
        let face = FaceEntity::new(2, vec![bound(3, loop_id, true)]);

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        let status = converter.convert_face(&face, &Matrix4::identity(), &mut mesh, &mut diag);

        assert_eq!(status, FaceStatus::Complete);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        // original, non-reversed order
        assert_eq!(mesh.triangles()[0], [0, 1, 2]);
    }

    #[test]
    fn test_square_face_two_triangles() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let loop_id = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(4.0, 4.0, 0.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
        ));
        let face = FaceEntity::new(2, vec![bound(3, loop_id, true)]);

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        let status = converter.convert_face(&face, &Matrix4::identity(), &mut mesh, &mut diag);

        assert_eq!(status, FaceStatus::Complete);
        assert_eq!(mesh.triangle_count(), 2);
        assert_relative_eq!(mesh_area(&mesh), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_face_with_hole() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let outer = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(4.0, 4.0, 0.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
        ));
        // hole wound opposite to the outer loop
        let hole = store.insert_loop(poly_loop(
            2,
            vec![
                Point3::new(1.0, 3.0, 0.0),
                Point3::new(3.0, 3.0, 0.0),
                Point3::new(3.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
        ));
        let face = FaceEntity::new(
            3,
            vec![bound(4, outer, true), bound(5, hole, false)],
        );

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        let status = converter.convert_face(&face, &Matrix4::identity(), &mut mesh, &mut diag);

        assert_eq!(status, FaceStatus::Complete);
        assert_relative_eq!(mesh_area(&mesh), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_face_with_unreachable_hole_degrades() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let outer = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(4.0, 4.0, 0.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
        ));
        // "hole" entirely outside the outer boundary
        let hole = store.insert_loop(poly_loop(
            2,
            vec![
                Point3::new(6.0, 3.0, 0.0),
                Point3::new(8.0, 3.0, 0.0),
                Point3::new(8.0, 1.0, 0.0),
                Point3::new(6.0, 1.0, 0.0),
            ],
        ));
        let face = FaceEntity::new(
            3,
            vec![bound(4, outer, true), bound(5, hole, false)],
        );

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        let status = converter.convert_face(&face, &Matrix4::identity(), &mut mesh, &mut diag);

        assert_eq!(status, FaceStatus::Degraded);
        // outer loop emitted alone
        assert_relative_eq!(mesh_area(&mesh), 16.0, epsilon = 1e-9);
        assert!(diag.lines().any(|l| l.contains("holes dropped")));
    }

    #[test]
    fn test_reversed_outer_loop_flips_triangles() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        // clockwise square: projector reverses it and marks the face
        let loop_id = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 4.0, 0.0),
                Point3::new(4.0, 4.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
            ],
        ));
        let face = FaceEntity::new(2, vec![bound(3, loop_id, true)]);

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        converter.convert_face(&face, &Matrix4::identity(), &mut mesh, &mut diag);

        // emitted triangles wind clockwise in the xy plane (normal -z),
        // matching the input loop's implied orientation
        for tri in mesh.triangles() {
            let a = mesh.vertices()[tri[0] as usize];
            let b = mesh.vertices()[tri[1] as usize];
            let c = mesh.vertices()[tri[2] as usize];
            assert!((b - a).cross(&(c - a)).z < 0.0);
        }
    }

    #[test]
    fn test_bound_orientation_false_reverses_loop() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        // clockwise points plus orientation=false cancel out
        let loop_id = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
            ],
        ));
        let mut face_bound = bound(3, loop_id, true);
        face_bound.orientation = false;
        let face = FaceEntity::new(2, vec![face_bound]);

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        converter.convert_face(&face, &Matrix4::identity(), &mut mesh, &mut diag);

        for tri in mesh.triangles() {
            let a = mesh.vertices()[tri[0] as usize];
            let b = mesh.vertices()[tri[1] as usize];
            let c = mesh.vertices()[tri[2] as usize];
            assert!((b - a).cross(&(c - a)).z > 0.0);
        }
    }

    #[test]
    fn test_face_list_shares_welded_vertices() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        // two triangles sharing the edge (1,0,0)-(0,1,0)
        let l1 = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        ));
        let l2 = store.insert_loop(poly_loop(
            2,
            vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        ));
        let f1 = store.insert_face(FaceEntity::new(3, vec![bound(5, l1, true)]));
        let f2 = store.insert_face(FaceEntity::new(4, vec![bound(6, l2, true)]));

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        let outcome = converter
            .convert_face_list(&[f1, f2], &Matrix4::identity(), &mut mesh, &mut diag)
            .unwrap();

        assert_eq!(outcome, FaceSetOutcome::Complete);
        assert_eq!(mesh.triangle_count(), 2);
        // 6 corners weld down to 4 shared vertices
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_face_list_fails_with_id_range_on_empty_face() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let good = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        ));
        let bad = store.insert_loop(poly_loop(
            2,
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
        ));
        let f1 = store.insert_face(FaceEntity::new(3, vec![bound(5, good, true)]));
        let f2 = store.insert_face(FaceEntity::new(4, vec![bound(6, bad, true)]));

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        let err = converter
            .convert_face_list(&[f1, f2], &Matrix4::identity(), &mut mesh, &mut diag)
            .unwrap_err();

        match err {
            Error::FaceListConversion { first, last } => {
                assert_eq!(first, f1);
                assert_eq!(last, f2);
            }
            other => panic!("unexpected error: {other}"),
        }
        // partial results stay valid
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_convert_shell() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let l1 = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 2.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
        ));
        let f1 = store.insert_face(FaceEntity::new(2, vec![bound(3, l1, true)]));
        let shell = ShellEntity::new(4, vec![f1], false);

        let converter = FaceConverter::new(&settings, &store);
        let mut diag = Diagnostics::new();
        let (mesh, outcome) = converter
            .convert_shell(&shell, &Matrix4::identity(), &mut diag)
            .unwrap();

        assert_eq!(outcome, FaceSetOutcome::Complete);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_placement_transform_applied() {
        let settings = TessellationSettings::default();
        let mut store = InMemoryStore::new();
        let loop_id = store.insert_loop(poly_loop(
            1,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        ));
        let face = FaceEntity::new(2, vec![bound(3, loop_id, true)]);

        let mut pos = Matrix4::identity();
        pos[(0, 3)] = 10.0;
        pos[(2, 3)] = -1.0;

        let converter = FaceConverter::new(&settings, &store);
        let mut mesh = PolygonMesh::new();
        let mut diag = Diagnostics::new();
        converter.convert_face(&face, &pos, &mut mesh, &mut diag);

        assert_relative_eq!(mesh.vertices()[0].x, 10.0);
        assert_relative_eq!(mesh.vertices()[0].z, -1.0);
    }
}
