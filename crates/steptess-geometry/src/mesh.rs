// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Indexed polygon mesh with welded vertices
//!
//! The mesh is the per-shell accumulator: faces append welded vertices and
//! triangles, nothing is ever removed. Welding is exact: a vertex welds
//! only when its coordinate triple formats to an identical key. Two
//! numerically close but unequal triples stay distinct. This mirrors the
//! reference converter; see DESIGN.md for the tolerance discussion.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// Welding accumulator for one shell
#[derive(Default, Debug, Clone)]
pub struct PolygonMesh {
    vertices: Vec<Point3<f64>>,
    triangles: Vec<[u32; 3]>,
    index_by_key: FxHashMap<String, u32>,
}

impl PolygonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact coordinate key used for welding
    #[inline]
    fn vertex_key(point: &Point3<f64>) -> String {
        format!("{} {} {}", point.x, point.y, point.z)
    }

    /// Return the index of `point`, appending a new vertex on first sight
    ///
    /// The same coordinate triple always yields the same index for the
    /// lifetime of the mesh.
    pub fn weld_vertex(&mut self, point: &Point3<f64>) -> u32 {
        let key = Self::vertex_key(point);
        if let Some(&index) = self.index_by_key.get(&key) {
            return index;
        }
        let index = self.vertices.len() as u32;
        self.vertices.push(*point);
        self.index_by_key.insert(key, index);
        index
    }

    /// Append a triangle
    ///
    /// `reversed` flips the winding to (i0, i2, i1), undoing the point
    /// order reversal applied during projection so the emitted surface
    /// stays outward-facing. Triangles whose indices collapsed during
    /// welding are dropped; every stored triangle has three distinct
    /// indices.
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32, reversed: bool) {
        if i0 == i1 || i1 == i2 || i0 == i2 {
            return;
        }
        if reversed {
            self.triangles.push([i0, i2, i1]);
        } else {
            self.triangles.push([i0, i1, i2]);
        }
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Flatten into GPU-ready buffers
    ///
    /// Vertex normals are area-weighted averages of the incident triangle
    /// normals.
    pub fn to_mesh_data(&self) -> MeshData {
        let mut positions = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            positions.push(v.x as f32);
            positions.push(v.y as f32);
            positions.push(v.z as f32);
        }

        let mut normals = vec![nalgebra::Vector3::<f64>::zeros(); self.vertices.len()];
        for tri in &self.triangles {
            let a = &self.vertices[tri[0] as usize];
            let b = &self.vertices[tri[1] as usize];
            let c = &self.vertices[tri[2] as usize];
            let face_normal = (b - a).cross(&(c - a));
            for &i in tri {
                normals[i as usize] += face_normal;
            }
        }
        let mut normal_data = Vec::with_capacity(self.vertices.len() * 3);
        for n in normals {
            let len = n.norm();
            let n = if len > 1e-12 { n / len } else { n };
            normal_data.push(n.x as f32);
            normal_data.push(n.y as f32);
            normal_data.push(n.z as f32);
        }

        let mut indices = Vec::with_capacity(self.triangles.len() * 3);
        for tri in &self.triangles {
            indices.extend_from_slice(tri);
        }

        MeshData {
            positions,
            normals: normal_data,
            indices,
        }
    }
}

/// GPU-ready mesh data
///
/// Flattened buffers handed to the rendering/export collaborator.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals as flattened [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Polyline output of the surface converter
///
/// Used for unbounded surface outlines (a plane's bounding rectangle).
#[derive(Clone, Debug, Default)]
pub struct PolylineData {
    pub vertices: Vec<Point3<f64>>,
    /// Index runs into `vertices`, one per polyline
    pub polylines: Vec<Vec<u32>>,
}

impl PolylineData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one polyline given by its points
    pub fn add_polyline(&mut self, points: &[Point3<f64>]) {
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(points);
        self.polylines
            .push((start..start + points.len() as u32).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }
}
