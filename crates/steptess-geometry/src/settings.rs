// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discretization and unit settings
//!
//! Supplied once per conversion run and read-only afterwards.

/// Tessellation settings
///
/// `length_factor` and `angle_factor` convert raw file units into output
/// meters and radians; they come from the exchange file's unit assignment
/// and are precomputed by the embedder.
#[derive(Clone, Copy, Debug)]
pub struct TessellationSettings {
    /// Number of vertices used for a full circle
    pub vertices_per_circle: u32,
    /// Lower bound on vertices for any arc, however small its opening
    pub min_vertices_per_arc: u32,
    /// Raw length unit to meters
    pub length_factor: f64,
    /// Raw plane angle unit to radians
    pub angle_factor: f64,
}

impl Default for TessellationSettings {
    fn default() -> Self {
        Self {
            vertices_per_circle: 24,
            min_vertices_per_arc: 6,
            length_factor: 1.0,
            angle_factor: 1.0,
        }
    }
}

impl TessellationSettings {
    /// Settings with explicit unit factors and default discretization
    pub fn with_unit_factors(length_factor: f64, angle_factor: f64) -> Self {
        Self {
            length_factor,
            angle_factor,
            ..Self::default()
        }
    }
}
