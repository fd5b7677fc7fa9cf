// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for tessellation
//!
//! Only conditions that abort a whole operation surface as errors.
//! Per-entity recoverable problems (missing attributes, unsupported
//! variants, degenerate loops) are reported through the diagnostics sink
//! and the affected function returns early with partial data.

use steptess_model::EntityId;
use thiserror::Error;

/// Tessellation result type
pub type Result<T> = std::result::Result<T, Error>;

/// Tessellation errors
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry is too degenerate to process (zero normal, < 3 vertices)
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// Hole incorporation or polygon triangulation failed
    #[error("triangulation error: {0}")]
    Triangulation(String),

    /// No usable polygon data could be produced for a face in the list.
    /// Carries the ID range of the face list being converted.
    #[error("face list conversion failed with faces {first}-{last}")]
    FaceListConversion { first: EntityId, last: EntityId },
}

impl Error {
    /// Create a degenerate-geometry error
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Error::Degenerate(msg.into())
    }

    /// Create a triangulation error
    pub fn triangulation(msg: impl Into<String>) -> Self {
        Error::Triangulation(msg.into())
    }
}
