// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for entity store access

use crate::EntityId;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by entity store lookups
#[derive(Error, Debug)]
pub enum ModelError {
    /// Entity does not exist in the store
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// Entity exists but has a different kind than requested
    #[error("entity {entity} is a {actual}, expected {expected}")]
    KindMismatch {
        entity: EntityId,
        expected: &'static str,
        actual: &'static str,
    },
}
