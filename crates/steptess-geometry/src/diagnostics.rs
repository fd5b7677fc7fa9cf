// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostic stream for recoverable conversion problems
//!
//! One entry per recoverable issue, formatted as
//! `<Component> Problem with <entityKind> #<id>: <message>`. The stream is
//! for operator visibility, not machine parsing. Every entry is mirrored
//! to the `log` facade as a warning.

use std::fmt;
use steptess_model::EntityId;

/// A single recoverable problem
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Reporting component, e.g. "CurveSampler" or "FaceConverter"
    pub component: &'static str,
    /// Schema kind of the offending entity, e.g. "Circle"
    pub entity_kind: &'static str,
    /// Offending entity
    pub entity: EntityId,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Problem with {} {}: {}",
            self.component, self.entity_kind, self.entity, self.message
        )
    }
}

/// Accumulating diagnostic sink
///
/// Owned by the caller of a conversion run and passed down by mutable
/// reference; conversion never fails because of anything reported here.
#[derive(Default, Debug)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recoverable problem
    pub fn report(
        &mut self,
        component: &'static str,
        entity_kind: &'static str,
        entity: EntityId,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            component,
            entity_kind,
            entity,
            message: message.into(),
        };
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Iterate the stream as formatted lines
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|d| d.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
