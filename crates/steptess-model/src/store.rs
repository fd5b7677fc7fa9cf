// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity store: arena plus read-only lookup trait
//!
//! The store trait keeps the geometry crate independent of any specific
//! parser implementation, mirroring how the conversion core only ever sees
//! a resolver interface. The core never mutates the store; ownership stays
//! with whoever built it.

use crate::{
    CurveEntity, EdgeEntity, EntityId, FaceEntity, LoopEntity, ModelError, ShellEntity,
    SurfaceEntity,
};
use rustc_hash::FxHashMap;

/// Tagged union over all entity records held by a store
#[derive(Clone, Debug)]
pub enum GeomEntity {
    Curve(CurveEntity),
    Loop(LoopEntity),
    Edge(EdgeEntity),
    Face(FaceEntity),
    Shell(ShellEntity),
    Surface(SurfaceEntity),
}

impl GeomEntity {
    pub fn id(&self) -> EntityId {
        match self {
            GeomEntity::Curve(e) => e.id,
            GeomEntity::Loop(e) => e.id,
            GeomEntity::Edge(e) => e.id,
            GeomEntity::Face(e) => e.id,
            GeomEntity::Shell(e) => e.id,
            GeomEntity::Surface(e) => e.id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            GeomEntity::Curve(e) => e.kind_name(),
            GeomEntity::Loop(e) => e.kind_name(),
            GeomEntity::Edge(e) => e.kind_name(),
            GeomEntity::Face(_) => "Face",
            GeomEntity::Shell(_) => "Shell",
            GeomEntity::Surface(e) => e.kind_name(),
        }
    }
}

/// Read-only entity lookup
///
/// Implementations should provide O(1) access by ID. The typed accessors
/// return `None` both for missing entities and for kind mismatches; callers
/// that need to distinguish use [`EntityStore::entity`] directly.
pub trait EntityStore: Send + Sync {
    /// Get any entity record by ID
    fn entity(&self, id: EntityId) -> Option<&GeomEntity>;

    /// Get a curve entity by ID
    fn curve(&self, id: EntityId) -> Option<&CurveEntity> {
        match self.entity(id) {
            Some(GeomEntity::Curve(c)) => Some(c),
            _ => None,
        }
    }

    /// Get a loop entity by ID
    fn boundary_loop(&self, id: EntityId) -> Option<&LoopEntity> {
        match self.entity(id) {
            Some(GeomEntity::Loop(l)) => Some(l),
            _ => None,
        }
    }

    /// Get an edge entity by ID
    fn edge(&self, id: EntityId) -> Option<&EdgeEntity> {
        match self.entity(id) {
            Some(GeomEntity::Edge(e)) => Some(e),
            _ => None,
        }
    }

    /// Get a face entity by ID
    fn face(&self, id: EntityId) -> Option<&FaceEntity> {
        match self.entity(id) {
            Some(GeomEntity::Face(f)) => Some(f),
            _ => None,
        }
    }

    /// Get a shell entity by ID
    fn shell(&self, id: EntityId) -> Option<&ShellEntity> {
        match self.entity(id) {
            Some(GeomEntity::Shell(s)) => Some(s),
            _ => None,
        }
    }

    /// Get a surface entity by ID
    fn surface(&self, id: EntityId) -> Option<&SurfaceEntity> {
        match self.entity(id) {
            Some(GeomEntity::Surface(s)) => Some(s),
            _ => None,
        }
    }

    /// Check whether an entity exists
    fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }
}

/// Extension methods for [`EntityStore`]
pub trait EntityStoreExt: EntityStore {
    /// Get a curve or return a typed error
    fn curve_or_err(&self, id: EntityId) -> crate::Result<&CurveEntity> {
        match self.entity(id) {
            Some(GeomEntity::Curve(c)) => Ok(c),
            Some(other) => Err(ModelError::KindMismatch {
                entity: id,
                expected: "Curve",
                actual: other.kind_name(),
            }),
            None => Err(ModelError::EntityNotFound(id)),
        }
    }
}

impl<T: EntityStore + ?Sized> EntityStoreExt for T {}

/// Hash-map-backed entity arena
///
/// The default store used by tests and by embedders that decode an
/// exchange file up front. Insertion replaces any existing record with the
/// same ID (last write wins, matching exchange-file re-declaration
/// semantics).
#[derive(Default)]
pub struct InMemoryStore {
    entities: FxHashMap<EntityId, GeomEntity>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert any entity record
    pub fn insert(&mut self, entity: GeomEntity) -> EntityId {
        let id = entity.id();
        self.entities.insert(id, entity);
        id
    }

    pub fn insert_curve(&mut self, curve: CurveEntity) -> EntityId {
        self.insert(GeomEntity::Curve(curve))
    }

    pub fn insert_loop(&mut self, boundary_loop: LoopEntity) -> EntityId {
        self.insert(GeomEntity::Loop(boundary_loop))
    }

    pub fn insert_edge(&mut self, edge: EdgeEntity) -> EntityId {
        self.insert(GeomEntity::Edge(edge))
    }

    pub fn insert_face(&mut self, face: FaceEntity) -> EntityId {
        self.insert(GeomEntity::Face(face))
    }

    pub fn insert_shell(&mut self, shell: ShellEntity) -> EntityId {
        self.insert(GeomEntity::Shell(shell))
    }

    pub fn insert_surface(&mut self, surface: SurfaceEntity) -> EntityId {
        self.insert(GeomEntity::Surface(surface))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityStore for InMemoryStore {
    fn entity(&self, id: EntityId) -> Option<&GeomEntity> {
        self.entities.get(&id)
    }
}
