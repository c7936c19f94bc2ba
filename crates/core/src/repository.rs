//! Repository snapshots
//!
//! `RepositoryData` is a full point-in-time capture of aggregate state: a
//! two-level map from entity-type descriptor to entity id to value. The
//! snapshot manager produces it; the codec treats it as one opaque record.
//!
//! `BTreeMap` keeps iteration order stable so encoding the same snapshot
//! twice yields byte-identical output.

use crate::value::Value;
use std::collections::BTreeMap;

/// Full snapshot of aggregate/domain state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryData {
    entities: BTreeMap<String, BTreeMap<u64, Value>>,
}

impl RepositoryData {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity instance under its type descriptor.
    ///
    /// Replaces any existing entity with the same id.
    pub fn insert(&mut self, descriptor: impl Into<String>, id: u64, value: Value) {
        self.entities
            .entry(descriptor.into())
            .or_default()
            .insert(id, value);
    }

    /// All instances of one entity type, if any exist.
    pub fn entities_of(&self, descriptor: &str) -> Option<&BTreeMap<u64, Value>> {
        self.entities.get(descriptor)
    }

    /// One entity instance by type and id.
    pub fn get(&self, descriptor: &str, id: u64) -> Option<&Value> {
        self.entities.get(descriptor).and_then(|m| m.get(&id))
    }

    /// Iterate over (descriptor, instances) pairs in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<u64, Value>)> {
        self.entities.iter()
    }

    /// Number of entity types in the snapshot.
    pub fn type_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether the snapshot holds no entities at all.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
