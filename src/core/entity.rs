//! Game entity system with typed integer IDs

use crate::{DuelError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Simple integer ID for game entities
///
/// The type parameter ties an ID to the store it came from, so a card ID can
/// never be handed to something expecting a creature ID. Serializes as a
/// bare `u32`.
pub struct EntityId<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    pub const fn new(id: u32) -> Self {
        EntityId {
            raw: id,
            _marker: PhantomData,
        }
    }

    pub fn as_u32(&self) -> u32 {
        self.raw
    }
}

// Manual impls: derives would demand the same traits of `T`.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> PartialOrd for EntityId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EntityId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.raw)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.raw)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u32::deserialize(deserializer).map(EntityId::new)
    }
}

/// Base trait for all game entities
pub trait GameEntity<T> {
    fn id(&self) -> EntityId<T>;
    fn name(&self) -> &str;
}

/// Central storage for one kind of entity
///
/// Provides fast lookup by ID and hands out fresh IDs. IDs are never reused
/// within a store, even after the entity is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore<T> {
    entities: FxHashMap<EntityId<T>, T>,
    next_id: u32,
    #[serde(skip, default = "default_kind")]
    kind: &'static str,
}

fn default_kind() -> &'static str {
    "entity"
}

impl<T> EntityStore<T> {
    pub fn new(kind: &'static str) -> Self {
        EntityStore {
            entities: FxHashMap::default(),
            next_id: 1,
            kind,
        }
    }

    /// Generate a new unique ID, one past the highest ever issued
    ///
    /// Ids of removed entities are never handed out again, so this is not
    /// "highest existing + 1".
    pub fn next_id(&mut self) -> EntityId<T> {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert an entity with a specific ID
    pub fn insert(&mut self, id: EntityId<T>, entity: T) {
        if id.as_u32() >= self.next_id {
            self.next_id = id.as_u32() + 1;
        }
        self.entities.insert(id, entity);
    }

    /// Get an entity by ID
    pub fn get(&self, id: EntityId<T>) -> Result<&T> {
        self.entities.get(&id).ok_or(DuelError::EntityNotFound {
            kind: self.kind,
            id: id.as_u32(),
        })
    }

    /// Get a mutable reference to an entity
    pub fn get_mut(&mut self, id: EntityId<T>) -> Result<&mut T> {
        let kind = self.kind;
        self.entities
            .get_mut(&id)
            .ok_or(DuelError::EntityNotFound {
                kind,
                id: id.as_u32(),
            })
    }

    /// Lookup that treats absence as a normal outcome
    pub fn find(&self, id: EntityId<T>) -> Option<&T> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId<T>) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn remove(&mut self, id: EntityId<T>) -> Option<T> {
        self.entities.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId<T>, &T)> {
        self.entities.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entities.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestEntity {
        id: EntityId<TestEntity>,
        name: String,
    }

    impl GameEntity<TestEntity> for TestEntity {
        fn id(&self) -> EntityId<TestEntity> {
            self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_entity_store() {
        let mut store = EntityStore::new("test entity");
        let id1 = store.next_id();
        let id2 = store.next_id();

        assert_eq!(id1.as_u32(), 1);
        assert_eq!(id2.as_u32(), 2);

        store.insert(
            id1,
            TestEntity {
                id: id1,
                name: "Test1".to_string(),
            },
        );
        store.insert(
            id2,
            TestEntity {
                id: id2,
                name: "Test2".to_string(),
            },
        );

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(id1).unwrap().name(), "Test1");
        assert_eq!(store.get(id2).unwrap().id(), id2);

        let err = store.get(EntityId::new(999)).unwrap_err();
        assert_eq!(err.to_string(), "test entity not found: 999");
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut store: EntityStore<TestEntity> = EntityStore::new("test entity");
        let id1 = store.next_id();
        store.insert(
            id1,
            TestEntity {
                id: id1,
                name: "Gone".to_string(),
            },
        );
        store.remove(id1);
        assert_eq!(store.next_id().as_u32(), 2);

        store.insert(
            EntityId::new(10),
            TestEntity {
                id: EntityId::new(10),
                name: "Explicit".to_string(),
            },
        );
        assert_eq!(store.next_id().as_u32(), 11);
    }

    #[test]
    fn test_id_serializes_as_integer() {
        let id: EntityId<TestEntity> = EntityId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: EntityId<TestEntity> = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }
}
