//! Generational arena for ID-indexed storage of netlist entities.
//!
//! Unlike an append-only arena, entities here can be removed: each slot
//! carries a generation counter that is bumped on removal, so an ID issued
//! for a previous occupant of the slot is detectably stale. Freed slots are
//! reused by later allocations without ever resurrecting an old ID.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::Index;

/// Trait for opaque ID types used as arena keys.
///
/// Implementors pair a `u32` slot index with a `u32` generation and provide
/// an invalid sentinel that no arena ever issues.
pub trait ArenaId: Copy + Eq {
    /// The sentinel value that never resolves to an entity.
    const INVALID: Self;

    /// Creates an ID from a slot index and generation.
    fn new(index: u32, generation: u32) -> Self;

    /// Returns the slot index.
    fn index(self) -> u32;

    /// Returns the generation counter.
    fn generation(self) -> u32;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// An ID-indexed container supporting O(1) allocation, lookup, and removal.
///
/// Removal tombstones the slot and bumps its generation; the slot index is
/// recycled by later allocations under the new generation. Iteration visits
/// live entities in slot order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Allocates a new entity and returns its ID, reusing a freed slot if
    /// one is available.
    pub fn alloc(&mut self, value: T) -> I {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.value.is_none());
            slot.value = Some(value);
            I::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            I::new(index, 0)
        }
    }

    /// Removes the entity with the given ID and returns it.
    ///
    /// The slot's generation is bumped, so the removed ID (and any copy of
    /// it) is stale from this point on.
    ///
    /// # Panics
    ///
    /// Panics if the ID is invalid or stale.
    pub fn remove(&mut self, id: I) -> T {
        assert!(
            self.contains(id),
            "removed entity with invalid or stale id (slot {}, generation {})",
            id.index(),
            id.generation()
        );
        let slot = &mut self.slots[id.index() as usize];
        slot.generation += 1;
        self.free.push(id.index());
        slot.value.take().unwrap()
    }

    /// Returns `true` if the ID refers to a live entity.
    pub fn contains(&self, id: I) -> bool {
        self.slots
            .get(id.index() as usize)
            .is_some_and(|slot| slot.generation == id.generation() && slot.value.is_some())
    }

    /// Returns a reference to the entity with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is invalid or stale.
    pub fn get(&self, id: I) -> &T {
        self.try_get(id).unwrap_or_else(|| {
            panic!(
                "accessed entity with invalid or stale id (slot {}, generation {})",
                id.index(),
                id.generation()
            )
        })
    }

    /// Returns a mutable reference to the entity with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is invalid or stale.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        assert!(
            self.contains(id),
            "accessed entity with invalid or stale id (slot {}, generation {})",
            id.index(),
            id.generation()
        );
        self.slots[id.index() as usize].value.as_mut().unwrap()
    }

    /// Returns a reference to the entity, or `None` for an invalid or stale ID.
    pub fn try_get(&self, id: I) -> Option<&T> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    /// Returns the number of live entities.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns `true` if the arena holds no live entities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(ID, &T)` pairs for live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|value| (I::new(i as u32, slot.generation), value))
        })
    }

    /// Iterates over the IDs of live entities in slot order.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::NetId;

    #[test]
    fn alloc_and_get() {
        let mut arena: Arena<NetId, String> = Arena::new();
        let id = arena.alloc("n1".to_string());
        assert_eq!(arena[id], "n1");
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn remove_returns_value() {
        let mut arena: Arena<NetId, u32> = Arena::new();
        let id = arena.alloc(42);
        assert_eq!(arena.remove(id), 42);
        assert!(arena.is_empty());
    }

    #[test]
    fn removed_id_is_stale() {
        let mut arena: Arena<NetId, u32> = Arena::new();
        let id = arena.alloc(1);
        arena.remove(id);
        assert!(!arena.contains(id));
        assert_eq!(arena.try_get(id), None);
    }

    #[test]
    fn reused_slot_does_not_alias_old_id() {
        let mut arena: Arena<NetId, u32> = Arena::new();
        let old = arena.alloc(1);
        arena.remove(old);
        let new = arena.alloc(2);
        // Same slot, different generation
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert_eq!(arena.try_get(old), None);
        assert_eq!(arena[new], 2);
    }

    #[test]
    #[should_panic(expected = "stale")]
    fn get_with_stale_id_panics() {
        let mut arena: Arena<NetId, u32> = Arena::new();
        let id = arena.alloc(1);
        arena.remove(id);
        arena.get(id);
    }

    #[test]
    #[should_panic(expected = "invalid or stale")]
    fn get_with_invalid_sentinel_panics() {
        let arena: Arena<NetId, u32> = Arena::new();
        arena.get(NetId::INVALID);
    }

    #[test]
    fn iter_skips_removed() {
        let mut arena: Arena<NetId, u32> = Arena::new();
        let a = arena.alloc(10);
        let b = arena.alloc(20);
        let c = arena.alloc(30);
        arena.remove(b);
        let values: Vec<u32> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![10, 30]);
        let ids: Vec<NetId> = arena.ids().collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn len_tracks_removals() {
        let mut arena: Arena<NetId, u32> = Arena::new();
        let a = arena.alloc(1);
        arena.alloc(2);
        assert_eq!(arena.len(), 2);
        arena.remove(a);
        assert_eq!(arena.len(), 1);
        arena.alloc(3);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn serde_roundtrip_preserves_generations() {
        let mut arena: Arena<NetId, String> = Arena::new();
        let a = arena.alloc("keep".to_string());
        let b = arena.alloc("drop".to_string());
        arena.remove(b);
        let json = serde_json::to_string(&arena).unwrap();
        let restored: Arena<NetId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[a], "keep");
        assert_eq!(restored.try_get(b), None);
    }
}
