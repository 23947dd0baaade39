//! Allocates entity IDs and tracks their lifecycle state.

use std::collections::BTreeSet;

use super::{Entity, State};

/// The entity allocator.
///
/// Freed IDs are recycled lowest-first,
/// and new IDs are only minted when nothing is recyclable.
#[derive(Debug)]
pub(crate) struct Ealloc {
    /// The state of every ID minted so far.
    states:     Vec<State>,
    /// IDs that were freed and can be handed out again.
    recyclable: BTreeSet<u32>,
    /// The number of ready entities.
    live:       usize,
}

impl Ealloc {
    /// Creates an allocator with room for `capacity` entities.
    ///
    /// Returns `None` if the storage cannot be reserved.
    pub(crate) fn with_capacity(capacity: usize) -> Option<Self> {
        let mut states = Vec::new();
        states.try_reserve_exact(capacity).ok()?;
        Some(Self { states, recyclable: BTreeSet::new(), live: 0 })
    }

    /// The number of IDs that can be minted without reallocating.
    pub(crate) fn capacity(&self) -> usize { self.states.capacity() }

    /// The number of ready entities.
    pub(crate) fn len(&self) -> usize { self.live }

    pub(crate) fn allocate(&mut self) -> Entity {
        self.live += 1;

        if let Some(index) = self.recyclable.pop_first() {
            let entity = Entity::new(index);
            let state = self.states.get_mut(entity.usize()).expect("recycled IDs were minted");
            *state = State::Active;
            return entity;
        }

        let index = u32::try_from(self.states.len()).expect("too many entities");
        self.states.push(State::Active);
        Entity::new(index)
    }

    pub(crate) fn state(&self, entity: Entity) -> State {
        self.states.get(entity.usize()).copied().unwrap_or(State::Destroyed)
    }

    /// Marks an active entity as queued for destruction.
    ///
    /// Returns false if the entity was not active.
    pub(crate) fn mark_queued(&mut self, entity: Entity) -> bool {
        match self.states.get_mut(entity.usize()) {
            Some(state) if *state == State::Active => {
                *state = State::QueuedDestroy;
                true
            }
            _ => false,
        }
    }

    /// Frees a ready entity.
    ///
    /// Returns false if the entity was not ready.
    pub(crate) fn deallocate(&mut self, entity: Entity) -> bool {
        match self.states.get_mut(entity.usize()) {
            Some(state) if state.is_ready() => {
                *state = State::Destroyed;
                self.recyclable.insert(entity.to_raw());
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// Iterates over all ready entities in ID order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.states.iter().enumerate().filter(|(_, state)| state.is_ready()).map(|(index, _)| {
            Entity::new(u32::try_from(index).expect("minted IDs fit in u32"))
        })
    }

    /// Frees all entities, restarting ID assignment from zero.
    ///
    /// The reserved capacity is retained.
    pub(crate) fn clear(&mut self) {
        self.states.clear();
        self.recyclable.clear();
        self.live = 0;
    }
}

#[cfg(test)]
mod tests;
