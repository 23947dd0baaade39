//! Operations queued to be executed after all systems of a tick have run.

use super::{ComponentId, Store};
use crate::Entity;

/// An operation to be executed after the tick.
pub(crate) trait Operation {
    /// Performs the operation on the store.
    fn run(self, store: &mut Store);

    /// The entity affected by this operation.
    fn entity(&self) -> Entity;
}

/// Destroy an entity.
pub(crate) struct DestroyEntity {
    pub(crate) entity: Entity,
}

impl Operation for DestroyEntity {
    fn run(self, store: &mut Store) { store.destroy_entity(self.entity); }

    fn entity(&self) -> Entity { self.entity }
}

/// Remove a component from an entity.
pub(crate) struct RemoveComponent {
    pub(crate) entity: Entity,
    pub(crate) comp:   ComponentId,
}

impl Operation for RemoveComponent {
    fn run(self, store: &mut Store) { store.remove_component(self.entity, self.comp); }

    fn entity(&self) -> Entity { self.entity }
}

/// The store for queued operations.
///
/// Entity destructions are always applied before component removals.
#[derive(Default)]
pub(crate) struct Buffer {
    destroy: Vec<DestroyEntity>,
    remove:  Vec<RemoveComponent>,
}

/// Types that can be pushed into a [`Buffer`].
pub(crate) trait Queued: Operation + Sized {
    fn queue(buffer: &mut Buffer) -> &mut Vec<Self>;
}

impl Queued for DestroyEntity {
    fn queue(buffer: &mut Buffer) -> &mut Vec<Self> { &mut buffer.destroy }
}

impl Queued for RemoveComponent {
    fn queue(buffer: &mut Buffer) -> &mut Vec<Self> { &mut buffer.remove }
}

impl Buffer {
    pub(crate) fn push<Op: Queued>(&mut self, op: Op) { Op::queue(self).push(op); }

    pub(crate) fn len(&self) -> usize { self.destroy.len() + self.remove.len() }

    pub(crate) fn is_empty(&self) -> bool { self.len() == 0 }

    /// Drops all operations affecting an entity.
    pub(crate) fn forget(&mut self, entity: Entity) {
        self.destroy.retain(|op| op.entity() != entity);
        self.remove.retain(|op| op.entity() != entity);
    }

    pub(crate) fn clear(&mut self) {
        self.destroy.clear();
        self.remove.clear();
    }

    /// Runs all operations, consuming the buffer.
    pub(crate) fn drain(self, store: &mut Store) {
        for op in self.destroy {
            op.run(store);
        }
        for op in self.remove {
            op.run(store);
        }
    }
}
