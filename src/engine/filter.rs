use bitvec::prelude::BitVec;

use super::ComponentId;
use crate::storage::AnyStorage;
use crate::Entity;

/// The required and excluded component sets of a system.
#[derive(Debug, Default)]
pub(super) struct Filter {
    required: BitVec,
    excluded: BitVec,
}

fn set(bits: &mut BitVec, comp: ComponentId) {
    let index = comp.usize();
    if bits.len() <= index {
        bits.resize(index + 1, false);
    }
    bits.set(index, true);
}

impl Filter {
    pub(super) fn require(&mut self, comp: ComponentId) { set(&mut self.required, comp) }

    pub(super) fn exclude(&mut self, comp: ComponentId) { set(&mut self.excluded, comp) }

    /// Whether the entity has every required component and none of the excluded ones.
    pub(super) fn matches(&self, columns: &[Box<dyn AnyStorage>], entity: Entity) -> bool {
        let has = |index: usize| columns.get(index).map_or(false, |column| column.contains(entity));

        self.required.iter_ones().all(has) && !self.excluded.iter_ones().any(has)
    }
}
