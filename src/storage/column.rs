use std::any::{self, Any};
use std::mem::MaybeUninit;

use bitvec::prelude::BitVec;

use super::AnyStorage;
use crate::comp::{Component, Hooks};
use crate::Entity;

/// The basic storage indexed by entity IDs directly.
///
/// Presence is tracked in a bit vector;
/// slots without their bit set are uninitialized.
pub struct Column<T: Component> {
    cardinality: usize,
    bits:        BitVec,
    data:        Vec<MaybeUninit<T>>,
    hooks:       Hooks<T>,
}

impl<T: Component> Column<T> {
    /// Creates an empty storage with the construction hooks of `T`.
    pub fn new(hooks: Hooks<T>) -> Self {
        Self { cardinality: 0, bits: BitVec::new(), data: Vec::new(), hooks }
    }

    fn bit(&self, index: usize) -> bool {
        match self.bits.get(index) {
            Some(bit) => *bit,
            None => false,
        }
    }

    fn set_bit(&mut self, index: usize, bit: bool) {
        if self.bits.len() <= index {
            self.bits.resize(index + 1, false);
        }

        let delta_old = match *self.bits.get(index).expect("resized len >= index+1") {
            false => 0,
            true => 1,
        };
        let delta_new = match bit {
            false => 0,
            true => 1,
        };
        self.bits.set(index, bit);

        // split into two separate statements to avoid integer underflow
        self.cardinality -= delta_old;
        self.cardinality += delta_new;
    }

    /// Gets the component of an entity if it is present.
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let index = entity.usize();

        if self.bit(index) {
            let value = self.data.get(index).expect("bits mismatch");
            // Safety: the bit is set, so the slot is initialized.
            Some(unsafe { value.assume_init_ref() })
        } else {
            None
        }
    }

    /// Gets the component of an entity mutably if it is present.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = entity.usize();

        if self.bit(index) {
            let value = self.data.get_mut(index).expect("bits mismatch");
            // Safety: the bit is set, so the slot is initialized.
            Some(unsafe { value.assume_init_mut() })
        } else {
            None
        }
    }

    /// Constructs a component for an entity, destructing the previous one if present.
    pub fn insert(&mut self, entity: Entity, init: Option<T>) -> &mut T {
        self.remove(entity);

        let value = self.hooks.construct(entity, init);

        let index = entity.usize();
        if self.data.len() <= index {
            self.data.resize_with(index + 1, MaybeUninit::uninit);
        }
        let slot = self.data.get_mut(index).expect("data resized to cover index");
        slot.write(value);
        self.set_bit(index, true);

        self.get_mut(entity).expect("bit was just set")
    }

    /// Moves the component of an entity out of the storage without destructing it.
    fn take(&mut self, entity: Entity) -> Option<T> {
        let index = entity.usize();

        if self.bit(index) {
            self.set_bit(index, false);
            let value = self.data.get(index).expect("bits mismatch");
            // Safety: the bit was set, and clearing it relinquishes the slot.
            Some(unsafe { value.assume_init_read() })
        } else {
            None
        }
    }

    /// Iterates over all present components in entity ID order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.bits.iter_ones().map(|index| {
            let entity = Entity::new(u32::try_from(index).expect("entity index fits in u32"));
            let value = self.data.get(index).expect("bits mismatch");
            // Safety: the bit is set, so the slot is initialized.
            (entity, unsafe { value.assume_init_ref() })
        })
    }
}

impl<T: Component> AnyStorage for Column<T> {
    fn type_name(&self) -> &'static str { any::type_name::<T>() }

    fn contains(&self, entity: Entity) -> bool { self.bit(entity.usize()) }

    fn remove(&mut self, entity: Entity) -> bool {
        match self.take(entity) {
            Some(mut value) => {
                self.hooks.destruct(entity, &mut value);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        let indices: Vec<usize> = self.bits.iter_ones().collect();
        for index in indices {
            self.remove(Entity::new(u32::try_from(index).expect("entity index fits in u32")));
        }
    }

    fn cardinality(&self) -> usize { self.cardinality }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

impl<T: Component> Drop for Column<T> {
    fn drop(&mut self) { self.clear(); }
}
