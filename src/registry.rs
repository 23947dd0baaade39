//! Maps static component types and system names to engine identifiers.

use std::any::{self, TypeId};
use std::collections::HashMap;
use std::{fmt, hash};

use indexmap::IndexMap;

use crate::engine::{ComponentId, SystemId};

/// A [`TypeId`] that remembers the name of its type for diagnostics.
///
/// Equality and hashing only consider the [`TypeId`].
#[derive(Clone, Copy)]
pub(crate) struct TypeKey {
    id:   TypeId,
    name: &'static str,
}

impl TypeKey {
    pub(crate) fn of<T: 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: any::type_name::<T>() }
    }

    pub(crate) fn name(&self) -> &'static str { self.name }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for TypeKey {}

impl hash::Hash for TypeKey {
    fn hash<H: hash::Hasher>(&self, state: &mut H) { self.id.hash(state) }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.name()) }
}

/// The component types registered on an instance.
#[derive(Debug, Default)]
pub(crate) struct Types {
    ids: HashMap<TypeKey, ComponentId>,
}

impl Types {
    pub(crate) fn get<T: 'static>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeKey::of::<T>()).copied()
    }

    pub(crate) fn contains<T: 'static>(&self) -> bool { self.ids.contains_key(&TypeKey::of::<T>()) }

    /// Records the engine ID of a component type.
    ///
    /// # Panics
    /// Panics if the type was already recorded.
    pub(crate) fn insert<T: 'static>(&mut self, id: ComponentId) {
        let prev = self.ids.insert(TypeKey::of::<T>(), id);
        assert!(prev.is_none(), "{} was recorded twice", any::type_name::<T>());
    }

    pub(crate) fn len(&self) -> usize { self.ids.len() }

    pub(crate) fn clear(&mut self) { self.ids.clear() }
}

/// The systems registered on an instance, in registration order.
#[derive(Debug, Default)]
pub(crate) struct Names {
    ids: IndexMap<String, SystemId>,
}

impl Names {
    pub(crate) fn get(&self, name: &str) -> Option<SystemId> { self.ids.get(name).copied() }

    pub(crate) fn contains(&self, name: &str) -> bool { self.ids.contains_key(name) }

    /// Records the engine ID of a system.
    ///
    /// # Panics
    /// Panics if the name was already recorded.
    pub(crate) fn insert(&mut self, name: String, id: SystemId) {
        let prev = self.ids.insert(name, id);
        assert!(prev.is_none(), "a system name was recorded twice");
    }

    /// Returns the name of a system by its engine ID.
    pub(crate) fn name_of(&self, id: SystemId) -> Option<&str> {
        self.ids.iter().find(|&(_, &other)| other == id).map(|(name, _)| name.as_str())
    }

    pub(crate) fn len(&self) -> usize { self.ids.len() }

    pub(crate) fn clear(&mut self) { self.ids.clear() }
}
