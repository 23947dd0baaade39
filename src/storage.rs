//! A storage is the data structure where components of the same type for all entities are stored.
//!
//! The engine only sees storages through [`AnyStorage`],
//! indexed by their [`ComponentId`](crate::engine::ComponentId).
//! The typed façade downcasts them back to [`Column<T>`].

use std::any::Any;

use crate::Entity;

mod column;
pub use column::Column;

/// A type-erased component storage.
pub trait AnyStorage: 'static {
    /// The name of the component type stored, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Whether the entity has a component in this storage.
    fn contains(&self, entity: Entity) -> bool;

    /// Destructs and removes the component of an entity.
    ///
    /// Returns false if the entity had no component in this storage.
    fn remove(&mut self, entity: Entity) -> bool;

    /// Destructs and removes all components.
    fn clear(&mut self);

    /// Returns the number of components in this storage.
    fn cardinality(&self) -> usize;

    /// Upcasts to [`Any`] for downcasting to the concrete storage.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts to [`Any`] for downcasting to the concrete storage.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
