//! The world is the entity and component state of an initialized instance.
//!
//! [`World`] is what systems receive during a tick.
//! [`Ecs`](crate::Ecs) forwards its entity and component operations to a `World`
//! built from its own engine, so both behave identically.

use std::any;

use crate::engine::{ComponentId, Store};
use crate::reporter::Reporter;
use crate::registry::Types;
use crate::status::{Error, Result, Status};
use crate::{Component, Entity};

/// Reports a failure and returns it as an error.
pub(crate) fn fail(reporter: &dyn Reporter, status: Status, message: impl Into<String>) -> Error {
    let err = Error::new(status, message);
    reporter.report(err.status(), err.message());
    err
}

/// A shared view of a world.
#[derive(Clone, Copy)]
pub(crate) struct Reader<'t> {
    store:    &'t Store,
    types:    &'t Types,
    reporter: &'t dyn Reporter,
}

impl<'t> Reader<'t> {
    pub(crate) fn new(store: &'t Store, types: &'t Types, reporter: &'t dyn Reporter) -> Self {
        Self { store, types, reporter }
    }

    fn component_id<T: Component>(self) -> Result<ComponentId> {
        component_id::<T>(self.types, self.reporter)
    }

    pub(crate) fn is_ready(self, entity: Entity) -> bool { self.store.is_ready(entity) }

    pub(crate) fn has<T: Component>(self, entity: Entity) -> bool {
        match self.component_id::<T>() {
            Ok(comp) => self.store.has_component(entity, comp),
            Err(_) => false,
        }
    }

    pub(crate) fn get<T: Component>(self, entity: Entity) -> Result<&'t T> {
        let comp = self.component_id::<T>()?;
        self.store.get_component(entity, comp).ok_or_else(|| {
            fail(
                self.reporter,
                Status::CompGetFail,
                format!("Entity {entity} does not have component {}", any::type_name::<T>()),
            )
        })
    }
}

fn component_id<T: Component>(types: &Types, reporter: &dyn Reporter) -> Result<ComponentId> {
    types.get::<T>().ok_or_else(|| {
        fail(
            reporter,
            Status::CompNotReg,
            format!("Component {} is not registered", any::type_name::<T>()),
        )
    })
}

/// Mutable access to the entities and components of an instance.
pub struct World<'t> {
    store:    &'t mut Store,
    types:    &'t Types,
    reporter: &'t dyn Reporter,
}

impl<'t> World<'t> {
    pub(crate) fn new(store: &'t mut Store, types: &'t Types, reporter: &'t dyn Reporter) -> Self {
        Self { store, types, reporter }
    }

    fn reader(&self) -> Reader<'_> { Reader::new(&*self.store, self.types, self.reporter) }

    fn reborrow(&mut self) -> World<'_> {
        World { store: &mut *self.store, types: self.types, reporter: self.reporter }
    }

    fn component_id<T: Component>(&self) -> Result<ComponentId> {
        component_id::<T>(self.types, self.reporter)
    }

    /// Returns the number of alive entities, including those queued for destruction.
    pub fn entity_count(&self) -> usize { self.store.entity_count() }

    /// Creates an entity with no components.
    ///
    /// The new entity immediately joins every system without requirements.
    pub fn entity_create(&mut self) -> Entity { self.store.create_entity() }

    /// Whether the entity is alive.
    ///
    /// Entities queued for destruction remain alive until the end of the tick.
    pub fn entity_is_ready(&self, entity: Entity) -> bool { self.reader().is_ready(entity) }

    /// Destroys an entity immediately, destructing all its components.
    ///
    /// Destroying an entity that is not alive has no effect.
    pub fn entity_destroy(&mut self, entity: Entity) -> Result {
        if !self.store.destroy_entity(entity) {
            log::trace!("Ignoring destruction of dead entity {entity}");
        }
        Ok(())
    }

    /// Destroys an entity after all systems of the current tick have run,
    /// or of the next tick if called outside [`Ecs::update`](crate::Ecs::update).
    ///
    /// Queueing an entity that is not alive or already queued has no effect.
    pub fn entity_queue_destroy(&mut self, entity: Entity) -> Result {
        if !self.store.queue_destroy_entity(entity) {
            log::trace!("Ignoring queued destruction of {entity}");
        }
        Ok(())
    }

    /// Whether the entity has a component of type `T`.
    ///
    /// Returns false and reports [`Status::CompNotReg`] if `T` is not registered.
    pub fn entity_has_component<T: Component>(&self, entity: Entity) -> bool {
        self.reader().has::<T>(entity)
    }

    /// Gets a component of an entity.
    pub fn entity_get_component<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.reader().get(entity)
    }

    /// Gets a component of an entity mutably.
    pub fn entity_get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.reborrow().into_component_mut(entity)
    }

    /// Attaches a component to an alive entity, returning the constructed value.
    ///
    /// If the entity already has the component,
    /// the old value is destructed and the constructor runs again.
    /// System memberships are updated immediately.
    pub fn entity_add_component<T: Component>(
        &mut self,
        entity: Entity,
        init: Option<T>,
    ) -> Result<&mut T> {
        self.reborrow().into_added_component(entity, init)
    }

    /// Detaches and destructs a component immediately.
    ///
    /// Removing a component the entity does not have has no effect.
    pub fn entity_remove_component<T: Component>(&mut self, entity: Entity) -> Result {
        let comp = self.component_id::<T>()?;
        self.store.remove_component(entity, comp);
        Ok(())
    }

    /// Detaches a component after all systems of the current tick have run.
    ///
    /// Queued removals are applied after queued entity destructions.
    pub fn entity_queue_remove_component<T: Component>(&mut self, entity: Entity) -> Result {
        let comp = self.component_id::<T>()?;
        if self.store.is_ready(entity) {
            self.store.queue_remove_component(entity, comp);
        }
        Ok(())
    }

    pub(crate) fn into_component_mut<T: Component>(self, entity: Entity) -> Result<&'t mut T> {
        let comp = self.component_id::<T>()?;
        let World { store, reporter, .. } = self;
        store.get_component_mut(entity, comp).ok_or_else(|| {
            fail(
                reporter,
                Status::CompGetFail,
                format!("Entity {entity} does not have component {}", any::type_name::<T>()),
            )
        })
    }

    pub(crate) fn into_added_component<T: Component>(
        self,
        entity: Entity,
        init: Option<T>,
    ) -> Result<&'t mut T> {
        let comp = self.component_id::<T>()?;
        let World { store, reporter, .. } = self;
        if !store.is_ready(entity) {
            return Err(fail(
                reporter,
                Status::EntityNotReady,
                format!("Cannot add component {} to entity {entity}", any::type_name::<T>()),
            ));
        }

        Ok(store.add_component(entity, comp, init).expect("entity readiness was checked"))
    }
}

#[cfg(test)]
mod tests;
