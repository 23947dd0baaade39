//! The dynamic storage and scheduling engine behind the typed façade.
//!
//! The engine knows nothing about static component types or system names.
//! Components are addressed by [`ComponentId`] and stored in type-erased [`AnyStorage`]s,
//! systems are addressed by [`SystemId`] and stored as an opaque payload `S`.
//!
//! Each system keeps the set of entities currently matching its filter.
//! Membership is updated eagerly on every structural change,
//! while [`Engine::update`] hands each system a snapshot of its members,
//! so systems may mutate the world freely while iterating.
//! Destruction and removal requested through the `queue_*` methods
//! is buffered and applied after all systems of the tick have run.

use std::{fmt, mem};

use indexmap::IndexSet;

use crate::comp::Component;
use crate::entity::{self, Ealloc, Entity};
use crate::storage::{AnyStorage, Column};

mod filter;
use filter::Filter;

pub(crate) mod offline;

/// The time step type passed to systems.
pub type Dt = f64;

/// A runtime component identifier assigned by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(pub(crate) u32);

/// A runtime system identifier assigned by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemId(pub(crate) u32);

static_assertions::assert_impl_all!(ComponentId: Send, Sync, Copy);
static_assertions::assert_impl_all!(SystemId: Send, Sync, Copy);

impl ComponentId {
    pub(crate) fn usize(self) -> usize { self.0.try_into().expect("usize >= u32") }
}

impl SystemId {
    pub(crate) fn usize(self) -> usize { self.0.try_into().expect("usize >= u32") }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "component#{}", self.0) }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "system#{}", self.0) }
}

/// A callback invoked when an entity starts or stops matching a system.
pub type EntityHook = Box<dyn FnMut(Entity)>;

/// An engine handle.
///
/// Dropping the engine destructs all remaining components.
pub struct Engine<S> {
    store: Store,
    funcs: Vec<S>,
}

impl<S> Engine<S> {
    /// Creates an engine with room for `capacity` entities.
    ///
    /// Returns `None` if the storage cannot be reserved.
    pub fn new(capacity: usize) -> Option<Self> {
        let ealloc = Ealloc::with_capacity(capacity)?;
        log::debug!("Created engine with capacity {capacity}");

        Some(Self {
            store: Store {
                ealloc,
                columns: Vec::new(),
                systems: Vec::new(),
                pending: offline::Buffer::default(),
            },
            funcs: Vec::new(),
        })
    }

    /// Returns the entity and component store.
    pub fn store(&self) -> &Store { &self.store }

    /// Returns the entity and component store mutably.
    pub fn store_mut(&mut self) -> &mut Store { &mut self.store }

    /// Removes all entities, keeping component storages and systems.
    ///
    /// Queued operations are discarded and system memberships emptied
    /// without invoking removal hooks.
    pub fn reset(&mut self) {
        let store = &mut self.store;
        for column in &mut store.columns {
            column.clear();
        }
        for system in &mut store.systems {
            system.members.clear();
        }
        store.pending.clear();
        store.ealloc.clear();
        log::debug!("Reset engine");
    }

    /// Registers a component storage.
    ///
    /// Returns `None` if no more component IDs can be assigned.
    pub fn register_component(&mut self, storage: Box<dyn AnyStorage>) -> Option<ComponentId> {
        let id = ComponentId(u32::try_from(self.store.columns.len()).ok()?);
        log::debug!("Registered {} as {id}", storage.type_name());
        self.store.columns.push(storage);
        Some(id)
    }

    /// Registers a system payload with optional membership hooks.
    ///
    /// New systems are enabled and initially match every entity.
    /// Returns `None` if no more system IDs can be assigned.
    pub fn register_system(
        &mut self,
        func: S,
        on_added: Option<EntityHook>,
        on_removed: Option<EntityHook>,
    ) -> Option<SystemId> {
        let id = SystemId(u32::try_from(self.funcs.len()).ok()?);

        self.funcs.push(func);
        self.store.systems.push(SystemState {
            filter: Filter::default(),
            enabled: true,
            members: IndexSet::new(),
            on_added,
            on_removed,
        });
        self.store.sync_system(id);

        Some(id)
    }

    /// Requires entities matching the system to have the component.
    pub fn require_component(&mut self, system: SystemId, comp: ComponentId) {
        self.store.system_mut(system).filter.require(comp);
        self.store.sync_system(system);
    }

    /// Requires entities matching the system not to have the component.
    pub fn exclude_component(&mut self, system: SystemId, comp: ComponentId) {
        self.store.system_mut(system).filter.exclude(comp);
        self.store.sync_system(system);
    }

    /// Enables a system.
    pub fn enable_system(&mut self, system: SystemId) {
        self.store.system_mut(system).enabled = true;
    }

    /// Disables a system. Disabled systems keep their membership but are not run.
    pub fn disable_system(&mut self, system: SystemId) {
        self.store.system_mut(system).enabled = false;
    }

    /// Whether a system is enabled.
    pub fn is_system_enabled(&self, system: SystemId) -> bool {
        self.store.system(system).enabled
    }

    /// Returns the number of registered systems.
    pub fn system_count(&self) -> usize { self.funcs.len() }

    /// Runs one tick.
    ///
    /// Every enabled system is passed to `run` in registration order
    /// together with a snapshot of its matching entities.
    /// After all systems have run, queued entity destructions are applied,
    /// followed by queued component removals.
    ///
    /// Returns false if `run` returned false for any system.
    /// The tick is completed regardless.
    pub fn update<F>(&mut self, dt: Dt, mut run: F) -> bool
    where
        F: FnMut(SystemId, &mut S, &mut Store, &[Entity], Dt) -> bool,
    {
        let mut success = true;

        for (index, func) in self.funcs.iter_mut().enumerate() {
            let id = SystemId(u32::try_from(index).expect("system IDs fit in u32"));
            let state = self.store.system(id);
            if !state.enabled {
                continue;
            }

            let batch: Vec<Entity> = state.members.iter().copied().collect();
            log::trace!("Running {id} on {} entities", batch.len());
            if !run(id, func, &mut self.store, &batch, dt) {
                success = false;
            }
        }

        self.store.flush();
        success
    }
}

/// The per-system state visible to structural changes.
struct SystemState {
    filter:     Filter,
    enabled:    bool,
    /// Entities matching the filter, in the order they started matching.
    ///
    /// Removal shifts the later members to keep that order, which is O(n).
    members:    IndexSet<Entity>,
    on_added:   Option<EntityHook>,
    on_removed: Option<EntityHook>,
}

impl SystemState {
    fn set_member(&mut self, entity: Entity, matches: bool) {
        if matches {
            if self.members.insert(entity) {
                if let Some(hook) = &mut self.on_added {
                    hook(entity);
                }
            }
        } else if self.members.shift_remove(&entity) {
            if let Some(hook) = &mut self.on_removed {
                hook(entity);
            }
        }
    }
}

/// Stores entities, components and system memberships.
///
/// This is the part of the engine that systems can access during a tick.
pub struct Store {
    ealloc:  Ealloc,
    columns: Vec<Box<dyn AnyStorage>>,
    systems: Vec<SystemState>,
    pending: offline::Buffer,
}

impl Store {
    fn system(&self, id: SystemId) -> &SystemState {
        self.systems.get(id.usize()).expect("system ID was not issued by this engine")
    }

    fn system_mut(&mut self, id: SystemId) -> &mut SystemState {
        self.systems.get_mut(id.usize()).expect("system ID was not issued by this engine")
    }

    fn column(&self, id: ComponentId) -> &dyn AnyStorage {
        &**self.columns.get(id.usize()).expect("component ID was not issued by this engine")
    }

    fn column_mut(&mut self, id: ComponentId) -> &mut dyn AnyStorage {
        &mut **self.columns.get_mut(id.usize()).expect("component ID was not issued by this engine")
    }

    fn typed<T: Component>(&self, id: ComponentId) -> &Column<T> {
        self.column(id).as_any().downcast_ref::<Column<T>>().expect("TypeId mismatch")
    }

    fn typed_mut<T: Component>(&mut self, id: ComponentId) -> &mut Column<T> {
        self.column_mut(id).as_any_mut().downcast_mut::<Column<T>>().expect("TypeId mismatch")
    }

    /// Recomputes the membership of one entity in all systems.
    fn sync_entity(&mut self, entity: Entity) {
        let ready = self.ealloc.state(entity).is_ready();
        let columns = &self.columns;
        for system in &mut self.systems {
            let matches = ready && system.filter.matches(columns, entity);
            system.set_member(entity, matches);
        }
    }

    /// Recomputes the membership of all entities in one system.
    fn sync_system(&mut self, id: SystemId) {
        let system =
            self.systems.get_mut(id.usize()).expect("system ID was not issued by this engine");
        for entity in self.ealloc.iter() {
            let matches = system.filter.matches(&self.columns, entity);
            system.set_member(entity, matches);
        }
    }

    /// Applies all queued operations.
    fn flush(&mut self) {
        let buffer = mem::take(&mut self.pending);
        if !buffer.is_empty() {
            log::trace!("Flushing {} queued operations", buffer.len());
        }
        buffer.drain(self);
    }

    /// Returns the number of ready entities.
    pub fn entity_count(&self) -> usize { self.ealloc.len() }

    /// Returns the number of entities that fit without reallocation.
    pub fn capacity(&self) -> usize { self.ealloc.capacity() }

    /// Returns the number of registered component storages.
    pub fn component_count(&self) -> usize { self.columns.len() }

    /// Creates an entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.ealloc.allocate();
        log::trace!("Created entity {entity}");
        self.sync_entity(entity);
        entity
    }

    /// Whether the entity is alive, including entities queued for destruction.
    pub fn is_ready(&self, entity: Entity) -> bool { self.ealloc.state(entity).is_ready() }

    /// Returns the lifecycle state of an entity.
    pub fn state(&self, entity: Entity) -> entity::State { self.ealloc.state(entity) }

    /// Destroys an entity immediately, destructing all its components.
    ///
    /// Operations queued for the entity are dropped,
    /// since its ID may be reused before the queue is flushed.
    /// Returns false if the entity was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.ealloc.deallocate(entity) {
            return false;
        }

        self.pending.forget(entity);
        self.sync_entity(entity);
        for column in &mut self.columns {
            column.remove(entity);
        }
        log::trace!("Destroyed entity {entity}");
        true
    }

    /// Queues an entity for destruction after the current tick.
    ///
    /// Returns false if the entity was not active.
    pub fn queue_destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.ealloc.mark_queued(entity) {
            return false;
        }

        self.pending.push(offline::DestroyEntity { entity });
        true
    }

    /// Attaches a component to an alive entity, reconstructing it if already present.
    ///
    /// Returns `None` if the entity is not alive.
    ///
    /// # Panics
    /// Panics if `comp` was not issued by this engine or does not store `T`.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        comp: ComponentId,
        init: Option<T>,
    ) -> Option<&mut T> {
        if !self.is_ready(entity) {
            return None;
        }

        self.typed_mut::<T>(comp).insert(entity, init);
        self.sync_entity(entity);
        self.typed_mut::<T>(comp).get_mut(entity)
    }

    /// Gets the component of an entity.
    ///
    /// # Panics
    /// Panics if `comp` was not issued by this engine or does not store `T`.
    pub fn get_component<T: Component>(&self, entity: Entity, comp: ComponentId) -> Option<&T> {
        self.typed::<T>(comp).get(entity)
    }

    /// Gets the component of an entity mutably.
    ///
    /// # Panics
    /// Panics if `comp` was not issued by this engine or does not store `T`.
    pub fn get_component_mut<T: Component>(
        &mut self,
        entity: Entity,
        comp: ComponentId,
    ) -> Option<&mut T> {
        self.typed_mut::<T>(comp).get_mut(entity)
    }

    /// Whether the entity has the component.
    ///
    /// # Panics
    /// Panics if `comp` was not issued by this engine.
    pub fn has_component(&self, entity: Entity, comp: ComponentId) -> bool {
        self.column(comp).contains(entity)
    }

    /// Detaches and destructs a component immediately.
    ///
    /// Returns false if the entity did not have the component.
    ///
    /// # Panics
    /// Panics if `comp` was not issued by this engine.
    pub fn remove_component(&mut self, entity: Entity, comp: ComponentId) -> bool {
        if !self.column_mut(comp).remove(entity) {
            return false;
        }

        self.sync_entity(entity);
        true
    }

    /// Queues a component for removal after the current tick.
    pub fn queue_remove_component(&mut self, entity: Entity, comp: ComponentId) {
        debug_assert!(
            comp.usize() < self.columns.len(),
            "component ID was not issued by this engine"
        );
        self.pending.push(offline::RemoveComponent { entity, comp });
    }

    /// Returns the entities currently matching a system, in the order they started matching.
    pub fn system_members(&self, system: SystemId) -> impl Iterator<Item = Entity> + '_ {
        self.system(system).members.iter().copied()
    }
}
