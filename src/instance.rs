//! The instance owns an engine and the registries that give it static types and names.

use std::{any, fmt};

use itertools::Itertools;

use crate::comp::{Component, Hooks};
use crate::engine::{ComponentId, Engine, SystemId};
use crate::registry::{Names, Types};
use crate::reporter::{self, Reporter};
use crate::status::{Error, Result, Status};
use crate::storage::Column;
use crate::system::{Dt, EntityHook, SystemFn, SystemResult};
use crate::world::{self, Reader, World};
use crate::Entity;

fn not_init(reporter: &dyn Reporter) -> Error {
    world::fail(reporter, Status::NotInit, "ECS instance is not initialized")
}

/// Configures and creates an [`Ecs`].
pub struct Builder {
    capacity: i64,
    reporter: Box<dyn Reporter>,
}

impl Default for Builder {
    fn default() -> Self {
        Self { capacity: Self::DEFAULT_CAPACITY, reporter: Box::new(reporter::Global) }
    }
}

impl Builder {
    /// The initial entity capacity if [`Builder::capacity`] is not called.
    pub const DEFAULT_CAPACITY: i64 = 1024;

    /// Creates a builder with the default configuration.
    pub fn new() -> Self { Self::default() }

    /// Sets the initial entity capacity. Must be positive.
    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the reporter notified of every failure.
    pub fn reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Creates an initialized instance.
    pub fn build(self) -> Result<Ecs> {
        let mut ecs = Ecs {
            engine:     None,
            components: Types::default(),
            systems:    Names::default(),
            reporter:   self.reporter,
        };
        ecs.init(self.capacity)?;
        Ok(ecs)
    }
}

/// A typed ECS instance.
///
/// Component types are registered by their Rust type and systems by a unique name.
/// Registrations are scoped to the instance and forgotten when it is destroyed.
///
/// An instance starts uninitialized.
/// Operations other than [`Ecs::init`] and [`Ecs::destroy`] fail with [`Status::NotInit`]
/// until it is initialized, while queries return false.
/// Every failure is returned as an [`Error`] and also passed to the instance [`Reporter`].
pub struct Ecs {
    engine:     Option<Engine<SystemFn>>,
    components: Types,
    systems:    Names,
    reporter:   Box<dyn Reporter>,
}

impl Default for Ecs {
    fn default() -> Self { Self::new() }
}

impl Ecs {
    /// Creates an uninitialized instance reporting to [`reporter::Global`].
    pub fn new() -> Self {
        Self {
            engine:     None,
            components: Types::default(),
            systems:    Names::default(),
            reporter:   Box::new(reporter::Global),
        }
    }

    /// Creates an instance and initializes it with the given capacity.
    ///
    /// If initialization fails, the failure is reported
    /// and the returned instance is uninitialized.
    pub fn with_capacity(capacity: i64) -> Self {
        let mut ecs = Self::new();
        if let Err(err) = ecs.init(capacity) {
            log::debug!("Instance left uninitialized: {err}");
        }
        ecs
    }

    /// Starts configuring an instance.
    pub fn builder() -> Builder { Builder::new() }

    fn fail(&self, status: Status, message: impl Into<String>) -> Error {
        world::fail(&*self.reporter, status, message)
    }

    fn engine(&self) -> Result<&Engine<SystemFn>> {
        self.engine.as_ref().ok_or_else(|| not_init(&*self.reporter))
    }

    fn engine_mut(&mut self) -> Result<&mut Engine<SystemFn>> {
        self.engine.as_mut().ok_or_else(|| not_init(&*self.reporter))
    }

    fn reader(&self) -> Option<Reader<'_>> {
        let engine = self.engine.as_ref()?;
        Some(Reader::new(engine.store(), &self.components, &*self.reporter))
    }

    fn world(&mut self) -> Result<World<'_>> {
        let engine = self.engine.as_mut().ok_or_else(|| not_init(&*self.reporter))?;
        Ok(World::new(engine.store_mut(), &self.components, &*self.reporter))
    }

    fn system_id(&self, name: &str) -> Result<SystemId> {
        self.systems
            .get(name)
            .ok_or_else(|| self.fail(Status::SysNotReg, format!("System {name} is not registered")))
    }

    /// Initializes the instance with room for `capacity` entities.
    ///
    /// If the instance was already initialized, the previous engine is destroyed
    /// together with all its entities, and all component and system registrations are forgotten.
    /// On failure, the instance is left unchanged.
    pub fn init(&mut self, capacity: i64) -> Result {
        if capacity <= 0 {
            return Err(self.fail(Status::InitFail, format!("Invalid entity count {capacity}")));
        }

        let engine = usize::try_from(capacity)
            .ok()
            .and_then(Engine::<SystemFn>::new)
            .ok_or_else(|| self.fail(Status::InitFail, "Failed to initialize ECS instance"))?;

        if self.engine.replace(engine).is_some() {
            log::debug!("Replaced the previous engine of a reinitialized instance");
        }
        self.components.clear();
        self.systems.clear();
        Ok(())
    }

    /// Releases the engine, destructing all components, and forgets all registrations.
    ///
    /// Destroying an uninitialized instance has no effect.
    pub fn destroy(&mut self) -> Result {
        self.release();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(engine) = self.engine.take() {
            drop(engine);
            log::debug!(
                "Destroyed instance with {} components and {} systems",
                self.components.len(),
                self.systems.len()
            );
        }
        self.components.clear();
        self.systems.clear();
    }

    /// Destroys all entities, keeping component and system registrations.
    ///
    /// Queued operations are discarded.
    /// Removal hooks of systems are not invoked.
    pub fn reset(&mut self) -> Result {
        self.engine_mut()?.reset();
        Ok(())
    }

    /// Whether the instance holds an engine.
    pub fn is_initialized(&self) -> bool { self.engine.is_some() }

    /// Returns the number of entities that fit without reallocation,
    /// or 0 if the instance is not initialized.
    pub fn capacity(&self) -> usize {
        self.engine.as_ref().map_or(0, |engine| engine.store().capacity())
    }

    /// Returns the number of registered component types.
    pub fn component_count(&self) -> usize { self.components.len() }

    /// Returns the number of registered systems.
    pub fn system_count(&self) -> usize { self.systems.len() }

    /// Returns the number of alive entities, or 0 if the instance is not initialized.
    pub fn entity_count(&self) -> usize {
        self.engine.as_ref().map_or(0, |engine| engine.store().entity_count())
    }

    /// Replaces the reporter notified of every failure.
    pub fn set_reporter(&mut self, reporter: impl Reporter + 'static) {
        self.reporter = Box::new(reporter);
    }

    /// Registers a component type with its construction hooks.
    pub fn component_register<T: Component>(&mut self, hooks: Hooks<T>) -> Result {
        let engine = self.engine.as_mut().ok_or_else(|| not_init(&*self.reporter))?;

        if self.components.contains::<T>() {
            return Err(world::fail(
                &*self.reporter,
                Status::CompExists,
                format!("Component {} is already registered", any::type_name::<T>()),
            ));
        }

        let id: ComponentId =
            engine.register_component(Box::new(Column::new(hooks))).ok_or_else(|| {
                world::fail(
                    &*self.reporter,
                    Status::CompRegFail,
                    format!("Failed to register component {}", any::type_name::<T>()),
                )
            })?;
        self.components.insert::<T>(id);
        Ok(())
    }

    /// Whether `T` is registered on this instance.
    pub fn component_is_registered<T: Component>(&self) -> bool { self.components.contains::<T>() }

    /// Creates an entity with no components.
    pub fn entity_create(&mut self) -> Result<Entity> { Ok(self.world()?.entity_create()) }

    /// Whether the entity is alive. See [`World::entity_is_ready`].
    ///
    /// Returns false without reporting if the instance is not initialized.
    pub fn entity_is_ready(&self, entity: Entity) -> bool {
        self.reader().map_or(false, |reader| reader.is_ready(entity))
    }

    /// Destroys an entity immediately. See [`World::entity_destroy`].
    pub fn entity_destroy(&mut self, entity: Entity) -> Result {
        self.world()?.entity_destroy(entity)
    }

    /// Destroys an entity at the end of the next tick. See [`World::entity_queue_destroy`].
    pub fn entity_queue_destroy(&mut self, entity: Entity) -> Result {
        self.world()?.entity_queue_destroy(entity)
    }

    /// Whether the entity has a component of type `T`. See [`World::entity_has_component`].
    ///
    /// Returns false without reporting if the instance is not initialized,
    /// even if `T` is not registered.
    /// An unregistered `T` is only reported as [`Status::CompNotReg`] on an initialized instance.
    pub fn entity_has_component<T: Component>(&self, entity: Entity) -> bool {
        self.reader().map_or(false, |reader| reader.has::<T>(entity))
    }

    /// Gets a component of an entity.
    pub fn entity_get_component<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.reader().ok_or_else(|| not_init(&*self.reporter))?.get(entity)
    }

    /// Gets a component of an entity mutably.
    pub fn entity_get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.world()?.into_component_mut(entity)
    }

    /// Attaches a component to an entity. See [`World::entity_add_component`].
    pub fn entity_add_component<T: Component>(
        &mut self,
        entity: Entity,
        init: Option<T>,
    ) -> Result<&mut T> {
        self.world()?.into_added_component(entity, init)
    }

    /// Detaches a component immediately. See [`World::entity_remove_component`].
    pub fn entity_remove_component<T: Component>(&mut self, entity: Entity) -> Result {
        self.world()?.entity_remove_component::<T>(entity)
    }

    /// Detaches a component at the end of the next tick.
    /// See [`World::entity_queue_remove_component`].
    pub fn entity_queue_remove_component<T: Component>(&mut self, entity: Entity) -> Result {
        self.world()?.entity_queue_remove_component::<T>(entity)
    }

    /// Registers a system under a unique name.
    ///
    /// The system is enabled and matches every entity until
    /// [`system_require`](Self::system_require) or [`system_exclude`](Self::system_exclude)
    /// narrows it down.
    /// `on_added` and `on_removed` are called when an entity starts or stops matching the system.
    pub fn system_register(
        &mut self,
        name: impl Into<String>,
        func: impl FnMut(&mut World<'_>, &[Entity], Dt) -> SystemResult + 'static,
        on_added: Option<EntityHook>,
        on_removed: Option<EntityHook>,
    ) -> Result {
        let name = name.into();
        let engine = self.engine.as_mut().ok_or_else(|| not_init(&*self.reporter))?;

        if self.systems.contains(&name) {
            return Err(world::fail(
                &*self.reporter,
                Status::SysExists,
                format!("System {name} is already registered"),
            ));
        }

        let func: SystemFn = Box::new(func);
        let id = engine.register_system(func, on_added, on_removed).ok_or_else(|| {
            world::fail(
                &*self.reporter,
                Status::SysRegFail,
                format!("Failed to register system {name}"),
            )
        })?;
        log::debug!("Registered system {name} as {id}");
        self.systems.insert(name, id);
        Ok(())
    }

    fn update_filter<T: Component>(
        &mut self,
        name: &str,
        apply: fn(&mut Engine<SystemFn>, SystemId, ComponentId),
        verb: &str,
    ) -> Result {
        let engine = self.engine.as_mut().ok_or_else(|| not_init(&*self.reporter))?;

        let system = self.systems.get(name);
        let comp = self.components.get::<T>();
        if comp.is_none() {
            let err = world::fail(
                &*self.reporter,
                Status::CompNotReg,
                format!("Component {} is not registered", any::type_name::<T>()),
            );
            if system.is_some() {
                return Err(err);
            }
        }

        match (system, comp) {
            (Some(system), Some(comp)) => {
                apply(engine, system, comp);
                log::debug!("System {name} now {verb} {}", any::type_name::<T>());
                Ok(())
            }
            _ => Err(world::fail(
                &*self.reporter,
                Status::SysNotReg,
                format!("System {name} is not registered"),
            )),
        }
    }

    /// Requires entities processed by the system to have a component of type `T`.
    ///
    /// The membership of existing entities is updated immediately.
    pub fn system_require<T: Component>(&mut self, name: &str) -> Result {
        self.update_filter::<T>(name, Engine::require_component, "requires")
    }

    /// Requires entities processed by the system not to have a component of type `T`.
    ///
    /// The membership of existing entities is updated immediately.
    pub fn system_exclude<T: Component>(&mut self, name: &str) -> Result {
        self.update_filter::<T>(name, Engine::exclude_component, "excludes")
    }

    fn named_system(&mut self, name: &str) -> Result<(&mut Engine<SystemFn>, SystemId)> {
        let engine = self.engine.as_mut().ok_or_else(|| not_init(&*self.reporter))?;
        let id = self.systems.get(name).ok_or_else(|| {
            world::fail(
                &*self.reporter,
                Status::SysNotReg,
                format!("System {name} is not registered"),
            )
        })?;
        Ok((engine, id))
    }

    /// Enables a system.
    pub fn system_enable(&mut self, name: &str) -> Result {
        let (engine, id) = self.named_system(name)?;
        engine.enable_system(id);
        Ok(())
    }

    /// Disables a system, skipping it in subsequent ticks.
    ///
    /// Disabled systems still track matching entities.
    pub fn system_disable(&mut self, name: &str) -> Result {
        let (engine, id) = self.named_system(name)?;
        engine.disable_system(id);
        Ok(())
    }

    /// Whether a system is enabled.
    pub fn system_is_enabled(&self, name: &str) -> Result<bool> {
        let engine = self.engine()?;
        Ok(engine.is_system_enabled(self.system_id(name)?))
    }

    /// Runs one tick.
    ///
    /// Enabled systems run in registration order,
    /// each with the entities matching it when it starts.
    /// Queued entity destructions and then queued component removals
    /// are applied after all systems have run.
    ///
    /// A failing system does not stop the tick.
    /// If any system failed, [`Status::SysUpdateFail`] is returned after the tick completes.
    pub fn update(&mut self, dt: Dt) -> Result {
        let engine = self.engine.as_mut().ok_or_else(|| not_init(&*self.reporter))?;

        let components = &self.components;
        let systems = &self.systems;
        let reporter = &*self.reporter;
        let mut failures = Vec::new();

        engine.update(dt, |id, func, store, batch, dt| {
            let mut world = World::new(store, components, reporter);
            match func(&mut world, batch, dt) {
                Ok(()) => true,
                Err(err) => {
                    let name = systems.name_of(id).unwrap_or("<unnamed>");
                    log::debug!("System {name} failed: {err}");
                    failures.push(format!("{name} ({err})"));
                    false
                }
            }
        });

        if failures.is_empty() {
            Ok(())
        } else {
            let message = format!("Systems failed: {}", failures.iter().join(", "));
            Err(self.fail(Status::SysUpdateFail, message))
        }
    }
}

impl Drop for Ecs {
    fn drop(&mut self) { self.release(); }
}

impl fmt::Debug for Ecs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ecs")
            .field("initialized", &self.is_initialized())
            .field("entities", &self.entity_count())
            .field("components", &self.components)
            .field("systems", &self.systems)
            .finish_non_exhaustive()
    }
}
