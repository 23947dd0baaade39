#![allow(missing_docs)]

use std::cell::RefCell;
use std::rc::Rc;

use parking_lot::Once;

use crate::reporter::Reporter;
use crate::system::{Dt, SystemResult};
use crate::{Ecs, Entity, Hooks, Status, World};

pub fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Name(pub String);

/// Never registered by [`instance`].
#[derive(Debug, Default)]
pub struct Unregistered;

/// Records every reported failure.
#[derive(Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<(Status, String)>>>);

impl Recorder {
    /// Returns the statuses reported so far and forgets them.
    pub fn take_statuses(&self) -> Vec<Status> {
        self.0.borrow_mut().drain(..).map(|(status, _)| status).collect()
    }

    /// Returns the reports so far and forgets them.
    pub fn take(&self) -> Vec<(Status, String)> { self.0.borrow_mut().drain(..).collect() }
}

impl Reporter for Recorder {
    fn report(&self, status: Status, message: &str) {
        self.0.borrow_mut().push((status, message.to_string()));
    }
}

/// Creates an instance with [`Transform`], [`Velocity`] and [`Name`] registered.
pub fn instance(capacity: i64) -> (Ecs, Recorder) {
    init();

    let recorder = Recorder::default();
    let mut ecs = Ecs::builder()
        .capacity(capacity)
        .reporter(recorder.clone())
        .build()
        .expect("test capacity is valid");
    ecs.component_register(Hooks::<Transform>::new()).expect("fresh instance");
    ecs.component_register(Hooks::<Velocity>::new()).expect("fresh instance");
    ecs.component_register(Hooks::<Name>::new()).expect("fresh instance");
    (ecs, recorder)
}

/// Integrates [`Velocity`] into [`Transform`].
pub fn move_system(world: &mut World<'_>, batch: &[Entity], dt: Dt) -> SystemResult {
    for &entity in batch {
        let velocity = *world.entity_get_component::<Velocity>(entity)?;
        let transform = world.entity_get_component_mut::<Transform>(entity)?;
        transform.x += velocity.x * dt as f32;
        transform.y += velocity.y * dt as f32;
    }
    Ok(())
}

/// Creates an entity with a [`Transform`] at the origin and the given [`Velocity`].
pub fn spawn_mover(ecs: &mut Ecs, x: f32, y: f32) -> Entity {
    let entity = ecs.entity_create().expect("instance is initialized");
    ecs.entity_add_component(entity, Some(Transform::default())).expect("entity was just created");
    ecs.entity_add_component(entity, Some(Velocity { x, y })).expect("entity was just created");
    entity
}

/// A family of distinct component types for benchmarks.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CompN<const N: usize>(pub i32);

/// Creates a silent instance with `CompN::<1>` to `CompN::<16>` registered.
pub fn comp_n_instance(capacity: i64) -> Ecs {
    let mut ecs = Ecs::builder()
        .capacity(capacity)
        .reporter(crate::reporter::Noop)
        .build()
        .expect("benchmark capacity is valid");

    macro_rules! register {
        ($($n:literal)*) => {
            $(
                ecs.component_register(Hooks::<CompN<$n>>::new()).expect("fresh instance");
            )*
        }
    }
    register!(1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16);

    ecs
}
