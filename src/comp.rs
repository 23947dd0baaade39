//! Component types and their construction hooks.
//!
//! Any `Default + 'static` type can be registered as a component.
//! Each registered type may carry a constructor and a destructor,
//! shared by every attachment of that type on the instance.

use std::fmt;

use crate::Entity;

/// A type that can be attached to entities.
///
/// `Default` provides the value of a component attached
/// without an initializer and without a constructor.
pub trait Component: Default + 'static {}

impl<T: Default + 'static> Component for T {}

/// Builds a component when it is attached to an entity.
///
/// Receives the initializer passed to the attach call, if any.
pub type Constructor<T> = Box<dyn Fn(Entity, Option<T>) -> T>;

/// Cleans up a component right before it is dropped.
pub type Destructor<T> = Box<dyn Fn(Entity, &mut T)>;

/// The construction hooks of a component type.
pub struct Hooks<T> {
    ctor: Option<Constructor<T>>,
    dtor: Option<Destructor<T>>,
}

impl<T> Default for Hooks<T> {
    fn default() -> Self { Self { ctor: None, dtor: None } }
}

impl<T: Component> Hooks<T> {
    /// Creates hooks that store the initializer as-is
    /// (or the default value if there is no initializer).
    pub fn new() -> Self { Self::default() }

    /// Sets the constructor.
    pub fn constructor(mut self, ctor: impl Fn(Entity, Option<T>) -> T + 'static) -> Self {
        self.ctor = Some(Box::new(ctor));
        self
    }

    /// Sets the destructor.
    pub fn destructor(mut self, dtor: impl Fn(Entity, &mut T) + 'static) -> Self {
        self.dtor = Some(Box::new(dtor));
        self
    }

    pub(crate) fn construct(&self, entity: Entity, init: Option<T>) -> T {
        match &self.ctor {
            Some(ctor) => ctor(entity, init),
            None => init.unwrap_or_default(),
        }
    }

    pub(crate) fn destruct(&self, entity: Entity, value: &mut T) {
        if let Some(dtor) = &self.dtor {
            dtor(entity, value);
        }
    }
}

impl<T> fmt::Debug for Hooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("ctor", &self.ctor.is_some())
            .field("dtor", &self.dtor.is_some())
            .finish()
    }
}
