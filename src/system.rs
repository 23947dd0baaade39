//! Systems are functions run once per tick over the entities matching their filter.
//!
//! A system is registered by name on an [`Ecs`](crate::Ecs) and starts out matching every entity.
//! [`Ecs::system_require`](crate::Ecs::system_require) and
//! [`Ecs::system_exclude`](crate::Ecs::system_exclude) narrow the set of matching entities.
//! During [`Ecs::update`](crate::Ecs::update), each enabled system receives
//! the [`World`] it can mutate and a snapshot of the entities it matched when it started.

use std::{error, fmt};

pub use crate::engine::{Dt, EntityHook};
use crate::world::World;
use crate::{status, Entity};

/// The result of running a system once.
pub type SystemResult = Result<(), SystemError>;

/// A type-erased system function.
pub type SystemFn = Box<dyn FnMut(&mut World<'_>, &[Entity], Dt) -> SystemResult>;

/// A system failed during a tick.
///
/// A failed system does not abort the tick.
/// The failure is collected and reported when the tick completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemError {
    message: String,
}

impl SystemError {
    /// Creates an error with a message.
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }

    /// The failure message.
    pub fn message(&self) -> &str { &self.message }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(&self.message) }
}

impl error::Error for SystemError {}

impl From<status::Error> for SystemError {
    fn from(err: status::Error) -> Self { Self::new(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::SystemError;
    use crate::status::{Error, Status};

    #[test]
    fn test_from_status() {
        let err: SystemError = Error::new(Status::CompGetFail, "no Transform on #3").into();
        assert_eq!(err.message(), "[Component Retrieval Failed] no Transform on #3");
        assert_eq!(err.to_string(), err.message());
    }
}
