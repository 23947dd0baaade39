//! An entity is a single object that owns components.
//!
//! Entity IDs are issued by the engine and are opaque to the façade.
//! An ID may be reused for a new entity after the original one is destroyed,
//! so an `Entity` must not be kept as a long-term identity.

use std::fmt;

pub(crate) mod ealloc;
pub(crate) use ealloc::Ealloc;

/// An engine-issued entity ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

static_assertions::assert_impl_all!(Entity: Send, Sync, Copy, Ord, std::hash::Hash);

impl Entity {
    pub(crate) fn new(index: u32) -> Self { Self(index) }

    pub(crate) fn usize(self) -> usize { self.0.try_into().expect("usize >= u32") }

    /// Returns the raw ID.
    pub fn to_raw(self) -> u32 { self.0 }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// The lifecycle state of an entity slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The slot is unused or the entity was destroyed.
    Destroyed,
    /// The entity is alive.
    Active,
    /// The entity is alive until the end of the current or next tick.
    QueuedDestroy,
}

impl State {
    /// Whether an entity in this state is still alive.
    pub fn is_ready(self) -> bool { !matches!(self, State::Destroyed) }
}
