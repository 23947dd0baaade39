//! A typed façade over a dynamic ECS engine.
//!
//! # What is ECS?
//! ECS is a data-oriented programming paradigm.
//! Objects ("Entities") store their data in "Components",
//! which are processed in "Systems".
//!
//! # Two layers
//! The [`engine`] is fully dynamic.
//! It identifies components by a runtime [`ComponentId`](engine::ComponentId),
//! stores them in type-erased columns,
//! and identifies systems by a runtime [`SystemId`](engine::SystemId).
//! It has no notion of Rust types or system names.
//!
//! [`Ecs`] restores both.
//! Component types are registered by their Rust type,
//! so `ecs.entity_get_component::<Transform>(entity)` resolves the column of `Transform`
//! through the type registry of the instance.
//! Systems are registered under a unique name,
//! and all filtering and scheduling calls refer to them by that name.
//! Registrations are scoped to the instance:
//! two instances never share component or system IDs.
//!
//! # Systems
//! A system is a function called once per [`Ecs::update`]
//! with the [`World`] and the entities currently matching the system.
//! A system with no requirements matches every entity.
//! [`Ecs::system_require`] and [`Ecs::system_exclude`] narrow it down,
//! and the membership is updated eagerly whenever a component is attached or detached,
//! so `update` never scans entities.
//! Systems run serially in registration order.
//!
//! Structural changes made by a system are visible to later systems in the same tick.
//! Destruction and removal can also be deferred with
//! [`World::entity_queue_destroy`] and [`World::entity_queue_remove_component`],
//! which are applied after all systems have run,
//! entity destructions first.
//!
//! # Errors
//! Every fallible operation returns a [`Result`] whose error carries a [`Status`] kind.
//! Failures are also passed to the [`Reporter`](reporter::Reporter) of the instance,
//! which forwards to [`reporter::set_hook`] if installed and logs through [`log`] otherwise.
//!
//! ```
//! use dynface::{Ecs, Hooks, Status};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Counter(u32);
//!
//! let mut ecs = Ecs::builder().capacity(16).build().unwrap();
//! ecs.component_register(Hooks::<Counter>::new()).unwrap();
//! ecs.system_register(
//!     "count",
//!     |world, batch, _dt| {
//!         for &entity in batch {
//!             world.entity_get_component_mut::<Counter>(entity)?.0 += 1;
//!         }
//!         Ok(())
//!     },
//!     None,
//!     None,
//! )
//! .unwrap();
//! ecs.system_require::<Counter>("count").unwrap();
//!
//! let entity = ecs.entity_create().unwrap();
//! ecs.entity_add_component(entity, Some(Counter(5))).unwrap();
//! ecs.update(1.0).unwrap();
//! assert_eq!(ecs.entity_get_component::<Counter>(entity), Ok(&Counter(6)));
//!
//! let err = ecs.system_enable("missing").unwrap_err();
//! assert_eq!(err.status(), Status::SysNotReg);
//! ```

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

pub mod comp;
pub use comp::{Component, Hooks};

pub mod engine;

pub mod entity;
pub use entity::Entity;

mod instance;
pub use instance::{Builder, Ecs};

mod registry;

pub mod reporter;

pub mod status;
pub use status::{Error, Result, Status};

pub mod storage;

pub mod system;
pub use system::{Dt, SystemError, SystemResult};

#[cfg(any(test, feature = "internal-bench"))]
pub mod test_util;

pub mod world;
pub use world::World;
