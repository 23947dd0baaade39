use std::any;

use super::World;
use crate::engine::Engine;
use crate::registry::Types;
use crate::storage::Column;
use crate::test_util::{self, Recorder, Transform, Unregistered, Velocity};
use crate::{Hooks, Status};

fn setup() -> (Engine<()>, Types, Recorder) {
    test_util::init();

    let mut engine = Engine::new(8).expect("small capacity");
    let mut types = Types::default();
    let transform = Box::new(Column::new(Hooks::<Transform>::new()));
    types.insert::<Transform>(engine.register_component(transform).expect("id"));
    let velocity = Box::new(Column::new(Hooks::<Velocity>::new()));
    types.insert::<Velocity>(engine.register_component(velocity).expect("id"));
    (engine, types, Recorder::default())
}

#[test]
fn test_component_roundtrip() {
    let (mut engine, types, recorder) = setup();
    let mut world = World::new(engine.store_mut(), &types, &recorder);

    let entity = world.entity_create();
    assert_eq!(world.entity_count(), 1);
    world.entity_add_component(entity, Some(Transform { x: 1.0, y: 0.0 })).expect("ready").y = 2.0;
    world.entity_get_component_mut::<Transform>(entity).expect("attached").x += 1.0;
    assert_eq!(world.entity_get_component::<Transform>(entity), Ok(&Transform { x: 2.0, y: 2.0 }));

    assert!(world.entity_has_component::<Transform>(entity));
    assert!(!world.entity_has_component::<Velocity>(entity));
    assert!(recorder.take().is_empty());
}

#[test]
fn test_failures_are_reported() {
    let (mut engine, types, recorder) = setup();
    let mut world = World::new(engine.store_mut(), &types, &recorder);

    let entity = world.entity_create();
    let err = world.entity_get_component::<Velocity>(entity).expect_err("not attached");
    assert_eq!(err.status(), Status::CompGetFail);
    assert!(!world.entity_has_component::<Unregistered>(entity));

    world.entity_destroy(entity).expect("destroy");
    assert!(world.entity_add_component(entity, Some(Velocity::default())).is_err());

    let reports = recorder.take();
    let statuses: Vec<_> = reports.iter().map(|&(status, _)| status).collect();
    assert_eq!(statuses, vec![Status::CompGetFail, Status::CompNotReg, Status::EntityNotReady]);
    assert!(reports[0].1.contains("Velocity"), "{}", reports[0].1);
    let expected = format!("Cannot add component {} to entity #0", any::type_name::<Velocity>());
    assert_eq!(reports[2].1, expected);
}

#[test]
fn test_queue_remove_on_dead_entity() {
    let (mut engine, types, recorder) = setup();
    let entity = {
        let mut world = World::new(engine.store_mut(), &types, &recorder);
        let entity = world.entity_create();
        world.entity_destroy(entity).expect("destroy");
        world.entity_queue_remove_component::<Transform>(entity).expect("dead entity is a no-op");

        let reused = world.entity_create();
        assert_eq!(reused, entity);
        world.entity_add_component(reused, Some(Transform::default())).expect("ready");
        reused
    };

    engine.update(0.0, |_, _, _, _, _| true);

    let world = World::new(engine.store_mut(), &types, &recorder);
    assert!(world.entity_has_component::<Transform>(entity));
}
