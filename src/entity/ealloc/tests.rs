use super::Ealloc;
use crate::entity::{Entity, State};

#[test]
fn test_allocate_sequential() {
    let mut ealloc = Ealloc::with_capacity(4).expect("small capacity");
    let ids: Vec<_> = (0..3).map(|_| ealloc.allocate().to_raw()).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(ealloc.len(), 3);
}

#[test]
fn test_recycle_lowest_first() {
    let mut ealloc = Ealloc::with_capacity(4).expect("small capacity");
    let entities: Vec<_> = (0..5).map(|_| ealloc.allocate()).collect();

    assert!(ealloc.deallocate(entities[3]));
    assert!(ealloc.deallocate(entities[1]));
    assert!(!ealloc.deallocate(entities[1]), "double free must be rejected");

    assert_eq!(ealloc.allocate(), entities[1]);
    assert_eq!(ealloc.allocate(), entities[3]);
    assert_eq!(ealloc.allocate().to_raw(), 5);
}

#[test]
fn test_queue_state() {
    let mut ealloc = Ealloc::with_capacity(1).expect("small capacity");
    let entity = ealloc.allocate();

    assert!(ealloc.mark_queued(entity));
    assert_eq!(ealloc.state(entity), State::QueuedDestroy);
    assert!(ealloc.state(entity).is_ready());
    assert!(!ealloc.mark_queued(entity), "already queued");

    assert!(ealloc.deallocate(entity));
    assert_eq!(ealloc.state(entity), State::Destroyed);
    assert!(!ealloc.mark_queued(entity));
}

#[test]
fn test_unknown_entity_is_destroyed() {
    let ealloc = Ealloc::with_capacity(1).expect("small capacity");
    assert_eq!(ealloc.state(Entity::new(42)), State::Destroyed);
}

#[test]
fn test_iter_skips_destroyed() {
    let mut ealloc = Ealloc::with_capacity(4).expect("small capacity");
    let entities: Vec<_> = (0..4).map(|_| ealloc.allocate()).collect();
    ealloc.deallocate(entities[2]);

    let live: Vec<_> = ealloc.iter().collect();
    assert_eq!(live, vec![entities[0], entities[1], entities[3]]);
}

#[test]
fn test_clear_restarts_ids() {
    let mut ealloc = Ealloc::with_capacity(8).expect("small capacity");
    for _ in 0..3 {
        ealloc.allocate();
    }
    ealloc.clear();

    assert_eq!(ealloc.len(), 0);
    assert!(ealloc.capacity() >= 8);
    assert_eq!(ealloc.allocate().to_raw(), 0);
}

#[test]
fn test_unreservable_capacity() {
    assert!(Ealloc::with_capacity(usize::MAX).is_none());
}
