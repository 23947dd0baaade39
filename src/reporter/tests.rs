use std::cell::RefCell;

use parking_lot::Mutex;

use super::{clear_hook, set_hook, Global, Log, Noop, Reporter};
use crate::status::Status;
use crate::test_util;

// tests that install a hook must not interleave
static HOOK_LOCK: Mutex<()> = parking_lot::const_mutex(());

#[test]
fn test_closure_reporter() {
    let seen = RefCell::new(Vec::new());
    let reporter = |status: Status, message: &str| {
        seen.borrow_mut().push(format!("{status}: {message}"));
    };

    Noop.report(Status::UnknownError, "dropped");
    Log(log::Level::Debug).report(Status::UnknownError, "logged");
    reporter.report(Status::SysNotReg, "System physics is not registered");
    assert_eq!(*seen.borrow(), vec!["System Not Registered: System physics is not registered"]);
}

#[test]
fn test_global_hook() {
    test_util::init();
    let _guard = HOOK_LOCK.lock();

    // other tests may report through the global hook concurrently
    static SEEN: Mutex<Vec<(Status, String)>> = parking_lot::const_mutex(Vec::new());
    const MARKER: &str = "HookMarker";

    set_hook(|status, message| {
        if message.contains(MARKER) {
            SEEN.lock().push((status, message.to_string()));
        }
    });
    Global.report(Status::CompNotReg, "Component HookMarker is not registered");
    assert!(clear_hook());
    assert!(!clear_hook());
    Global.report(Status::CompNotReg, "Component HookMarker is not registered again");

    assert_eq!(
        *SEEN.lock(),
        vec![(Status::CompNotReg, "Component HookMarker is not registered".to_string())]
    );
}

#[test]
fn test_hook_clears_itself() {
    test_util::init();
    let _guard = HOOK_LOCK.lock();

    static CALLS: Mutex<Vec<bool>> = parking_lot::const_mutex(Vec::new());
    const MARKER: &str = "SelfClearing";

    set_hook(|_, message| {
        if message.contains(MARKER) {
            // replacing the hook from inside the hook must not deadlock
            CALLS.lock().push(clear_hook());
        }
    });
    Global.report(Status::SysUpdateFail, "System SelfClearing failed");

    assert_eq!(*CALLS.lock(), vec![true]);
    assert!(!clear_hook());
}
