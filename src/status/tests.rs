use std::collections::HashSet;

use strum::IntoEnumIterator;

use super::{Error, Result, Status};

#[test]
fn test_messages_are_distinct() {
    let messages: HashSet<_> = Status::iter().map(Status::message).collect();
    assert_eq!(messages.len(), Status::iter().count());
}

#[test]
fn test_display_uses_message() {
    assert_eq!(Status::CompExists.to_string(), "Component Already Registered");

    let err = Error::new(Status::SysNotReg, "System Move is not registered");
    assert_eq!(err.to_string(), "[System Not Registered] System Move is not registered");
    assert_eq!(err.status(), Status::SysNotReg);
    assert_eq!(err.message(), "System Move is not registered");
}

#[test]
fn test_status_of_result() {
    let ok: Result<i32> = Ok(3);
    assert_eq!(Status::of(&ok), Status::Success);

    let err: Result<i32> = Err(Error::new(Status::InitFail, "Invalid entity count"));
    assert_eq!(Status::of(&err), Status::InitFail);
}

#[test]
#[should_panic(expected = "Success is not an error")]
#[cfg(debug_assertions)]
fn test_success_is_not_an_error() { Error::new(Status::Success, "nothing"); }
