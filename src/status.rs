//! Outcome kinds returned by every fallible operation.

use std::{error, fmt};

/// The closed set of outcome kinds.
///
/// Every fallible operation in this crate either succeeds
/// or fails with an [`Error`] carrying exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Status {
    /// The operation completed.
    Success,
    /// A failure that does not fit any other kind.
    UnknownError,

    /// The instance could not be initialized.
    InitFail,
    /// The operation requires an initialized instance.
    NotInit,

    /// The component type was already registered on this instance.
    CompExists,
    /// The engine could not allocate storage for the component type.
    CompRegFail,
    /// The component type was never registered on this instance.
    CompNotReg,
    /// The entity does not have the requested component.
    CompGetFail,

    /// The entity is not alive.
    EntityNotReady,

    /// A system with the same name was already registered.
    SysExists,
    /// The engine could not register the system.
    SysRegFail,
    /// No system with the given name was registered.
    SysNotReg,
    /// At least one system failed during an update.
    SysUpdateFail,
}

impl Status {
    /// Returns the fixed human-readable message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::UnknownError => "Unknown Error",
            Status::InitFail => "Initialization Failure",
            Status::NotInit => "Instance Not Initialized",
            Status::CompExists => "Component Already Registered",
            Status::CompRegFail => "Component Registration Failed",
            Status::CompNotReg => "Component Not Registered",
            Status::CompGetFail => "Component Retrieval Failed",
            Status::EntityNotReady => "Entity Not Ready",
            Status::SysExists => "System Already Registered",
            Status::SysRegFail => "System Registration Failed",
            Status::SysNotReg => "System Not Registered",
            Status::SysUpdateFail => "System Update Failure",
        }
    }

    /// Maps a result to its outcome kind.
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(err) => err.status,
        }
    }

    /// Whether this kind denotes success.
    pub fn is_success(self) -> bool { self == Status::Success }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.message()) }
}

/// A failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    status:  Status,
    message: String,
}

impl Error {
    /// Creates an error of the given kind with a detail message.
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        debug_assert!(!status.is_success(), "Success is not an error");
        Self { status, message: message.into() }
    }

    /// The outcome kind of this error.
    pub fn status(&self) -> Status { self.status }

    /// The detail message of this error.
    pub fn message(&self) -> &str { &self.message }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl error::Error for Error {}

/// The result type of fallible operations.
pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
