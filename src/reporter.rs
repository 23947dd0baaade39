//! Receives diagnostics for every failed operation.
//!
//! A failure is always returned to the caller as an [`Error`](crate::status::Error).
//! In addition, the [`Reporter`] of the instance is notified,
//! which by default forwards to the process-wide hook installed by [`set_hook`]
//! or logs the failure through the [`log`] facade.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::status::Status;

/// A handler that receives failure diagnostics.
pub trait Reporter {
    /// A non-success outcome occurred.
    fn report(&self, status: Status, message: &str);
}

impl<F: Fn(Status, &str)> Reporter for F {
    fn report(&self, status: Status, message: &str) { self(status, message) }
}

/// A reporter that discards all diagnostics.
pub struct Noop;

impl Reporter for Noop {
    fn report(&self, _: Status, _: &str) {}
}

/// A reporter that logs all diagnostics.
pub struct Log(
    /// The log level to log diagnostics with.
    pub log::Level,
);

impl Reporter for Log {
    fn report(&self, status: Status, message: &str) {
        log::log!(self.0, "[{status}] {message}");
    }
}

/// A reporter that writes diagnostics to the standard error stream.
pub struct Stderr;

impl Reporter for Stderr {
    fn report(&self, status: Status, message: &str) { eprintln!("[{status}] {message}"); }
}

/// The default reporter.
///
/// Forwards to the process-wide hook if one is installed,
/// otherwise logs at [`log::Level::Error`].
#[derive(Default)]
pub struct Global;

impl Reporter for Global {
    fn report(&self, status: Status, message: &str) {
        // the lock is released before calling the hook, which may replace itself
        let hook = HOOK.read().clone();
        match hook {
            Some(hook) => hook(status, message),
            None => Log(log::Level::Error).report(status, message),
        }
    }
}

type Hook = Arc<dyn Fn(Status, &str) + Send + Sync>;

static HOOK: RwLock<Option<Hook>> = parking_lot::const_rwlock(None);

/// Installs the process-wide error hook used by [`Global`],
/// replacing the previous one.
pub fn set_hook(hook: impl Fn(Status, &str) + Send + Sync + 'static) {
    *HOOK.write() = Some(Arc::new(hook));
}

/// Removes the process-wide error hook.
///
/// Returns whether a hook was installed.
pub fn clear_hook() -> bool { HOOK.write().take().is_some() }

#[cfg(test)]
mod tests;
