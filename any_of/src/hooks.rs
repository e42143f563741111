//! Process-wide hook for contract violations.
//!
//! Using an [`AnyOf`](crate::AnyOf) in a way its contract forbids, like reading a value that was
//! moved out, is a bug in the calling program. By default it's reported as a panic carrying the
//! [`Violation`] message. A hook installed with [`set_violation_hook`] runs first, and can record
//! the violation, or end the process, e.g. with [`abort_on_violation`].
//!
//! ```
//! use any_of::hooks;
//!
//! hooks::set_violation_hook(|violation| {
//!     eprintln!("any_of: {violation}");
//! });
//! # hooks::reset_violation_hook();
//! ```
//!
//! No lock is held while the hook runs, so it may install or remove hooks and use other `AnyOf`
//! values. A hook that itself reads an invalid `AnyOf` is called again for that violation, and
//! recurses until something panics or aborts.

use alloc::sync::Arc;

use crate::violation::Violation;

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        use std::sync::{
            PoisonError,
            RwLock,
        };
    } else {
        use spin::RwLock;
    }
}

/// A hook run for every contract violation, see [`set_violation_hook`].
pub type ViolationHook = Arc<dyn Fn(&Violation) + Send + Sync + 'static>;

/// The installed hook.
///
/// With the `std` feature this is a [`std::sync::RwLock`], otherwise a spinning `spin::RwLock`.
/// The lock is only held to swap or clone the `Arc`, never while a hook runs, so a poisoned `std`
/// lock still holds a consistent slot and is recovered.
struct HookSlot(RwLock<Option<ViolationHook>>);

impl HookSlot {
    const fn new() -> Self {
        HookSlot(RwLock::new(None))
    }

    /// Returns the installed hook, releasing the lock before returning.
    fn current(&self) -> Option<ViolationHook> {
        #[cfg(feature = "std")]
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        guard.clone()
    }

    /// Installs `hook`, returning the one it replaces.
    fn replace(&self, hook: Option<ViolationHook>) -> Option<ViolationHook> {
        #[cfg(feature = "std")]
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        #[cfg(not(feature = "std"))]
        let mut guard = self.0.write();

        core::mem::replace(&mut *guard, hook)
    }
}

static HOOK: HookSlot = HookSlot::new();

/// Installs `hook`, replacing any previously installed hook.
pub fn set_violation_hook<F>(hook: F)
where
    F: Fn(&Violation) + Send + Sync + 'static,
{
    HOOK.replace(Some(Arc::new(hook)));
}

/// Removes the installed hook, returning it.
pub fn take_violation_hook() -> Option<ViolationHook> {
    HOOK.replace(None)
}

/// Removes the installed hook, restoring the default behavior.
pub fn reset_violation_hook() {
    drop(take_violation_hook());
}

/// A hook which prints the violation to stderr and aborts the process.
///
/// ```no_run
/// any_of::hooks::set_violation_hook(any_of::hooks::abort_on_violation);
/// ```
#[cfg(feature = "std")]
pub fn abort_on_violation(violation: &Violation) {
    std::eprintln!("fatal: {violation}");
    std::process::abort();
}

/// Runs the installed hook, if any.
pub(crate) fn invoke(violation: &Violation) {
    if let Some(hook) = HOOK.current() {
        hook(violation);
    }
}
