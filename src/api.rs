//! The native hook primitives, abstracted so the dispatch logic can run
//! against something other than `user32.dll`.

use std::panic::{self, AssertUnwindSafe};

use crate::{kind::HookKind, slots::ProcedureSlots};

/// The operating-system calls a hook registration needs.
///
/// The Windows implementation is `NativeHooks`; every other
/// implementation stands in for it.
pub trait HookApi: Clone {
    /// The handle of an installed hook.
    type Handle;

    /// The routing table the entry points of this API read from.
    fn slots(&self) -> &ProcedureSlots;

    /// Returns the identifier of the calling thread.
    fn current_thread_id(&self) -> u32;

    /// Installs the entry point for `kind` into the hook chain.
    ///
    /// `thread_id` is `0` to hook every thread. On failure the returned
    /// error carries the last platform error code.
    fn set_hook(&self, kind: HookKind, thread_id: u32) -> std::io::Result<Self::Handle>;

    /// Removes a hook previously returned by [`HookApi::set_hook`].
    fn unhook(&self, handle: &Self::Handle) -> std::io::Result<()>;

    /// Passes a notification to the next hook in the chain.
    fn call_next_hook(&self, code: i32, w_param: usize, l_param: isize) -> isize;
}

/// Handles a notification delivered to the entry point for `kind`.
///
/// Dispatches through the procedure of the hook Windows is calling, or
/// forwards to the next hook if none is routed. A panicking callback is
/// treated as "continue" so the event still reaches the rest of the chain.
pub fn route<A: HookApi>(
    api: &A,
    kind: HookKind,
    code: i32,
    w_param: usize,
    l_param: isize,
) -> isize {
    let slots = api.slots();
    let thread_id = api.current_thread_id();

    let forward = || {
        let _step = slots.descend(kind, thread_id);
        api.call_next_hook(code, w_param, l_param)
    };

    let Some(procedure) = slots.current(kind, thread_id) else {
        return forward();
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        procedure.dispatch(code, w_param, l_param, &forward)
    }));

    match result {
        Ok(result) => result,
        Err(_) => {
            #[cfg(feature = "log")]
            log::error!("{} callback panicked, passing the event on", kind);
            forward()
        }
    }
}
