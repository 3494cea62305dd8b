//! The trampoline that adapts the native hook-procedure protocol to a
//! `Fn(&CallbackData) -> bool` callback.

use std::num::NonZeroIsize;

use crate::{event::CallbackData, kind::HookKind};

/// A callback deciding the fate of a single event.
///
/// Returns `true` to let the event continue down the hook chain and `false`
/// to block it. The callback runs inside the hook procedure and must return
/// quickly: Windows silently removes low-level hooks that exceed
/// `LowLevelHooksTimeout`.
pub type Callback = dyn Fn(&CallbackData) -> bool + Send + Sync + 'static;

const DEFAULT_BLOCK_RESULT: NonZeroIsize = NonZeroIsize::new(1).unwrap();

/// Configuration for how hook procedures answer the operating system.
///
/// By default a blocked event is answered with `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The value returned to Windows when the callback blocks an event.
    /// Any non-zero value prevents the event from reaching the rest of the
    /// hook chain and the target window.
    pub block_result: NonZeroIsize,
}

impl Config {
    /// Sets the value returned for blocked events (builder pattern).
    pub fn set_block_result(mut self, value: NonZeroIsize) -> Self {
        self.block_result = value;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_result: DEFAULT_BLOCK_RESULT,
        }
    }
}

/// A user callback bound to one hook kind.
///
/// A procedure is created once per registration and shared, through an
/// `Arc`, between the registration that owns it and the routing chain the
/// native entry point reads from.
pub struct HookProcedure {
    kind: HookKind,
    block_result: isize,
    callback: Box<Callback>,
}

impl HookProcedure {
    pub fn new<F>(kind: HookKind, config: &Config, callback: F) -> Self
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        Self {
            kind,
            block_result: config.block_result.get(),
            callback: Box::new(callback),
        }
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    pub fn block_result(&self) -> isize {
        self.block_result
    }

    /// Handles one notification.
    ///
    /// `next` forwards the notification to the next hook in the chain and
    /// yields its result. A negative `code` is forwarded untouched without
    /// consulting the callback. Otherwise the callback decides: `true`
    /// forwards, `false` returns the block result and never calls `next`.
    pub fn dispatch<N>(&self, code: i32, w_param: usize, l_param: isize, next: N) -> isize
    where
        N: FnOnce() -> isize,
    {
        if code < 0 {
            return next();
        }

        let data = CallbackData::new(w_param, l_param);
        if (self.callback)(&data) {
            next()
        } else {
            #[cfg(feature = "log")]
            log::trace!("blocked {} event: {:?}", self.kind, data);
            self.block_result
        }
    }
}

impl std::fmt::Debug for HookProcedure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookProcedure")
            .field("kind", &self.kind)
            .field("block_result", &self.block_result)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn default_block_result_is_one() {
        assert_eq!(Config::default().block_result.get(), 1);
    }

    #[test]
    fn negative_code_skips_callback() {
        let calls = std::sync::Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let procedure = HookProcedure::new(HookKind::GlobalMouse, &Config::default(), move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            false
        });

        assert_eq!(procedure.dispatch(-1, 0, 0, || 7), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn custom_block_result_is_returned() {
        let config = Config::default().set_block_result(NonZeroIsize::new(-1).unwrap());
        let procedure = HookProcedure::new(HookKind::AppKeyboard, &config, |_| false);

        assert_eq!(procedure.dispatch(0, 0, 0, || unreachable!()), -1);
    }
}
