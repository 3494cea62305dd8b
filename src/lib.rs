//! Installs mouse and keyboard hooks on Windows and lets a callback decide,
//! event by event, whether input continues down the hook chain or is blocked.
//!
//! Four hook kinds are supported: mouse and keyboard hooks on the calling
//! thread ([`HookKind::AppMouse`], [`HookKind::AppKeyboard`]) and low-level
//! hooks for the whole desktop ([`HookKind::GlobalMouse`],
//! [`HookKind::GlobalKeyboard`]).
//!
//! The dispatch logic is independent of `user32.dll`: [`hooks::Hooks`] works
//! with any [`api::HookApi`], and on Windows [`NativeHooks`] provides the real
//! one.

pub mod api;
pub mod error;
pub mod event;
pub mod hooks;
pub mod kind;
pub mod procedure;
pub mod registry;
pub mod slots;

#[cfg(windows)]
pub mod hook_thread;
#[cfg(windows)]
mod native;

pub use event::CallbackData;
pub use kind::{HookKind, HookScope};
#[cfg(windows)]
pub use native::NativeHooks;

#[cfg(windows)]
mod facade {
    use crate::{error::Result, event::CallbackData, hooks::Hooks, native::NativeHooks};

    /// A hook installed through `user32.dll`.
    pub type NativeRegistration = crate::hooks::Registration<NativeHooks>;

    /// Hooks mouse messages posted to the calling thread.
    pub fn hook_app_mouse<F>(callback: F) -> Result<NativeRegistration>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        Hooks::new(NativeHooks).hook_app_mouse(callback)
    }

    /// Hooks keystroke messages posted to the calling thread.
    pub fn hook_app_keyboard<F>(callback: F) -> Result<NativeRegistration>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        Hooks::new(NativeHooks).hook_app_keyboard(callback)
    }

    /// Hooks low-level mouse input for the whole desktop.
    ///
    /// The calling thread must run a message loop for the hook to fire.
    pub fn hook_global_mouse<F>(callback: F) -> Result<NativeRegistration>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        Hooks::new(NativeHooks).hook_global_mouse(callback)
    }

    /// Hooks low-level keyboard input for the whole desktop.
    ///
    /// The calling thread must run a message loop for the hook to fire.
    pub fn hook_global_keyboard<F>(callback: F) -> Result<NativeRegistration>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        Hooks::new(NativeHooks).hook_global_keyboard(callback)
    }
}

#[cfg(windows)]
pub use facade::*;
