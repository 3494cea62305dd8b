//! Hook kinds and the scope each one is installed with.

use std::fmt::Display;

/// Identifier of `WH_KEYBOARD`.
pub const WH_KEYBOARD: i32 = 2;
/// Identifier of `WH_MOUSE`.
pub const WH_MOUSE: i32 = 7;
/// Identifier of `WH_KEYBOARD_LL`.
pub const WH_KEYBOARD_LL: i32 = 13;
/// Identifier of `WH_MOUSE_LL`.
pub const WH_MOUSE_LL: i32 = 14;

/// One of the four hooks this crate can install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookKind {
    /// Mouse hook on the calling thread's message queue.
    AppMouse,
    /// Keyboard hook on the calling thread's message queue.
    AppKeyboard,
    /// System-wide low-level mouse hook.
    GlobalMouse,
    /// System-wide low-level keyboard hook.
    GlobalKeyboard,
}

impl HookKind {
    pub const ALL: [HookKind; 4] = [
        HookKind::AppMouse,
        HookKind::AppKeyboard,
        HookKind::GlobalMouse,
        HookKind::GlobalKeyboard,
    ];

    /// Returns the platform hook identifier passed to `SetWindowsHookExW`.
    pub fn hook_id(self) -> i32 {
        match self {
            HookKind::AppMouse => WH_MOUSE,
            HookKind::AppKeyboard => WH_KEYBOARD,
            HookKind::GlobalMouse => WH_MOUSE_LL,
            HookKind::GlobalKeyboard => WH_KEYBOARD_LL,
        }
    }

    pub fn scope(self) -> HookScope {
        match self {
            HookKind::AppMouse | HookKind::AppKeyboard => HookScope::App,
            HookKind::GlobalMouse | HookKind::GlobalKeyboard => HookScope::Global,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HookKind::AppMouse => "app mouse",
            HookKind::AppKeyboard => "app keyboard",
            HookKind::GlobalMouse => "global mouse",
            HookKind::GlobalKeyboard => "global keyboard",
        };
        write!(f, "{}", s)
    }
}

/// Where a hook is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookScope {
    /// The calling thread only.
    App,
    /// Every thread on the desktop.
    Global,
}

impl HookScope {
    /// Returns the thread identifier to install with: `current` for
    /// [`HookScope::App`], `0` (all threads) for [`HookScope::Global`].
    pub fn thread_id(self, current: u32) -> u32 {
        match self {
            HookScope::App => current,
            HookScope::Global => 0,
        }
    }
}
