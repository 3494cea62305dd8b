//! Decoded views over the raw parameters of a hook notification.
//!
//! A hook procedure receives two raw words: `w_param`, usually the window
//! message that triggered the notification, and `l_param`, usually a pointer
//! to a hook-specific structure. [`CallbackData`] carries both unchanged and
//! offers typed accessors on top of them.
//!
//! The typed low-level accessors ([`CallbackData::keyboard_event`] and
//! [`CallbackData::mouse_event`]) are only sound for the matching global hook
//! kind, where Windows guarantees `l_param` points to a `KBDLLHOOKSTRUCT` or
//! `MSLLHOOKSTRUCT` for the duration of the call.

/// `WM_KEYDOWN`
pub const WM_KEYDOWN: u32 = 0x0100;
/// `WM_KEYUP`
pub const WM_KEYUP: u32 = 0x0101;
/// `WM_SYSKEYDOWN`
pub const WM_SYSKEYDOWN: u32 = 0x0104;
/// `WM_SYSKEYUP`
pub const WM_SYSKEYUP: u32 = 0x0105;

/// The two raw parameters of a single hook notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackData {
    w_param: usize,
    l_param: isize,
}

impl CallbackData {
    pub fn new(w_param: usize, l_param: isize) -> Self {
        Self { w_param, l_param }
    }

    pub fn w_param(&self) -> usize {
        self.w_param
    }

    pub fn l_param(&self) -> isize {
        self.l_param
    }

    /// Interprets `w_param` as a window message identifier.
    ///
    /// This is how low-level hooks and `WH_MOUSE` report the event type.
    pub fn message(&self) -> u32 {
        self.w_param as u32
    }

    /// Returns the keystroke message of a low-level keyboard notification.
    ///
    /// Returns `None` if `w_param` is not one of the four keystroke messages.
    pub fn key_message(&self) -> Option<KeyMessage> {
        KeyMessage::from_message(self.message())
    }
}

/// Represents the type of Windows message related to a keyboard event.
///
/// See also: [Keyboard Input](https://learn.microsoft.com/en-us/windows/win32/inputdev/about-keyboard-input#keystroke-messages)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMessage {
    /// [`WM_KEYDOWN`](https://learn.microsoft.com/en-us/windows/win32/inputdev/wm-keydown)
    KeyDown,
    /// [`WM_KEYUP`](https://learn.microsoft.com/en-us/windows/win32/inputdev/wm-keyup)
    KeyUp,
    /// [`WM_SYSKEYDOWN`](https://learn.microsoft.com/en-us/windows/win32/inputdev/wm-syskeydown)
    SysKeyDown,
    /// [`WM_SYSKEYUP`](https://learn.microsoft.com/en-us/windows/win32/inputdev/wm-syskeyup)
    SysKeyUp,
}

impl KeyMessage {
    /// Converts a message identifier to the corresponding `KeyMessage`, if applicable.
    pub fn from_message(message: u32) -> Option<KeyMessage> {
        match message {
            WM_KEYDOWN => Some(KeyMessage::KeyDown),
            WM_KEYUP => Some(KeyMessage::KeyUp),
            WM_SYSKEYDOWN => Some(KeyMessage::SysKeyDown),
            WM_SYSKEYUP => Some(KeyMessage::SysKeyUp),
            _ => None,
        }
    }

    /// Returns `true` if this is a key-down event.
    pub fn is_key_down(&self) -> bool {
        matches!(self, KeyMessage::KeyDown | KeyMessage::SysKeyDown)
    }

    /// Returns `true` if this is a key-up event.
    pub fn is_key_up(&self) -> bool {
        !self.is_key_down()
    }
}

#[cfg(windows)]
pub use self::native::{KeyboardEvent, MouseEvent};

#[cfg(windows)]
mod native {
    use windows::Win32::{
        Foundation::POINT,
        UI::{
            Input::KeyboardAndMouse::VIRTUAL_KEY,
            WindowsAndMessaging::{KBDLLHOOKSTRUCT, MSLLHOOKSTRUCT},
        },
    };

    use super::{CallbackData, KeyMessage};

    /// A keyboard event received via a low-level keyboard hook.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct KeyboardEvent {
        /// The raw Windows keyboard event structure.
        pub kbd: KBDLLHOOKSTRUCT,
        /// The keystroke message, if `w_param` carried a known one.
        pub message: Option<KeyMessage>,
    }

    impl KeyboardEvent {
        /// Returns the virtual key code of the event.
        pub fn virtual_key(&self) -> VIRTUAL_KEY {
            VIRTUAL_KEY(self.kbd.vkCode as _)
        }
    }

    /// A mouse event received via a low-level mouse hook.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct MouseEvent {
        /// The raw Windows mouse event structure.
        pub mouse: MSLLHOOKSTRUCT,
        /// The mouse message (`WM_MOUSEMOVE`, `WM_LBUTTONDOWN`, ...).
        pub message: u32,
    }

    impl MouseEvent {
        /// Returns the cursor position in per-monitor-aware screen coordinates.
        pub fn position(&self) -> POINT {
            self.mouse.pt
        }
    }

    impl CallbackData {
        /// Decodes a low-level keyboard notification.
        ///
        /// # Safety
        /// `l_param` must be a valid pointer to a `KBDLLHOOKSTRUCT`, which holds
        /// only inside a `HookKind::GlobalKeyboard` callback.
        pub unsafe fn keyboard_event(&self) -> KeyboardEvent {
            let kbd = unsafe { *(self.l_param as *const KBDLLHOOKSTRUCT) };
            KeyboardEvent {
                kbd,
                message: self.key_message(),
            }
        }

        /// Decodes a low-level mouse notification.
        ///
        /// # Safety
        /// `l_param` must be a valid pointer to a `MSLLHOOKSTRUCT`, which holds
        /// only inside a `HookKind::GlobalMouse` callback.
        pub unsafe fn mouse_event(&self) -> MouseEvent {
            let mouse = unsafe { *(self.l_param as *const MSLLHOOKSTRUCT) };
            MouseEvent {
                mouse,
                message: self.message(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_messages_decode_from_w_param() {
        let down = CallbackData::new(WM_KEYDOWN as usize, 0);
        let sys_up = CallbackData::new(WM_SYSKEYUP as usize, 0);
        let other = CallbackData::new(0x0200, 0);

        assert_eq!(down.key_message(), Some(KeyMessage::KeyDown));
        assert!(down.key_message().unwrap().is_key_down());
        assert_eq!(sys_up.key_message(), Some(KeyMessage::SysKeyUp));
        assert!(sys_up.key_message().unwrap().is_key_up());
        assert_eq!(other.key_message(), None);
    }

    #[cfg(windows)]
    #[test]
    fn message_constants_match_windows_crate() {
        use windows::Win32::UI::WindowsAndMessaging as wm;

        assert_eq!(WM_KEYDOWN, wm::WM_KEYDOWN);
        assert_eq!(WM_KEYUP, wm::WM_KEYUP);
        assert_eq!(WM_SYSKEYDOWN, wm::WM_SYSKEYDOWN);
        assert_eq!(WM_SYSKEYUP, wm::WM_SYSKEYUP);
    }

    #[cfg(windows)]
    #[test]
    fn keyboard_event_reads_l_param() {
        use windows::Win32::UI::WindowsAndMessaging::KBDLLHOOKSTRUCT;

        let kbd = KBDLLHOOKSTRUCT {
            vkCode: 0x41,
            time: 10,
            ..Default::default()
        };
        let data = CallbackData::new(WM_KEYDOWN as usize, &kbd as *const _ as isize);
        let event = unsafe { data.keyboard_event() };

        assert_eq!(event.virtual_key().0, 0x41);
        assert_eq!(event.message, Some(KeyMessage::KeyDown));
    }
}
