use windows::Win32::{
    Foundation::{LPARAM, LRESULT, WPARAM},
    System::Threading::GetCurrentThreadId,
    UI::WindowsAndMessaging::{
        CallNextHookEx, HHOOK, HOOKPROC, SetWindowsHookExW, UnhookWindowsHookEx,
        WINDOWS_HOOK_ID,
    },
};

use crate::{
    api::{self, HookApi},
    kind::HookKind,
    slots::ProcedureSlots,
};

static SLOTS: ProcedureSlots = ProcedureSlots::new();

/// The hook primitives of `user32.dll`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHooks;

impl HookApi for NativeHooks {
    type Handle = HHOOK;

    fn slots(&self) -> &ProcedureSlots {
        &SLOTS
    }

    fn current_thread_id(&self) -> u32 {
        unsafe { GetCurrentThreadId() }
    }

    fn set_hook(&self, kind: HookKind, thread_id: u32) -> std::io::Result<HHOOK> {
        let hook = unsafe {
            SetWindowsHookExW(
                WINDOWS_HOOK_ID(kind.hook_id()),
                entry_point(kind),
                None,
                thread_id,
            )
        }?;

        Ok(hook)
    }

    fn unhook(&self, handle: &HHOOK) -> std::io::Result<()> {
        unsafe { UnhookWindowsHookEx(*handle) }?;
        Ok(())
    }

    fn call_next_hook(&self, code: i32, w_param: usize, l_param: isize) -> isize {
        unsafe { CallNextHookEx(None, code, WPARAM(w_param), LPARAM(l_param)) }.0
    }
}

fn entry_point(kind: HookKind) -> HOOKPROC {
    match kind {
        HookKind::AppMouse => Some(app_mouse_proc),
        HookKind::AppKeyboard => Some(app_keyboard_proc),
        HookKind::GlobalMouse => Some(global_mouse_proc),
        HookKind::GlobalKeyboard => Some(global_keyboard_proc),
    }
}

macro_rules! hook_proc {
    ($name:ident, $kind:expr) => {
        unsafe extern "system" fn $name(n_code: i32, w_param: WPARAM, l_param: LPARAM) -> LRESULT {
            LRESULT(api::route(&NativeHooks, $kind, n_code, w_param.0, l_param.0))
        }
    };
}

hook_proc!(app_mouse_proc, HookKind::AppMouse);
hook_proc!(app_keyboard_proc, HookKind::AppKeyboard);
hook_proc!(global_mouse_proc, HookKind::GlobalMouse);
hook_proc!(global_keyboard_proc, HookKind::GlobalKeyboard);
