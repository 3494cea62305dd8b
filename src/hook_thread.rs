//! Hosting a hook on a dedicated thread with its own message loop.
//!
//! Windows delivers low-level hook notifications to the thread that
//! installed the hook, and only while that thread is pumping messages.
//! [`spawn_hook_thread`] takes care of both.

use std::thread;

use windows::Win32::{
    Foundation::{LPARAM, WPARAM},
    UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, MSG, PM_NOREMOVE, PeekMessageW, PostThreadMessageW,
        TranslateMessage, WM_QUIT, WM_USER,
    },
};

use crate::{
    api::HookApi,
    error::{Error, Result},
    event::CallbackData,
    hooks::Hooks,
    kind::HookKind,
    native::NativeHooks,
    procedure::Config,
};

/// A running hook thread.
#[derive(Debug)]
pub struct HookThread {
    thread_id: u32,
    join_handle: thread::JoinHandle<()>,
}

impl HookThread {
    /// Returns the identifier of the thread the hook is installed from.
    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    /// Asks the message loop to quit, then waits for the hook to be removed.
    pub fn stop(self) -> Result<()> {
        unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
            .map_err(|e| Error::HookThreadStopFailed(e.into()))?;
        self.join()
    }

    /// Waits for the message loop to end.
    pub fn join(self) -> Result<()> {
        self.join_handle
            .join()
            .map_err(|_| Error::HookThreadCrashed)
    }
}

/// Spawns a thread that installs a hook of `kind` and runs a message loop.
///
/// Returns once the hook is installed, or with the installation error.
pub fn spawn_hook_thread<F>(kind: HookKind, callback: F) -> Result<HookThread>
where
    F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
{
    spawn_hook_thread_with_config(kind, Config::default(), callback)
}

pub fn spawn_hook_thread_with_config<F>(
    kind: HookKind,
    config: Config,
    callback: F,
) -> Result<HookThread>
where
    F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
{
    let (result_tx, result_rx) = oneshot::channel::<Result<u32>>();

    let join_handle = thread::spawn(move || {
        let hooks = Hooks::with_config(NativeHooks, config);
        let mut msg = MSG::default();

        // Force the message queue into existence before anyone can post WM_QUIT.
        let _ = unsafe { PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE) };

        let _registration = match hooks.hook(kind, callback) {
            Err(e) => {
                let _ = result_tx.send(Err(e));
                return;
            }
            Ok(registration) => {
                let _ = result_tx.send(Ok(hooks.api().current_thread_id()));
                registration
            }
        };

        #[cfg(feature = "log")]
        log::debug!("started {} hook message loop", kind);

        unsafe {
            while GetMessageW(&mut msg, None, 0, 0).into() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        #[cfg(feature = "log")]
        log::debug!("{} hook message loop ended", kind);
    });

    match result_rx.recv() {
        Ok(Ok(thread_id)) => Ok(HookThread {
            thread_id,
            join_handle,
        }),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(Error::HookThreadCrashed),
    }
}
