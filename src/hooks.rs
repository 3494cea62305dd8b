//! Installing hooks and owning them once installed.

use std::sync::Arc;

use crate::{
    api::HookApi,
    error::{Error, Result},
    event::CallbackData,
    kind::HookKind,
    procedure::{Config, HookProcedure},
};

/// Installs hooks through a [`HookApi`].
#[derive(Debug, Clone)]
pub struct Hooks<A> {
    api: A,
    config: Config,
}

impl<A: HookApi> Hooks<A> {
    pub fn new(api: A) -> Self {
        Self::with_config(api, Config::default())
    }

    pub fn with_config(api: A, config: Config) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hooks mouse messages posted to the calling thread.
    pub fn hook_app_mouse<F>(&self, callback: F) -> Result<Registration<A>>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        self.hook(HookKind::AppMouse, callback)
    }

    /// Hooks keystroke messages posted to the calling thread.
    pub fn hook_app_keyboard<F>(&self, callback: F) -> Result<Registration<A>>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        self.hook(HookKind::AppKeyboard, callback)
    }

    /// Hooks low-level mouse input for the whole desktop.
    pub fn hook_global_mouse<F>(&self, callback: F) -> Result<Registration<A>>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        self.hook(HookKind::GlobalMouse, callback)
    }

    /// Hooks low-level keyboard input for the whole desktop.
    pub fn hook_global_keyboard<F>(&self, callback: F) -> Result<Registration<A>>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        self.hook(HookKind::GlobalKeyboard, callback)
    }

    /// Installs a hook of the given kind.
    ///
    /// On failure nothing is routed and nothing is held; the error carries
    /// the platform error code.
    pub fn hook<F>(&self, kind: HookKind, callback: F) -> Result<Registration<A>>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        let procedure = Arc::new(HookProcedure::new(kind, &self.config, callback));
        let current_thread = self.api.current_thread_id();
        let thread_id = kind.scope().thread_id(current_thread);

        let handle = match self.api.set_hook(kind, thread_id) {
            Ok(handle) => handle,
            Err(e) => {
                #[cfg(feature = "log")]
                log::error!("failed to install {} hook: {}", kind, e);
                return Err(Error::HookInstallationFailed(e));
            }
        };

        // Windows calls the hook on the installing thread.
        self.api.slots().push(kind, current_thread, Arc::clone(&procedure));

        #[cfg(feature = "log")]
        log::info!("installed {} hook (thread {})", kind, thread_id);

        Ok(Registration {
            kind,
            handle: Some(handle),
            procedure,
            api: self.api.clone(),
        })
    }
}

/// An installed hook.
///
/// Owns the native hook handle and the procedure its notifications are
/// dispatched to. The hook is removed exactly once, by [`Registration::unhook`]
/// or on drop.
pub struct Registration<A: HookApi> {
    kind: HookKind,
    handle: Option<A::Handle>,
    procedure: Arc<HookProcedure>,
    api: A,
}

impl<A: HookApi> Registration<A> {
    pub fn kind(&self) -> HookKind {
        self.kind
    }

    /// Returns the native hook handle, or `None` once the hook is removed.
    pub fn handle(&self) -> Option<&A::Handle> {
        self.handle.as_ref()
    }

    pub fn procedure(&self) -> &Arc<HookProcedure> {
        &self.procedure
    }

    /// Returns `true` until the hook has been removed.
    pub fn is_installed(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns `true` if notifications of this hook reach its callback.
    pub fn is_active(&self) -> bool {
        self.api.slots().contains(self.kind, &self.procedure)
    }

    /// Removes the hook from the hook chain.
    ///
    /// If Windows refuses, the hook stays installed and routed, and the
    /// call can be retried. Removing an already removed hook is a no-op.
    pub fn unhook(&mut self) -> Result<()> {
        let Some(handle) = self.handle.as_ref() else {
            return Ok(());
        };

        if let Err(e) = self.api.unhook(handle) {
            #[cfg(feature = "log")]
            log::error!("failed to remove {} hook: {}", self.kind, e);
            return Err(Error::HookRemovalFailed(e));
        }

        self.handle = None;
        self.api.slots().release(self.kind, &self.procedure);

        #[cfg(feature = "log")]
        log::info!("removed {} hook", self.kind);

        Ok(())
    }
}

impl<A: HookApi> Drop for Registration<A> {
    fn drop(&mut self) {
        let _ = self.unhook();
    }
}

impl<A: HookApi> std::fmt::Debug for Registration<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("kind", &self.kind)
            .field("installed", &self.is_installed())
            .field("procedure", &self.procedure)
            .finish()
    }
}
