//! A caller-owned collection of registrations.
//!
//! Each registration keeps its own procedure alive until it is removed, so
//! several hooks of the same kind stay distinguishable, each reached at its
//! own position in the hook chain.

use std::collections::BTreeMap;

use crate::{
    api::HookApi,
    error::Result,
    event::CallbackData,
    hooks::{Hooks, Registration},
    kind::HookKind,
};

/// Identifies a registration within a [`HookRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

#[derive(Debug)]
pub struct HookRegistry<A: HookApi> {
    hooks: Hooks<A>,
    entries: BTreeMap<RegistrationId, Registration<A>>,
    next_id: u64,
}

impl<A: HookApi> HookRegistry<A> {
    pub fn new(hooks: Hooks<A>) -> Self {
        Self {
            hooks,
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Installs a hook and keeps its registration.
    pub fn install<F>(&mut self, kind: HookKind, callback: F) -> Result<RegistrationId>
    where
        F: Fn(&CallbackData) -> bool + Send + Sync + 'static,
    {
        let registration = self.hooks.hook(kind, callback)?;
        let id = RegistrationId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, registration);
        Ok(id)
    }

    pub fn get(&self, id: RegistrationId) -> Option<&Registration<A>> {
        self.entries.get(&id)
    }

    /// Returns the registrations of `kind`, oldest first.
    pub fn registrations(
        &self,
        kind: HookKind,
    ) -> impl Iterator<Item = (RegistrationId, &Registration<A>)> {
        self.entries
            .iter()
            .filter(move |(_, r)| r.kind() == kind)
            .map(|(id, r)| (*id, r))
    }

    /// Unhooks a registration and removes it.
    ///
    /// Returns `None` if `id` is unknown. A registration that fails to
    /// unhook stays in the registry.
    pub fn remove(&mut self, id: RegistrationId) -> Option<Result<()>> {
        let registration = self.entries.get_mut(&id)?;
        if let Err(e) = registration.unhook() {
            return Some(Err(e));
        }
        self.entries.remove(&id);
        Some(Ok(()))
    }

    /// Unhooks every registration, newest first.
    ///
    /// Registrations that fail to unhook stay in the registry; the first
    /// failure is returned.
    pub fn clear(&mut self) -> Result<()> {
        let mut first_error = None;
        for registration in self.entries.values_mut().rev() {
            if let Err(e) = registration.unhook() {
                first_error.get_or_insert(e);
            }
        }
        self.entries.retain(|_, r| r.is_installed());
        first_error.map_or(Ok(()), Err)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
