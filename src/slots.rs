//! Routing table from hook kind to the procedures its native entry point calls.
//!
//! Windows only accepts a bare function pointer for a hook procedure, so every
//! hook of one [`HookKind`] enters through the same entry point. To tell them
//! apart, each kind keeps the procedures of its installed hooks in install
//! order, tagged with the thread that installed them. Windows calls a hook on
//! that thread, newest first, and `CallNextHookEx` moves one step down the
//! chain. Counting how many of its own hooks a thread has already forwarded
//! through gives the position of the hook being called.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{kind::HookKind, procedure::HookProcedure};

#[derive(Debug)]
struct Entry {
    thread_id: u32,
    procedure: Arc<HookProcedure>,
}

type Chain = Mutex<Vec<Entry>>;

#[derive(Debug)]
pub struct ProcedureSlots {
    chains: [Chain; 4],
    depths: Mutex<BTreeMap<(u32, HookKind), usize>>,
}

impl ProcedureSlots {
    pub const fn new() -> Self {
        Self {
            chains: [
                Mutex::new(Vec::new()),
                Mutex::new(Vec::new()),
                Mutex::new(Vec::new()),
                Mutex::new(Vec::new()),
            ],
            depths: Mutex::new(BTreeMap::new()),
        }
    }

    fn chain(&self, kind: HookKind) -> MutexGuard<'_, Vec<Entry>> {
        self.chains[kind.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn depths(&self) -> MutexGuard<'_, BTreeMap<(u32, HookKind), usize>> {
        self.depths.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds the procedure of a hook installed from `thread_id`.
    pub fn push(&self, kind: HookKind, thread_id: u32, procedure: Arc<HookProcedure>) {
        self.chain(kind).push(Entry {
            thread_id,
            procedure,
        });
    }

    /// Returns the procedure of the hook Windows is calling on `thread_id`.
    pub fn current(&self, kind: HookKind, thread_id: u32) -> Option<Arc<HookProcedure>> {
        let depth = self.depths().get(&(thread_id, kind)).copied().unwrap_or(0);

        self.chain(kind)
            .iter()
            .rev()
            .filter(|e| e.thread_id == thread_id)
            .nth(depth)
            .map(|e| Arc::clone(&e.procedure))
    }

    /// Marks that `thread_id` is forwarding to the next hook of `kind`.
    ///
    /// The position moves back when the returned guard is dropped.
    pub fn descend(&self, kind: HookKind, thread_id: u32) -> ChainStep<'_> {
        *self.depths().entry((thread_id, kind)).or_insert(0) += 1;
        ChainStep {
            slots: self,
            kind,
            thread_id,
        }
    }

    /// Removes `procedure` from the chain of `kind`.
    ///
    /// Returns `true` if it was present.
    pub fn release(&self, kind: HookKind, procedure: &Arc<HookProcedure>) -> bool {
        let mut chain = self.chain(kind);
        let Some(position) = chain.iter().position(|e| Arc::ptr_eq(&e.procedure, procedure)) else {
            return false;
        };
        chain.remove(position);
        true
    }

    /// Returns `true` if `procedure` is in the chain of `kind`.
    pub fn contains(&self, kind: HookKind, procedure: &Arc<HookProcedure>) -> bool {
        self.chain(kind)
            .iter()
            .any(|e| Arc::ptr_eq(&e.procedure, procedure))
    }

    /// Returns the number of procedures routed for `kind`.
    pub fn len(&self, kind: HookKind) -> usize {
        self.chain(kind).len()
    }
}

impl Default for ProcedureSlots {
    fn default() -> Self {
        Self::new()
    }
}

/// A forwarding step in progress; see [`ProcedureSlots::descend`].
#[derive(Debug)]
pub struct ChainStep<'a> {
    slots: &'a ProcedureSlots,
    kind: HookKind,
    thread_id: u32,
}

impl Drop for ChainStep<'_> {
    fn drop(&mut self) {
        let mut depths = self.slots.depths();
        let key = (self.thread_id, self.kind);
        if let Some(depth) = depths.get_mut(&key) {
            *depth -= 1;
            if *depth == 0 {
                depths.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::Config;

    fn procedure(kind: HookKind) -> Arc<HookProcedure> {
        Arc::new(HookProcedure::new(kind, &Config::default(), |_| true))
    }

    #[test]
    fn kinds_have_independent_chains() {
        let slots = ProcedureSlots::new();
        let mouse = procedure(HookKind::AppMouse);
        let keyboard = procedure(HookKind::AppKeyboard);

        slots.push(HookKind::AppMouse, 1, mouse.clone());
        slots.push(HookKind::AppKeyboard, 1, keyboard.clone());

        assert!(slots.contains(HookKind::AppMouse, &mouse));
        assert!(slots.contains(HookKind::AppKeyboard, &keyboard));
        assert!(!slots.contains(HookKind::AppMouse, &keyboard));
        assert!(slots.current(HookKind::GlobalMouse, 1).is_none());
    }

    #[test]
    fn descending_walks_newest_to_oldest() {
        let slots = ProcedureSlots::new();
        let first = procedure(HookKind::GlobalKeyboard);
        let second = procedure(HookKind::GlobalKeyboard);
        slots.push(HookKind::GlobalKeyboard, 1, first.clone());
        slots.push(HookKind::GlobalKeyboard, 1, second.clone());

        let top = slots.current(HookKind::GlobalKeyboard, 1).unwrap();
        assert!(Arc::ptr_eq(&top, &second));
        {
            let _step = slots.descend(HookKind::GlobalKeyboard, 1);
            let below = slots.current(HookKind::GlobalKeyboard, 1).unwrap();
            assert!(Arc::ptr_eq(&below, &first));
            {
                let _step = slots.descend(HookKind::GlobalKeyboard, 1);
                assert!(slots.current(HookKind::GlobalKeyboard, 1).is_none());
            }
        }
        let top = slots.current(HookKind::GlobalKeyboard, 1).unwrap();
        assert!(Arc::ptr_eq(&top, &second));
    }

    #[test]
    fn threads_see_only_their_own_hooks() {
        let slots = ProcedureSlots::new();
        let ours = procedure(HookKind::AppKeyboard);
        let theirs = procedure(HookKind::AppKeyboard);
        slots.push(HookKind::AppKeyboard, 1, ours.clone());
        slots.push(HookKind::AppKeyboard, 2, theirs.clone());

        let on_first = slots.current(HookKind::AppKeyboard, 1).unwrap();
        assert!(Arc::ptr_eq(&on_first, &ours));

        let _step = slots.descend(HookKind::AppKeyboard, 2);
        let on_first = slots.current(HookKind::AppKeyboard, 1).unwrap();
        assert!(Arc::ptr_eq(&on_first, &ours));
    }

    #[test]
    fn release_removes_only_that_procedure() {
        let slots = ProcedureSlots::new();
        let first = procedure(HookKind::GlobalMouse);
        let second = procedure(HookKind::GlobalMouse);
        slots.push(HookKind::GlobalMouse, 1, first.clone());
        slots.push(HookKind::GlobalMouse, 1, second.clone());

        assert!(slots.release(HookKind::GlobalMouse, &second));
        assert!(!slots.release(HookKind::GlobalMouse, &second));
        assert!(slots.contains(HookKind::GlobalMouse, &first));
        assert_eq!(slots.len(HookKind::GlobalMouse), 1);

        let top = slots.current(HookKind::GlobalMouse, 1).unwrap();
        assert!(Arc::ptr_eq(&top, &first));
    }
}
