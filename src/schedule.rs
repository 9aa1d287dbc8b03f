//! Bookkeeping for scheduled page tasks. The handle type is generic so the browser layer can
//! store timer handles while tests use plain values.

use std::cell::Cell;
use std::rc::Rc;

/// Set by a task when it runs, so its handle can be let go.
#[derive(Clone, Debug, Default)]
pub struct RunFlag(Rc<Cell<bool>>);

impl RunFlag {
    pub fn mark(&self) {
        self.0.set(true);
    }

    pub fn has_run(&self) -> bool {
        self.0.get()
    }
}

/// Handles of tasks that have not run yet. Each insert first drops the handles of tasks that
/// already ran, so the list only holds live work.
#[derive(Debug)]
pub struct PendingTasks<H> {
    entries: Vec<(RunFlag, H)>,
}

impl<H> Default for PendingTasks<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> PendingTasks<H> {
    pub fn push(&mut self, flag: RunFlag, handle: H) {
        self.prune();
        self.entries.push((flag, handle));
    }

    /// Drops handles of tasks that already ran. Returns how many were dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(flag, _)| !flag.has_run());
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every handle and returns how many of them had not run yet.
    pub fn cancel_all(&mut self) -> usize {
        self.entries
            .drain(..)
            .filter(|(flag, _)| !flag.has_run())
            .count()
    }
}
