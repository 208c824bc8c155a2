//! The authoritative todo collection and its persistence.
//!
//! # Overview
//! Both variants keep the collection in insertion order and expose the same
//! [`Store`] surface to the app controller:
//! - [`RemoteStore`] forwards each intent to the collaborator API and applies
//!   the record the server returns.
//! - [`LocalStore`] mutates in memory and mirrors the whole collection into a
//!   key-value slot after every change.
//!
//! Mutations report whether the visible collection changed. Persistence
//! failures are logged here and never reach the caller.

mod local;
mod remote;

pub use local::{LocalStore, BACKUP_KEY, STORAGE_KEY};
pub use remote::RemoteStore;

#[cfg(test)]
pub(crate) use remote::tests::FakeApi;

use uuid::Uuid;

use crate::types::Todo;

pub trait Store {
    /// Current records in insertion order.
    fn todos(&self) -> &[Todo];

    /// Replace the collection with what the collaborator holds.
    fn load(&mut self) -> bool;

    /// Append a new record with `completed = false`. Blank text is rejected.
    fn add(&mut self, text: &str) -> bool;

    /// Replace the text of `id`, keeping its position, flag and timestamp.
    fn update(&mut self, id: Uuid, text: &str) -> bool;

    /// Flip `completed` on `id`.
    fn toggle(&mut self, id: Uuid) -> bool;

    fn delete(&mut self, id: Uuid) -> bool;

    /// Remove every completed record in one batch.
    fn clear_completed(&mut self) -> bool;

    fn get(&self, id: Uuid) -> Option<&Todo> {
        self.todos().iter().find(|t| t.id == id)
    }

    fn stats(&self) -> Stats {
        Stats::of(self.todos())
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn todos(&self) -> &[Todo] {
        (**self).todos()
    }

    fn load(&mut self) -> bool {
        (**self).load()
    }

    fn add(&mut self, text: &str) -> bool {
        (**self).add(text)
    }

    fn update(&mut self, id: Uuid, text: &str) -> bool {
        (**self).update(id, text)
    }

    fn toggle(&mut self, id: Uuid) -> bool {
        (**self).toggle(id)
    }

    fn delete(&mut self, id: Uuid) -> bool {
        (**self).delete(id)
    }

    fn clear_completed(&mut self) -> bool {
        (**self).clear_completed()
    }
}

/// Counters shown above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl Stats {
    pub fn of(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total: todos.len(),
            completed,
            remaining: todos.len() - completed,
        }
    }
}

fn position(todos: &[Todo], id: Uuid) -> Option<usize> {
    todos.iter().position(|t| t.id == id)
}
