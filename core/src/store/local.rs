use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use super::{position, Store};
use crate::error::{StorageError, StoreError};
use crate::storage::KeyValueStorage;
use crate::types::{normalize_text, Todo};

/// Key of the slot holding the serialized collection.
pub const STORAGE_KEY: &str = "todos";

/// Key receiving an unreadable collection before it is overwritten.
pub const BACKUP_KEY: &str = "todos.bak";

/// Store that owns ids and timestamps and mirrors everything into `S`.
///
/// A failed write leaves the in-memory change in place; the next mutation
/// writes the whole collection again.
///
/// A slot that cannot be parsed is copied to [`BACKUP_KEY`] before anything
/// overwrites it. If that copy cannot be made, or the slot could not be read
/// at all, writes stay off until a later `load()` succeeds.
pub struct LocalStore<S> {
    storage: S,
    todos: Vec<Todo>,
    clock: fn() -> DateTime<Utc>,
    writable: bool,
}

impl<S: KeyValueStorage> LocalStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, Utc::now)
    }

    pub fn with_clock(storage: S, clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            storage,
            todos: Vec::new(),
            clock,
            writable: true,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether mutations are currently mirrored into storage.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    fn read(&self) -> Result<Vec<Todo>, StorageError> {
        let Some(raw) = self.storage.get(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| {
            if let Err(backup) = self.storage.set(BACKUP_KEY, &raw) {
                tracing::error!(error = %backup, "failed to back up unreadable todos");
            }
            StorageError::from(e)
        })
    }

    fn persist(&self) {
        if !self.writable {
            tracing::error!(
                count = self.todos.len(),
                "stored todos could not be read or backed up, not overwriting them"
            );
            return;
        }
        let result = serde_json::to_string(&self.todos)
            .map_err(StorageError::from)
            .and_then(|raw| self.storage.set(STORAGE_KEY, &raw));
        match result {
            Ok(()) => tracing::debug!(count = self.todos.len(), "collection saved"),
            Err(e) => tracing::error!(error = %e, "failed to save todos"),
        }
    }

    /// A malformed slot may be overwritten once its raw text sits in the
    /// backup slot unchanged.
    fn backed_up(&self, error: &StorageError) -> bool {
        if !matches!(error, StorageError::Malformed(_)) {
            return false;
        }
        match (self.storage.get(STORAGE_KEY), self.storage.get(BACKUP_KEY)) {
            (Ok(Some(raw)), Ok(Some(backup))) => raw == backup,
            _ => false,
        }
    }

    fn new_todo(&self, text: &str) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            text: text.to_string(),
            completed: false,
            created_at: (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl<S: KeyValueStorage> Store for LocalStore<S> {
    fn todos(&self) -> &[Todo] {
        &self.todos
    }

    fn load(&mut self) -> bool {
        match self.read() {
            Ok(todos) => {
                tracing::debug!(count = todos.len(), "collection loaded");
                self.todos = todos;
                self.writable = true;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load todos, starting empty");
                self.todos.clear();
                self.writable = self.backed_up(&e);
            }
        }
        true
    }

    fn add(&mut self, text: &str) -> bool {
        let Some(text) = normalize_text(text) else {
            tracing::warn!(error = %StoreError::EmptyText, "add rejected");
            return false;
        };
        let todo = self.new_todo(text);
        self.todos.push(todo);
        self.persist();
        true
    }

    fn update(&mut self, id: Uuid, text: &str) -> bool {
        let Some(text) = normalize_text(text) else {
            tracing::warn!(%id, error = %StoreError::EmptyText, "update rejected");
            return false;
        };
        let Some(idx) = position(&self.todos, id) else {
            return false;
        };
        self.todos[idx].text = text.to_string();
        self.persist();
        true
    }

    fn toggle(&mut self, id: Uuid) -> bool {
        let Some(idx) = position(&self.todos, id) else {
            return false;
        };
        self.todos[idx].completed = !self.todos[idx].completed;
        self.persist();
        true
    }

    fn delete(&mut self, id: Uuid) -> bool {
        let Some(idx) = position(&self.todos, id) else {
            return false;
        };
        self.todos.remove(idx);
        self.persist();
        true
    }

    fn clear_completed(&mut self) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        if self.todos.len() == before {
            return false;
        }
        self.persist();
        true
    }
}
