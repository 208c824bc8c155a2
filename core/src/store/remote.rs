use std::thread;

use uuid::Uuid;

use super::{position, Store};
use crate::client::TodoClient;
use crate::error::{ApiError, StoreError};
use crate::http::Transport;
use crate::types::{normalize_text, CreateTodo, Todo, UpdateTodo};

/// Upper bound on delete requests in flight during `clear_completed`.
const MAX_PARALLEL_DELETES: usize = 8;

/// Store backed by the collaborator API.
///
/// Every mutation is confirmed by the server before it is applied; the
/// returned record replaces the local copy. A failed call leaves the
/// collection untouched.
pub struct RemoteStore<T> {
    client: TodoClient,
    transport: T,
    todos: Vec<Todo>,
}

impl<T: Transport> RemoteStore<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            todos: Vec::new(),
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    fn fetch_all(&self) -> Result<Vec<Todo>, StoreError> {
        let response = self.transport.execute(self.client.build_list_todos())?;
        Ok(self.client.parse_list_todos(response)?)
    }

    fn create(&self, text: &str) -> Result<Todo, StoreError> {
        let input = CreateTodo {
            text: text.to_string(),
        };
        let request = self.client.build_create_todo(&input)?;
        let response = self.transport.execute(request)?;
        Ok(self.client.parse_create_todo(response)?)
    }

    fn put(&self, id: Uuid, input: &UpdateTodo) -> Result<Todo, StoreError> {
        let request = self.client.build_update_todo(id, input)?;
        let response = self.transport.execute(request)?;
        Ok(self.client.parse_update_todo(response)?)
    }

    fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_todo(id))?;
        self.client.parse_delete_todo(response)
    }

    /// Swap in the server's copy of a record, keeping its slot.
    fn apply(&mut self, idx: usize, id: Uuid, result: Result<Todo, StoreError>, op: &str) -> bool {
        match result {
            Ok(todo) => {
                self.todos[idx] = todo;
                true
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to {} todo", op);
                false
            }
        }
    }
}

impl<T: Transport> Store for RemoteStore<T> {
    fn todos(&self) -> &[Todo] {
        &self.todos
    }

    fn load(&mut self) -> bool {
        match self.fetch_all() {
            Ok(todos) => {
                tracing::debug!(count = todos.len(), "fetched todos");
                self.todos = todos;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch todos");
                false
            }
        }
    }

    fn add(&mut self, text: &str) -> bool {
        let Some(text) = normalize_text(text) else {
            tracing::warn!(error = %StoreError::EmptyText, "add rejected");
            return false;
        };
        match self.create(text) {
            Ok(todo) => {
                self.todos.push(todo);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to add todo");
                false
            }
        }
    }

    fn update(&mut self, id: Uuid, text: &str) -> bool {
        let Some(text) = normalize_text(text) else {
            tracing::warn!(%id, error = %StoreError::EmptyText, "update rejected");
            return false;
        };
        let Some(idx) = position(&self.todos, id) else {
            return false;
        };
        let result = self.put(id, &UpdateTodo::text(text));
        self.apply(idx, id, result, "update")
    }

    fn toggle(&mut self, id: Uuid) -> bool {
        let Some(idx) = position(&self.todos, id) else {
            return false;
        };
        let result = self.put(id, &UpdateTodo::completed(!self.todos[idx].completed));
        self.apply(idx, id, result, "toggle")
    }

    fn delete(&mut self, id: Uuid) -> bool {
        let Some(idx) = position(&self.todos, id) else {
            return false;
        };
        match self.remove(id) {
            Ok(()) => {
                self.todos.remove(idx);
                true
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to delete todo");
                false
            }
        }
    }

    /// Deletes run concurrently, at most `MAX_PARALLEL_DELETES` at a time,
    /// and all settle before the collection is touched. Records the server
    /// confirmed gone (deleted or 404) are dropped; the rest stay visible.
    fn clear_completed(&mut self) -> bool {
        let ids: Vec<Uuid> = self
            .todos
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
        if ids.is_empty() {
            return false;
        }

        let this = &*self;
        let mut outcomes: Vec<(Uuid, Result<(), ApiError>)> = Vec::with_capacity(ids.len());
        for batch in ids.chunks(MAX_PARALLEL_DELETES) {
            thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .iter()
                    .map(|&id| {
                        let spawned = thread::Builder::new()
                            .name("todo-delete".into())
                            .spawn_scoped(scope, move || this.remove(id));
                        (id, spawned)
                    })
                    .collect();
                for (id, spawned) in handles {
                    let result = match spawned {
                        Ok(handle) => handle.join().unwrap_or_else(|_| {
                            Err(ApiError::Transport("delete worker panicked".into()))
                        }),
                        Err(e) => Err(ApiError::Transport(format!(
                            "failed to spawn delete worker: {e}"
                        ))),
                    };
                    outcomes.push((id, result));
                }
            });
        }

        let mut gone = Vec::with_capacity(outcomes.len());
        for (id, result) in outcomes {
            match result {
                Ok(()) | Err(ApiError::NotFound) => gone.push(id),
                Err(e) => tracing::error!(%id, error = %e, "failed to clear completed todo"),
            }
        }
        if gone.len() < ids.len() {
            tracing::warn!(
                cleared = gone.len(),
                requested = ids.len(),
                "clear completed partially failed"
            );
        }
        if gone.is_empty() {
            return false;
        }
        self.todos.retain(|t| !gone.contains(&t.id));
        true
    }
}
