//! Controller tying the form and view model to a [`Store`].

use uuid::Uuid;

use crate::form::{FormIntent, TodoForm};
use crate::store::Store;
use crate::view::{ListView, Navbar, StatsView, NAVBAR};

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppView {
    pub navbar: Navbar,
    pub loading: bool,
    pub form: FormView,
    pub stats: StatsView,
    pub list: ListView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub input: String,
    pub placeholder: &'static str,
    pub submit_label: &'static str,
    pub can_cancel: bool,
}

pub struct TodoApp<S> {
    store: S,
    form: TodoForm,
    loading: bool,
}

impl<S: Store> TodoApp<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            form: TodoForm::new(),
            loading: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Load the collection from the collaborator.
    pub fn start(&mut self) -> bool {
        self.loading = true;
        let loaded = self.store.load();
        self.loading = false;
        tracing::info!(count = self.store.todos().len(), loaded, "todo app started");
        loaded
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.form.set_input(text);
    }

    /// Submit the form. Edit mode ends only when the update is applied.
    pub fn submit(&mut self) -> bool {
        match self.form.submit() {
            None => false,
            Some(FormIntent::Add { text }) => self.store.add(&text),
            Some(FormIntent::Update { id, text }) => {
                let applied = self.store.update(id, &text);
                if applied {
                    self.form.cancel();
                }
                applied
            }
        }
    }

    /// Enter edit mode for `id`. Refused for unknown or completed records.
    pub fn edit(&mut self, id: Uuid) -> bool {
        let Some(todo) = self.store.get(id) else {
            return false;
        };
        if todo.completed {
            return false;
        }
        self.form.begin_edit(todo);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.form.cancel();
    }

    pub fn toggle(&mut self, id: Uuid) -> bool {
        self.store.toggle(id)
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let deleted = self.store.delete(id);
        self.drop_stale_edit();
        deleted
    }

    pub fn clear_completed(&mut self) -> bool {
        let cleared = self.store.clear_completed();
        self.drop_stale_edit();
        cleared
    }

    pub fn render(&self) -> AppView {
        AppView {
            navbar: NAVBAR,
            loading: self.loading,
            form: FormView {
                input: self.form.input().to_string(),
                placeholder: self.form.placeholder(),
                submit_label: self.form.submit_label(),
                can_cancel: self.form.can_cancel(),
            },
            stats: self.store.stats().into(),
            list: ListView::of(self.store.todos()),
        }
    }

    fn drop_stale_edit(&mut self) {
        if let Some(id) = self.form.editing() {
            if self.store.get(id).is_none() {
                self.form.cancel();
            }
        }
    }
}
