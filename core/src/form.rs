//! Text-entry state machine for creating and editing todos.
//!
//! The form is in edit mode exactly while it holds the id of the record being
//! edited. It only produces intents; the app decides when edit mode ends.

use uuid::Uuid;

use crate::types::{normalize_text, Todo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit { id: Uuid },
}

/// What a successful submit asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    Add { text: String },
    Update { id: Uuid, text: String },
}

#[derive(Debug, Clone, Default)]
pub struct TodoForm {
    mode: FormMode,
    input: String,
}

impl TodoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Id of the record being edited, if any.
    pub fn editing(&self) -> Option<Uuid> {
        match self.mode {
            FormMode::Edit { id } => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Switch to edit mode, prefilled with the record's current text.
    pub fn begin_edit(&mut self, todo: &Todo) {
        self.mode = FormMode::Edit { id: todo.id };
        self.input = todo.text.clone();
    }

    /// Leave edit mode and clear the input.
    pub fn cancel(&mut self) {
        self.mode = FormMode::Create;
        self.input.clear();
    }

    /// Blank input yields no intent. In create mode the input is cleared.
    /// In edit mode it is kept until the app confirms the update, so a
    /// refused update leaves the typed text in place for another attempt
    /// instead of clearing it on every non-blank submit.
    pub fn submit(&mut self) -> Option<FormIntent> {
        let text = normalize_text(&self.input)?.to_string();
        match self.mode {
            FormMode::Create => {
                self.input.clear();
                Some(FormIntent::Add { text })
            }
            FormMode::Edit { id } => Some(FormIntent::Update { id, text }),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add a new todo...",
            FormMode::Edit { .. } => "Edit todo...",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add",
            FormMode::Edit { .. } => "Update",
        }
    }

    pub fn can_cancel(&self) -> bool {
        self.editing().is_some()
    }
}
