//! Core of a single-list todo manager.
//!
//! # Overview
//! A [`Store`] owns the ordered todo collection and mediates every mutation
//! into a persistence call, either against the collaborator HTTP API
//! ([`RemoteStore`]) or a durable key-value slot ([`LocalStore`]). The
//! [`TodoApp`] controller couples a store with the [`TodoForm`] state machine
//! and renders an [`AppView`] for whatever frontend draws it.
//!
//! # Design
//! - `TodoClient` is stateless and never performs I/O: each CRUD operation is
//!   split into `build_*` (produces request) and `parse_*` (consumes
//!   response). A [`Transport`] runs the round-trip in between.
//! - Store operations log persistence failures and report only whether the
//!   visible collection changed.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

pub use app::{AppView, FormView, TodoApp};
pub use client::TodoClient;
pub use config::TodoConfig;
pub use error::{ApiError, StorageError, StoreError};
pub use form::{FormIntent, FormMode, TodoForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{LocalStore, RemoteStore, Stats, Store};
pub use types::{CreateTodo, Todo, UpdateTodo};
pub use view::{format_created_at, ItemView, ListView, StatsView};
