//! C-ABI wrapper around `todo-core`.
//!
//! # Overview
//! Lets a foreign UI host drive the remote todo API: it asks this library to
//! build each HTTP request, executes it with its own stack, and hands the
//! response back for parsing. Item dates are formatted here too so every host
//! shows the same label.
//!
//! # Design
//! - Every `extern "C"` function runs inside `catch_unwind` so panics never
//!   cross the FFI boundary.
//! - `todo_build_*` returns null on bad arguments; `todo_parse_*` always
//!   returns an `FfiTodoResult` envelope tagged by `FfiDataTag`.
//! - The caller owns every returned pointer and releases it with the
//!   matching `todo_free_*` function.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, UnwindSafe};
use std::ptr;

use todo_core::types::{normalize_text, CreateTodo, UpdateTodo};
use todo_core::{HttpRequest, HttpResponse, TodoClient};
use uuid::Uuid;

use types::*;

/// Borrow a C string as UTF-8. Null or invalid UTF-8 yields `None`.
fn read_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

fn read_id(id: *const c_char) -> Option<Uuid> {
    read_str(id).and_then(|s| Uuid::parse_str(s).ok())
}

fn read_client<'a>(client: *const FfiTodoClient) -> Option<&'a TodoClient> {
    if client.is_null() {
        return None;
    }
    Some(&unsafe { &*client }.inner)
}

/// Run a builder, mapping `None` and panics to null.
fn build<F>(f: F) -> *mut FfiHttpRequest
where
    F: FnOnce() -> Option<HttpRequest> + UnwindSafe,
{
    catch_unwind(move || f().map_or(ptr::null_mut(), FfiHttpRequest::from_core))
        .unwrap_or(ptr::null_mut())
}

/// Validate the shared parse arguments, then hand the response to `parse`.
fn parse<F>(
    name: &str,
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
    f: F,
) -> *mut FfiTodoResult
where
    F: FnOnce(&TodoClient, HttpResponse) -> *mut FfiTodoResult + UnwindSafe,
{
    catch_unwind(move || {
        let Some(client) = read_client(client) else {
            return FfiTodoResult::null_arg("client");
        };
        if response.is_null() {
            return FfiTodoResult::null_arg("response");
        }
        let response = unsafe { &*response };
        let core = HttpResponse {
            status: response.status,
            headers: Vec::new(),
            body: read_str(response.body).unwrap_or_default().to_string(),
        };
        f(client, core)
    })
    .unwrap_or_else(|_| FfiTodoResult::panic(format!("panic in {name}")))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`. Returns null if `base_url` is null
/// or not UTF-8. Free with `todo_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_client_new(base_url: *const c_char) -> *mut FfiTodoClient {
    catch_unwind(|| match read_str(base_url) {
        Some(url) => Box::into_raw(Box::new(FfiTodoClient {
            inner: TodoClient::new(url),
        })),
        None => ptr::null_mut(),
    })
    .unwrap_or(ptr::null_mut())
}

/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_client_free(client: *mut FfiTodoClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| drop(unsafe { Box::from_raw(client) }));
    }
}

// ---------------------------------------------------------------------------
// Request builders
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn todo_build_list_todos(client: *const FfiTodoClient) -> *mut FfiHttpRequest {
    build(|| Some(read_client(client)?.build_list_todos()))
}

/// Returns null when `text` is null or blank after trimming.
#[unsafe(no_mangle)]
pub extern "C" fn todo_build_create_todo(
    client: *const FfiTodoClient,
    text: *const c_char,
) -> *mut FfiHttpRequest {
    build(|| {
        let client = read_client(client)?;
        let text = normalize_text(read_str(text)?)?.to_string();
        client.build_create_todo(&CreateTodo { text }).ok()
    })
}

/// Rename a todo. Returns null for a bad id or blank text.
#[unsafe(no_mangle)]
pub extern "C" fn todo_build_update_text(
    client: *const FfiTodoClient,
    id: *const c_char,
    text: *const c_char,
) -> *mut FfiHttpRequest {
    build(|| {
        let client = read_client(client)?;
        let id = read_id(id)?;
        let text = normalize_text(read_str(text)?)?;
        client.build_update_todo(id, &UpdateTodo::text(text)).ok()
    })
}

/// Set the completion flag. A toggle sends the negation of the current value.
#[unsafe(no_mangle)]
pub extern "C" fn todo_build_set_completed(
    client: *const FfiTodoClient,
    id: *const c_char,
    completed: bool,
) -> *mut FfiHttpRequest {
    build(|| {
        let client = read_client(client)?;
        let id = read_id(id)?;
        client.build_update_todo(id, &UpdateTodo::completed(completed)).ok()
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_build_delete_todo(
    client: *const FfiTodoClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build(|| Some(read_client(client)?.build_delete_todo(read_id(id)?)))
}

// ---------------------------------------------------------------------------
// Response parsers
// ---------------------------------------------------------------------------

/// `data_tag = TodoList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn todo_parse_list_todos(
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    parse("todo_parse_list_todos", client, response, |c, r| {
        c.parse_list_todos(r)
            .map_or_else(FfiTodoResult::from_error, FfiTodoResult::ok_todo_list)
    })
}

/// `data_tag = Todo` on success.
#[unsafe(no_mangle)]
pub extern "C" fn todo_parse_create_todo(
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    parse("todo_parse_create_todo", client, response, |c, r| {
        c.parse_create_todo(r)
            .map_or_else(FfiTodoResult::from_error, FfiTodoResult::ok_todo)
    })
}

/// Parses the reply to either update builder. `data_tag = Todo` on success.
#[unsafe(no_mangle)]
pub extern "C" fn todo_parse_update_todo(
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    parse("todo_parse_update_todo", client, response, |c, r| {
        c.parse_update_todo(r)
            .map_or_else(FfiTodoResult::from_error, FfiTodoResult::ok_todo)
    })
}

/// `data_tag = None` on success.
#[unsafe(no_mangle)]
pub extern "C" fn todo_parse_delete_todo(
    client: *const FfiTodoClient,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    parse("todo_parse_delete_todo", client, response, |c, r| {
        c.parse_delete_todo(r)
            .map_or_else(FfiTodoResult::from_error, |()| FfiTodoResult::ok_empty())
    })
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Date label for a `created_at` value, or `"Invalid date"`. Never null
/// unless a panic occurred. Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_format_created_at(created_at: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        let raw = read_str(created_at).unwrap_or_default();
        into_c_string(todo_core::format_created_at(raw))
    })
    .unwrap_or(ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request from any `todo_build_*` function. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        req.release_fields();
    });
}

/// Free a result from any `todo_parse_*` function. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_result(result: *mut FfiTodoResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        drop_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Todo => {
                let todo = unsafe { Box::from_raw(result.data as *mut FfiTodo) };
                todo.release_fields();
            }
            FfiDataTag::TodoList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiTodoList) };
                for item in unsafe { from_raw_slice(list.items, list.len) } {
                    item.release_fields();
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a string returned by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| drop_c_string(s));
}
