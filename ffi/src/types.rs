//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;
use std::ptr;

use todo_core::{ApiError, HttpMethod, HttpRequest, Todo};

/// Opaque handle to a `TodoClient`.
pub struct FfiTodoClient {
    pub(crate) inner: todo_core::TodoClient,
}

/// Move `s` onto the heap as a C string. Interior NULs are dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s)
        .unwrap_or_else(|e| {
            let mut bytes = e.into_vec();
            bytes.retain(|&b| b != 0);
            CString::new(bytes).unwrap_or_default()
        })
        .into_raw()
}

/// Release a pointer produced by `into_c_string`. Null is ignored.
pub(crate) fn drop_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A request for the host to execute. `path` is the absolute URL; `body`
/// is null when there is none.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c_string(k),
                value: into_c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: into_c_string(req.path),
            headers,
            headers_len,
            body: req.body.map_or(ptr::null_mut(), into_c_string),
        }))
    }

    /// Free the strings and header array owned by this request.
    pub(crate) fn release_fields(&self) {
        drop_c_string(self.path);
        drop_c_string(self.body);
        for header in unsafe { from_raw_slice(self.headers, self.headers_len) } {
            drop_c_string(header.key);
            drop_c_string(header.value);
        }
    }
}

/// Host-filled response. Borrowed for the duration of a `todo_parse_*` call.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    Transport = 5,
    Panic = 6,
    NullArg = 7,
}

/// Tells `todo_free_result` what `FfiTodoResult::data` points to.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    Todo = 1,
    TodoList = 2,
}

#[repr(C)]
pub struct FfiTodo {
    pub id: *mut c_char,
    pub text: *mut c_char,
    pub completed: bool,
    /// Raw ISO-8601 timestamp as sent by the server, possibly empty.
    pub created_at: *mut c_char,
}

impl FfiTodo {
    fn from_core(todo: Todo) -> Self {
        FfiTodo {
            id: into_c_string(todo.id.to_string()),
            text: into_c_string(todo.text),
            completed: todo.completed,
            created_at: into_c_string(todo.created_at),
        }
    }

    pub(crate) fn release_fields(&self) {
        drop_c_string(self.id);
        drop_c_string(self.text);
        drop_c_string(self.created_at);
    }
}

#[repr(C)]
pub struct FfiTodoList {
    pub items: *mut FfiTodo,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null and `data`
/// points to the payload named by `data_tag`. On failure `data` is null and
/// `error_message` describes the problem.
#[repr(C)]
pub struct FfiTodoResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiTodoResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: Option<String>,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiTodoResult {
            error_code,
            error_message: error_message.map_or(ptr::null_mut(), into_c_string),
            http_status,
            data_tag,
            data,
        }))
    }

    pub(crate) fn ok_todo(todo: Todo) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiTodo::from_core(todo))) as *mut c_void;
        Self::boxed(FfiErrorCode::Ok, None, 0, FfiDataTag::Todo, data)
    }

    pub(crate) fn ok_todo_list(todos: Vec<Todo>) -> *mut Self {
        let (items, len) = into_raw_slice(todos.into_iter().map(FfiTodo::from_core).collect());
        let data = Box::into_raw(Box::new(FfiTodoList { items, len })) as *mut c_void;
        Self::boxed(FfiErrorCode::Ok, None, 0, FfiDataTag::TodoList, data)
    }

    pub(crate) fn ok_empty() -> *mut Self {
        Self::boxed(FfiErrorCode::Ok, None, 0, FfiDataTag::None, ptr::null_mut())
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (code, status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404),
            ApiError::Http { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
            ApiError::Deserialization(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::Serialization(_) => (FfiErrorCode::Serialization, 0),
        };
        Self::boxed(code, Some(err.to_string()), status, FfiDataTag::None, ptr::null_mut())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        Self::boxed(FfiErrorCode::NullArg, Some(msg), 0, FfiDataTag::None, ptr::null_mut())
    }

    pub(crate) fn panic(msg: String) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, Some(msg), 0, FfiDataTag::None, ptr::null_mut())
    }
}

/// Leak a `Vec` as a (pointer, length) pair; empty becomes (null, 0).
fn into_raw_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let boxed = items.into_boxed_slice();
    (Box::into_raw(boxed) as *mut T, len)
}

/// Reclaim a pair produced by `into_raw_slice`.
///
/// # Safety
/// `ptr` and `len` must come from `into_raw_slice` and not be reclaimed twice.
pub(crate) unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}
