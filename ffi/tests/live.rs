//! Drive the C surface against the live mock server, executing each built
//! request with ureq the way a host application would.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use todo_ffi::types::{
    FfiDataTag, FfiErrorCode, FfiHttpMethod, FfiHttpRequest, FfiHttpResponse, FfiTodo, FfiTodoList,
};
use todo_ffi::*;

fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    format!("http://{addr}")
}

fn c_str(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string()
}

/// Execute a built request and return (status, body); frees the request.
fn execute(req: *mut FfiHttpRequest) -> (u16, CString) {
    assert!(!req.is_null());
    let r = unsafe { &*req };
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let path = c_str(r.path);
    let body = (!r.body.is_null()).then(|| c_str(r.body));
    let mut response = match (&r.method, body) {
        (FfiHttpMethod::Get, _) => agent.get(&path).call(),
        (FfiHttpMethod::Delete, _) => agent.delete(&path).call(),
        (FfiHttpMethod::Post, Some(b)) => agent
            .post(&path)
            .content_type("application/json")
            .send(b.as_bytes()),
        (FfiHttpMethod::Put, Some(b)) => agent
            .put(&path)
            .content_type("application/json")
            .send(b.as_bytes()),
        (_, None) => panic!("write request without body"),
    }
    .expect("HTTP transport error");
    todo_free_request(req);

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    (status, CString::new(body).unwrap())
}

fn reply(status: u16, body: &CString) -> FfiHttpResponse {
    FfiHttpResponse {
        status,
        body: body.as_ptr(),
    }
}

#[test]
fn create_toggle_list_delete() {
    let url = CString::new(spawn_server()).unwrap();
    let client = todo_client_new(url.as_ptr());

    let text = CString::new("From C").unwrap();
    let (status, body) = execute(todo_build_create_todo(client, text.as_ptr()));
    let result = todo_parse_create_todo(client, &reply(status, &body));
    let r = unsafe { &*result };
    assert!(matches!(r.error_code, FfiErrorCode::Ok));
    let todo = unsafe { &*(r.data as *const FfiTodo) };
    let id = CString::new(c_str(todo.id)).unwrap();
    let label = todo_format_created_at(todo.created_at);
    assert_ne!(c_str(label), "Invalid date");
    todo_free_string(label);
    todo_free_result(result);

    let (status, body) = execute(todo_build_set_completed(client, id.as_ptr(), true));
    let result = todo_parse_update_todo(client, &reply(status, &body));
    let todo = unsafe { &*((*result).data as *const FfiTodo) };
    assert!(todo.completed);
    assert_eq!(c_str(todo.text), "From C");
    todo_free_result(result);

    let (status, body) = execute(todo_build_list_todos(client));
    let result = todo_parse_list_todos(client, &reply(status, &body));
    let r = unsafe { &*result };
    assert!(matches!(r.data_tag, FfiDataTag::TodoList));
    assert_eq!(unsafe { &*(r.data as *const FfiTodoList) }.len, 1);
    todo_free_result(result);

    let (status, body) = execute(todo_build_delete_todo(client, id.as_ptr()));
    let result = todo_parse_delete_todo(client, &reply(status, &body));
    assert!(matches!(unsafe { &*result }.error_code, FfiErrorCode::Ok));
    todo_free_result(result);

    let (status, body) = execute(todo_build_delete_todo(client, id.as_ptr()));
    let result = todo_parse_delete_todo(client, &reply(status, &body));
    assert!(matches!(unsafe { &*result }.error_code, FfiErrorCode::NotFound));
    todo_free_result(result);

    todo_client_free(client);
}
