//! Store and client behavior against the live mock server.
//!
//! Each test starts its own server on a random port and drives it over real
//! HTTP through `UreqTransport`.

use todo_core::{
    ApiError, CreateTodo, ListView, RemoteStore, Store, TodoApp, TodoClient, Transport,
    UpdateTodo, UreqTransport,
};

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

fn remote_store(base_url: &str) -> RemoteStore<UreqTransport> {
    RemoteStore::new(TodoClient::new(base_url), UreqTransport::new())
}

#[test]
fn client_crud_lifecycle() {
    let base_url = spawn_server();
    let client = TodoClient::new(&base_url);
    let transport = UreqTransport::new();

    let todos = client
        .parse_list_todos(transport.execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert!(todos.is_empty(), "expected empty list");

    let req = client
        .build_create_todo(&CreateTodo {
            text: "Integration test".to_string(),
        })
        .unwrap();
    let created = client
        .parse_create_todo(transport.execute(req).unwrap())
        .unwrap();
    assert_eq!(created.text, "Integration test");
    assert!(!created.completed);
    let id = created.id;

    let fetched = client
        .parse_get_todo(transport.execute(client.build_get_todo(id)).unwrap())
        .unwrap();
    assert_eq!(fetched, created);

    let req = client
        .build_update_todo(id, &UpdateTodo::completed(true))
        .unwrap();
    let updated = client
        .parse_update_todo(transport.execute(req).unwrap())
        .unwrap();
    assert!(updated.completed);
    assert_eq!(updated.created_at, created.created_at);

    client
        .parse_delete_todo(transport.execute(client.build_delete_todo(id)).unwrap())
        .unwrap();

    let err = client
        .parse_delete_todo(transport.execute(client.build_delete_todo(id)).unwrap())
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn remote_store_round_trip() {
    let base_url = spawn_server();
    let mut store = remote_store(&base_url);
    assert!(store.load());
    assert!(store.todos().is_empty());

    assert!(store.add("buy milk"));
    assert!(store.add("walk dog"));
    assert!(!store.add("   "));
    let milk = store.todos()[0].id;
    let dog = store.todos()[1].id;

    assert!(store.toggle(milk));
    assert!(store.update(dog, "walk cat"));
    assert_eq!(store.todos()[1].text, "walk cat");

    // A fresh store sees the server's copy.
    let mut reloaded = remote_store(&base_url);
    assert!(reloaded.load());
    assert_eq!(reloaded.todos(), store.todos());

    assert!(store.clear_completed());
    assert_eq!(store.todos().len(), 1);
    assert_eq!(store.todos()[0].id, dog);

    assert!(store.delete(dog));
    assert!(!store.delete(dog));

    let mut reloaded = remote_store(&base_url);
    reloaded.load();
    assert!(reloaded.todos().is_empty());
}

#[test]
fn clear_completed_fans_out_deletes() {
    let base_url = spawn_server();
    let mut store = remote_store(&base_url);
    store.load();
    for i in 0..8 {
        store.add(&format!("task {i}"));
    }
    let ids: Vec<_> = store.todos().iter().map(|t| t.id).collect();
    for id in ids.iter().step_by(2) {
        store.toggle(*id);
    }

    assert!(store.clear_completed());
    let texts: Vec<&str> = store.todos().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["task 1", "task 3", "task 5", "task 7"]);

    let mut reloaded = remote_store(&base_url);
    reloaded.load();
    assert_eq!(reloaded.todos(), store.todos());
}

#[test]
fn unreachable_server_leaves_app_usable() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut app = TodoApp::new(remote_store(&format!("http://{addr}")));

    assert!(!app.start());
    app.set_input("offline");
    assert!(!app.submit());
    assert!(matches!(app.render().list, ListView::Empty { .. }));
}

#[test]
fn app_edit_flow_against_server() {
    let base_url = spawn_server();
    let mut app = TodoApp::new(remote_store(&base_url));
    assert!(app.start());

    app.set_input("draft");
    assert!(app.submit());
    let id = app.store().todos()[0].id;

    assert!(app.edit(id));
    app.set_input("final");
    assert!(app.submit());
    assert_eq!(app.form().editing(), None);

    let view = app.render();
    match view.list {
        ListView::Items(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].text, "final");
            assert_ne!(items[0].created_label, todo_core::view::INVALID_DATE);
        }
        other => panic!("expected items, got {other:?}"),
    }
}
