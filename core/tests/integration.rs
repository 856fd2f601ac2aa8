//! Workflows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every workflow over
//! real HTTP through `ReqwestTransport`, applying the commands to a real
//! `Store`. Validates that request building, response parsing and the
//! status protocol work end-to-end with the actual server.

use todo_store::config::BASE_URL_ENV;
use todo_store::prelude::*;

/// Build the remote the way an application does: from configuration.
fn remote_for(base_url: String) -> RemoteTodos<ReqwestTransport> {
    let config = Config::from_lookup(|key| (key == BASE_URL_ENV).then(|| base_url.clone())).unwrap();
    RemoteTodos::new(config.client(), ReqwestTransport::new())
}

/// A port that was just free: bind an ephemeral listener and drop it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn spawn_mock_server() -> String {
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

#[tokio::test(flavor = "multi_thread")]
async fn add_list_delete_lifecycle() {
    let remote = remote_for(spawn_mock_server());
    let mut store = Store::new();

    // Step 1: list — should be empty.
    let status = Workflow::list().run(&remote, &mut store).await;
    assert_eq!(status, RequestStatus::Success);
    assert!(store.state().todo.list().is_empty());

    // Step 2: add two items.
    for title in ["Buy milk", "Walk dog"] {
        let status = Workflow::add(title).run(&remote, &mut store).await;
        assert_eq!(status, RequestStatus::Success, "add {title}");
    }
    let list = store.state().todo.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].title, "Buy milk");
    assert!(!list[0].is_checked);
    let milk = list[0].id.clone();

    // Step 3: local-only edits, then refresh from the server.
    store.dispatch(Command::Checked(milk.clone()));
    store.dispatch(Command::FilterItemState(ItemStateFilter::Done));
    assert_eq!(store.filtered_list().len(), 1);
    let status = Workflow::list().run(&remote, &mut store).await;
    assert_eq!(status, RequestStatus::Success);
    assert!(store.filtered_list().is_empty(), "refresh overwrites local toggles");

    // Step 4: delete.
    let status = Workflow::delete(milk.clone()).run(&remote, &mut store).await;
    assert_eq!(status, RequestStatus::Success);
    let titles: Vec<_> = store.state().todo.list().iter().map(|i| i.title.clone()).collect();
    assert_eq!(titles, ["Walk dog"]);

    // Step 5: delete again — server says 404, state carries its message.
    let status = Workflow::delete(milk).run(&remote, &mut store).await;
    assert_eq!(status, RequestStatus::Error);
    assert_eq!(store.state().todo.request_status, RequestStatus::Error);
    assert_eq!(store.state().todo.error, "todo not found");
    assert_eq!(store.state().todo.list().len(), 1);

    // Step 6: the server's validation message surfaces the same way.
    let status = Workflow::add("   ").run(&remote, &mut store).await;
    assert_eq!(status, RequestStatus::Error);
    assert_eq!(store.state().todo.error, "title must not be empty");

    // Step 7: a later success does not clear the last error message.
    let status = Workflow::list().run(&remote, &mut store).await;
    assert_eq!(status, RequestStatus::Success);
    assert_eq!(store.state().todo.error, "title must not be empty");
}

#[tokio::test]
async fn unreachable_server_ends_in_error_state() {
    let remote = remote_for(format!("http://127.0.0.1:{}", closed_port()));
    let mut store = Store::new();

    let status = Workflow::list().run(&remote, &mut store).await;

    assert_eq!(status, RequestStatus::Error);
    assert!(store.state().todo.error.starts_with("transport failed"));
}
