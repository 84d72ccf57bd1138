//! End-to-end calls through `UreqTransport` against the live mock server.
//!
//! # Design
//! Starts the mock AnkiConnect server on a random port, then exercises
//! `do_post` / `do_get` over real HTTP. Covers every outcome the executor can
//! produce: text, non-200 status, and transport failure.

use std::net::SocketAddr;

use apiclient_core::{ApiClient, ApiError};

/// Start the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
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

    addr
}

#[test]
fn post_and_get_against_mock_server() {
    let addr = start_server();
    let uri = format!("http://{addr}");
    let client = ApiClient::new();

    // POST an action, the body comes back verbatim.
    let text = client
        .do_post(&uri, r#"{"action":"deckNamesAndIds","version":6}"#)
        .unwrap();
    assert_eq!(text, r#"{"result":{"Default":1},"error":null}"#);

    // Action failures still arrive as 200 text.
    let text = client.do_post(&uri, r#"{"action":"sync","version":6}"#).unwrap();
    assert_eq!(text, r#"{"result":null,"error":"unsupported action"}"#);

    // State carries across calls on the server side only.
    let text = client
        .do_post(&uri, r#"{"action":"createDeck","version":6,"params":{"deck":"Kanji"}}"#)
        .unwrap();
    assert_eq!(text, r#"{"result":2,"error":null}"#);

    // GET returns the banner.
    let text = client.do_get(&uri).unwrap();
    assert_eq!(text, "AnkiConnect v.6");
}

#[test]
fn non_200_statuses_become_status_errors() {
    let addr = start_server();
    let client = ApiClient::new();

    let err = client.do_get(&format!("http://{addr}/status/500")).unwrap_err();
    assert!(matches!(err, ApiError::Status(500)));
    assert_eq!(
        err.to_string(),
        "apiclient: Received non-200 status code from api endpoint: 500"
    );

    let err = client.do_get(&format!("http://{addr}/status/404")).unwrap_err();
    assert_eq!(err.status(), Some(404));

    // The payload is not validated client side; the server rejects it.
    let err = client
        .do_post(&format!("http://{addr}"), r#"{"version":6}"#)
        .unwrap_err();
    assert_eq!(err.status(), Some(422));

    // The client is still usable after a rejected call.
    let text = client.do_get(&format!("http://{addr}")).unwrap();
    assert_eq!(text, "AnkiConnect v.6");
}

#[test]
fn refused_connection_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = ApiClient::new();

    let err = client
        .do_post(&format!("http://{addr}"), r#"{"action":"version","version":6}"#)
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert!(err.status().is_none());
    let message = err.to_string();
    let inner = err.into_transport().unwrap();
    assert_eq!(inner.to_string(), message);
}
