//! End-to-end tests: a real listener, real TCP clients.

use std::net::SocketAddr;

use multiapp::{Server, apps};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Starts the demo server on an ephemeral port. Send on the returned channel
/// to stop it.
async fn start() -> (SocketAddr, oneshot::Sender<()>, JoinHandle<()>) {
    let server = Server::bind("127.0.0.1", 0).await.unwrap();
    let addr = server.local_addr();
    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(server.serve_with_shutdown(apps::demo_router(), async move {
        let _ = rx.await;
    }));
    (addr, tx, task)
}

/// Sends `request` on a fresh connection and reads until the server closes it.
async fn roundtrip(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    out
}

/// Splits a reply into its status token and body.
fn split(reply: &str) -> (&str, &str) {
    let rest = reply.strip_prefix("HTTP/1.1 ").expect("status line");
    rest.split_once(" \r\n\r\n").expect("blank line after status")
}

#[tokio::test]
async fn hola_page() {
    let (addr, stop, task) = start().await;

    let reply = roundtrip(addr, b"GET /hola HTTP/1.1\r\n\r\n").await;
    let (status, body) = split(&reply);
    assert_eq!(status, "200 OK");
    assert!(body.contains("Hola mundo"));
    assert!(body.ends_with("</html>\r\n"));

    stop.send(()).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn unknown_prefix_gets_default_app() {
    let (addr, stop, task) = start().await;

    let reply = roundtrip(addr, b"GET /unknown HTTP/1.1\r\n\r\n").await;
    let (status, body) = split(&reply);
    assert_eq!(status, "200 OK");
    assert!(body.contains("Dumb application just saying 'It works!'"));

    stop.send(()).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn sum_and_its_failures() {
    let (addr, stop, task) = start().await;

    let reply = roundtrip(addr, b"GET /suma/3/4 HTTP/1.1\r\n\r\n").await;
    let (status, body) = split(&reply);
    assert_eq!(status, "200 OK");
    assert!(body.contains("3 + 4 = 7"));

    let reply = roundtrip(addr, b"GET /suma/3/bad HTTP/1.1\r\n\r\n").await;
    assert_eq!(split(&reply).0, "400 Bad Request");

    let reply = roundtrip(addr, b"GET /suma/3 HTTP/1.1\r\n\r\n").await;
    assert_eq!(split(&reply).0, "400 Bad Request");

    stop.send(()).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn failures_do_not_stop_the_server() {
    let (addr, stop, task) = start().await;

    let reply = roundtrip(addr, b"NONSENSE\r\n\r\n").await;
    assert_eq!(split(&reply).0, "400 Bad Request");

    // A client that connects and leaves without a word.
    drop(TcpStream::connect(addr).await.unwrap());

    let reply = roundtrip(addr, b"GET /adios HTTP/1.1\r\n\r\n").await;
    let (status, body) = split(&reply);
    assert_eq!(status, "200 OK");
    assert!(body.contains("Adios mundo"));

    stop.send(()).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn random_link_changes_but_route_does_not() {
    let (addr, stop, task) = start().await;

    let first = roundtrip(addr, b"GET /aleat HTTP/1.1\r\n\r\n").await;
    let second = roundtrip(addr, b"GET /aleat/123 HTTP/1.1\r\n\r\n").await;
    for reply in [&first, &second] {
        let (status, body) = split(reply);
        assert_eq!(status, "200 OK");
        assert!(body.contains("href='/aleat/"));
    }

    stop.send(()).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn requests_are_served_in_turn() {
    let (addr, stop, task) = start().await;

    let paths = ["/hola", "/adios", "/app", "/other", "/github/who"];
    let clients = paths.map(|path| {
        tokio::spawn(async move {
            let request = format!("GET {path} HTTP/1.1\r\n\r\n");
            roundtrip(addr, request.as_bytes()).await
        })
    });

    for (path, client) in paths.into_iter().zip(clients) {
        let reply = client.await.unwrap();
        assert_eq!(split(&reply).0, "200 OK", "{path}");
    }

    stop.send(()).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn port_can_be_rebound_after_shutdown() {
    let (addr, stop, task) = start().await;
    roundtrip(addr, b"GET /hola HTTP/1.1\r\n\r\n").await;
    stop.send(()).unwrap();
    task.await.unwrap();

    let again = Server::bind("127.0.0.1", addr.port()).await.unwrap();
    assert_eq!(again.local_addr(), addr);
}
