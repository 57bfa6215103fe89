use crate::codec::Response;
use crate::matcher::Matcher;
use crate::server::connection::read_request;
use crate::server::{ProtocolError, Server, ServerConfig};

use snapline_fixtures::{
    DISTANT_POINT_TRIP, EDGE_1_2, GRID_FMM_CONFIG, GRID_STMATCH_CONFIG, STRAIGHT_TRIP, fixture_path,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

async fn start(fixture: &str, config: ServerConfig) -> Running {
    let matcher = Matcher::from_config_file(fixture_path(fixture)).expect("matcher must build");
    let server = Server::bind("127.0.0.1:0", Arc::new(matcher), config)
        .await
        .expect("server must bind");

    let addr = server.local_addr().expect("server must have an address");
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(async move {
        let _ = stopped.await;
    }));

    Running { addr, stop, handle }
}

/// Reads until the server closes the connection.
async fn read_response(mut stream: TcpStream) -> Vec<u8> {
    let mut response = vec![];
    let read = tokio::time::timeout(Duration::from_secs(10), stream.read_to_end(&mut response));
    let _ = read.await.expect("server must close the connection");

    response
}

/// Sends `request`, closes the write half, and reads the response.
async fn exchange(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.expect("server must accept");
    let _ = stream.write_all(request).await;
    let _ = stream.shutdown().await;

    read_response(stream).await
}

async fn stop(running: Running) {
    let _ = running.stop.send(());
    running
        .handle
        .await
        .expect("server task must not panic")
        .expect("server must stop cleanly");
}

#[test_log::test(tokio::test)]
async fn matches_over_tcp() {
    for fixture in [GRID_STMATCH_CONFIG, GRID_FMM_CONFIG] {
        let running = start(fixture, ServerConfig::default()).await;

        let bytes = exchange(running.addr, format!("{STRAIGHT_TRIP}\n").as_bytes()).await;
        let response = Response::from_bytes(&bytes).expect("response must decode");
        assert_eq!(response.state(), 1);

        let result = response.into_result().expect("response must hold a result");
        assert_eq!(result.cpath, vec![EDGE_1_2]);
        assert_eq!(result.opath, vec![EDGE_1_2; 3]);

        stop(running).await;
    }
}

#[test_log::test(tokio::test)]
async fn accepts_final_line_without_newline() {
    let running = start(GRID_STMATCH_CONFIG, ServerConfig::default()).await;

    let bytes = exchange(running.addr, STRAIGHT_TRIP.as_bytes()).await;
    assert_eq!(
        Response::from_bytes(&bytes).map(|response| response.state()).ok(),
        Some(1)
    );

    stop(running).await;
}

#[test_log::test(tokio::test)]
async fn unmatched_is_state_zero() {
    let running = start(GRID_STMATCH_CONFIG, ServerConfig::default()).await;

    let bytes = exchange(running.addr, format!("{DISTANT_POINT_TRIP}\n").as_bytes()).await;
    assert_eq!(bytes, br#"{"state":0}"#);

    stop(running).await;
}

#[test_log::test(tokio::test)]
async fn malformed_requests_close_without_response() {
    let running = start(GRID_STMATCH_CONFIG, ServerConfig::default()).await;

    for request in [
        &b"POINT (126.60 45.74)\n"[..],
        &b"not a trajectory\n"[..],
        &b"\n"[..],
        // End of stream before any data
        &b""[..],
        &b"LINESTRING (126.60 \xff)\n"[..],
    ] {
        assert!(exchange(running.addr, request).await.is_empty());
    }

    // The service keeps answering after closing malformed requests.
    let bytes = exchange(running.addr, format!("{STRAIGHT_TRIP}\n").as_bytes()).await;
    assert_eq!(
        Response::from_bytes(&bytes).map(|response| response.state()).ok(),
        Some(1)
    );

    stop(running).await;
}

#[test_log::test(tokio::test)]
async fn oversized_requests_close_without_response() {
    let config = ServerConfig {
        max_request_bytes: 32,
        ..ServerConfig::default()
    };
    let running = start(GRID_STMATCH_CONFIG, config).await;

    assert!(
        exchange(running.addr, format!("{STRAIGHT_TRIP}\n").as_bytes())
            .await
            .is_empty()
    );

    stop(running).await;
}

#[test_log::test(tokio::test)]
async fn silent_clients_time_out() {
    let config = ServerConfig {
        read_timeout: Duration::from_millis(100),
        ..ServerConfig::default()
    };
    let running = start(GRID_STMATCH_CONFIG, config).await;

    // Connects, but never completes the line nor closes its half.
    let mut stream = TcpStream::connect(running.addr).await.expect("server must accept");
    stream
        .write_all(b"LINESTRING (126.604 45.74")
        .await
        .expect("partial request must be written");

    assert!(read_response(stream).await.is_empty());

    stop(running).await;
}

#[test_log::test(tokio::test)]
async fn serves_connections_concurrently() {
    let running = start(GRID_STMATCH_CONFIG, ServerConfig::default()).await;

    let clients = (0..8)
        .map(|_| {
            let addr = running.addr;
            tokio::spawn(async move {
                exchange(addr, format!("{STRAIGHT_TRIP}\n").as_bytes()).await
            })
        })
        .collect::<Vec<_>>();

    for client in clients {
        let bytes = client.await.expect("client must not panic");
        assert_eq!(
            Response::from_bytes(&bytes).map(|response| response.state()).ok(),
            Some(1)
        );
    }

    stop(running).await;
}

#[tokio::test]
async fn reads_single_line() {
    let request = read_request(&b"LINESTRING (1 2, 3 4)\r\nignored"[..], 64).await;
    assert_eq!(request.ok().as_deref(), Some("LINESTRING (1 2, 3 4)"));

    // Terminated by the end of the stream
    let request = read_request(&b"LINESTRING (1 2, 3 4)"[..], 64).await;
    assert_eq!(request.ok().as_deref(), Some("LINESTRING (1 2, 3 4)"));

    // Exactly at the limit, terminators excluded
    let request = read_request(&b"0123456789\n"[..], 10).await;
    assert_eq!(request.ok().as_deref(), Some("0123456789"));
    let request = read_request(&b"0123456789\r\n"[..], 10).await;
    assert_eq!(request.ok().as_deref(), Some("0123456789"));
    let request = read_request(&b"0123456789"[..], 10).await;
    assert_eq!(request.ok().as_deref(), Some("0123456789"));

    for oversized in [&b"0123456789A\n"[..], &b"0123456789A\r\n"[..], &b"0123456789AB"[..]] {
        assert!(matches!(
            read_request(oversized, 10).await,
            Err(ProtocolError::Oversized(10))
        ));
    }
    assert!(matches!(
        read_request(&b""[..], 10).await,
        Err(ProtocolError::Empty)
    ));
    assert!(matches!(
        read_request(&b"\xff\xfe\n"[..], 10).await,
        Err(ProtocolError::Encoding)
    ));
}
