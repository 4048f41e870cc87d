//! Adapter end-to-end tests over a real TCP socket

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use blockfall::adapter::{run_server, ServerConfig};

async fn start_server(seed: u32) -> SocketAddr {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        seed,
    };
    let (ready_tx, ready_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });
    ready_rx.await.expect("server failed to start")
}

async fn connect(addr: SocketAddr) -> (Lines<BufReader<OwnedReadHalf>>, OwnedWriteHalf) {
    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (reader, writer) = stream.into_split();
    (BufReader::new(reader).lines(), writer)
}

/// Read lines until one satisfies `pred`.
async fn read_until<F>(lines: &mut Lines<BufReader<OwnedReadHalf>>, pred: F) -> Value
where
    F: Fn(&Value) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let line = lines
                .next_line()
                .await
                .expect("read failed")
                .expect("server closed the connection");
            let msg: Value = serde_json::from_str(&line).expect("server sent invalid json");
            if pred(&msg) {
                return msg;
            }
        }
    })
    .await
    .expect("timed out waiting for message")
}

async fn send(writer: &mut OwnedWriteHalf, line: &str) {
    writer.write_all(line.as_bytes()).await.unwrap();
    writer.write_all(b"\n").await.unwrap();
}

#[tokio::test]
async fn test_initial_state_on_connect() {
    let addr = start_server(1).await;
    let (mut lines, _writer) = connect(addr).await;

    let state = read_until(&mut lines, |m| m["type"] == "state").await;
    assert_eq!(state["score"], 0);
    assert_eq!(state["paused"], false);
    assert_eq!(state["ended"], false);
    assert_eq!(state["grid"].as_array().map(|g| g.len()), Some(20));
}

#[tokio::test]
async fn test_key_moves_active_piece() {
    let addr = start_server(1).await;
    let (mut lines, mut writer) = connect(addr).await;

    let first = read_until(&mut lines, |m| m["type"] == "state").await;
    let x = first["active"]["x"].as_i64().unwrap();

    send(&mut writer, r#"{"type":"key","key":"ArrowLeft"}"#).await;
    read_until(&mut lines, |m| {
        m["type"] == "state" && m["active"]["x"].as_i64() == Some(x - 1)
    })
    .await;
}

#[tokio::test]
async fn test_malformed_line_gets_error() {
    let addr = start_server(1).await;
    let (mut lines, mut writer) = connect(addr).await;
    read_until(&mut lines, |m| m["type"] == "state").await;

    send(&mut writer, "definitely not json").await;
    let error = read_until(&mut lines, |m| m["type"] == "error").await;
    assert_eq!(error["code"], "invalid_json");

    send(&mut writer, r#"{"type":"key","key":"F13"}"#).await;
    let error = read_until(&mut lines, |m| m["type"] == "error").await;
    assert_eq!(error["code"], "unknown_key");
}

#[tokio::test]
async fn test_pause_is_seen_by_every_client() {
    let addr = start_server(1).await;
    let (mut lines_a, mut writer_a) = connect(addr).await;
    let (mut lines_b, _writer_b) = connect(addr).await;
    read_until(&mut lines_a, |m| m["type"] == "state").await;
    read_until(&mut lines_b, |m| m["type"] == "state").await;

    send(&mut writer_a, r#"{"type":"click","control":"pause"}"#).await;
    read_until(&mut lines_a, |m| m["paused"] == true).await;
    read_until(&mut lines_b, |m| m["paused"] == true).await;
}

fn occupied_cells(msg: &Value) -> usize {
    msg["grid"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|row| row.as_array())
        .flatten()
        .filter(|cell| cell.as_u64() == Some(1))
        .count()
}

#[tokio::test]
async fn test_hard_drop_settles_piece() {
    let addr = start_server(1).await;
    let (mut lines, mut writer) = connect(addr).await;
    read_until(&mut lines, |m| m["type"] == "state").await;

    send(&mut writer, r#"{"type":"key","key":"Space"}"#).await;
    let state = read_until(&mut lines, |m| occupied_cells(m) == 4).await;
    assert_eq!(state["score"], 0);
}
