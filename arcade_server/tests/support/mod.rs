// Shared helpers for driving a real server over WebSockets in integration tests.
#![allow(dead_code)]

use arcade_server::domain::GameTuning;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(3);

// Each test gets its own server so lobbies never leak between tests.
pub async fn spawn_server(tuning: GameTuning) -> String {
    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        arcade_server::run_with_tuning(listener, tuning)
            .await
            .expect("server failed");
    });
    format!("ws://{addr}/ws")
}

/// Connects and returns the client together with the id the server assigned.
pub async fn connect(url: &str) -> (Client, String) {
    let (mut client, _) = connect_async(url).await.expect("websocket handshake");
    let greeting = recv_type(&mut client, "yourId").await;
    let id = greeting["data"]
        .as_str()
        .expect("yourId carries a string id")
        .to_string();
    (client, id)
}

pub async fn send(client: &mut Client, msg: Value) {
    client
        .send(Message::Text(msg.to_string().into()))
        .await
        .expect("send frame");
}

/// Reads frames until one satisfies `pred`, failing the test on timeout.
pub async fn recv_matching(client: &mut Client, pred: impl Fn(&Value) -> bool) -> Value {
    tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            let frame = client
                .next()
                .await
                .expect("socket open")
                .expect("valid frame");
            let Message::Text(text) = frame else {
                continue;
            };
            let value: Value = serde_json::from_str(text.as_str()).expect("server sends json");
            if pred(&value) {
                return value;
            }
        }
    })
    .await
    .expect("expected message in time")
}

pub async fn recv_type(client: &mut Client, kind: &str) -> Value {
    recv_matching(client, |v| v["type"] == kind).await
}

pub async fn send_binary(client: &mut Client, payload: Vec<u8>) {
    client
        .send(Message::Binary(payload.into()))
        .await
        .expect("send frame");
}

/// Reads until the server's close frame and returns its code. `None` if the stream
/// ends without one.
pub async fn recv_close(client: &mut Client) -> Option<u16> {
    tokio::time::timeout(RECV_TIMEOUT, async {
        while let Some(frame) = client.next().await {
            match frame {
                Ok(Message::Close(close)) => return close.map(|c| u16::from(c.code)),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
        None
    })
    .await
    .expect("expected close in time")
}
