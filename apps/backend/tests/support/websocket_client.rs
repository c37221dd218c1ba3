//! Minimal JSON-over-WebSocket client for driving a [`TestServer`](super::TestServer).

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, timeout_at, Instant};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

const RECV_TIMEOUT: Duration = Duration::from_secs(3);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

type Stream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct WsClient {
    stream: Stream,
}

impl WsClient {
    /// Connect, retrying while the server is still coming up.
    pub async fn connect(url: &str) -> Result<Self, tungstenite::Error> {
        let attempt = async {
            loop {
                match connect_async(url).await {
                    Ok((stream, _)) => return Ok(stream),
                    Err(tungstenite::Error::Io(_)) => sleep(Duration::from_millis(5)).await,
                    Err(other) => return Err(other),
                }
            }
        };
        match timeout(CONNECT_TIMEOUT, attempt).await {
            Ok(stream) => Ok(Self { stream: stream? }),
            Err(_) => Err(tungstenite::Error::Io(std::io::ErrorKind::TimedOut.into())),
        }
    }

    pub async fn send_json(&mut self, value: Value) -> Result<(), tungstenite::Error> {
        self.send_text(&value.to_string()).await
    }

    pub async fn send_text(&mut self, text: &str) -> Result<(), tungstenite::Error> {
        self.stream.send(Message::Text(text.into())).await
    }

    pub async fn close(mut self) -> Result<(), tungstenite::Error> {
        self.stream.close(None).await
    }

    /// Next text frame as JSON, skipping pings. `None` on close or timeout.
    pub async fn recv_json_within(&mut self, window: Duration) -> Option<Value> {
        let deadline = Instant::now() + window;
        loop {
            match timeout_at(deadline, self.stream.next()).await.ok()??.ok()? {
                Message::Text(text) => return serde_json::from_str(text.as_str()).ok(),
                Message::Close(_) => return None,
                _ => {}
            }
        }
    }

    /// Next message, asserting its `type`.
    pub async fn expect(&mut self, kind: &str) -> Value {
        let msg = self
            .recv_json_within(RECV_TIMEOUT)
            .await
            .unwrap_or_else(|| panic!("no `{kind}` message before timeout"));
        assert_eq!(msg["type"], kind, "unexpected message: {msg}");
        msg
    }

    /// Assert nothing arrives within `window`.
    pub async fn expect_silence(&mut self, window: Duration) {
        if let Some(msg) = self.recv_json_within(window).await {
            panic!("expected no message, got {msg}");
        }
    }
}
