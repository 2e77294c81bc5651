//! Websocket client for end-to-end room tests.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(url: &str) -> Result<Self, BoxError> {
        let (stream, _) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Sends a JSON value as a text frame.
    pub async fn send_json(&mut self, value: &Value) -> Result<(), BoxError> {
        self.send_text(&value.to_string()).await
    }

    pub async fn send_text(&mut self, text: &str) -> Result<(), BoxError> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Next text frame parsed as JSON. Control frames are skipped; `Ok(None)`
    /// means the server closed the connection.
    pub async fn recv_json(&mut self, timeout: Duration) -> Result<Option<Value>, BoxError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let next = tokio::time::timeout_at(deadline, self.stream.next())
                .await
                .map_err(|_| "timed out waiting for a websocket message")?;
            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(serde_json::from_str(text.as_str())?)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err.into()),
            }
        }
    }

    /// Reads until a message with `"type" == kind` arrives, returning it.
    pub async fn recv_type(&mut self, kind: &str, timeout: Duration) -> Result<Value, BoxError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match self.recv_json(remaining).await? {
                Some(msg) if msg["type"] == kind => return Ok(msg),
                Some(_) => continue,
                None => return Err(format!("connection closed before a '{kind}' message").into()),
            }
        }
    }

    /// Asserts nothing arrives for `quiet`.
    pub async fn expect_silence(&mut self, quiet: Duration) -> Result<(), BoxError> {
        match tokio::time::timeout(quiet, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => Err(format!("unexpected message: {}", text.as_str()).into()),
            Ok(_) => Ok(()),
        }
    }

    pub async fn close(&mut self) -> Result<(), BoxError> {
        self.stream.close(None).await?;
        Ok(())
    }
}
