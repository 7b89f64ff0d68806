//! Minimal REQ-socket client for the playlist service.

use anyhow::Context;
use zeromq::{ReqSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use crate::service::decode_message;

pub const DEFAULT_SERVICE_ADDRESS: &str = "tcp://127.0.0.1:5556";

pub struct PlaylistClient {
    socket: ReqSocket,
}

impl PlaylistClient {
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let mut socket = ReqSocket::new();
        socket
            .connect(address)
            .await
            .with_context(|| format!("Failed to connect to {}", address))?;
        Ok(Self { socket })
    }

    /// Send one request line and wait for its reply.
    pub async fn request(&mut self, text: &str) -> anyhow::Result<String> {
        self.socket
            .send(ZmqMessage::from(text.to_string()))
            .await
            .context("Failed to send request")?;
        let reply = self.socket.recv().await.context("Failed to receive reply")?;
        Ok(decode_message(reply))
    }

    pub async fn close(self) {
        let _ = self.socket.close().await;
    }
}
