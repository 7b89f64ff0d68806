//! Request/reply service loop.
//!
//! One REP socket, one request at a time: receive, handle, reply, repeat.
//! Receives are bounded by a timeout so the loop can notice a shutdown
//! request without a message arriving.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use zeromq::{Endpoint, RepSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use crate::handler::RequestHandler;

/// Cooperative shutdown flag, checked once per receive timeout.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    requested: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Trigger this signal on Ctrl+C (and SIGTERM on Unix).
    pub fn listen_for_interrupt(&self) -> JoinHandle<()> {
        let signal = self.clone();
        tokio::spawn(async move {
            wait_for_interrupt().await;
            info!("Interrupt received");
            signal.trigger();
        })
    }
}

async fn wait_for_interrupt() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
                return;
            }
            Err(e) => warn!("Failed to register SIGTERM handler: {}", e),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a handler the flag can never be set from a signal.
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}

/// The playlist service bound to its endpoint.
pub struct PlaylistService {
    socket: RepSocket,
    endpoint: Endpoint,
    handler: RequestHandler,
    recv_timeout: Duration,
}

impl PlaylistService {
    /// Bind a REP socket on `address` (e.g. `tcp://0.0.0.0:5556`).
    pub async fn bind(
        address: &str,
        recv_timeout: Duration,
        handler: RequestHandler,
    ) -> anyhow::Result<Self> {
        let mut socket = RepSocket::new();
        let endpoint = socket
            .bind(address)
            .await
            .with_context(|| format!("Failed to bind reply socket on {}", address))?;

        Ok(Self {
            socket,
            endpoint,
            handler,
            recv_timeout,
        })
    }

    /// The endpoint actually bound (port resolved if `:0` was requested).
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Serve until `shutdown` is triggered or the transport fails. The socket
    /// is closed on both paths.
    pub async fn run(mut self, shutdown: &ShutdownSignal) -> anyhow::Result<()> {
        let result = self.serve(shutdown).await;

        for e in self.socket.close().await {
            warn!("Error while closing reply socket: {}", e);
        }
        debug!(endpoint = %self.endpoint, "Reply socket closed");

        result
    }

    async fn serve(&mut self, shutdown: &ShutdownSignal) -> anyhow::Result<()> {
        while !shutdown.is_triggered() {
            let message = match tokio::time::timeout(self.recv_timeout, self.socket.recv()).await {
                // Idle: go round and check the shutdown flag.
                Err(_elapsed) => continue,
                Ok(received) => received.context("Failed to receive request")?,
            };

            let request = decode_message(message);
            info!(request = %request, "Received request from a client");

            let response = self.handler.handle_line(&request);

            self.socket
                .send(ZmqMessage::from(response.clone()))
                .await
                .context("Failed to send reply")?;
            info!(response = %response, "Sent reply to client");
        }

        info!("Playlist service shutting down...");
        Ok(())
    }
}

/// Concatenate all frames as text. Invalid UTF-8 is replaced, not rejected:
/// every request gets a reply.
pub(crate) fn decode_message(message: ZmqMessage) -> String {
    message
        .into_vec()
        .iter()
        .map(|frame| String::from_utf8_lossy(frame.as_ref()).into_owned())
        .collect()
}
