//! Request/response channel between isolated roles.
//!
//! Roles share no memory: every message is serialized to JSON on the way in
//! and decoded on the way out. Each request carries a one-shot reply slot,
//! so there is exactly one reply per request. There is no timeout; a caller
//! waits until the reply arrives or the other side goes away.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::error::{RelayError, RelayResult};

pub const NO_RECEIVER: &str = "Could not establish connection. Receiving end does not exist";
pub const PORT_CLOSED: &str = "The message port closed before a response was received";

/// A request in flight, as seen by the receiving role.
pub struct Envelope {
    message: Value,
    reply: oneshot::Sender<Value>,
}

impl Envelope {
    pub fn message(&self) -> &Value {
        &self.message
    }

    /// Answer the request. Consumes the envelope, so a request can only be
    /// answered once.
    pub fn reply(self, response: Value) {
        if self.reply.send(response).is_err() {
            debug!("Caller went away before the reply was delivered");
        }
    }
}

/// Caller side of a channel.
#[derive(Clone)]
pub struct Port {
    name: &'static str,
    sender: mpsc::Sender<Envelope>,
}

/// Receiving side of a channel, owned by a host.
pub struct Inbox {
    receiver: mpsc::Receiver<Envelope>,
}

/// Create a channel; `name` only shows up in logs.
pub fn channel(name: &'static str, buffer: usize) -> (Port, Inbox) {
    let (sender, receiver) = mpsc::channel(buffer.max(1));
    (Port { name, sender }, Inbox { receiver })
}

impl Port {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Send `request` and wait for the single reply.
    pub async fn call<Req, Res>(&self, request: &Req) -> RelayResult<Res>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let message = serde_json::to_value(request)
            .map_err(|e| RelayError::Transport(format!("Could not encode message: {}", e)))?;
        let response = self.call_raw(message).await?;

        serde_json::from_value(response).map_err(|e| {
            warn!(port = self.name, error = %e, "Malformed reply");
            RelayError::Transport(format!("Malformed response: {}", e))
        })
    }

    /// Send an already-encoded message and wait for the raw reply.
    pub async fn call_raw(&self, message: Value) -> RelayResult<Value> {
        let (reply, response) = oneshot::channel();

        self.sender
            .send(Envelope { message, reply })
            .await
            .map_err(|_| {
                warn!(port = self.name, "No receiver on port");
                RelayError::Transport(NO_RECEIVER.to_string())
            })?;

        response.await.map_err(|_| {
            warn!(port = self.name, "Reply slot dropped without an answer");
            RelayError::Transport(PORT_CLOSED.to_string())
        })
    }
}

impl Inbox {
    /// Next request, or `None` once every port is dropped.
    pub async fn recv(&mut self) -> Option<Envelope> {
        self.receiver.recv().await
    }
}
