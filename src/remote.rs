//! Remote controller boundary.
//!
//! The transport delivers [`RemoteEvent`]s; [`Skill`] reacts to them with the
//! session lifecycle hooks and forwards text tokens to the sequencer. Nothing
//! is ever reported back: the remote protocol has no acknowledgment channel.
use heapless::{String, Vec};
use log::{debug, error, info, warn};

use crate::body::HexaBody;
use crate::config::{JSON_CAPACITY, TOKEN_CAPACITY};
use crate::robot::commands::Command;
use crate::sequencer::{Rejection, Sequencer};

pub type Token = String<TOKEN_CAPACITY>;
pub type JsonPayload = Vec<u8, JSON_CAPACITY>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEvent {
    Start,
    Close,
    Connect,
    Disconnect,
    Text(Token),
    Json(JsonPayload),
}

/// What the transport should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The robot must not keep moving unsupervised: end the process.
    Terminate,
}

pub struct Skill<'a, B: HexaBody> {
    sequencer: &'a Sequencer,
    body: &'a B,
}

impl<'a, B: HexaBody> Skill<'a, B> {
    pub fn new(sequencer: &'a Sequencer, body: &'a B) -> Self {
        Self { sequencer, body }
    }

    pub async fn handle(&self, event: RemoteEvent) -> Flow {
        match event {
            RemoteEvent::Start => self.on_start().await,
            RemoteEvent::Close => self.on_close().await,
            RemoteEvent::Connect => self.on_connect().await,
            RemoteEvent::Disconnect => return self.on_disconnect(),
            RemoteEvent::Text(token) => self.on_recv_string(&token).await,
            RemoteEvent::Json(payload) => self.on_recv_json(&payload),
        }
        Flow::Continue
    }

    pub async fn on_start(&self) {
        self.sequencer.reset(self.body).await;
        info!("[REMOTE] hexa skill started");
    }

    pub async fn on_close(&self) {
        if let Err(e) = self.body.close().await {
            error!("[REMOTE] body close failed: {e}");
        }
    }

    /// Bring the actuator link up. A failure is logged and nothing else
    /// happens: commands will fail at the body until a reconnect.
    pub async fn on_connect(&self) {
        if let Err(e) = self.body.start().await {
            error!("[REMOTE] body start failed: {e}");
        }
    }

    pub fn on_disconnect(&self) -> Flow {
        warn!("[REMOTE] remote disconnected, terminating");
        Flow::Terminate
    }

    pub async fn on_recv_string(&self, token: &str) {
        let Ok(command) = Command::try_from(token) else {
            debug!("[REMOTE] ignoring unknown token {token:?}");
            return;
        };

        match self.sequencer.submit(self.body, command).await {
            Ok(()) => info!("[REMOTE] accepted {command}"),
            Err(Rejection::Busy) => debug!("[REMOTE] busy, dropped {command}"),
            Err(e @ Rejection::Unsupported(_)) => warn!("[REMOTE] {e}"),
        }
    }

    /// Structured payloads are accepted but carry no behavior yet.
    pub fn on_recv_json(&self, payload: &[u8]) {
        debug!("[REMOTE] ignoring {} byte json payload", payload.len());
    }
}

impl RemoteEvent {
    /// Classify one line received from the transport. Lines that do not fit
    /// the fixed-size buffers are dropped.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.starts_with('{') {
            return JsonPayload::from_slice(line.as_bytes())
                .ok()
                .map(RemoteEvent::Json);
        }
        Token::try_from(line).ok().map(RemoteEvent::Text)
    }
}
