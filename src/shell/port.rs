//! Port-based channel to a peer application context.
//!
//! Connection establishment is asynchronous on the platform side, so the
//! channel passes through `Connecting` and resolves later via
//! [`PortChannel::connection_established`] or
//! [`PortChannel::connection_failed`]. While not connected, at most one
//! inbound event is buffered (latest wins) and replayed once on
//! establishment. Outbound messages sent while not connected trigger
//! connection as a side effect but are dropped, not queued — callers that
//! must not lose a send re-send once connected. Failures are logged and never
//! retried by the channel itself.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboundAction {
    Change,
    Submit,
    Clear,
}

/// Message posted to the peer: `{ action, input? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub action: OutboundAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl OutboundMessage {
    pub fn change(input: impl Into<String>) -> Self {
        Self {
            action: OutboundAction::Change,
            input: Some(input.into()),
        }
    }

    pub fn submit(input: impl Into<String>) -> Self {
        Self {
            action: OutboundAction::Submit,
            input: Some(input.into()),
        }
    }

    pub fn clear() -> Self {
        Self {
            action: OutboundAction::Clear,
            input: None,
        }
    }
}

/// Event received from the peer: either `{ action }` or `{ input }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, Default)]
pub struct PortChannel {
    state: PortState,
    /// Single-slot inbound buffer; a newer event overwrites an older one.
    buffered: Option<InboundEvent>,
    /// Messages delivered while connected, drained by the platform glue.
    outbox: Vec<OutboundMessage>,
    connect_attempts: u32,
}

impl Default for PortState {
    fn default() -> Self {
        PortState::Disconnected
    }
}

impl PortChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PortState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == PortState::Connected
    }

    pub fn connect_attempts(&self) -> u32 {
        self.connect_attempts
    }

    /// Begin connecting unless already underway or connected.
    pub fn ensure_connection(&mut self) {
        if self.state == PortState::Disconnected {
            self.state = PortState::Connecting;
            self.connect_attempts += 1;
            debug!("port: connecting (attempt {})", self.connect_attempts);
        }
    }

    /// Send to the peer. Returns whether the message was delivered; an
    /// undelivered message is dropped after kicking off a connection.
    pub fn post(&mut self, message: OutboundMessage) -> bool {
        if self.is_connected() {
            self.outbox.push(message);
            return true;
        }
        debug!("port: dropping outbound {:?} while {:?}", message.action, self.state);
        self.ensure_connection();
        false
    }

    /// Hold an inbound event that arrived before the channel was ready,
    /// kicking off a connection. Only the most recent event is kept.
    pub fn buffer(&mut self, event: InboundEvent) {
        if self.buffered.is_some() {
            debug!("port: overwriting buffered inbound event");
        }
        self.buffered = Some(event);
        self.ensure_connection();
    }

    /// The platform accepted the connection. Returns the buffered event (if
    /// any) exactly once, for replay through the normal inbound path.
    pub fn connection_established(&mut self) -> Option<InboundEvent> {
        self.state = PortState::Connected;
        self.buffered.take()
    }

    /// The platform rejected the connection. Logged, no retry scheduled; the
    /// buffered event stays for the next caller-triggered attempt.
    pub fn connection_failed(&mut self, reason: &str) {
        warn!("port: connection failed: {reason}");
        self.state = PortState::Disconnected;
    }

    /// Drain delivered messages for the transport.
    pub fn take_outbox(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.outbox)
    }
}
