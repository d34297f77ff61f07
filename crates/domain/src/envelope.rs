//! Wire envelopes exchanged with clients.
//!
//! Inbound: `{ref, command, command_data}`.
//! Outbound acknowledgment: `{respond, respond_data, ref}`.
//! Outbound response or push: `{command, command_data, ref}`.
//!
//! Every outbound envelope carries the `ref` of the request that caused it.
//! A request admitted without a `ref` produces envelopes without the key.

use serde::Serialize;
use serde_json::Value;

use crate::payload::{Acknowledgment, Payload};

/// A request that passed parsing and names a known command.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundRequest {
    /// Correlation token, echoed unchanged (whatever its JSON type) in
    /// every answer.
    pub reference: Option<Value>,
    pub command: String,
    pub command_data: Option<Value>,
}

/// `{respond, respond_data, ref}`: sent first for every admitted request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AckEnvelope {
    pub respond: String,
    pub respond_data: Acknowledgment,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<Value>,
}

/// `{command, command_data, ref}`: primary answers and staged pushes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// Derived event name (e.g. `check_machine_state_success`).
    pub command: String,
    pub command_data: Payload,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<Value>,
}

/// Any message the simulator pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outbound {
    Ack(AckEnvelope),
    Response(ResponseEnvelope),
}

impl Outbound {
    /// Event name carried by the message (`respond` or `command`).
    #[must_use]
    pub fn event(&self) -> &str {
        match self {
            Self::Ack(ack) => &ack.respond,
            Self::Response(response) => &response.command,
        }
    }

    #[must_use]
    pub fn reference(&self) -> Option<&Value> {
        match self {
            Self::Ack(ack) => ack.reference.as_ref(),
            Self::Response(response) => response.reference.as_ref(),
        }
    }

    /// Encode as the JSON text frame sent on the wire.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; the envelope types only contain
    /// JSON-representable data, so this does not happen in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<AckEnvelope> for Outbound {
    fn from(ack: AckEnvelope) -> Self {
        Self::Ack(ack)
    }
}

impl From<ResponseEnvelope> for Outbound {
    fn from(response: ResponseEnvelope) -> Self {
        Self::Response(response)
    }
}
