//! Payloads: the fixed bodies the simulated controller answers with.
//!
//! The controller's wire format uses one loose shape for every answer:
//! `{status, error_data, json_data}` where exactly one of the two data fields
//! is populated and the other is an empty list. Here each shape is its own
//! type so a fixture cannot mix them up; the loose shape only exists at
//! serialisation time.

use serde::{Serialize, Serializer};

use crate::product::Product;

/// Body of an acknowledgment (`respond_data`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgment {
    pub ack_status: u8,
    pub ack_code: String,
}

impl Acknowledgment {
    /// An acknowledgment with `ack_status = 1`.
    #[must_use]
    pub fn accepted(ack_code: impl Into<String>) -> Self {
        Self {
            ack_status: 1,
            ack_code: ack_code.into(),
        }
    }
}

/// Primary or staged payload (`command_data`).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Serialised with `status = 1` and the body under `json_data`.
    Success(SuccessBody),
    /// Serialised with `status = 0` and the body under `error_data`.
    Error(ErrorBody),
}

impl Payload {
    /// Wire `status` value.
    #[must_use]
    pub fn status(&self) -> u8 {
        match self {
            Self::Success(_) => 1,
            Self::Error(_) => 0,
        }
    }
}

#[derive(Serialize)]
struct WirePayload<'a, E, J> {
    status: u8,
    error_data: &'a E,
    json_data: &'a J,
}

const EMPTY_LIST: [(); 0] = [];

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(body) => WirePayload {
                status: self.status(),
                error_data: &EMPTY_LIST,
                json_data: body,
            }
            .serialize(serializer),
            Self::Error(body) => WirePayload {
                status: self.status(),
                error_data: body,
                json_data: &EMPTY_LIST,
            }
            .serialize(serializer),
        }
    }
}

/// `json_data` of a successful answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessBody {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SuccessData>,
    /// Current product list, only reported by product-taken pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<Product>>,
}

impl SuccessBody {
    /// A body with `code = 1` and no extra data.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            message: message.into(),
            data: None,
            list: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: SuccessData) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_list(mut self, list: Vec<Product>) -> Self {
        self.list = Some(list);
        self
    }
}

/// Structured `json_data.data` variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SuccessData {
    /// Door states as a list, as reported when the door unlocks.
    Doors(Vec<DoorState>),
    /// A single door state, as reported when the door locks.
    Door(DoorState),
    Transaction(TransactionSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoorState {
    pub door_status: DoorStatus,
}

impl From<DoorStatus> for DoorState {
    fn from(door_status: DoorStatus) -> Self {
        Self { door_status }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoorStatus {
    Opened,
    Locked,
}

/// Summary of a closed fridge transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub transaction_id: String,
    pub transaction_status: u8,
    pub transaction_total: f64,
    pub transaction_product: Vec<Product>,
}

/// `error_data` of a failed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: i32,
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
