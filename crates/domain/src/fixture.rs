//! Fixture bundles: the canned answers of one command.

use crate::payload::{Acknowledgment, ErrorBody, Payload, SuccessBody};

/// Acknowledgment, success and error fixtures for a single command.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureBundle {
    pub acknowledgment: Acknowledgment,
    pub success: SuccessBody,
    /// Ordered; a flow directive's `error_index` points into this list.
    pub errors: Vec<ErrorBody>,
}

impl FixtureBundle {
    #[must_use]
    pub fn new(acknowledgment: Acknowledgment, success: SuccessBody) -> Self {
        Self {
            acknowledgment,
            success,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: impl IntoIterator<Item = ErrorBody>) -> Self {
        self.errors.extend(errors);
        self
    }

    #[must_use]
    pub fn success_payload(&self) -> Payload {
        Payload::Success(self.success.clone())
    }

    #[must_use]
    pub fn error_payload(&self, index: usize) -> Option<Payload> {
        self.errors.get(index).cloned().map(Payload::Error)
    }
}
