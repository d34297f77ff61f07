//! Command definitions and flow directives.

use serde::{Deserialize, Serialize};

/// Whether a command answers with its success fixture or one of its errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDirective {
    pub send_success: bool,
    /// Position in the command's error fixtures, used when `send_success` is false.
    #[serde(default)]
    pub error_index: usize,
}

impl FlowDirective {
    #[must_use]
    pub fn success() -> Self {
        Self {
            send_success: true,
            error_index: 0,
        }
    }

    #[must_use]
    pub fn error(error_index: usize) -> Self {
        Self {
            send_success: false,
            error_index,
        }
    }
}

/// A command the simulator recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    /// Unique, case-sensitive name.
    pub name: String,
    pub flow: FlowDirective,
    /// Suffix of an event that replaces the primary answer regardless of the
    /// flow (e.g. `begun` for a request that is accepted but not complete).
    pub in_progress: Option<String>,
    /// Fields that must be present under `command_data`.
    pub required_fields: Vec<String>,
}

impl CommandDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, flow: FlowDirective) -> Self {
        Self {
            name: name.into(),
            flow,
            in_progress: None,
            required_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_in_progress(mut self, suffix: impl Into<String>) -> Self {
        self.in_progress = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn with_required_field(mut self, field: impl Into<String>) -> Self {
        self.required_fields.push(field.into());
        self
    }

    #[must_use]
    pub fn success_event(&self) -> String {
        format!("{}_success", self.name)
    }

    #[must_use]
    pub fn error_event(&self) -> String {
        format!("{}_error", self.name)
    }

    #[must_use]
    pub fn in_progress_event(&self) -> Option<String> {
        self.in_progress
            .as_ref()
            .map(|suffix| format!("{}_{suffix}", self.name))
    }
}
