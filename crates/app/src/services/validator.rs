//! Request validator: turns inbound text into a request and its problems.
//!
//! Problems are collected, never short-circuited: a request missing both
//! `ref` and `command_data` reports both. A field counts as missing when it
//! is absent, `null`, `false`, `0` or an empty string. An empty object for
//! `command_data` is present.

use serde_json::{Map, Value};

use fridgesim_domain::catalog::ScriptCatalog;
use fridgesim_domain::envelope::InboundRequest;
use fridgesim_domain::error::RequestError;
use fridgesim_domain::problem::{Field, Problem, RequestPolicy};

/// Result of validating one inbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Set whenever `command` names a known command, even if other problems
    /// were found.
    pub request: Option<InboundRequest>,
    /// Problems in detection order.
    pub problems: Vec<Problem>,
}

impl ValidationOutcome {
    /// The request to answer under `policy`, if any.
    #[must_use]
    pub fn admitted(&self, policy: RequestPolicy) -> Option<&InboundRequest> {
        if self.problems.iter().any(|p| p.blocks(policy)) {
            return None;
        }
        self.request.as_ref()
    }
}

/// Validate raw inbound text against the catalog.
///
/// Each problem is logged at `error` level as it is found.
///
/// # Errors
///
/// Returns [`RequestError`] when the text is not a JSON object; nothing else
/// is checked in that case.
pub fn validate(raw: &str, catalog: &ScriptCatalog) -> Result<ValidationOutcome, RequestError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(fields) = value else {
        return Err(RequestError::NotAnObject);
    };
    tracing::debug!(payload = %raw, "data received");

    let mut problems = Vec::new();

    let reference = present(&fields, "ref").cloned();
    if reference.is_none() {
        problems.push(Problem::MissingField(Field::Ref));
    }

    let command = present(&fields, "command");
    if command.is_none() {
        problems.push(Problem::MissingField(Field::Command));
    }

    let command_data = present(&fields, "command_data").cloned();
    if command_data.is_none() {
        problems.push(Problem::MissingField(Field::CommandData));
    }

    let definition = match command {
        Some(Value::String(name)) if catalog.is_known(name) => catalog.definition(name),
        Some(Value::String(name)) => {
            problems.push(Problem::UnknownCommand(name.clone()));
            None
        }
        Some(other) => {
            problems.push(Problem::UnknownCommand(other.to_string()));
            None
        }
        None => None,
    };

    if let (Some(definition), Some(data)) = (definition, &command_data) {
        let nested = data.as_object();
        for field in &definition.required_fields {
            if nested.and_then(|object| present(object, field)).is_none() {
                problems.push(Problem::MissingField(Field::CommandDataField(field.clone())));
            }
        }
    }

    for problem in &problems {
        tracing::error!(%problem, "invalid request");
    }

    Ok(ValidationOutcome {
        request: definition.map(|definition| InboundRequest {
            reference,
            command: definition.name.clone(),
            command_data,
        }),
        problems,
    })
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
