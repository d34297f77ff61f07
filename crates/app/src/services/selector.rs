//! Response selector: picks the acknowledgment and primary answer.

use fridgesim_domain::catalog::ScriptCatalog;
use fridgesim_domain::envelope::{AckEnvelope, InboundRequest, ResponseEnvelope};

/// The two immediate answers to an admitted request.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub acknowledgment: AckEnvelope,
    pub primary: ResponseEnvelope,
}

/// Select the answers for `request` from the catalog.
///
/// The primary answer follows the command's flow directive: the success
/// fixture under `<command>_success`, or the configured error fixture under
/// `<command>_error`. A command with an in-progress event answers with that
/// event and its success fixture whatever the flow says.
///
/// Returns `None` only when the command is not in the catalog, which the
/// validator already rules out.
#[must_use]
pub fn select(request: &InboundRequest, catalog: &ScriptCatalog) -> Option<Selection> {
    let definition = catalog.definition(&request.command)?;
    let fixtures = catalog.fixtures(&request.command)?;

    let acknowledgment = AckEnvelope {
        respond: definition.name.clone(),
        respond_data: fixtures.acknowledgment.clone(),
        reference: request.reference.clone(),
    };

    let (command, command_data) = if definition.flow.send_success {
        tracing::info!(
            command = %definition.name,
            "configured to mimic successful response"
        );
        (definition.success_event(), fixtures.success_payload())
    } else {
        tracing::info!(
            command = %definition.name,
            error_index = definition.flow.error_index,
            "configured to mimic error response"
        );
        (
            definition.error_event(),
            fixtures.error_payload(definition.flow.error_index)?,
        )
    };

    let (command, command_data) = match definition.in_progress_event() {
        Some(event) => (event, fixtures.success_payload()),
        None => (command, command_data),
    };

    Some(Selection {
        acknowledgment,
        primary: ResponseEnvelope {
            command,
            command_data,
            reference: request.reference.clone(),
        },
    })
}
