//! Built-in command fixtures, one module per command.

pub mod check_machine_state;
pub mod smart_fridge_door_open;
pub mod smart_fridge_request;

use fridgesim_domain::payload::ErrorBody;

/// Errors the controller's public API can answer any command with.
///
/// Flow directives pick from this list by position.
#[must_use]
pub fn public_api_errors() -> Vec<ErrorBody> {
    vec![
        ErrorBody::new(-1, "Invalid Parameters"),
        ErrorBody::new(-2, "Invalid Public API Token"),
        ErrorBody::new(-3, "Invalid Machine UID"),
        ErrorBody::new(-4, "Machine is currently not online"),
        ErrorBody::new(-5, "Machine is currently busy"),
        ErrorBody::new(-11, "Machine subscription is already expired"),
    ]
}
