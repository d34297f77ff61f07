//! `smart_fridge_request`: open a smart fridge request.
//!
//! The request is accepted but not complete when the controller answers, so
//! the primary answer is always `smart_fridge_request_begun` with the success
//! fixture, whatever the flow directive says.

use fridgesim_domain::command::{CommandDefinition, FlowDirective};
use fridgesim_domain::fixture::FixtureBundle;
use fridgesim_domain::payload::{Acknowledgment, SuccessBody};

use super::public_api_errors;

pub const NAME: &str = "smart_fridge_request";

#[must_use]
pub fn command() -> (CommandDefinition, FixtureBundle) {
    (
        CommandDefinition::new(NAME, FlowDirective::success()).with_in_progress("begun"),
        FixtureBundle::new(
            Acknowledgment::accepted("PUBLIC010"),
            SuccessBody::ok("Smart Fridge request has begun"),
        )
        .with_errors(public_api_errors()),
    )
}
