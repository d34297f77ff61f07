//! `check_machine_state`: is the machine available for API dispensing?

use fridgesim_domain::command::{CommandDefinition, FlowDirective};
use fridgesim_domain::fixture::FixtureBundle;
use fridgesim_domain::payload::{Acknowledgment, SuccessBody};

use super::public_api_errors;

pub const NAME: &str = "check_machine_state";

#[must_use]
pub fn command() -> (CommandDefinition, FixtureBundle) {
    (
        CommandDefinition::new(NAME, FlowDirective::success()),
        FixtureBundle::new(
            Acknowledgment::accepted("PUBLIC007"),
            SuccessBody::ok("Machine is available for API Dispensing"),
        )
        .with_errors(public_api_errors()),
    )
}
