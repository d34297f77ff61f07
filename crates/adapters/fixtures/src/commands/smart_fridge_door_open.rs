//! `smart_fridge_door_open`: unlock the door and play a shopping session.
//!
//! After the door unlocks the customer takes a drink, takes a second one,
//! puts it back, takes a sandwich, closes the door, and the transaction is
//! completed with everything that left the fridge at some point.

use fridgesim_domain::command::{CommandDefinition, FlowDirective};
use fridgesim_domain::fixture::FixtureBundle;
use fridgesim_domain::payload::{Acknowledgment, DoorStatus, SuccessBody, SuccessData};
use fridgesim_domain::script::{StageAction, StageScript};

use super::public_api_errors;
use crate::products::{CHICKEN_SANDWICH, SMALL_100_PLUS, SMALL_COCA_LIGHT};

pub const NAME: &str = "smart_fridge_door_open";

const PRODUCT_TAKEN: &str = "smart_fridge_product_taken";
const PRODUCT_TAKEN_MESSAGE: &str = "Product taken list is updated";

#[must_use]
pub fn command() -> (CommandDefinition, FixtureBundle) {
    (
        CommandDefinition::new(NAME, FlowDirective::success())
            .with_required_field("public_api_token")
            .with_required_field("machine_uid"),
        FixtureBundle::new(
            Acknowledgment::accepted("PUBLIC011"),
            SuccessBody::ok("Smart Fridge Door is unlocked")
                .with_data(SuccessData::Doors(vec![DoorStatus::Opened.into()])),
        )
        .with_errors(public_api_errors()),
    )
}

/// Staged pushes following the door unlock, one stage-delay unit apart.
#[must_use]
pub fn script() -> StageScript {
    StageScript::new()
        .stage(1, PRODUCT_TAKEN, PRODUCT_TAKEN_MESSAGE, cart(&[SMALL_100_PLUS]))
        .stage(
            2,
            PRODUCT_TAKEN,
            PRODUCT_TAKEN_MESSAGE,
            cart(&[SMALL_100_PLUS, SMALL_COCA_LIGHT]),
        )
        .stage(3, PRODUCT_TAKEN, PRODUCT_TAKEN_MESSAGE, cart(&[SMALL_100_PLUS]))
        .stage(
            4,
            PRODUCT_TAKEN,
            PRODUCT_TAKEN_MESSAGE,
            cart(&[SMALL_100_PLUS, CHICKEN_SANDWICH]),
        )
        .stage(
            5,
            "smart_fridge_door_close_success",
            "Door is successfully locked",
            StageAction::Door(DoorStatus::Locked),
        )
        .stage(
            6,
            "smart_fridge_request_completed",
            "This Smart Fridge request has been completed & closed",
            StageAction::Complete,
        )
}

fn cart(vpns: &[&str]) -> StageAction {
    StageAction::Cart(vpns.iter().map(ToString::to_string).collect())
}
