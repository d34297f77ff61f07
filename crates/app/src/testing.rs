//! Shared catalog for unit tests.

use std::sync::Arc;

use fridgesim_domain::catalog::ScriptCatalog;
use fridgesim_domain::command::{CommandDefinition, FlowDirective};
use fridgesim_domain::fixture::FixtureBundle;
use fridgesim_domain::payload::{Acknowledgment, DoorStatus, ErrorBody, SuccessBody};
use fridgesim_domain::product::Product;
use fridgesim_domain::script::{StageAction, StageScript};

pub(crate) const STAGE_DELAY_MS: u64 = 100;

fn errors() -> Vec<ErrorBody> {
    vec![
        ErrorBody::new(-1, "Invalid Parameters"),
        ErrorBody::new(-2, "Invalid Public API Token"),
        ErrorBody::new(-3, "Invalid Machine UID"),
    ]
}

fn cart(vpns: &[&str]) -> StageAction {
    StageAction::Cart(vpns.iter().map(ToString::to_string).collect())
}

pub(crate) fn catalog_with(
    overrides: &[(&str, FlowDirective)],
) -> Arc<ScriptCatalog> {
    let mut builder = ScriptCatalog::builder()
        .stage_delay_ms(STAGE_DELAY_MS)
        .product(Product::new("P1", "1.60", "Small drink"))
        .product(Product::new("P2", "7.50", "Sandwich"))
        .command(
            CommandDefinition::new("check_machine_state", FlowDirective::success()),
            FixtureBundle::new(
                Acknowledgment::accepted("PUBLIC007"),
                SuccessBody::ok("Machine is available for API Dispensing"),
            )
            .with_errors(errors()),
        )
        .command(
            CommandDefinition::new("smart_fridge_door_open", FlowDirective::success())
                .with_required_field("public_api_token")
                .with_required_field("machine_uid"),
            FixtureBundle::new(
                Acknowledgment::accepted("PUBLIC011"),
                SuccessBody::ok("Smart Fridge Door is unlocked"),
            )
            .with_errors(errors()),
        )
        .command(
            CommandDefinition::new("smart_fridge_request", FlowDirective::error(0))
                .with_in_progress("begun"),
            FixtureBundle::new(
                Acknowledgment::accepted("PUBLIC010"),
                SuccessBody::ok("Smart Fridge request has begun"),
            )
            .with_errors(errors()),
        )
        .script(
            "smart_fridge_door_open",
            StageScript::new()
                .stage(1, "smart_fridge_product_taken", "updated", cart(&["P1"]))
                .stage(2, "smart_fridge_product_taken", "updated", cart(&["P1", "P2"]))
                .stage(
                    3,
                    "smart_fridge_door_close_success",
                    "locked",
                    StageAction::Door(DoorStatus::Locked),
                )
                .stage(4, "smart_fridge_request_completed", "completed", StageAction::Complete),
        );
    for (command, flow) in overrides {
        builder = builder.flow_override(*command, *flow);
    }
    Arc::new(builder.build().expect("test catalog must be valid"))
}

pub(crate) fn catalog() -> Arc<ScriptCatalog> {
    catalog_with(&[])
}
