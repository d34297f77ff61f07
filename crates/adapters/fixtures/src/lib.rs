//! # fridgesim-adapter-fixtures
//!
//! The built-in smart-fridge controller script.
//!
//! ## Provided commands
//!
//! | Command | Ack code | Default flow | Staged events |
//! |---------|----------|--------------|---------------|
//! | `check_machine_state` | `PUBLIC007` | success | none |
//! | `smart_fridge_door_open` | `PUBLIC011` | success | product taken ×4, door closed, request completed |
//! | `smart_fridge_request` | `PUBLIC010` | answers `smart_fridge_request_begun` | none |
//!
//! Every command shares the controller's public API error list
//! (see [`commands::public_api_errors`]).
//!
//! ## Dependency rule
//!
//! Depends on `fridgesim-domain` only. The binary applies configuration
//! (flow overrides, stage delay) on the returned builder before building.

pub mod commands;
pub mod products;

use fridgesim_domain::catalog::{ScriptCatalog, ScriptCatalogBuilder};

/// Builder pre-loaded with every built-in product, command and script.
#[must_use]
pub fn standard_catalog() -> ScriptCatalogBuilder {
    let builder = products::all()
        .into_iter()
        .fold(ScriptCatalog::builder(), ScriptCatalogBuilder::product);

    let (definition, fixtures) = commands::check_machine_state::command();
    let builder = builder.command(definition, fixtures);

    let (definition, fixtures) = commands::smart_fridge_door_open::command();
    let builder = builder
        .command(definition, fixtures)
        .script(
            commands::smart_fridge_door_open::NAME,
            commands::smart_fridge_door_open::script(),
        );

    let (definition, fixtures) = commands::smart_fridge_request::command();
    builder.command(definition, fixtures)
}
