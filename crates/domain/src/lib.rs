//! # fridgesim-domain
//!
//! Pure domain model for the smart-fridge protocol simulator.
//!
//! ## Responsibilities
//! - Define the **Script Catalog**: known commands, flow directives, fixture
//!   bundles and staged event scripts, keyed by command name
//! - Define **Payloads** as explicit tagged types instead of ad hoc JSON
//! - Define the **wire envelopes** exchanged with clients (acknowledgment,
//!   response, push)
//! - Define validation **problems** and error types
//! - Enforce every catalog invariant once, when the catalog is built
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.

pub mod catalog;
pub mod command;
pub mod envelope;
pub mod error;
pub mod fixture;
pub mod id;
pub mod payload;
pub mod problem;
pub mod product;
pub mod script;
