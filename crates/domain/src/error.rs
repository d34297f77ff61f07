//! Error types shared across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! [`CatalogError`] is a configuration error and is only ever produced while
//! the catalog is being built; [`RequestError`] covers inbound text that
//! cannot be interpreted at all.

/// A script catalog that cannot be built.
///
/// Every variant is fatal to startup: a catalog that builds successfully
/// never fails a lookup at request time.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two command definitions share the same name.
    #[error("command {0} is defined more than once")]
    DuplicateCommand(String),

    /// Two products share the same `vpn`.
    #[error("product {0} is defined more than once")]
    DuplicateProduct(String),

    /// A flow override or staged script names a command the catalog does not know.
    #[error("command {0} is not part of the script catalog")]
    UnknownCommand(String),

    /// A flow directive selects an error fixture that does not exist.
    #[error("command {command} selects error {index} but only {available} error fixtures are defined")]
    ErrorIndexOutOfRange {
        command: String,
        index: usize,
        available: usize,
    },

    /// A staged event references a product missing from the catalog.
    #[error("staged script for {command} references unknown product {vpn}")]
    UnknownProduct { command: String, vpn: String },

    /// Staged event offsets must strictly increase.
    #[error("staged script for {command} does not strictly increase at stage {position}")]
    StageOrder { command: String, position: usize },

    /// A product carries a unit price that is not a decimal amount.
    #[error("product {vpn} has an invalid unit price {price:?}")]
    InvalidPrice { vpn: String, price: String },
}

/// Inbound text that cannot be interpreted as a request at all.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The text is not valid JSON.
    #[error("request payload is not valid JSON")]
    Malformed(#[from] serde_json::Error),

    /// The text is valid JSON but not an object.
    #[error("request payload is not a JSON object")]
    NotAnObject,
}
