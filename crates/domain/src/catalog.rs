//! Script catalog: the immutable table that drives every answer.
//!
//! Built once at startup through [`ScriptCatalogBuilder`] and shared
//! read-only afterwards. Command definitions, fixture bundles and staged
//! scripts are all keyed by command name, so a definition can never be
//! paired with another command's fixtures.
//!
//! Every invariant is checked in [`ScriptCatalogBuilder::build`]: error
//! indices must resolve, flow overrides and scripts must name known
//! commands, staged scripts must be ordered and reference known products.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::command::{CommandDefinition, FlowDirective};
use crate::error::CatalogError;
use crate::fixture::FixtureBundle;
use crate::product::Product;
use crate::script::{StageScript, StagedEvent};

/// Default spacing between staged events.
pub const DEFAULT_STAGE_DELAY_MS: u64 = 5000;

/// Read-only command table.
#[derive(Debug, Clone)]
pub struct ScriptCatalog {
    definitions: BTreeMap<String, CommandDefinition>,
    fixtures: BTreeMap<String, FixtureBundle>,
    scripts: BTreeMap<String, Vec<StagedEvent>>,
    products: BTreeMap<String, Product>,
    stage_delay: Duration,
}

impl ScriptCatalog {
    /// Create a builder for constructing a [`ScriptCatalog`].
    #[must_use]
    pub fn builder() -> ScriptCatalogBuilder {
        ScriptCatalogBuilder::default()
    }

    #[must_use]
    pub fn is_known(&self, command: &str) -> bool {
        self.definitions.contains_key(command)
    }

    #[must_use]
    pub fn definition(&self, command: &str) -> Option<&CommandDefinition> {
        self.definitions.get(command)
    }

    #[must_use]
    pub fn fixtures(&self, command: &str) -> Option<&FixtureBundle> {
        self.fixtures.get(command)
    }

    /// Rendered staged events of a multi-step command, in emission order.
    #[must_use]
    pub fn staged_events(&self, command: &str) -> Option<&[StagedEvent]> {
        self.scripts.get(command).map(Vec::as_slice)
    }

    /// Known command definitions, ordered by name.
    pub fn definitions(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.values()
    }

    #[must_use]
    pub fn product(&self, vpn: &str) -> Option<&Product> {
        self.products.get(vpn)
    }

    /// One stage-delay unit; staged offsets are multiples of it.
    #[must_use]
    pub fn stage_delay(&self) -> Duration {
        self.stage_delay
    }
}

/// Step-by-step builder for [`ScriptCatalog`].
#[derive(Debug)]
pub struct ScriptCatalogBuilder {
    commands: Vec<(CommandDefinition, FixtureBundle)>,
    scripts: Vec<(String, StageScript)>,
    products: Vec<Product>,
    flow_overrides: Vec<(String, FlowDirective)>,
    stage_delay_ms: u64,
}

impl Default for ScriptCatalogBuilder {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            scripts: Vec::new(),
            products: Vec::new(),
            flow_overrides: Vec::new(),
            stage_delay_ms: DEFAULT_STAGE_DELAY_MS,
        }
    }
}

impl ScriptCatalogBuilder {
    /// Register a command together with its fixtures.
    #[must_use]
    pub fn command(mut self, definition: CommandDefinition, fixtures: FixtureBundle) -> Self {
        self.commands.push((definition, fixtures));
        self
    }

    /// Attach a staged script to an already registered command.
    #[must_use]
    pub fn script(mut self, command: impl Into<String>, script: StageScript) -> Self {
        self.scripts.push((command.into(), script));
        self
    }

    #[must_use]
    pub fn product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Replace the flow directive of a registered command.
    #[must_use]
    pub fn flow_override(mut self, command: impl Into<String>, flow: FlowDirective) -> Self {
        self.flow_overrides.push((command.into(), flow));
        self
    }

    #[must_use]
    pub fn stage_delay_ms(mut self, stage_delay_ms: u64) -> Self {
        self.stage_delay_ms = stage_delay_ms;
        self
    }

    /// Consume the builder, check every invariant, and return a [`ScriptCatalog`].
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first invariant that fails.
    pub fn build(self) -> Result<ScriptCatalog, CatalogError> {
        let mut products = BTreeMap::new();
        for product in self.products {
            product.price_cents()?;
            if products.contains_key(&product.vpn) {
                return Err(CatalogError::DuplicateProduct(product.vpn));
            }
            products.insert(product.vpn.clone(), product);
        }

        let mut definitions = BTreeMap::new();
        let mut fixtures = BTreeMap::new();
        for (definition, bundle) in self.commands {
            if definitions.contains_key(&definition.name) {
                return Err(CatalogError::DuplicateCommand(definition.name));
            }
            fixtures.insert(definition.name.clone(), bundle);
            definitions.insert(definition.name.clone(), definition);
        }

        for (command, flow) in self.flow_overrides {
            let definition = definitions
                .get_mut(&command)
                .ok_or(CatalogError::UnknownCommand(command))?;
            definition.flow = flow;
        }

        for definition in definitions.values() {
            let available = fixtures.get(&definition.name).map_or(0, |b| b.errors.len());
            if !definition.flow.send_success && definition.flow.error_index >= available {
                return Err(CatalogError::ErrorIndexOutOfRange {
                    command: definition.name.clone(),
                    index: definition.flow.error_index,
                    available,
                });
            }
        }

        let mut scripts = BTreeMap::new();
        for (command, script) in self.scripts {
            if !definitions.contains_key(&command) {
                return Err(CatalogError::UnknownCommand(command));
            }
            let rendered = script.render(&command, &products)?;
            scripts.insert(command, rendered);
        }

        Ok(ScriptCatalog {
            definitions,
            fixtures,
            scripts,
            products,
            stage_delay: Duration::from_millis(self.stage_delay_ms),
        })
    }
}
