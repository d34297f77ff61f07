//! Staged event scripts: the delayed pushes of a multi-step interaction.
//!
//! A [`StageScript`] is what gets authored: an ordered list of stages, each
//! with an offset (in multiples of the catalog's stage delay), an event name,
//! a message and an [`StageAction`] describing what physically happened.
//! Rendering turns it into concrete [`StagedEvent`]s once, when the catalog
//! is built. Product references are resolved then, and the completion
//! aggregate is accumulated from the very same product fixtures the earlier
//! stages reported.

use std::collections::BTreeMap;

use crate::error::CatalogError;
use crate::payload::{DoorStatus, Payload, SuccessBody, SuccessData, TransactionSummary};
use crate::product::Product;

/// What a stage reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageAction {
    /// The products currently taken out of the fridge, by `vpn`.
    Cart(Vec<String>),
    Door(DoorStatus),
    /// Transaction closed; reports every product taken during the session.
    Complete,
}

/// One authored stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Delay from the primary answer, in stage-delay units.
    pub offset: u32,
    pub event: String,
    pub message: String,
    pub action: StageAction,
}

/// Ordered stages of a multi-step command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageScript {
    stages: Vec<Stage>,
}

/// A rendered stage, ready to be stamped with a `ref` and sent.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedEvent {
    pub offset: u32,
    pub event: String,
    pub payload: Payload,
}

impl StageScript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(
        mut self,
        offset: u32,
        event: impl Into<String>,
        message: impl Into<String>,
        action: StageAction,
    ) -> Self {
        self.stages.push(Stage {
            offset,
            event: event.into(),
            message: message.into(),
            action,
        });
        self
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Resolve every stage into its payload.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::StageOrder`] when offsets do not strictly
    /// increase, [`CatalogError::UnknownProduct`] when a cart names a product
    /// missing from `products`, and [`CatalogError::InvalidPrice`] when a
    /// completed transaction cannot be totalled.
    pub fn render(
        &self,
        command: &str,
        products: &BTreeMap<String, Product>,
    ) -> Result<Vec<StagedEvent>, CatalogError> {
        let mut taken: Vec<Product> = Vec::new();
        let mut rendered = Vec::with_capacity(self.stages.len());

        for (position, stage) in self.stages.iter().enumerate() {
            if let Some(previous) = rendered.last().map(|e: &StagedEvent| e.offset) {
                if stage.offset <= previous {
                    return Err(CatalogError::StageOrder {
                        command: command.to_string(),
                        position,
                    });
                }
            }

            let body = match &stage.action {
                StageAction::Cart(vpns) => {
                    let cart = vpns
                        .iter()
                        .map(|vpn| {
                            products.get(vpn).cloned().ok_or_else(|| {
                                CatalogError::UnknownProduct {
                                    command: command.to_string(),
                                    vpn: vpn.clone(),
                                }
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    for product in &cart {
                        if !taken.iter().any(|p| p.vpn == product.vpn) {
                            taken.push(product.clone());
                        }
                    }
                    SuccessBody::ok(&stage.message).with_list(cart)
                }
                StageAction::Door(status) => {
                    SuccessBody::ok(&stage.message).with_data(SuccessData::Door((*status).into()))
                }
                StageAction::Complete => SuccessBody::ok(&stage.message)
                    .with_data(SuccessData::Transaction(summarize(&taken)?)),
            };

            rendered.push(StagedEvent {
                offset: stage.offset,
                event: stage.event.clone(),
                payload: Payload::Success(body),
            });
        }

        Ok(rendered)
    }
}

#[allow(clippy::cast_precision_loss)]
fn summarize(taken: &[Product]) -> Result<TransactionSummary, CatalogError> {
    let mut cents = 0_u64;
    for product in taken {
        cents += product.price_cents()?;
    }
    Ok(TransactionSummary {
        transaction_id: String::new(),
        transaction_status: 1,
        transaction_total: cents as f64 / 100.0,
        transaction_product: taken.to_vec(),
    })
}
