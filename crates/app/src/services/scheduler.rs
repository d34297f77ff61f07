//! Staged event scheduler: delayed pushes of multi-step commands.
//!
//! Stages are sent from a single chain: each stage sleeps for the gap between
//! its offset and the previous one, and that sleep only starts once the
//! previous push has been handed to the sink. Pushes of one request are
//! therefore observed in script order however late any timer fires.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use fridgesim_domain::catalog::ScriptCatalog;
use fridgesim_domain::envelope::ResponseEnvelope;
use serde_json::Value;

use crate::ports::OutboundSink;

/// One push of a chain, with the wait that precedes it.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedPush {
    pub wait: Duration,
    pub envelope: ResponseEnvelope,
}

/// Builds and runs staged chains from the catalog's rendered scripts.
#[derive(Debug, Clone)]
pub struct StageScheduler {
    catalog: Arc<ScriptCatalog>,
}

impl StageScheduler {
    #[must_use]
    pub fn new(catalog: Arc<ScriptCatalog>) -> Self {
        Self { catalog }
    }

    /// The pushes for one request of `command`, stamped with `reference`.
    #[must_use]
    pub fn plan(&self, command: &str, reference: Option<&Value>) -> Option<Vec<StagedPush>> {
        let events = self.catalog.staged_events(command)?;
        let unit = self.catalog.stage_delay();
        let mut previous = 0;

        let pushes = events
            .iter()
            .map(|event| {
                let gap = event.offset.saturating_sub(previous);
                previous = event.offset;
                StagedPush {
                    wait: unit.checked_mul(gap).unwrap_or(Duration::MAX),
                    envelope: ResponseEnvelope {
                        command: event.event.clone(),
                        command_data: event.payload.clone(),
                        reference: reference.cloned(),
                    },
                }
            })
            .collect();

        Some(pushes)
    }

    /// The chain for one request, ready to be spawned.
    ///
    /// Returns `None` when `command` has no staged events.
    pub fn schedule<S>(
        &self,
        command: &str,
        reference: Option<&Value>,
        sink: S,
    ) -> Option<impl Future<Output = ()> + Send + 'static>
    where
        S: OutboundSink + 'static,
    {
        let pushes = self.plan(command, reference)?;
        Some(run_chain(pushes, sink))
    }
}

/// Send `pushes` in order, sleeping before each.
///
/// Stops silently at the first failed send: the connection is gone.
pub async fn run_chain<S: OutboundSink>(pushes: Vec<StagedPush>, sink: S) {
    for push in pushes {
        tokio::time::sleep(push.wait).await;
        let event = push.envelope.command.clone();
        if sink.send(push.envelope.into()).await.is_err() {
            tracing::debug!(%event, "connection closed, abandoning staged events");
            return;
        }
        tracing::debug!(%event, "staged event queued");
    }
}
