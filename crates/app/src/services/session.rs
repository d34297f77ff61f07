//! Session: the dispatch loop of one client connection.
//!
//! For every inbound text message the session validates, selects, sends the
//! acknowledgment then the primary answer, and spawns the staged chain when
//! the command has one. Staged chains live in a [`JoinSet`] owned by the
//! session: dropping the session (the connection closed) aborts every chain
//! that has not finished yet.

use std::sync::Arc;

use tokio::task::JoinSet;

use fridgesim_domain::catalog::ScriptCatalog;
use fridgesim_domain::problem::{Problem, RequestPolicy};

use crate::ports::{OutboundSink, SinkError};
use crate::services::scheduler::StageScheduler;
use crate::services::selector::select;
use crate::services::validator::validate;

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Not a JSON object; nothing was sent.
    Malformed,
    /// Blocked by validation problems; nothing was sent.
    Rejected(Vec<Problem>),
    /// Acknowledgment and primary answer sent.
    Answered {
        event: String,
        /// Non-blocking problems that were logged.
        problems: Vec<Problem>,
        staged: bool,
    },
}

/// Per-connection command flow driver.
pub struct Session<S> {
    catalog: Arc<ScriptCatalog>,
    scheduler: StageScheduler,
    policy: RequestPolicy,
    sink: S,
    staged: JoinSet<()>,
}

impl<S> Session<S>
where
    S: OutboundSink + Clone + 'static,
{
    /// Create a session writing to `sink`.
    pub fn new(catalog: Arc<ScriptCatalog>, policy: RequestPolicy, sink: S) -> Self {
        Self {
            scheduler: StageScheduler::new(Arc::clone(&catalog)),
            catalog,
            policy,
            sink,
            staged: JoinSet::new(),
        }
    }

    /// Handle one inbound text message.
    ///
    /// Request-level problems are logged and reported through [`Dispatch`],
    /// never as errors.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the connection closed while the immediate
    /// answers were being sent.
    pub async fn handle(&mut self, raw: &str) -> Result<Dispatch, SinkError> {
        while self.staged.try_join_next().is_some() {}

        let outcome = match validate(raw, &self.catalog) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "unable to read request");
                return Ok(Dispatch::Malformed);
            }
        };

        let Some(request) = outcome.admitted(self.policy) else {
            return Ok(Dispatch::Rejected(outcome.problems.clone()));
        };

        tracing::info!(
            outcome = "success",
            command = %request.command,
            reference = %request
                .reference
                .as_ref()
                .map_or_else(String::new, ToString::to_string),
            "command triggered"
        );

        let Some(selection) = select(request, &self.catalog) else {
            tracing::error!(command = %request.command, "no answer configured for command");
            return Ok(Dispatch::Rejected(outcome.problems.clone()));
        };

        self.sink.send(selection.acknowledgment.into()).await?;
        tracing::debug!("acknowledgment queued");

        let event = selection.primary.command.clone();
        self.sink.send(selection.primary.into()).await?;
        tracing::debug!(%event, "primary answer queued");

        let chain = self.scheduler.schedule(
            &request.command,
            request.reference.as_ref(),
            self.sink.clone(),
        );
        let staged = chain.is_some();
        if let Some(chain) = chain {
            self.staged.spawn(chain);
        }

        Ok(Dispatch::Answered {
            event,
            problems: outcome.problems.clone(),
            staged,
        })
    }

    /// Number of staged chains that have not finished yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    /// Abort every pending staged chain.
    pub fn abort_staged(&mut self) {
        self.staged.abort_all();
    }
}
