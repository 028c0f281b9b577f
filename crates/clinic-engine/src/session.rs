//! Dashboard sessions.
//!
//! A session pairs a shared, read-only table with the one piece of mutable
//! state in the engine: the reallocation counter. Every trigger re-runs the
//! full [`evaluate`] pipeline against the session's current filter.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use clinic_model::{EngineOptions, FilterSpec, ReclampPolicy, RecordTable};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::filter::apply_filter;
use crate::pipeline::{DashboardSnapshot, Evaluation, evaluate};
use crate::reallocation::{AdvanceOutcome, BatchReallocator};
use crate::view::FilteredView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug)]
pub struct DashboardSession {
    id: SessionId,
    table: Arc<RecordTable>,
    filter: FilterSpec,
    options: EngineOptions,
    reallocator: BatchReallocator,
}

impl DashboardSession {
    /// Open a session on `table` with the full-domain filter and the counter
    /// at zero.
    pub fn new(table: Arc<RecordTable>, options: EngineOptions) -> Self {
        let filter = FilterSpec::full_domain(&table);
        Self {
            id: SessionId::new(),
            table,
            filter,
            options,
            reallocator: BatchReallocator::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn table(&self) -> &Arc<RecordTable> {
        &self.table
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn processed_count(&self) -> usize {
        self.reallocator.processed_count()
    }

    pub fn filtered_view(&self) -> FilteredView<'_> {
        apply_filter(&self.table, &self.filter)
    }

    /// Re-evaluate the current filter.
    pub fn snapshot(&mut self) -> DashboardSnapshot {
        let evaluation = evaluate(&self.table, &self.filter, &self.options);
        apply_policy(&mut self.reallocator, &self.options, &evaluation);
        evaluation.snapshot(&self.reallocator)
    }

    pub fn on_filter_changed(&mut self, filter: FilterSpec) -> DashboardSnapshot {
        debug!(session = %self.id, "filter changed");
        self.filter = filter;
        self.snapshot()
    }

    /// Advance the counter against the current view's high-risk count.
    pub fn on_advance_triggered(&mut self, batch_size: u32) -> (AdvanceOutcome, DashboardSnapshot) {
        let evaluation = evaluate(&self.table, &self.filter, &self.options);
        apply_policy(&mut self.reallocator, &self.options, &evaluation);
        let outcome = self.reallocator.advance(batch_size, evaluation.total_risks());
        info!(
            session = %self.id,
            processed = outcome.after,
            total_risks = outcome.total_risks,
            "reallocation advanced"
        );
        (outcome, evaluation.snapshot(&self.reallocator))
    }

    /// Advance by the configured default batch size.
    pub fn on_advance_default(&mut self) -> (AdvanceOutcome, DashboardSnapshot) {
        self.on_advance_triggered(self.options.batch_size)
    }
}

fn apply_policy(
    reallocator: &mut BatchReallocator,
    options: &EngineOptions,
    evaluation: &Evaluation<'_>,
) {
    if options.reclamp_policy == ReclampPolicy::ClampOnEvaluate {
        reallocator.reclamp(evaluation.total_risks());
    }
}

/// Open sessions keyed by id. Closing a session drops its counter.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, DashboardSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, table: Arc<RecordTable>, options: EngineOptions) -> SessionId {
        let session = DashboardSession::new(table, options);
        let id = session.id();
        self.sessions.insert(id, session);
        debug!(session = %id, open = self.sessions.len(), "session opened");
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<&DashboardSession> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut DashboardSession> {
        self.sessions.get_mut(id)
    }

    /// Returns false when no session had this id.
    pub fn close(&mut self, id: &SessionId) -> bool {
        let closed = self.sessions.remove(id).is_some();
        if closed {
            debug!(session = %id, "session closed");
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.sessions.keys().copied()
    }
}
