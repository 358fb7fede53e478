use std::fmt;

use tracing::{debug, warn};

use super::domain::Candidate;
use super::engine::apply;
use super::filters::FilterState;

/// Sequence token issued when a roster fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was issued after this one; the completion was dropped.
    Stale,
    /// The fetch failed; previously rendered candidates were kept.
    Failed,
}

/// Live roster state: source snapshot, query, filters, and the visible projection.
///
/// The visible list is recomputed synchronously whenever any input changes.
#[derive(Debug, Clone, Default)]
pub struct RosterView {
    source: Vec<Candidate>,
    query: String,
    filters: FilterState,
    visible: Vec<Candidate>,
    issued: u64,
    pending: Option<FetchTicket>,
    notice: Option<String>,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        let mut view = Self::default();
        view.replace_candidates(candidates);
        view
    }

    pub fn visible(&self) -> &[Candidate] {
        &self.visible
    }

    pub fn source(&self) -> &[Candidate] {
        &self.source
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.recompute();
    }

    pub fn toggle_filter(&mut self, category: &str, value: &str) {
        self.filters.toggle(category, value);
        self.recompute();
    }

    pub fn replace_candidates(&mut self, candidates: Vec<Candidate>) {
        self.source = candidates;
        self.recompute();
    }

    /// Starts a fetch; only the newest ticket's completion will be rendered.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        self.pending = Some(ticket);
        ticket
    }

    pub fn complete_fetch<E>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Candidate>, E>,
    ) -> FetchOutcome
    where
        E: fmt::Display,
    {
        if ticket.0 != self.issued {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale roster fetch"
            );
            return FetchOutcome::Stale;
        }

        self.pending = None;
        match result {
            Ok(candidates) => {
                self.notice = None;
                self.replace_candidates(candidates);
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "roster fetch failed");
                self.notice = Some("Failed to fetch candidates".to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Text shown in place of an empty result list.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.visible.is_empty() {
            None
        } else if self.source.is_empty() {
            Some("No candidates found. Add some candidates to get started.")
        } else {
            Some("No candidates match your search criteria.")
        }
    }

    fn recompute(&mut self) {
        self.visible = apply(&self.source, &self.query, &self.filters);
    }
}
