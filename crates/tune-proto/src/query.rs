//! Assistant query lifecycle: loading flag, last result, submission tickets.

/// Sequence number handed out per accepted submission.  Only the most recent
/// ticket is allowed to write a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(pub u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub query_text: String,
    pub is_loading: bool,
    pub last_result: Option<String>,
    latest: u64,
}

impl QueryState {
    /// Accept a submission.  Whitespace-only text is ignored (returns `None`,
    /// nothing changes); otherwise the previous result is cleared, loading is
    /// raised and a fresh ticket is returned.
    pub fn submit(&mut self, text: &str) -> Option<QueryTicket> {
        if text.trim().is_empty() {
            return None;
        }
        self.latest += 1;
        self.query_text = text.to_string();
        self.last_result = None;
        self.is_loading = true;
        Some(QueryTicket(self.latest))
    }

    /// Write a resolved response.  Responses for superseded tickets are
    /// dropped; returns whether the state changed.
    pub fn resolve(&mut self, ticket: QueryTicket, text: String) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        self.last_result = Some(text);
        self.is_loading = false;
        true
    }

    pub fn dismiss_result(&mut self) {
        self.last_result = None;
    }
}
