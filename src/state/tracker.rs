//! Staleness guard for asynchronous completions.
//!
//! Requests cannot be aborted once sent, so every request carries a
//! [`RequestTicket`]. When the completion arrives it is applied only if its
//! ticket is still current; otherwise it is dropped.

/// Independent streams of requests. A newer ticket in a scope supersedes
/// every older one in the same scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    /// Loads whose success transitions the view.
    Navigation,
    /// Fetches of the signed-in user's own profile.
    Profile,
    /// Debounced user lookups.
    UserSearch,
}

impl RequestScope {
    const ALL: [RequestScope; 3] = [
        RequestScope::Navigation,
        RequestScope::Profile,
        RequestScope::UserSearch,
    ];

    fn slot(self) -> usize {
        match self {
            RequestScope::Navigation => 0,
            RequestScope::Profile => 1,
            RequestScope::UserSearch => 2,
        }
    }
}

/// Identifies the context a request was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    scope: Option<RequestScope>,
    generation: u64,
    session: u64,
}

impl RequestTicket {
    pub fn scope(&self) -> Option<RequestScope> {
        self.scope
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    session: u64,
    generations: [u64; 3],
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a new request in `scope`, superseding older ones.
    pub fn issue(&mut self, scope: RequestScope) -> RequestTicket {
        let slot = scope.slot();
        self.generations[slot] += 1;
        RequestTicket {
            scope: Some(scope),
            generation: self.generations[slot],
            session: self.session,
        }
    }

    /// Ticket for a mutation: valid until the session ends.
    pub fn mutation(&self) -> RequestTicket {
        RequestTicket {
            scope: None,
            generation: 0,
            session: self.session,
        }
    }

    /// Invalidate every outstanding ticket in `scope`.
    pub fn supersede(&mut self, scope: RequestScope) {
        self.generations[scope.slot()] += 1;
    }

    /// Invalidate everything issued so far.
    pub fn end_session(&mut self) {
        self.session += 1;
        for scope in RequestScope::ALL {
            self.supersede(scope);
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        if ticket.session != self.session {
            return false;
        }
        match ticket.scope {
            None => true,
            Some(scope) => self.generations[scope.slot()] == ticket.generation,
        }
    }
}
