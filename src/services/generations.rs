//! Search generations
//!
//! Every keyed search takes a ticket. When a newer search starts for the same
//! key, older tickets stop being current and their results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Ticket of one in-flight search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub key: String,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct SearchGenerations {
    counter: AtomicU64,
    latest: DashMap<String, u64>,
}

impl SearchGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search for `key`, superseding any search already running for it.
    ///
    /// The key is released when the guard is finished or dropped, so a search
    /// abandoned mid-flight leaves nothing behind.
    pub fn begin(&self, key: &str) -> SearchGuard<'_> {
        let generation = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.insert(key.to_string(), generation);
        SearchGuard {
            generations: self,
            ticket: SearchTicket {
                key: key.to_string(),
                generation,
            },
            released: false,
        }
    }

    /// Keys with a search in flight
    pub fn in_flight(&self) -> usize {
        self.latest.len()
    }

    /// Drop the key if `ticket` is still its latest search
    fn release(&self, ticket: &SearchTicket) -> bool {
        self.latest
            .remove_if(&ticket.key, |_, g| *g == ticket.generation)
            .is_some()
    }
}

/// Holds a search's ticket until the search ends
#[derive(Debug)]
pub struct SearchGuard<'a> {
    generations: &'a SearchGenerations,
    ticket: SearchTicket,
    released: bool,
}

impl SearchGuard<'_> {
    pub fn ticket(&self) -> &SearchTicket {
        &self.ticket
    }

    /// End the search. Returns true when its result may be used.
    pub fn finish(mut self) -> bool {
        self.released = true;
        self.generations.release(&self.ticket)
    }
}

impl Drop for SearchGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.generations.release(&self.ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_search_supersedes_older() {
        let generations = SearchGenerations::new();
        let first = generations.begin("dialog-1");
        let second = generations.begin("dialog-1");

        assert!(second.ticket().generation > first.ticket().generation);
        assert!(!first.finish());
        assert_eq!(generations.in_flight(), 1);
        assert!(second.finish());
        assert_eq!(generations.in_flight(), 0);
    }

    #[test]
    fn test_stale_search_finishing_last_is_discarded() {
        let generations = SearchGenerations::new();
        let first = generations.begin("dialog-1");
        let second = generations.begin("dialog-1");

        assert!(second.finish());
        assert!(!first.finish());
    }

    #[test]
    fn test_keys_are_independent() {
        let generations = SearchGenerations::new();
        let a = generations.begin("a");
        let b = generations.begin("b");
        assert!(a.finish());
        assert!(b.finish());
    }

    #[test]
    fn test_abandoned_search_releases_its_key() {
        let generations = SearchGenerations::new();
        {
            let _abandoned = generations.begin("dialog-1");
            assert_eq!(generations.in_flight(), 1);
        }
        assert_eq!(generations.in_flight(), 0);
    }

    #[test]
    fn test_dropping_stale_guard_keeps_newer_search() {
        let generations = SearchGenerations::new();
        let first = generations.begin("dialog-1");
        let second = generations.begin("dialog-1");
        drop(first);
        assert_eq!(generations.in_flight(), 1);
        assert!(second.finish());
    }
}
