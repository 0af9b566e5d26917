//! Frontier and visited-registry bookkeeping.

use std::collections::{HashSet, VecDeque};
use url::Url;

use crate::models::CrawlRequest;

/// FIFO admission queue plus the in-flight and visited URL registries.
///
/// All three sets participate in dedup: a URL enters the queue at most once,
/// and once dispatched or visited it is never admitted again, no matter how
/// many times it is rediscovered.
#[derive(Debug, Default)]
pub(super) struct Frontier {
    queue: VecDeque<CrawlRequest>,
    pending: HashSet<Url>,
    in_flight: HashSet<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Admits a request unless its URL is already queued, in flight, or
    /// visited. Duplicate discovery is expected and harmless, so a rejected
    /// request is simply dropped.
    pub(super) fn enqueue_if_new(&mut self, request: CrawlRequest) -> bool {
        let url = &request.url;
        if self.pending.contains(url)
            || self.in_flight.contains(url)
            || self.visited.contains(url)
        {
            return false;
        }
        self.pending.insert(url.clone());
        self.queue.push_back(request);
        true
    }

    /// Pops the oldest queued request and moves its URL into the in-flight
    /// set.
    pub(super) fn next_ready(&mut self) -> Option<CrawlRequest> {
        let request = self.queue.pop_front()?;
        self.pending.remove(&request.url);
        self.in_flight.insert(request.url.clone());
        Some(request)
    }

    /// Moves a URL from in flight to visited.
    pub(super) fn mark_terminal(&mut self, url: &Url) {
        self.in_flight.remove(url);
        self.visited.insert(url.clone());
    }

    /// True when nothing is queued or in flight; the crawl is complete.
    pub(super) fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.in_flight.is_empty()
    }

    pub(super) fn queued_len(&self) -> usize {
        self.queue.len()
    }

    pub(super) fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    pub(super) fn visited_len(&self) -> usize {
        self.visited.len()
    }
}
