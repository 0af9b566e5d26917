//! Crawl orchestration.
//!
//! A single scheduling task owns the frontier, the visited registry, and the
//! result aggregator. Fetches run as spawned tasks and report back over one
//! completion channel; body scans run on the blocking pool and feed
//! discovered links back over the same channel. Because every mutation
//! happens on the scheduling task, none of the crawl state needs locking.

mod fallback;
mod frontier;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use url::Url;

use crate::discover::extract_links;
use crate::error_handling::{CrawlStats, ErrorType, InfoType, WarningType};
use crate::fetch::Fetcher;
use crate::models::{CertificateSighting, ChainSummary, CrawlRequest, FetchOutcome};
use crate::report::ResultAggregator;

use fallback::next_fallback;
use frontier::Frontier;

/// Events delivered back to the scheduling task.
enum CrawlEvent {
    /// A dispatched fetch reached its outcome.
    FetchCompleted {
        request: CrawlRequest,
        outcome: FetchOutcome,
    },
    /// A body scan produced a candidate URL.
    LinkFound { request: CrawlRequest },
}

/// Shared counters read by the progress logger while a crawl runs.
#[derive(Debug, Default)]
pub struct CrawlCounters {
    /// URLs that have reached a terminal outcome.
    pub processed: AtomicUsize,
    /// Certificate sightings recorded so far.
    pub sightings: AtomicUsize,
    /// Fetches currently in flight.
    pub in_flight: AtomicUsize,
    /// Requests waiting in the frontier queue.
    pub queued: AtomicUsize,
}

/// The crawl orchestrator.
///
/// Owns all crawl state and drives it from a single event loop. The fetcher
/// is the only pluggable part; tests drive the loop with a scripted one.
pub struct Crawler<F: Fetcher> {
    fetcher: Arc<F>,
    frontier: Frontier,
    aggregator: ResultAggregator,
    stats: Arc<CrawlStats>,
    counters: Arc<CrawlCounters>,
    concurrency_cap: usize,
    tx: mpsc::UnboundedSender<CrawlEvent>,
    rx: mpsc::UnboundedReceiver<CrawlEvent>,
}

impl<F: Fetcher> Crawler<F> {
    /// Creates a crawler that keeps at most `concurrency_cap` fetches in
    /// flight. A cap of zero is treated as one so the crawl can make
    /// progress.
    pub fn new(
        fetcher: F,
        concurrency_cap: usize,
        stats: Arc<CrawlStats>,
        counters: Arc<CrawlCounters>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Crawler {
            fetcher: Arc::new(fetcher),
            frontier: Frontier::new(),
            aggregator: ResultAggregator::new(),
            stats,
            counters,
            concurrency_cap: concurrency_cap.max(1),
            tx,
            rx,
        }
    }

    /// Crawls from the given seeds until the frontier and the in-flight set
    /// are simultaneously empty, then returns the accumulated results.
    ///
    /// Per-URL failures never abort the crawl; they are absorbed by the
    /// fallback ladder and the statistics counters.
    pub async fn run(mut self, seeds: Vec<Url>) -> ResultAggregator {
        for url in seeds {
            self.frontier.enqueue_if_new(CrawlRequest::seed(url));
        }
        self.fill_slots();
        if self.frontier.is_idle() {
            info!("No seeds to crawl");
            return self.aggregator;
        }

        // self.tx keeps the channel open, so recv() only returns None if the
        // loop below breaks first.
        while let Some(event) = self.rx.recv().await {
            match event {
                CrawlEvent::FetchCompleted { request, outcome } => {
                    self.on_fetch_completed(request, outcome);
                    self.fill_slots();
                    if self.frontier.is_idle() {
                        break;
                    }
                }
                CrawlEvent::LinkFound { request } => {
                    if self.frontier.enqueue_if_new(request) {
                        self.stats.increment_info(InfoType::LinkDiscovered);
                    }
                    self.fill_slots();
                }
            }
        }

        info!(
            "Crawl finished: {} URLs visited, {} certificate sightings",
            self.frontier.visited_len(),
            self.counters.sightings.load(Ordering::Relaxed)
        );
        self.aggregator
    }

    /// Dispatches queued requests until the cap is reached, then refreshes
    /// the gauges the progress logger reads.
    fn fill_slots(&mut self) {
        while self.frontier.in_flight_len() < self.concurrency_cap {
            match self.frontier.next_ready() {
                Some(request) => self.dispatch(request),
                None => break,
            }
        }
        self.counters
            .in_flight
            .store(self.frontier.in_flight_len(), Ordering::Relaxed);
        self.counters
            .queued
            .store(self.frontier.queued_len(), Ordering::Relaxed);
    }

    fn dispatch(&self, request: CrawlRequest) {
        debug!("Dispatching {} (origin {})", request.url, request.origin);
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = fetcher.fetch(&request.url).await;
            // The receiver is gone once the crawl has finished; a late
            // completion is dropped on purpose.
            let _ = tx.send(CrawlEvent::FetchCompleted { request, outcome });
        });
    }

    fn on_fetch_completed(&mut self, request: CrawlRequest, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::TlsCertificate(summary) => self.on_certificate(&request, summary),
            FetchOutcome::Page {
                status,
                location,
                body,
            } => self.on_page(&request, status, location, body),
            FetchOutcome::UnsupportedScheme => {
                warn!("Unsupported scheme, skipping {}", request.url);
                self.stats.increment_warning(WarningType::UnsupportedScheme);
            }
            FetchOutcome::Failed { kind, message } => self.on_failure(&request, kind, &message),
        }
        self.frontier.mark_terminal(&request.url);
        self.counters.processed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_certificate(&mut self, request: &CrawlRequest, summary: ChainSummary) {
        if summary.chain_len == 0 {
            warn!(
                "No errors but certificate chain is empty for {}",
                request.url
            );
            self.stats
                .increment_warning(WarningType::EmptyCertificateChain);
            return;
        }
        debug!(
            "Found certificate for {} at {}, organizations: {:?}",
            request.origin, request.url, summary.organizations
        );
        self.aggregator.record(CertificateSighting {
            certificate_url: request.url.clone(),
            referrer: request.origin.to_string(),
            organizations: summary.organizations,
            leaf_country: summary.leaf_country,
            root_country: summary.root_country,
        });
        self.stats.increment_info(InfoType::CertificateSighting);
        self.counters.sightings.fetch_add(1, Ordering::Relaxed);
    }

    /// Handles a plain-HTTP response: follow a redirect if one is announced,
    /// then scan whatever body arrived for candidate links.
    ///
    /// The redirect target is enqueued before the current URL is marked
    /// terminal, so a server redirecting to the URL being fetched dedups
    /// against the in-flight entry instead of looping.
    fn on_page(
        &mut self,
        request: &CrawlRequest,
        status: u16,
        location: Option<String>,
        body: Vec<u8>,
    ) {
        if (300..400).contains(&status) {
            match location {
                Some(raw) => match resolve_redirect(&request.url, &raw) {
                    Some(target) => {
                        debug!("Found redirect at {} to {}", request.url, target);
                        self.stats.increment_info(InfoType::HttpRedirect);
                        self.frontier.enqueue_if_new(request.follow_up(target));
                    }
                    None => {
                        warn!(
                            "Redirect at {} has malformed location {:?}",
                            request.url, raw
                        );
                        self.stats
                            .increment_warning(WarningType::MalformedRedirectTarget);
                    }
                },
                None => {
                    warn!("Redirect at {} carries no location header", request.url);
                    self.stats
                        .increment_warning(WarningType::MissingRedirectTarget);
                }
            }
        }
        if !body.is_empty() {
            self.scan_body(request, body);
        }
    }

    fn on_failure(&mut self, request: &CrawlRequest, kind: ErrorType, message: &str) {
        self.stats.increment_error(kind);
        match next_fallback(&request.url, request.origin_host()) {
            Some((retry, rung)) => {
                debug!(
                    "{} for {}: {}; retrying as {}",
                    kind, request.url, message, retry
                );
                self.stats.increment_info(rung);
                self.frontier.enqueue_if_new(request.follow_up(retry));
            }
            None => {
                warn!(
                    "Could not fetch {} (origin {}): {}",
                    request.url, request.origin, message
                );
            }
        }
    }

    /// Hands page bytes to the blocking pool for link extraction. Candidates
    /// stream back as events while the crawl continues; the scheduling task
    /// never waits for a scan.
    fn scan_body(&self, request: &CrawlRequest, body: Vec<u8>) {
        let tx = self.tx.clone();
        let request = request.clone();
        tokio::task::spawn_blocking(move || {
            for url in extract_links(&body, request.origin_host(), &request.url) {
                let _ = tx.send(CrawlEvent::LinkFound {
                    request: request.follow_up(url),
                });
            }
        });
    }
}

/// Resolves a raw `Location` header against the URL it was served from.
///
/// Absolute targets parse directly; relative ones are joined onto the
/// current URL. Anything else is malformed.
fn resolve_redirect(current: &Url, location: &str) -> Option<Url> {
    Url::parse(location).or_else(|_| current.join(location)).ok()
}
