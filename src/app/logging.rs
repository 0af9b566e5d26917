//! Progress logging utilities.

use log::info;
use std::sync::atomic::Ordering;

use crate::crawler::CrawlCounters;

/// Logs progress information about the running crawl.
///
/// # Arguments
///
/// * `start_time` - The start time of the crawl
/// * `counters` - Live crawl counters (processed, in-flight, queued)
pub fn log_progress(start_time: std::time::Instant, counters: &CrawlCounters) {
    let elapsed = start_time.elapsed();
    let processed = counters.processed.load(Ordering::SeqCst);
    let in_flight = counters.in_flight.load(Ordering::SeqCst);
    let queued = counters.queued.load(Ordering::SeqCst);
    let sightings = counters.sightings.load(Ordering::SeqCst);
    let elapsed_secs = elapsed.as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Fetched {} URLs in {:.2} seconds (~{:.2} URLs/sec, {} in flight, {} queued, {} certificates seen)",
        processed, elapsed_secs, rate, in_flight, queued, sightings
    );
}
