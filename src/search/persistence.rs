// src/search/persistence.rs
//! Hand-off of debounced search terms to the search-log endpoint

use anyhow::Result;
use std::future::Future;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

/// Destination for debounced search terms
pub trait SearchTermSink: Send + Sync + 'static {
    fn record(&self, term: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Sink that only writes the term to the application log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlySink;

impl SearchTermSink for LogOnlySink {
    async fn record(&self, term: &str) -> Result<()> {
        info!(term, "Search term recorded");
        Ok(())
    }
}

/// Record one term. Blank terms are skipped and sink failures are logged,
/// never returned. Returns whether the sink accepted the term.
pub async fn record_search_term<S: SearchTermSink>(sink: &S, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return false;
    }

    match sink.record(term).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to record search term {:?}: {:#}", term, e);
            false
        }
    }
}

/// Drain debounced terms into `sink` until the channel closes.
/// Returns how many terms were recorded.
pub async fn forward_search_terms<S: SearchTermSink>(
    mut terms: UnboundedReceiver<String>,
    sink: &S,
) -> usize {
    let mut recorded = 0;
    while let Some(term) = terms.recv().await {
        if record_search_term(sink, &term).await {
            recorded += 1;
        }
    }
    recorded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct MemorySink {
        terms: Mutex<Vec<String>>,
    }

    impl SearchTermSink for MemorySink {
        async fn record(&self, term: &str) -> Result<()> {
            if term == "boom" {
                anyhow::bail!("search-log endpoint unavailable");
            }
            self.terms.lock().unwrap().push(term.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_forward_skips_blank_and_swallows_failures() {
        let (tx, rx) = mpsc::unbounded_channel();
        for term in ["rust", "   ", "boom", " tokio "] {
            tx.send(term.to_string()).unwrap();
        }
        drop(tx);

        let sink = MemorySink::default();
        let recorded = forward_search_terms(rx, &sink).await;

        assert_eq!(recorded, 2);
        assert_eq!(*sink.terms.lock().unwrap(), vec!["rust", "tokio"]);
    }

    #[tokio::test]
    async fn test_log_only_sink_accepts_terms() {
        assert!(record_search_term(&LogOnlySink, "engineer").await);
        assert!(!record_search_term(&LogOnlySink, "").await);
    }
}
