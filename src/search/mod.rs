// src/search/mod.rs
//! Client-side job search: debounce, merge, filter, sort

pub mod debouncer;
pub mod filter;
pub mod merger;
pub mod persistence;
pub mod pipeline;
pub mod sorter;

pub use debouncer::{DebounceState, SearchDebouncer, DEFAULT_DEBOUNCE_DELAY};
pub use persistence::{forward_search_terms, record_search_term, LogOnlySink, SearchTermSink};
pub use pipeline::{JobSearchPipeline, SearchResults};
