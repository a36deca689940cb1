//! Job search core for the job portal: merges the recommended and general job
//! lists, filters them against the user's criteria and orders them for display.

pub mod cli;
pub mod core;
pub mod export;
pub mod logging;
pub mod search;
pub mod types;
pub mod utils;

pub use search::{JobSearchPipeline, SearchDebouncer, SearchResults};
pub use types::{DatePosted, FilterCriteria, JobPosting};
