// src/types/mod.rs
pub mod criteria;
pub mod job_posting;

pub use criteria::{DatePosted, FilterCriteria, Predicate};
pub use job_posting::{decode_postings, JobPosting};
