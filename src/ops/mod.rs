pub mod dashboard;
pub mod search;
pub mod stats;
