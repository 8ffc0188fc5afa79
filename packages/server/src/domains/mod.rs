// Business domains
pub mod search;
