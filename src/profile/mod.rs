// src/profile/mod.rs
pub mod models;

// Re-export the record types for convenience
pub use models::{Certification, Contact, DateRange, Education, Experience, ProfileRecord, PRESENT};
