// src/extractors/mod.rs
pub mod entry;
pub mod fields;
pub mod profile;
pub mod section;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use entry::{split_entries, Entry, EntryKind};
pub use profile::ProfileParser;
#[allow(unused_imports)]
pub use section::{Section, SectionMap, SectionSegmenter};
