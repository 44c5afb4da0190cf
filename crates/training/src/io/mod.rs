//! Reading corpora and reading/writing merge-rule files.
//!
//! Merge rules are stored as a flat text file: a version header followed by
//! one `first second` line per merge, in learned order.

pub mod corpus;
pub mod format;
pub mod load;
pub mod save;

pub use corpus::{read_corpus, read_lines_into, InputMode};
pub use format::{MergesVersion, MERGES_VERSION};
pub use load::MergesLoader;
pub use save::{MergesSaver, WordCountSaver};
