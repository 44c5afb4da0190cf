//! CLI commands for bpelearn.

pub mod learn;
pub mod vocab;

pub use learn::LearnCommand;
pub use vocab::VocabCommand;
