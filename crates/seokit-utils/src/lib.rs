pub mod fs;
pub mod tally;
pub mod text;

// Re-export commonly used utilities
pub use fs::{write_if_changed, write_output};
pub use tally::Tally;
pub use text::{Edit, apply_edits};
