pub mod file_ops;
pub mod stats;
pub mod substitute;

pub use file_ops::{atomic_write, backup_file, copy_file, rewrite_file};
pub use stats::Stats;
pub use substitute::{apply_map, apply_to_lines, Substituter, Substitution};
