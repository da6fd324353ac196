//! Filesystem collaborators: directory scanning and file transfer
//!
//! The tag index never reads file contents. It only needs to list what is in
//! a folder and, for tag-driven bulk operations, to copy or move files. Both
//! capabilities sit behind traits so commands can be driven by test doubles.

mod error;
mod mover;
mod scanner;
mod traits;

pub use error::ScanError;
pub use mover::FsMover;
pub use scanner::{DirScanner, case_variants, title_case};
pub use traits::{EntryScanner, FileMover, ScanEntry};
