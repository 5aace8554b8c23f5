//! Owned files: list synchronization and single-file actions.

pub mod actions;
pub mod download;
pub mod list;

pub use actions::FileActionService;
pub use download::{DirectorySink, DownloadSink};
pub use list::FileListService;
