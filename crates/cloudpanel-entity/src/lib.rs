//! # cloudpanel-entity
//!
//! View-models for CloudPanel. Every struct in this crate is rebuilt from the
//! latest server response on each render pass and discarded afterwards;
//! nothing here is cached or mutated in place.

pub mod coalesce;
pub mod editor;
pub mod file;
pub mod share;
pub mod storage;
pub mod user;

pub use editor::{CodeDocument, DocumentSource};
pub use file::FileRecord;
pub use share::{CreatedShare, ShareOutcomeBody, ShareRecord, ShareStatus, SkippedShare};
pub use storage::{QuotaInfo, QuotaView, StorageInfo};
pub use user::UserMatch;
