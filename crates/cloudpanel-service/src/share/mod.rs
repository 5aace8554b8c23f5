//! Outbound sharing and the shared-with-me inbox.

pub mod inbox;
pub mod workflow;

pub use inbox::SharedInboxService;
pub use workflow::{ShareOutcome, ShareState, ShareWorkflow};
