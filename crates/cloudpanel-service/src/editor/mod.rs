//! Code editor documents.

pub mod service;

pub use service::EditorService;
