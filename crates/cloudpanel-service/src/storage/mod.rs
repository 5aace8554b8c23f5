//! Storage quota display.

pub mod quota;

pub use quota::QuotaService;
