//! # cloudpanel-core
//!
//! Core crate for CloudPanel. Contains configuration schemas, typed
//! identifiers, the localized message catalog, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CloudPanel crates.

pub mod config;
pub mod error;
pub mod i18n;
pub mod result;
pub mod types;

pub use error::AppError;
pub use i18n::{Locale, Message};
pub use result::AppResult;
