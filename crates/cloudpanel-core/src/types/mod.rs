//! Core type definitions used across the CloudPanel workspace.

pub mod id;

pub use id::*;
