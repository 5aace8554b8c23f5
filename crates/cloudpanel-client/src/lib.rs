//! # cloudpanel-client
//!
//! Typed access to the cloud-storage REST surface. The [`CloudApi`] trait is
//! the seam the panel controllers depend on; [`HttpCloudApi`] implements it
//! over `reqwest`.

pub mod api;
pub mod csrf;
pub mod disposition;
pub mod error;
pub mod http;

pub use api::{CloudApi, Download, SharedListing, UploadFile, UploadReceipt};
pub use csrf::CsrfStore;
pub use error::{ClientError, ErrorBody};
pub use http::HttpCloudApi;
