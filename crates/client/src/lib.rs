//! Client side of the remote theme API.
//!
//! [`ThemeApi`] is the seam the CLI operations are written against;
//! [`ThemeClient`] is the HTTP implementation used by the `themectl` binary.

pub mod api;
pub mod http;

mod error;
pub use error::ApiError;

pub use api::{AssetEntry, AssetPage, ThemeApi};
pub use http::ThemeClient;
