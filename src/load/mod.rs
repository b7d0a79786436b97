//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_from_source`] (from [`unified`]) which:
//!
//! - reads a local path, or downloads an `http(s)://` URL (feature `http`)
//! - infers the format from the file extension (or you can force one via [`LoadOptions`])
//! - reads the source into an in-memory [`crate::types::Table`] with header-derived columns
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (requires the `excel` feature)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod header;
#[cfg(feature = "http")]
pub mod http;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
#[cfg(feature = "http")]
pub use unified::load_from_url_with_client;
pub use unified::{
    is_url, load_from_path, load_from_source, load_from_url, LoadOptions, LoadRequest,
    SheetSelection, SourceFormat,
};
