//! Hearth API Library
//!
//! REST wire protocol and HTTP client for the Hearth backend.
//!
//! # Architecture
//!
//! - **Backend**: the trait seam the app layer consumes; everything the
//!   backend can do, one async method per operation
//! - **ApiClient**: reqwest implementation with bearer-token auth
//! - **Protocol**: request/response body types, camelCase JSON
//!
//! A `401` from any endpoint surfaces uniformly as [`hearth_core::Error::Auth`];
//! other non-2xx responses carry the backend's error message when present.

pub mod backend;
pub mod client;
pub mod protocol;

pub use backend::Backend;
pub use client::ApiClient;
