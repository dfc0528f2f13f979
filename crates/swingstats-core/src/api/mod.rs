//! HTTP client module for the WSDC points registry.
//!
//! This module provides the `ApiClient` for looking up a dancer's
//! placement history by WSDC id. The lookup endpoint is public and
//! takes a single form field, `q`, holding the numeric id.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
