//! Synchronous client binding for the AvaTax v2 REST API.
//!
//! # Overview
//! Covers batches, contacts and subscriptions. Every client method maps to
//! exactly one REST endpoint: it substitutes identifiers into a path
//! template, attaches query options or a JSON body, and sends the request
//! through an injected `Transport`. Responses come back decoded and
//! otherwise unchanged.
//!
//! # Design
//! - `AvaTaxClient` is stateless apart from its base URL, default headers
//!   and the transport it owns.
//! - Each operation is described by an `Endpoint` constant; the resource
//!   modules are thin method tables over those constants.
//! - `build_request*` and `parse_*` are public, so a host can run the HTTP
//!   round-trip itself instead of implementing `Transport`.
//! - No retries and no local validation beyond template substitution.

pub mod batches;
pub mod client;
pub mod config;
pub mod contacts;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod options;
pub mod subscriptions;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::{parse_error_details, parse_file_result, parse_json, AvaTaxClient};
pub use config::{ClientConfig, Environment};
pub use endpoint::Endpoint;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use options::{FetchOptions, QueryKey};
pub use types::{
    BatchFileModel, BatchModel, ContactModel, ErrorDetail, ErrorInfo, ErrorResult, FetchResult,
    FileResult, SubscriptionModel,
};
