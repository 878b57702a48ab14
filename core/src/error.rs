//! Error types for the AvaTax client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the service rejected the call."
//! Non-2xx responses carrying the AvaTax `{"error": ...}` envelope become
//! `ServiceError`; anything else lands in `HttpError` with the raw status and
//! body. Transport failures keep their original error as the source.
//!
//! Soft-delete warnings are not errors: delete operations return them as a
//! `Vec<ErrorDetail>` on success.

use thiserror::Error;

use crate::http::TransportError;
use crate::types::ErrorInfo;

/// Errors returned by `AvaTaxClient` operations and the `parse_*` functions.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested object does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status with an AvaTax error envelope.
    #[error("service error (HTTP {status}): {error}")]
    ServiceError { status: u16, error: ErrorInfo },

    /// The server returned a non-2xx status the client could not interpret.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The transport failed before a response was received.
    #[error("transport failed: {0}")]
    TransportError(#[source] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The number of path parameters did not match the endpoint template.
    #[error("template {template} takes {expected} path parameters, got {supplied}")]
    PathTemplate {
        template: &'static str,
        expected: usize,
        supplied: usize,
    },
}

/// Errors raised while loading `ClientConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown AvaTax environment: {0}")]
    UnknownEnvironment(String),

    #[error("base URL must be an absolute http(s) URL: {0:?}")]
    InvalidBaseUrl(String),
}
