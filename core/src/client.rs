//! The AvaTax client: request building, dispatch and response parsing.
//!
//! # Design
//! `AvaTaxClient` holds a base URL, the default headers and an injected
//! `Transport`; it carries no mutable state between calls. Every resource
//! method is the same three steps: build an `HttpRequest` from an
//! `Endpoint`, hand it to the transport, parse the `HttpResponse`. The build
//! and parse halves are public so a host that prefers to run the I/O itself
//! can skip the transport entirely.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::config::{ClientConfig, CLIENT_HEADER};
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::options::FetchOptions;
use crate::types::{ErrorDetail, ErrorResult, FileResult};

/// Client for the AvaTax v2 REST API over a caller-supplied transport.
#[derive(Debug, Clone)]
pub struct AvaTaxClient<T> {
    base_url: String,
    default_headers: Vec<(String, String)>,
    transport: T,
}

impl<T> AvaTaxClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: Vec::new(),
            transport,
        }
    }

    pub fn with_config(config: &ClientConfig, transport: T) -> Self {
        let mut client = Self::new(&config.base_url, transport);
        if let Some(value) = config.client_header() {
            client.default_headers.push((CLIENT_HEADER.to_string(), value));
        }
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a body-less request for `endpoint`.
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
        params: &[i32],
        options: Option<&FetchOptions>,
    ) -> Result<HttpRequest, ApiError> {
        let path = endpoint.path(params)?;
        let query = options
            .map(|options| options.to_query(endpoint.query))
            .unwrap_or_default();
        Ok(HttpRequest {
            method: endpoint.method,
            url: format!("{}{path}", self.base_url),
            query,
            headers: self.default_headers.clone(),
            body: None,
        })
    }

    /// Build a request for `endpoint` carrying `body` as JSON.
    pub fn build_request_with_body<B>(
        &self,
        endpoint: &Endpoint,
        params: &[i32],
        body: &B,
    ) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut request = self.build_request(endpoint, params, None)?;
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }
}

impl<T: Transport> AvaTaxClient<T> {
    /// Send one request through the transport.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, query = ?request.query, "sending request");

        let response = self
            .transport
            .execute(request)
            .map_err(ApiError::TransportError)?;

        if response.is_success() {
            debug!(%method, %url, status = response.status, "request succeeded");
        } else {
            warn!(%method, %url, status = response.status, "request failed");
        }
        Ok(response)
    }

    /// `execute` inside a span naming the endpoint.
    fn call(&self, endpoint: &Endpoint, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let _span = debug_span!("call", endpoint = endpoint.name).entered();
        self.execute(request)
    }

    pub(crate) fn fetch<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &[i32],
        options: Option<&FetchOptions>,
    ) -> Result<R, ApiError> {
        let request = self.build_request(endpoint, params, options)?;
        parse_json(self.call(endpoint, request)?)
    }

    pub(crate) fn send<B, R>(&self, endpoint: &Endpoint, params: &[i32], body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request_with_body(endpoint, params, body)?;
        parse_json(self.call(endpoint, request)?)
    }

    pub(crate) fn remove(&self, endpoint: &Endpoint, params: &[i32]) -> Result<Vec<ErrorDetail>, ApiError> {
        let request = self.build_request(endpoint, params, None)?;
        parse_error_details(self.call(endpoint, request)?)
    }

    pub(crate) fn download(&self, endpoint: &Endpoint, params: &[i32]) -> Result<FileResult, ApiError> {
        let request = self.build_request(endpoint, params, None)?;
        parse_file_result(self.call(endpoint, request)?)
    }
}

/// Decode a JSON response body.
///
/// An empty body decodes as JSON `null`, so `Vec` and `Option` targets come
/// back empty rather than failing.
pub fn parse_json<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    check_status(&response)?;
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };
    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(e) => Err(ApiError::DeserializationError(e.to_string())),
    }
}

/// Decode the warnings returned by a delete. Never yields `null`: an empty
/// or `null` body is an empty list.
pub fn parse_error_details(response: HttpResponse) -> Result<Vec<ErrorDetail>, ApiError> {
    let details: Option<Vec<ErrorDetail>> = parse_json(response)?;
    Ok(details.unwrap_or_default())
}

/// Wrap a raw attachment response.
pub fn parse_file_result(response: HttpResponse) -> Result<FileResult, ApiError> {
    check_status(&response)?;
    Ok(FileResult {
        name: response.header("content-disposition").and_then(disposition_filename),
        content_type: response.header("content-type").map(str::to_string),
        data: response.body,
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    if let Ok(envelope) = serde_json::from_slice::<ErrorResult>(&response.body) {
        return Err(ApiError::ServiceError {
            status: response.status,
            error: envelope.error,
        });
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.text(),
    })
}

/// `attachment; filename="report.csv"` -> `report.csv`
fn disposition_filename(value: &str) -> Option<String> {
    value.split(';').find_map(|part| {
        let (key, raw) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = raw.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}
