// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for brain-client
//!
//! Callers branch on the variant, never on the message text. HTTP failures
//! carry an [`ApiError`] envelope with enough of the exchange to diagnose
//! them; transport failures are passed through from reqwest untouched.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::{Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::endpoint::Endpoint;

/// Key under which an unstructured 400 body is recorded.
pub const GENERIC_PROBLEM_KEY: &str = "base";

pub type Result<T> = std::result::Result<T, Error>;

/// The request/response envelope of a failed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub request_body: String,
    pub response_body: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} returned {}", self.method, self.url, self.status)?;
        let body = self.response_body.trim();
        if !body.is_empty() {
            write!(f, ": {}", body)?;
        }
        Ok(())
    }
}

/// Errors returned by the client
#[derive(Error, Debug)]
pub enum Error {
    /// A resource name lacked a component that could not be defaulted
    #[error("name is not fully specified: missing {field}")]
    NotFullySpecified { field: &'static str },

    /// Account defaulting was attempted but no usable default exists
    #[error("no default account could be determined; specify one explicitly")]
    NoDefaultAccount,

    /// An authenticated request was attempted before authenticating
    #[error("no authenticated session; log in first")]
    NoAuthSession,

    /// A request value was run a second time
    #[error("request has already been run")]
    RequestAlreadyRun,

    /// A plain-http request was attempted without opting in to insecure mode
    #[error("refusing to send request over insecure connection to {url}")]
    InsecureConnection { url: String },

    /// Token authentication was attempted with a blank token
    #[error("empty authentication token")]
    EmptyToken,

    /// A resource name could not be parsed or has no usable object name
    #[error("bad name: {0}")]
    BadName(String),

    /// The request targets an endpoint with no base URL
    #[error("endpoint {0} is not configured")]
    EndpointNotConfigured(Endpoint),

    /// The path template or its arguments are malformed
    #[error("bad path template: {0}")]
    PathTemplate(String),

    /// A request body could not be form-encoded
    #[error("cannot form-encode request body: {0}")]
    FormEncoding(String),

    /// HTTP 400, with the per-field problems reported by the service
    #[error("bad request: {api}")]
    BadRequest {
        api: Box<ApiError>,
        problems: BTreeMap<String, Vec<String>>,
    },

    /// HTTP 401
    #[error("not authorized: {0}")]
    NotAuthorized(Box<ApiError>),

    /// HTTP 403
    #[error("forbidden: {0}")]
    Forbidden(Box<ApiError>),

    /// HTTP 404
    #[error("not found: {0}")]
    NotFound(Box<ApiError>),

    /// HTTP 500
    #[error("internal server error: {0}")]
    InternalServer(Box<ApiError>),

    /// HTTP 503
    #[error("service unavailable: {0}")]
    ServiceUnavailable(Box<ApiError>),

    /// Any other non-2xx status
    #[error("unexpected status: {0}")]
    UnknownStatus(Box<ApiError>),

    /// DNS, connection and TLS failures from the HTTP layer
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request URL could not be assembled
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// The HTTP envelope, for errors produced by a non-2xx response.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::BadRequest { api, .. }
            | Error::NotAuthorized(api)
            | Error::Forbidden(api)
            | Error::NotFound(api)
            | Error::InternalServer(api)
            | Error::ServiceUnavailable(api)
            | Error::UnknownStatus(api) => Some(api.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn api_mut(&mut self) -> Option<&mut ApiError> {
        match self {
            Error::BadRequest { api, .. }
            | Error::NotAuthorized(api)
            | Error::Forbidden(api)
            | Error::NotFound(api)
            | Error::InternalServer(api)
            | Error::ServiceUnavailable(api)
            | Error::UnknownStatus(api) => Some(api.as_mut()),
            _ => None,
        }
    }

    /// Status code of a non-2xx response.
    pub fn status(&self) -> Option<StatusCode> {
        self.api().map(|api| api.status)
    }

    /// True for failures below HTTP (no response was received).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Turn a non-2xx exchange into the matching error variant.
pub(crate) fn classify(api: ApiError) -> Error {
    let status = api.status;
    let api = Box::new(api);
    match status {
        StatusCode::BAD_REQUEST => {
            let problems = parse_problems(&api.response_body);
            Error::BadRequest { api, problems }
        }
        StatusCode::UNAUTHORIZED => Error::NotAuthorized(api),
        StatusCode::FORBIDDEN => Error::Forbidden(api),
        StatusCode::NOT_FOUND => Error::NotFound(api),
        StatusCode::INTERNAL_SERVER_ERROR => Error::InternalServer(api),
        StatusCode::SERVICE_UNAVAILABLE => Error::ServiceUnavailable(api),
        _ => Error::UnknownStatus(api),
    }
}

/// Parse a `{"field": ["problem", ...]}` body. Anything else becomes a
/// single problem holding the whole body.
fn parse_problems(body: &str) -> BTreeMap<String, Vec<String>> {
    match serde_json::from_str::<BTreeMap<String, Vec<String>>>(body) {
        Ok(problems) => problems,
        Err(_) => BTreeMap::from([(GENERIC_PROBLEM_KEY.to_string(), vec![body.to_string()])]),
    }
}
