// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Building and running requests
//!
//! A [`Request`] is built from a method, an [`Endpoint`], a path template
//! and its arguments. Building never touches the network. Running sends the
//! request exactly once: a second [`Request::run`] fails with
//! [`Error::RequestAlreadyRun`] instead of re-sending.
//!
//! Path templates use `{}` placeholders. Each is replaced by the next
//! argument, percent-escaped as a single path component:
//!
//! ```ignore
//! let mut req = client.build_request(
//!     Method::GET,
//!     Endpoint::Brain,
//!     "/accounts/{}/groups/{}?view=overview",
//!     &["acme", "default"],
//! )?;
//! let group: serde_json::Value = req.run_json(None).await?;
//! ```

use std::borrow::Cow;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;
use zeroize::Zeroize;

use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::error::{self, ApiError, Error, Result};
use crate::names::escape_component;

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// A successful response.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Response {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// A pending request, bound to the client that built it.
#[derive(Debug)]
pub struct Request<'a> {
    client: &'a Client,
    method: Method,
    endpoint: Endpoint,
    url: Url,
    requires_auth: bool,
    has_run: bool,
}

impl Client {
    /// Build a request that carries the session token.
    pub fn build_request(
        &self,
        method: Method,
        endpoint: Endpoint,
        template: &str,
        args: &[&str],
    ) -> Result<Request<'_>> {
        self.new_request(method, endpoint, template, args, true)
    }

    /// Build a request that is sent without credentials.
    pub fn build_request_no_auth(
        &self,
        method: Method,
        endpoint: Endpoint,
        template: &str,
        args: &[&str],
    ) -> Result<Request<'_>> {
        self.new_request(method, endpoint, template, args, false)
    }

    fn new_request(
        &self,
        method: Method,
        endpoint: Endpoint,
        template: &str,
        args: &[&str],
        requires_auth: bool,
    ) -> Result<Request<'_>> {
        let path = format_path(template, args)?;
        let base = self
            .config()
            .endpoints
            .get(endpoint)
            .ok_or(Error::EndpointNotConfigured(endpoint))?;
        let url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), path))?;

        Ok(Request {
            client: self,
            method,
            endpoint,
            url,
            requires_auth,
            has_run: false,
        })
    }
}

impl Request<'_> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Send the request and return the raw response.
    ///
    /// Non-2xx statuses come back as the matching [`Error`] variant.
    pub async fn run(&mut self, body: Option<&Value>) -> Result<Response> {
        if self.has_run {
            return Err(Error::RequestAlreadyRun);
        }
        self.has_run = true;

        if self.url.scheme() == "http" && !self.client.config().allow_insecure {
            return Err(Error::InsecureConnection {
                url: self.url.to_string(),
            });
        }

        let (mut request_body, content_type) = match body {
            Some(value) if self.endpoint.uses_form_encoding() => (form_encode(value)?, FORM),
            Some(value) => (serde_json::to_string(value)?, JSON),
            None if self.endpoint.uses_form_encoding() => (String::new(), FORM),
            None => (String::new(), JSON),
        };

        let mut builder = self
            .client
            .http()
            .request(self.method.clone(), self.url.clone())
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, content_type);

        if self.requires_auth {
            let token = self.client.auth_token();
            if token.is_empty() {
                return Err(Error::NoAuthSession);
            }
            builder = builder.header(AUTHORIZATION, self.endpoint.authorization_header(&token));
        }

        if body.is_some() {
            builder = builder.body(request_body.clone());
        }

        debug!(method = %self.method, url = %self.url, endpoint = %self.endpoint, "sending request");
        let response = builder.send().await?;
        let status = response.status();
        let response_body = response.bytes().await?.to_vec();

        if status.is_success() {
            request_body.zeroize();
            debug!(status = status.as_u16(), url = %self.url, "request succeeded");
            return Ok(Response {
                status,
                body: response_body,
            });
        }

        debug!(status = status.as_u16(), url = %self.url, "request failed");
        Err(error::classify(ApiError {
            method: self.method.clone(),
            url: self.url.clone(),
            status,
            request_body,
            response_body: String::from_utf8_lossy(&response_body).into_owned(),
        }))
    }

    /// Send the request and decode a JSON response body.
    pub async fn run_json<T: DeserializeOwned>(&mut self, body: Option<&Value>) -> Result<T> {
        self.run(body).await?.json()
    }
}

/// Substitute escaped `args` into the `{}` placeholders of `template`.
pub(crate) fn format_path(template: &str, args: &[&str]) -> Result<String> {
    let mut path = String::with_capacity(template.len());
    let mut args_iter = args.iter();
    let mut rest = template;

    while let Some(idx) = rest.find("{}") {
        path.push_str(&rest[..idx]);
        let arg = args_iter.next().ok_or_else(|| {
            Error::PathTemplate(format!(
                "{:?} has more placeholders than the {} argument(s) given",
                template,
                args.len()
            ))
        })?;
        path.push_str(&escape_component(arg)?);
        rest = &rest[idx + 2..];
    }
    path.push_str(rest);

    if args_iter.next().is_some() {
        return Err(Error::PathTemplate(format!(
            "{:?} has fewer placeholders than the {} argument(s) given",
            template,
            args.len()
        )));
    }
    if !path.starts_with('/') {
        return Err(Error::PathTemplate(format!(
            "path {:?} does not start with '/'",
            path
        )));
    }
    Ok(path)
}

/// Flatten a JSON object into `application/x-www-form-urlencoded` pairs.
fn form_encode(value: &Value) -> Result<String> {
    let Value::Object(fields) = value else {
        return Err(Error::FormEncoding(format!(
            "expected an object, got {}",
            value
        )));
    };

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, field) in fields {
        match field {
            Value::Null => {}
            Value::String(s) => {
                serializer.append_pair(key, s);
            }
            Value::Bool(_) | Value::Number(_) => {
                serializer.append_pair(key, &field.to_string());
            }
            Value::Array(_) | Value::Object(_) => {
                return Err(Error::FormEncoding(format!("field {:?} is not a scalar", key)));
            }
        }
    }
    Ok(serializer.finish())
}
