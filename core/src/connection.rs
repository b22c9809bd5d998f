//! Shared request executor.
//!
//! # Design
//! `Connection` is the single place where requests meet the network. It
//! stamps the token and JSON headers onto a request built by a resource,
//! sends it through the configured [`Transport`], maps the status to an
//! [`ApiError`] and parses the body. It keeps no state between calls, so two
//! identical calls always produce two identical requests.

use log::{debug, trace, warn};
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone)]
pub struct Connection<T> {
    config: Config,
    transport: T,
}

impl<T: Transport> Connection<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Add authentication and content negotiation headers.
    pub fn prepare(&self, mut request: HttpRequest) -> HttpRequest {
        request.headers.push((
            "authorization".to_string(),
            format!("Token token=\"{}\"", self.config.token()),
        ));
        request
            .headers
            .push(("accept".to_string(), "application/json".to_string()));
        if request.body.is_some() {
            request
                .headers
                .push(("content-type".to_string(), "application/json".to_string()));
        }
        request
    }

    /// Send one request and return the parsed JSON body.
    ///
    /// A successful response with an empty body yields `Value::Null`.
    pub fn execute(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let request = self.prepare(request);
        debug!("{} {} query={:?}", request.method, request.url, request.query);
        if let Some(body) = &request.body {
            trace!("request body: {body}");
        }

        let response = self.transport.send(&request)?;
        debug!("{} {} -> {}", request.method, request.url, response.status);
        parse_response(response)
    }
}

/// Map non-success status codes to errors and parse the body of the rest.
pub(crate) fn parse_response(response: HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        warn!("request failed with HTTP {}", response.status);
        return Err(match response.status {
            404 => ApiError::NotFound,
            401 | 403 => ApiError::Unauthorized {
                status: response.status,
                body: response.body,
            },
            status => ApiError::HttpError {
                status,
                body: response.body,
            },
        });
    }
    trace!("response body: {}", response.body);
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
