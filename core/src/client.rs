//! Request builder, response parser and transport-bound client for the
//! Foundation API.
//!
//! # Design
//! `FoundationClient` holds only a `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`, so the I/O boundary stays explicit and the core stays
//! deterministic. `ApiClient` pairs a `FoundationClient` with a `Transport`
//! for callers that just want the result.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::format::{format_configuration, format_value};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{ConfigurationBlob, EnvironmentMap, VariableQuery, VariableResult};

pub const ENVIRONMENT_PATH: &str = "/v1/environment";
pub const CONFIGURATION_PATH: &str = "/v1/configuration";
pub const VARIABLE_PATH: &str = "/v1/variable";

/// A request relative to the configured base URL.
///
/// `headers` override the client defaults key by key, ignoring case.
#[derive(Debug, Clone)]
pub struct OutboundRequest<'a, D: Serialize = ()> {
    pub method: HttpMethod,
    pub url: &'a str,
    pub headers: Vec<(&'a str, &'a str)>,
    pub data: Option<D>,
}

impl<'a> OutboundRequest<'a> {
    /// A request without a payload.
    pub fn new(method: HttpMethod, url: &'a str) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            data: None,
        }
    }
}

impl<'a, D: Serialize> OutboundRequest<'a, D> {
    /// A request carrying `data` as its JSON body.
    pub fn with_data(method: HttpMethod, url: &'a str, data: D) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            data: Some(data),
        }
    }

    pub fn header(mut self, name: &'a str, value: &'a str) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct FoundationClient {
    config: ClientConfig,
}

impl FoundationClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve, merge headers and serialize `request` into an `HttpRequest`.
    ///
    /// The URL is resolved against the base with RFC 3986 reference
    /// resolution, so an absolute `request.url` replaces the base entirely
    /// and a leading `/` replaces the base path.
    pub fn build_request<D: Serialize>(&self, request: &OutboundRequest<'_, D>) -> Result<HttpRequest, ApiError> {
        let base = self.config.parsed_base_url()?;
        let url = base
            .join(request.url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", request.url)))?;

        let body = match &request.data {
            Some(data) => {
                Some(serde_json::to_string(data).map_err(|e| ApiError::SerializationError(e.to_string()))?)
            }
            None => None,
        };

        let mut headers: BTreeMap<String, String> = self.config.default_headers().clone();
        for (name, value) in &request.headers {
            let name = name.to_ascii_lowercase();
            trace!(header = %name, "applying request header");
            headers.insert(name, (*value).to_string());
        }

        Ok(HttpRequest {
            method: request.method,
            url: url.into(),
            headers: headers.into_iter().collect(),
            body,
        })
    }

    pub fn build_get_environment(&self) -> Result<HttpRequest, ApiError> {
        self.build_request(&OutboundRequest::new(HttpMethod::Get, ENVIRONMENT_PATH))
    }

    pub fn build_get_configuration(&self) -> Result<HttpRequest, ApiError> {
        self.build_request(&OutboundRequest::new(HttpMethod::Get, CONFIGURATION_PATH))
    }

    /// Build `POST /v1/variable`. An empty `uid` is treated as absent.
    pub fn build_get_variable(&self, name: &str, uid: Option<&str>) -> Result<HttpRequest, ApiError> {
        if name.is_empty() {
            return Err(ApiError::InvalidArgument("variable name must not be empty".to_string()));
        }
        let query = VariableQuery {
            name: name.to_string(),
            uid: uid.filter(|u| !u.is_empty()).map(str::to_string),
        };
        let request = OutboundRequest::with_data(HttpMethod::Post, VARIABLE_PATH, query)
            .header("content-type", "application/json");
        self.build_request(&request)
    }

    pub fn parse_get_environment(&self, response: HttpResponse) -> Result<EnvironmentMap, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    /// Parse the configuration blob and resolve it to display text.
    pub fn parse_get_configuration(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 200)?;
        let blob: ConfigurationBlob = decode(&response)?;
        debug!(mime_type = %blob.mime_type, "decoded configuration");
        format_configuration(blob)
    }

    /// Parse the variable and indent its value when it is an object.
    pub fn parse_get_variable(&self, response: HttpResponse) -> Result<VariableResult, ApiError> {
        check_status(&response, 200)?;
        let result: VariableResult = decode(&response)?;
        Ok(VariableResult {
            value: format_value(result.value)?,
            name: result.name,
        })
    }
}

/// Map any status other than `expected` to `RequestFailed`, keeping the body.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::RequestFailed {
        status: response.status,
        body: response.body_text(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body).map_err(|e| ApiError::DecodeError(e.to_string()))
}

/// A `FoundationClient` bound to a `Transport`: one call per operation.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    client: FoundationClient,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: FoundationClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &FoundationClient {
        &self.client
    }

    /// Fetch the environment map.
    pub fn get_environment(&self) -> Result<EnvironmentMap, ApiError> {
        let request = self.client.build_get_environment()?;
        let response = self.transport.execute(&request)?;
        self.client.parse_get_environment(response)
    }

    /// Fetch the configuration as display text.
    pub fn get_configuration(&self) -> Result<String, ApiError> {
        let request = self.client.build_get_configuration()?;
        let response = self.transport.execute(&request)?;
        self.client.parse_get_configuration(response)
    }

    /// Fetch one variable's formatted value.
    pub fn get_variable(&self, name: &str, uid: Option<&str>) -> Result<Value, ApiError> {
        let request = self.client.build_get_variable(name, uid)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_get_variable(response).map(|result| result.value)
    }
}
