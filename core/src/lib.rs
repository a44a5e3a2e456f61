//! Synchronous client core for the Foundation configuration API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. A `Transport` (by default `UreqTransport`) executes
//! the round-trip; `ApiClient` ties the two together.
//!
//! # Design
//! - `FoundationClient` is stateless: it holds only a `ClientConfig`.
//! - Each operation is split into `build_*` and `parse_*` so the I/O boundary
//!   is explicit.
//! - Transports return every response as data; status policy lives in the
//!   client's `parse_*` methods only.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod types;

pub use client::{ApiClient, FoundationClient, OutboundRequest};
pub use config::{ClientConfig, API_KEY_HEADER, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use format::render;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{ConfigurationBlob, EnvironmentMap, VariableQuery, VariableResult};
