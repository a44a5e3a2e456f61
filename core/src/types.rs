//! Wire DTOs for the Foundation API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any drift between the two crates. Values of
//! arbitrary JSON type are kept as `serde_json::Value`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment variables keyed by name, ordered for stable output.
pub type EnvironmentMap = BTreeMap<String, Value>;

/// Body of `GET /v1/configuration`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigurationBlob {
    pub content: String,
    pub mime_type: String,
}

/// Request payload for `POST /v1/variable`. `uid` is omitted when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableQuery {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Body of `POST /v1/variable`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableResult {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}
