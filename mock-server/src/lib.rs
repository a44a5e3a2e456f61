//! In-memory stand-in for the Foundation API.
//!
//! Serves a `Fixture` over the three `/v1` endpoints and enforces the
//! `x-api-key` header the same way the hosted service does.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tracing::info;

pub use axum::http::StatusCode;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Configuration {
    pub content: String,
    pub mime_type: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VariableQuery {
    pub name: String,
    pub uid: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: Value,
}

/// Data served by one mock server instance.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub api_key: String,
    pub environment: Map<String, Value>,
    pub configuration: Configuration,
    pub variables: HashMap<String, Value>,
    /// Per-uid values that take precedence over `variables`.
    pub overrides: HashMap<String, HashMap<String, Value>>,
    /// When set, every endpoint answers with this status and body.
    pub failure: Option<(StatusCode, String)>,
}

impl Fixture {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            environment: Map::new(),
            configuration: Configuration {
                content: String::new(),
                mime_type: "text/plain".to_string(),
            },
            variables: HashMap::new(),
            overrides: HashMap::new(),
            failure: None,
        }
    }

    pub fn env(mut self, name: &str, value: Value) -> Self {
        self.environment.insert(name.to_string(), value);
        self
    }

    pub fn configuration(mut self, content: &str, mime_type: &str) -> Self {
        self.configuration = Configuration {
            content: content.to_string(),
            mime_type: mime_type.to_string(),
        };
        self
    }

    pub fn variable(mut self, name: &str, value: Value) -> Self {
        self.variables.insert(name.to_string(), value);
        self
    }

    pub fn override_for(mut self, uid: &str, name: &str, value: Value) -> Self {
        self.overrides
            .entry(uid.to_string())
            .or_default()
            .insert(name.to_string(), value);
        self
    }

    pub fn failing(mut self, status: StatusCode, body: &str) -> Self {
        self.failure = Some((status, body.to_string()));
        self
    }

    fn lookup(&self, query: &VariableQuery) -> Option<&Value> {
        query
            .uid
            .as_deref()
            .and_then(|uid| self.overrides.get(uid))
            .and_then(|vars| vars.get(&query.name))
            .or_else(|| self.variables.get(&query.name))
    }
}

/// A small but representative data set, used by the binary.
impl Default for Fixture {
    fn default() -> Self {
        Fixture::new("test-key")
            .env("REGION", Value::from("us-east-1"))
            .env("DEBUG", Value::from(true))
            .env("MAX_CONNECTIONS", Value::from(32))
            .configuration(r#"{"feature_flags":{"beta":true},"retries":3}"#, "application/json")
            .variable("color", Value::from("blue"))
            .variable("theme", serde_json::json!({"mode": "light", "size": 12}))
            .override_for("user-42", "theme", serde_json::json!({"mode": "dark", "size": 12}))
    }
}

pub type Db = Arc<Fixture>;

pub fn app(fixture: Fixture) -> Router {
    let db: Db = Arc::new(fixture);
    Router::new()
        .route("/v1/environment", get(get_environment))
        .route("/v1/configuration", get(get_configuration))
        .route("/v1/variable", post(get_variable))
        .layer(middleware::from_fn_with_state(db.clone(), guard))
        .with_state(db)
}

pub async fn run(listener: TcpListener, fixture: Fixture) -> Result<(), std::io::Error> {
    axum::serve(listener, app(fixture)).await
}

/// Reject bad API keys, then short-circuit with the forced failure if any.
async fn guard(State(db): State<Db>, headers: HeaderMap, request: Request, next: Next) -> Response {
    info!(method = %request.method(), path = %request.uri().path(), "request");
    let key = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if key != Some(db.api_key.as_str()) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }
    if let Some((status, body)) = &db.failure {
        return (*status, body.clone()).into_response();
    }
    next.run(request).await
}

async fn get_environment(State(db): State<Db>) -> Json<Map<String, Value>> {
    Json(db.environment.clone())
}

async fn get_configuration(State(db): State<Db>) -> Json<Configuration> {
    Json(db.configuration.clone())
}

async fn get_variable(
    State(db): State<Db>,
    Json(query): Json<VariableQuery>,
) -> Result<Json<Variable>, (StatusCode, &'static str)> {
    let value = db
        .lookup(&query)
        .cloned()
        .ok_or((StatusCode::NOT_FOUND, "variable not found"))?;
    Ok(Json(Variable {
        name: query.name,
        value,
    }))
}
