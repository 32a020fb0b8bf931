use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Patch => write!(f, "PATCH"),
        }
    }
}

/// An authenticated user or service principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: String,
    /// Display name
    pub name: String,
}

/// The HTTP request behind an execution context.
///
/// This type holds simple, owned data so it does not couple to any specific
/// framework's request type. Framework integrations fill it with the
/// builder-style setters.
///
/// # Examples
///
/// ```
/// use gateway_core::{HttpMethod, HttpRequest, Principal};
/// use serde_json::json;
///
/// let mut req = HttpRequest::new("req-12345", HttpMethod::Post, "/orders");
/// req.add_header("x-tenant", "acme");
/// req.set_body(json!({ "sku": "A-1" }));
/// req.set_principal(Some(Principal {
///     id: "user-1".to_string(),
///     name: "Alice".to_string(),
/// }));
///
/// assert_eq!(req.header("X-Tenant"), Some("acme"));
/// assert_eq!(req.body()["sku"], "A-1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRequest {
    request_id: String,
    method: HttpMethod,
    path: String,
    /// Header names are stored lowercased
    headers: HashMap<String, String>,
    query: HashMap<String, String>,
    params: HashMap<String, String>,
    body: Value,
    principal: Option<Principal>,
}

impl HttpRequest {
    /// Creates a request with an empty body and no headers or parameters.
    pub fn new(request_id: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            method,
            path: path.into(),
            headers: HashMap::new(),
            query: HashMap::new(),
            params: HashMap::new(),
            body: Value::Null,
            principal: None,
        }
    }

    /// Sets the authenticated principal, usually from auth middleware.
    pub fn set_principal(&mut self, principal: Option<Principal>) {
        self.principal = principal;
    }

    /// Adds a header. Names are case-insensitive.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Adds a query parameter.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.insert(key.into(), value.into());
    }

    /// Adds a route parameter.
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Replaces the JSON body.
    pub fn set_body(&mut self, body: Value) {
        self.body = body;
    }

    /// Returns the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the query parameters.
    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    /// Returns the route parameters.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Returns the JSON body (`null` when none was set).
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Returns the principal, if present.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}
