use std::fmt;

use serde_json::Value;

use crate::error::ContextError;
use crate::request::HttpRequest;

/// Call style that produced an execution context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextType {
    /// Plain HTTP controller call
    Http,
    /// Microservice message or event
    Rpc,
    /// GraphQL resolver call
    Graphql,
    /// Any other transport, named by its discriminator
    Other(String),
}

impl ContextType {
    /// Returns the discriminator string.
    pub fn as_str(&self) -> &str {
        match self {
            ContextType::Http => "http",
            ContextType::Rpc => "rpc",
            ContextType::Graphql => "graphql",
            ContextType::Other(name) => name,
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ContextType {
    fn from(s: &str) -> Self {
        match s {
            "http" => ContextType::Http,
            "rpc" => ContextType::Rpc,
            "graphql" => ContextType::Graphql,
            other => ContextType::Other(other.to_string()),
        }
    }
}

/// Arguments of an HTTP controller call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpArguments {
    /// The incoming request
    pub request: HttpRequest,
    /// Response status already chosen by the handler, if any
    pub status: Option<u16>,
}

/// Arguments of a microservice message handler.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcArguments {
    /// Message payload
    pub data: Value,
    /// Message pattern the handler was matched on
    pub pattern: String,
}

/// Per-request context shared by GraphQL resolvers.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlContext {
    /// The HTTP request carrying the operation
    pub req: HttpRequest,
}

/// Arguments of a GraphQL resolver call, in resolver order.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlArguments {
    /// Parent object
    pub root: Value,
    /// Field arguments
    pub args: Value,
    /// Shared per-request context
    pub context: GraphqlContext,
    /// Resolve info (field name, path, ...)
    pub info: Value,
}

/// Framework-agnostic handle on the call being processed.
///
/// Each variant carries the arguments its call style hands to a handler.
/// Matching is exhaustive, so a new call style must be handled everywhere
/// before it compiles.
///
/// # Examples
///
/// ```
/// use gateway_core::{ContextType, ExecutionContext, RpcArguments};
/// use serde_json::json;
///
/// let ctx = ExecutionContext::Rpc(RpcArguments {
///     data: json!({ "orderId": 7 }),
///     pattern: "order.created".to_string(),
/// });
/// assert_eq!(ctx.context_type(), ContextType::Rpc);
///
/// let ws = ExecutionContext::Other("websocket".to_string());
/// assert_eq!(ws.context_type().as_str(), "websocket");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionContext {
    /// HTTP controller call
    Http(HttpArguments),
    /// Microservice message
    Rpc(RpcArguments),
    /// GraphQL resolver call
    Graphql(GraphqlArguments),
    /// Unrecognized call style
    Other(String),
}

impl ExecutionContext {
    /// Returns the call style of this context.
    pub fn context_type(&self) -> ContextType {
        match self {
            ExecutionContext::Http(_) => ContextType::Http,
            ExecutionContext::Rpc(_) => ContextType::Rpc,
            ExecutionContext::Graphql(_) => ContextType::Graphql,
            ExecutionContext::Other(name) => ContextType::Other(name.clone()),
        }
    }
}

/// Converts a framework-specific call into an [`ExecutionContext`].
///
/// Framework integrations implement this for their own handler arguments.
/// It only maps types; it does not authorize or validate anything.
///
/// # Examples
///
/// ```
/// use gateway_core::{resolve_request_from, ExecutionContext, ExtractExecutionContext, RpcArguments};
/// use serde_json::{json, Value};
///
/// struct KafkaMessage {
///     topic: String,
///     value: Value,
/// }
///
/// impl ExtractExecutionContext for KafkaMessage {
///     fn extract_execution_context(&self) -> ExecutionContext {
///         ExecutionContext::Rpc(RpcArguments {
///             data: self.value.clone(),
///             pattern: self.topic.clone(),
///         })
///     }
/// }
///
/// let msg = KafkaMessage { topic: "orders".into(), value: json!({ "n": 1 }) };
/// let resolved = resolve_request_from(&msg).unwrap();
/// assert_eq!(resolved.as_rpc(), Some(&json!({ "n": 1 })));
/// ```
pub trait ExtractExecutionContext {
    /// Builds the execution context for this call.
    fn extract_execution_context(&self) -> ExecutionContext;
}

impl ExtractExecutionContext for ExecutionContext {
    fn extract_execution_context(&self) -> ExecutionContext {
        self.clone()
    }
}

/// GraphQL view over resolver arguments.
#[derive(Debug, Clone, Copy)]
pub struct GqlExecutionContext<'a> {
    args: &'a GraphqlArguments,
}

impl<'a> GqlExecutionContext<'a> {
    /// Wraps GraphQL resolver arguments.
    pub fn create(args: &'a GraphqlArguments) -> Self {
        Self { args }
    }

    /// Returns the parent object.
    pub fn root(&self) -> &'a Value {
        &self.args.root
    }

    /// Returns the field arguments.
    pub fn args(&self) -> &'a Value {
        &self.args.args
    }

    /// Returns the resolve info.
    pub fn info(&self) -> &'a Value {
        &self.args.info
    }

    /// Returns the shared per-request context.
    pub fn context(&self) -> &'a GraphqlContext {
        &self.args.context
    }
}

/// The raw request or data behind an execution context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedRequest<'a> {
    /// HTTP request (from HTTP or GraphQL calls)
    Http(&'a HttpRequest),
    /// RPC message payload
    Rpc(&'a Value),
}

impl<'a> ResolvedRequest<'a> {
    /// Returns the HTTP request, if this resolved to one.
    pub fn as_http(&self) -> Option<&'a HttpRequest> {
        match *self {
            ResolvedRequest::Http(req) => Some(req),
            ResolvedRequest::Rpc(_) => None,
        }
    }

    /// Returns the RPC payload, if this resolved to one.
    pub fn as_rpc(&self) -> Option<&'a Value> {
        match *self {
            ResolvedRequest::Rpc(data) => Some(data),
            ResolvedRequest::Http(_) => None,
        }
    }

    /// Clones the borrowed request into an owned value.
    pub fn into_owned(self) -> OwnedRequest {
        match self {
            ResolvedRequest::Http(req) => OwnedRequest::Http(req.clone()),
            ResolvedRequest::Rpc(data) => OwnedRequest::Rpc(data.clone()),
        }
    }
}

/// Owned counterpart of [`ResolvedRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedRequest {
    /// HTTP request (from HTTP or GraphQL calls)
    Http(HttpRequest),
    /// RPC message payload
    Rpc(Value),
}

impl OwnedRequest {
    /// Returns the HTTP request, if this resolved to one.
    pub fn as_http(&self) -> Option<&HttpRequest> {
        match self {
            OwnedRequest::Http(req) => Some(req),
            OwnedRequest::Rpc(_) => None,
        }
    }

    /// Returns the RPC payload, if this resolved to one.
    pub fn as_rpc(&self) -> Option<&Value> {
        match self {
            OwnedRequest::Rpc(data) => Some(data),
            OwnedRequest::Http(_) => None,
        }
    }
}

/// Returns the request or data object behind `ctx`.
///
/// - `http`: the request of the call
/// - `rpc`: the message payload
/// - `graphql`: the request held by the GraphQL context
///
/// # Errors
///
/// Returns `ContextErrorKind::UnsupportedContextType` (500 Internal Server
/// Error) for any other call style. The condition is permanent for the call.
///
/// # Examples
///
/// ```
/// use gateway_core::{resolve_request, ExecutionContext, HttpArguments, HttpMethod, HttpRequest};
///
/// let ctx = ExecutionContext::Http(HttpArguments {
///     request: HttpRequest::new("req-1", HttpMethod::Get, "/orders"),
///     status: None,
/// });
/// let req = resolve_request(&ctx).unwrap().as_http().unwrap();
/// assert_eq!(req.path(), "/orders");
///
/// let err = resolve_request(&ExecutionContext::Other("websocket".into())).unwrap_err();
/// assert!(err.message().contains("websocket"));
/// ```
pub fn resolve_request(ctx: &ExecutionContext) -> Result<ResolvedRequest<'_>, ContextError> {
    let resolved = match ctx {
        ExecutionContext::Http(http) => ResolvedRequest::Http(&http.request),
        ExecutionContext::Rpc(rpc) => ResolvedRequest::Rpc(&rpc.data),
        ExecutionContext::Graphql(gql) => {
            let gql_ctx = GqlExecutionContext::create(gql);
            ResolvedRequest::Http(&gql_ctx.context().req)
        }
        ExecutionContext::Other(name) => {
            tracing::warn!(context_type = %name, "unsupported execution context");
            return Err(ContextError::unsupported(name.as_str()));
        }
    };

    tracing::debug!(context_type = %ctx.context_type(), "resolved request from execution context");
    Ok(resolved)
}

/// Extracts the execution context of `call` and resolves its request.
///
/// # Errors
///
/// Same as [`resolve_request`].
pub fn resolve_request_from<E: ExtractExecutionContext>(
    call: &E,
) -> Result<OwnedRequest, ContextError> {
    let ctx = call.extract_execution_context();
    resolve_request(&ctx).map(ResolvedRequest::into_owned)
}
