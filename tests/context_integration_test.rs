//! Integration tests for execution-context resolution.
//!
//! These tests walk the path a guard or interceptor takes: a framework call
//! is mapped to an `ExecutionContext`, the request behind it is resolved,
//! and its payload is normalized.

use gateway_core::{
    format_event_payload, resolve_request, resolve_request_from, ContextErrorKind,
    ExecutionContext, ExtractExecutionContext, GraphqlArguments, GraphqlContext, HttpArguments,
    HttpMethod, HttpRequest, HttpStatus, PayloadValue, Principal, RpcArguments,
};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// A stand-in for a framework's handler arguments.
struct FakeFrameworkCall {
    kind: &'static str,
    request: HttpRequest,
    message: Value,
}

impl ExtractExecutionContext for FakeFrameworkCall {
    fn extract_execution_context(&self) -> ExecutionContext {
        match self.kind {
            "http" => ExecutionContext::Http(HttpArguments {
                request: self.request.clone(),
                status: None,
            }),
            "rpc" => ExecutionContext::Rpc(RpcArguments {
                data: self.message.clone(),
                pattern: "fake.pattern".to_string(),
            }),
            "graphql" => ExecutionContext::Graphql(GraphqlArguments {
                root: Value::Null,
                args: json!({}),
                context: GraphqlContext {
                    req: self.request.clone(),
                },
                info: Value::Null,
            }),
            other => ExecutionContext::Other(other.to_string()),
        }
    }
}

fn call(kind: &'static str) -> FakeFrameworkCall {
    let mut request = HttpRequest::new("req-int-001", HttpMethod::Post, "/orders");
    request.set_principal(Some(Principal {
        id: "user-alice".to_string(),
        name: "Alice".to_string(),
    }));
    FakeFrameworkCall {
        kind,
        request,
        message: json!({ "orderId": "507f1f77bcf86cd799439011" }),
    }
}

#[test]
fn guard_reads_principal_from_http_and_graphql() {
    init_tracing();

    for kind in ["http", "graphql"] {
        let resolved = resolve_request_from(&call(kind)).expect("supported style");
        let req = resolved.as_http().expect("http request");
        assert_eq!(req.request_id(), "req-int-001");
        assert_eq!(req.principal().unwrap().id, "user-alice");
    }
}

#[test]
fn rpc_message_payload_is_resolved_and_normalized() {
    init_tracing();

    let ctx = call("rpc").extract_execution_context();
    let data = resolve_request(&ctx)
        .expect("rpc is supported")
        .as_rpc()
        .expect("rpc payload")
        .clone();

    let payload = format_event_payload(PayloadValue::from(data));
    assert_eq!(
        payload.get("orderId").and_then(PayloadValue::as_object_id).map(|id| id.to_hex()),
        Some("507f1f77bcf86cd799439011".to_string())
    );
}

#[test]
fn unsupported_style_surfaces_as_server_error() {
    init_tracing();

    let err = resolve_request_from(&call("websocket")).unwrap_err();
    assert_eq!(
        err.kind(),
        &ContextErrorKind::UnsupportedContextType {
            context_type: "websocket".to_string()
        }
    );
    assert!(err.message().contains("websocket"));
    assert_eq!(err.status(), HttpStatus::INTERNAL_SERVER_ERROR);

    // Converts into the crate error for `?` in pipeline code
    let as_crate_error: gateway_core::Error = err.into();
    assert!(format!("{}", as_crate_error).contains("websocket"));
}
