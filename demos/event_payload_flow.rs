//! Event payload flow demonstration.
//!
//! This example walks one call of each style through the gateway helpers:
//! 1. Map the call to an execution context
//! 2. Resolve the request or message behind it
//! 3. Normalize the payload into typed values
//!
//! Run with: `cargo run --example event_payload_flow`

use gateway_core::{
    format_event_payload, resolve_request, transporter_token, ExecutionContext, GraphqlArguments,
    GraphqlContext, HttpArguments, HttpMethod, HttpRequest, PayloadValue, Principal, RpcArguments,
};
use serde_json::{json, Value};

fn sample_request() -> HttpRequest {
    let mut req = HttpRequest::new("req-0001", HttpMethod::Post, "/graphql");
    req.add_header("Authorization", "Bearer demo");
    req.set_principal(Some(Principal {
        id: "user-123".to_string(),
        name: "Alice".to_string(),
    }));
    req.set_body(json!({ "query": "{ order(id: \"65a1b2c3d4e5f60718293a4b\") { id } }" }));
    req
}

fn describe(label: &str, ctx: &ExecutionContext) {
    println!("--- {} ({})", label, ctx.context_type());
    match resolve_request(ctx) {
        Ok(resolved) => {
            if let Some(req) = resolved.as_http() {
                println!(
                    "request {} {} {} by {:?}",
                    req.request_id(),
                    req.method(),
                    req.path(),
                    req.principal().map(|p| p.name.as_str())
                );
            }
            if let Some(data) = resolved.as_rpc() {
                let payload = format_event_payload(PayloadValue::from(data.clone()));
                println!("normalized payload: {:#?}", payload);
            }
        }
        Err(err) => println!("rejected with {}: {}", err.status(), err),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("transporter token: {}", transporter_token("orders"));

    let http = ExecutionContext::Http(HttpArguments {
        request: sample_request(),
        status: None,
    });
    let rpc = ExecutionContext::Rpc(RpcArguments {
        data: json!({
            "orderId": "65a1b2c3d4e5f60718293a4b",
            "placedAt": "2024-01-05T10:30:00+02:00",
            "items": [{ "sku": "A-1", "qty": 2 }],
        }),
        pattern: "order.placed".to_string(),
    });
    let graphql = ExecutionContext::Graphql(GraphqlArguments {
        root: Value::Null,
        args: json!({ "id": "65a1b2c3d4e5f60718293a4b" }),
        context: GraphqlContext {
            req: sample_request(),
        },
        info: json!({ "fieldName": "order" }),
    });
    let websocket = ExecutionContext::Other("websocket".to_string());

    describe("http", &http);
    describe("rpc", &rpc);
    describe("graphql", &graphql);
    describe("websocket", &websocket);
}
