//! Execution-context resolution and event-payload normalization for
//! microservice gateways.
//!
//! This crate provides the glue a gateway needs between its transports and
//! its handlers:
//! - **Context resolution**: Find the request (or message payload) behind an
//!   HTTP, RPC or GraphQL call
//! - **Payload normalization**: Turn identifier- and date-shaped strings in
//!   event payloads into typed values
//! - **Transporter tokens**: Derive the injection token for a named transporter
//!
//! # Core Types
//!
//! - [`ExecutionContext`]: Tagged union over the supported call styles
//! - [`PayloadValue`]: Structured event payload with typed leaves
//! - [`PayloadNormalizer`]: Configurable normalizer
//! - [`ObjectId`]: 12-byte document-store identifier
//! - [`ContextError`]: Failure to resolve a context, with its HTTP status
//!
//! # Examples
//!
//! ```
//! use gateway_core::{format_event_payload, resolve_request, ExecutionContext, PayloadValue, RpcArguments};
//! use serde_json::json;
//!
//! let ctx = ExecutionContext::Rpc(RpcArguments {
//!     data: json!({ "userId": "507f1f77bcf86cd799439011", "at": "2024-01-05" }),
//!     pattern: "user.updated".to_string(),
//! });
//!
//! let data = resolve_request(&ctx).unwrap().as_rpc().unwrap().clone();
//! let payload = format_event_payload(PayloadValue::from(data));
//!
//! assert!(payload.get("userId").unwrap().as_object_id().is_some());
//! assert!(payload.get("at").unwrap().as_datetime().is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod date;
mod error;
mod normalize;
mod object_id;
mod request;
mod transport;
mod value;

#[cfg(test)]
mod test_utils;

pub use context::{
    resolve_request, resolve_request_from, ContextType, ExecutionContext, ExtractExecutionContext,
    GqlExecutionContext, GraphqlArguments, GraphqlContext, HttpArguments, OwnedRequest,
    ResolvedRequest, RpcArguments,
};
pub use date::{is_date_string, parse_date_string};
pub use error::{ContextError, ContextErrorKind, Error, HttpStatus};
pub use normalize::{
    format_event_payload, normalize_as, normalize_json, PayloadNormalizer, DEFAULT_DATE_MIN_LEN,
};
pub use object_id::{is_valid_object_id, ObjectId, ObjectIdError};
pub use request::{HttpMethod, HttpRequest, Principal};
pub use transport::transporter_token;
pub use value::PayloadValue;
