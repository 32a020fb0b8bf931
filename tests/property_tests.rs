//! Property tests over the public API.

use gateway_core::{
    is_valid_object_id, normalize_json, resolve_request, transporter_token, ContextErrorKind,
    ExecutionContext, PayloadValue,
};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    /// Property: strings of six bytes or fewer are never converted to dates
    #[test]
    fn proptest_short_strings_never_dates(s in "[0-9:T -]{0,6}") {
        let out = normalize_json(json!(s.clone()));
        prop_assert!(out.as_datetime().is_none());
        prop_assert_eq!(out, PayloadValue::from(s));
    }

    /// Property: a string becomes an identifier exactly when it is 24 hex characters
    #[test]
    fn proptest_identifier_recognition(s in "[0-9a-fA-Fx]{22,26}") {
        let out = normalize_json(json!(s.clone()));
        prop_assert_eq!(out.as_object_id().is_some(), is_valid_object_id(&s));
    }

    /// Property: every unrecognized style fails and names itself
    #[test]
    fn proptest_unsupported_styles_rejected(
        style in "[a-z]{1,12}".prop_filter("known style", |s| !matches!(s.as_str(), "http" | "rpc" | "graphql"))
    ) {
        let err = resolve_request(&ExecutionContext::Other(style.clone())).unwrap_err();
        prop_assert!(err.message().contains(&style));
        let is_unsupported = matches!(err.kind(), ContextErrorKind::UnsupportedContextType { .. });
        prop_assert!(is_unsupported);
    }

    /// Property: transporter tokens always end with the suffix
    #[test]
    fn proptest_transporter_token_suffix(name in "[a-z_]{0,16}") {
        let token = transporter_token(&name);
        prop_assert!(token.ends_with("_TRANSPORTER"));
        prop_assert_eq!(&token[..name.len()], name.to_uppercase());
    }
}
