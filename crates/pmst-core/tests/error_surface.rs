use pmst_core::errors::{ErrorInfo, PmstError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("node", "3")
        .with_context("reason", "example")
}

#[test]
fn graph_error_surface() {
    let err = PmstError::Graph(sample_info("self-loop", "edge endpoints coincide"));
    assert_eq!(err.code(), "self-loop");
    assert_eq!(err.info().context_value("node"), Some("3"));
    assert_eq!(err.info().context_value("edge"), None);
}

#[test]
fn search_error_surface() {
    let err = PmstError::invariant("empty-queue", "pop on an empty queue");
    assert!(matches!(err, PmstError::Search(_)));
    assert_eq!(err.info().code, "empty-queue");
}

#[test]
fn capacity_error_surface() {
    let err = PmstError::Capacity(
        sample_info("state-index-overflow", "too many nodes").with_hint("contract the graph"),
    );
    assert_eq!(err.code(), "state-index-overflow");
    assert_eq!(err.info().hint.as_deref(), Some("contract the graph"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = PmstError::Config(
        ErrorInfo::new("max-nodes", "bad limit")
            .with_context("max_nodes", 0)
            .with_hint("use a positive value"),
    );
    let rendered = err.to_string();
    assert_eq!(
        rendered,
        "config error: bad limit (code: max-nodes) | context: [max_nodes=0] | hint: use a positive value"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = PmstError::Serde(sample_info("deserialize-json", "unexpected token"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Serde");
    assert_eq!(json["detail"]["code"], "deserialize-json");
    let decoded: PmstError = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, err);
}

#[test]
fn rng_error_surface() {
    let err = PmstError::Rng(sample_info("invalid-seed", "invalid seed"));
    assert_eq!(err.code(), "invalid-seed");
}
