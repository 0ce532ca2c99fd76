use reddit_autopilot_rs::AutopilotError;

#[test]
fn test_error_types() {
    let err = AutopilotError::Config("credentials missing".to_string());
    assert_eq!(err.to_string(), "Configuration error: credentials missing");

    let err = AutopilotError::Publish("403 Forbidden".to_string());
    assert_eq!(err.to_string(), "Publish error: 403 Forbidden");

    let err = AutopilotError::Generation("empty response from model".to_string());
    assert_eq!(
        err.to_string(),
        "Generation error: empty response from model"
    );

    let err = AutopilotError::Store("lock poisoned".to_string());
    assert_eq!(err.to_string(), "Storage error: lock poisoned");

    let err = AutopilotError::ItemNotFound("test-id".to_string());
    assert_eq!(err.to_string(), "Queue item not found: test-id");
}

#[test]
fn test_serde_error_conversion() {
    let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let err: AutopilotError = parse_err.into();
    assert!(err.to_string().starts_with("Serialization error:"));
}
