use gridwatch_core::errors::{EngineError, EngineResult};

#[test]
fn test_engine_error_display() {
    let fetch = EngineError::Fetch("connection reset".to_string());
    let malformed = EngineError::MalformedPayload("missing regions".to_string());
    let delivery = EngineError::Delivery("sendMessage transport error".to_string());

    assert_eq!(fetch.to_string(), "Fetch failure: connection reset");
    assert_eq!(
        malformed.to_string(),
        "Malformed provider payload: missing regions"
    );
    assert_eq!(
        delivery.to_string(),
        "Delivery error: sendMessage transport error"
    );
}

#[test]
fn test_engine_result() {
    let ok: EngineResult<u32> = Ok(7);
    assert_eq!(ok.unwrap(), 7);

    let err: EngineResult<u32> = Err(EngineError::Fetch("timeout".to_string()));
    assert!(err.is_err());
}
