use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Fetch failure: {0}")]
    Fetch(String),

    #[error("Malformed provider payload: {0}")]
    MalformedPayload(String),

    #[error("Delivery error: {0}")]
    Delivery(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
