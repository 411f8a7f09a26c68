pub type HandscriptResult<T> = Result<T, HandscriptError>;

#[derive(thiserror::Error, Debug)]
pub enum HandscriptError {
    #[error("resource error: {0}")]
    Resource(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandscriptError {
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
