pub type YarnloomResult<T> = Result<T, YarnloomError>;

#[derive(thiserror::Error, Debug)]
pub enum YarnloomError {
    #[error("structural error: {0}")]
    Structural(String),

    #[error("parse error in block {block}: {msg}")]
    Parse { block: usize, msg: String },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl YarnloomError {
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural(msg.into())
    }

    pub fn parse(block: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            block,
            msg: msg.into(),
        }
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
