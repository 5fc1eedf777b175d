pub type GardenResult<T> = Result<T, GardenError>;

#[derive(thiserror::Error, Debug)]
pub enum GardenError {
    #[error("unknown flower kind '{0}'")]
    UnknownKind(String),

    #[error("missing mount target '{0}'")]
    MissingTarget(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GardenError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
