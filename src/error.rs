use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("version must not be empty")]
    InvalidVersion,
    #[error("token is not valid")]
    InvalidToken,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("milestone is not found")]
    MilestoneNotFound,
    #[error("request failed: '{0}'")]
    Request(String),
    #[error("artifact upload failed: {0}")]
    ArtifactUpload(String),
    #[error(transparent)]
    Http(#[from] hyper::http::Error),
    #[error(transparent)]
    Uri(#[from] hyper::http::uri::InvalidUri),
    #[error(transparent)]
    Header(#[from] hyper::header::InvalidHeaderValue),
    #[error(transparent)]
    Hyper(#[from] hyper::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Template(#[from] Box<handlebars::TemplateError>),
    #[error(transparent)]
    Render(#[from] handlebars::RenderError),
    #[error(transparent)]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Error::Template(Box::new(err))
    }
}
