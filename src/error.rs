use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("precheck error: {0}")]
    PreCheckError(String),

    #[error("service error: {0}")]
    ServiceError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("http request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("enum parse error: {0}")]
    EnumParseError(#[from] strum::ParseError),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}
