use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("server error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("response carried no data")]
    EmptyPayload,

    #[error("page address has no usable {0}")]
    MissingIdentity(&'static str),
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid start url: {0}")]
    StartUrl(#[from] url::ParseError),

    #[error("no certificates found in {0}")]
    EmptyCaFile(PathBuf),

    #[error("tls setup failed: {0}")]
    Tls(#[from] rustls::Error),

    #[error("http client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to create tokio runtime: {0}")]
    Runtime(std::io::Error),
}
