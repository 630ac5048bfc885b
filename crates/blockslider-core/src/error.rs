use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Invalid control: {0}")]
    InvalidControl(String),

    #[error("Readiness was abandoned before resolving")]
    ReadinessAbandoned,
}

pub type Result<T> = std::result::Result<T, Error>;
