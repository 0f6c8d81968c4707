use thiserror::Error;

/// Errors shared by every flakeview crate
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

pub type CommonResult<T> = Result<T, CommonError>;
