use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Quote not found: #{0}")]
    QuoteNotFound(u32),

    #[error("No quotes available")]
    NoQuotes,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Front matter error: {0}")]
    FrontMatter(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
