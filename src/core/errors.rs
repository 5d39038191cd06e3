use thiserror::Error;

#[derive(Error, Debug)]
pub enum KarteiError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[cfg(feature = "translation")]
    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Cards per page must be an even number between 2 and 12, got {0}")]
    InvalidCardsPerPage(u32),

    #[error("Font size must be between 6 and 120, got {0}")]
    InvalidFontSize(u32),

    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("KarteiError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for KarteiError {
    fn from(error: std::io::Error) -> Self {
        KarteiError::Io(Box::new(error))
    }
}

#[cfg(feature = "translation")]
impl From<reqwest::Error> for KarteiError {
    fn from(error: reqwest::Error) -> Self {
        KarteiError::Reqwest(Box::new(error))
    }
}
