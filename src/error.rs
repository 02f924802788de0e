use thiserror::Error;

// * Fatal errors for a scrape run.
// * Fetch failures and pattern misses never surface here; they degrade to defaults.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network client setup failed: {0}")]
    Network(#[from] crate::network::errors::NetworkError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
