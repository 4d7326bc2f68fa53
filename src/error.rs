use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read attendee table: {0}")]
    Input(String),
    #[error("Failed to load font: {0}")]
    Resource(String),
    #[error("Failed to generate QR code: {0}")]
    Encoding(String),
    #[error("Failed to render label: {0}")]
    Render(String),
    #[error("Invalid page layout: {0}")]
    Layout(String),
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
