//! Error types for certificate issuance and verification

use thiserror::Error;

/// Result type alias for certificate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while issuing, verifying, or exporting a certificate
#[derive(Error, Debug)]
pub enum Error {
    /// A required record field was empty at issuance time
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A plot size label outside the closed set
    #[error("Unknown plot size: {0}")]
    InvalidPlotSize(String),

    /// An issue date that is not an ISO 8601 calendar date
    #[error("Invalid issue date: {0}")]
    InvalidDate(String),

    /// Failed to serialize a record into a verification link
    #[error("Failed to encode verification payload: {0}")]
    EncodeError(String),

    /// The verification payload is missing or could not be decoded.
    /// Carries no detail: every decode failure collapses into one generic
    /// invalid-certificate state, never a partially-populated record.
    #[error("Invalid certificate: the verification payload could not be decoded")]
    InvalidCertificate,

    /// Failed to build the QR module matrix
    #[error("QR encoding failed: {0}")]
    QrError(#[from] qrcode::types::QrError),

    /// Failed to render the certificate surface
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to export the certificate (PDF assembly or file output)
    #[error("Export failed: {0}")]
    ExportError(String),

    /// An export was requested while another one is still in flight
    #[error("An export is already in progress")]
    ExportInFlight,

    /// Failed to hand the document to the platform print pipeline
    #[error("Print failed: {0}")]
    PrintError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ExportError(err.to_string())
    }
}
