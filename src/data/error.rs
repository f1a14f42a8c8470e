use thiserror::Error;

/// Every way an aggregation run can fail. Any of these switches the UI to
/// the fallback dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The server answered with a non-success status.
    #[error("Error HTTP: {status} - {reason}")]
    Network { status: u16, reason: String },

    /// The request never produced a response (DNS, TLS, refused, timeout…).
    #[error("Error de red: {0}")]
    Transport(String),

    /// A local CSV could not be read.
    #[error("No se pudo leer el archivo: {0}")]
    Io(#[from] std::io::Error),

    #[error("El archivo CSV está vacío.")]
    EmptyFile,

    #[error("El CSV no contiene datos suficientes.")]
    InsufficientData,

    #[error("No se encontró la columna 'Municipio' en el CSV.")]
    ColumnNotFound,
}

impl IngestError {
    /// Build a `Network` error from an HTTP status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        IngestError::Network {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        IngestError::Transport(err.to_string())
    }
}
