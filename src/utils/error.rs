use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarcodeError {
    #[error("The 'line' parameter is missing.")]
    MissingLine,

    #[error("The digit line must have exactly {expected} characters.")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Illegal character {character:?} at position {position}: ITF encodes digits only")]
    IllegalCharacter { character: char, position: usize },

    #[error("Barcode data is empty")]
    EmptyBarcodeData,

    #[error("Rendered image would be {width}x{height} px, over the size limit")]
    ImageTooLarge { width: u64, height: u64 },

    #[error("Image encoding failed: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied a bad or missing digit line.
    Input,
    Rendering,
    Configuration,
    System,
}

impl BarcodeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BarcodeError::MissingLine | BarcodeError::InvalidLength { .. } => ErrorCategory::Input,
            BarcodeError::IllegalCharacter { .. }
            | BarcodeError::EmptyBarcodeData
            | BarcodeError::ImageTooLarge { .. }
            | BarcodeError::ImageError(_) => ErrorCategory::Rendering,
            BarcodeError::ConfigError { .. } | BarcodeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            BarcodeError::IoError(_) | BarcodeError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    /// HTTP status the request handler answers with for this error.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Message placed in the JSON body. Internal failures are prefixed so
    /// callers can tell them apart from input problems.
    pub fn response_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            format!("Internal error: {}", self)
        }
    }
}

pub type Result<T> = std::result::Result<T, BarcodeError>;
