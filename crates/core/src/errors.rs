use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown customer status `{0}` (expected LEAD|ACTIVE|RISK|CLOSED)")]
    UnknownStatus(String),
    #[error("invalid date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("serialization failure: {0}")]
    Serialization(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class used by operator tooling.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "invalid_input",
            Self::Persistence(_) => "storage",
            Self::Serialization(_) => "serialization",
            Self::Configuration(_) => "config_validation",
        }
    }
}

/// Import failures leave the existing collection untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("import payload is not valid JSON: {0}")]
    Parse(String),
    #[error("import payload must be an object with a `customers` array")]
    InvalidFormat,
    #[error("invalid customer record at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError, ImportError};

    #[test]
    fn domain_error_maps_to_invalid_input_class() {
        let error = ApplicationError::from(DomainError::UnknownStatus("WON".to_owned()));
        assert_eq!(error.error_class(), "invalid_input");
        assert!(error.to_string().contains("WON"));
    }

    #[test]
    fn persistence_error_maps_to_storage_class() {
        let error = ApplicationError::Persistence("database is locked".to_owned());
        assert_eq!(error.error_class(), "storage");
    }

    #[test]
    fn import_error_wraps_application_error_transparently() {
        let error = ImportError::from(ApplicationError::Persistence("disk full".to_owned()));
        assert_eq!(error.to_string(), "persistence failure: disk full");
    }
}
