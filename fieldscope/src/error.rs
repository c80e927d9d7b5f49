use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldsError {
    /// The mapping document does not have the shape the `_mapping` API guarantees.
    #[error("Malformed mapping at '{path}': {reason}")]
    MalformedMapping { path: String, reason: String },

    #[error("Connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FieldsError {
    pub(crate) fn malformed(path: &[&str], reason: impl Into<String>) -> Self {
        let path = if path.is_empty() {
            "<root>".to_string()
        } else {
            path.join(".")
        };
        Self::MalformedMapping {
            path,
            reason: reason.into(),
        }
    }

    /// Check if this error is a broken data contract rather than an I/O problem.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FieldsError::MalformedMapping { .. })
    }
}

pub type Result<T> = std::result::Result<T, FieldsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = FieldsError::malformed(&["metrics", "cpu"], "\"type\" must be a string");
        assert!(err.is_malformed());
        assert_eq!(
            err.to_string(),
            "Malformed mapping at 'metrics.cpu': \"type\" must be a string"
        );
    }

    #[test]
    fn test_malformed_root_path() {
        let err = FieldsError::malformed(&[], "missing \"properties\"");
        assert_eq!(
            err.to_string(),
            "Malformed mapping at '<root>': missing \"properties\""
        );
    }

    #[test]
    fn test_invalid_query_is_not_malformed() {
        let err = FieldsError::InvalidQuery("no queries".to_string());
        assert!(!err.is_malformed());
    }
}
