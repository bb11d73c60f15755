use thiserror::Error;

#[derive(Debug, Error)]
pub enum OboGraphError {
    #[error("error in decoding obograph json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("obograph json contains no graph")]
    EmptyGraph,
    #[error("edge references missing node: {0}")]
    DanglingReference(String),
    #[error("{role} node id {id} does not exist")]
    MissingNode { role: &'static str, id: String },
    #[error("storage error in {operation}: {message}")]
    Storage { operation: String, message: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl OboGraphError {
    pub fn dangling<T: Into<String>>(msg: T) -> Self {
        OboGraphError::DanglingReference(msg.into())
    }

    pub fn missing_node<T: Into<String>>(role: &'static str, id: T) -> Self {
        OboGraphError::MissingNode {
            role,
            id: id.into(),
        }
    }

    pub fn storage<O: Into<String>, T: ToString>(operation: O, err: T) -> Self {
        OboGraphError::Storage {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        OboGraphError::NotFound(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        OboGraphError::InvalidInput(msg.into())
    }

    /// True for failures raised while building a graph, before any storage call.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            OboGraphError::Decode(_)
                | OboGraphError::EmptyGraph
                | OboGraphError::DanglingReference(_)
                | OboGraphError::MissingNode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_names_operation() {
        let err = OboGraphError::storage("bulk import cvterm", "disk I/O error");
        assert_eq!(
            err.to_string(),
            "storage error in bulk import cvterm: disk I/O error"
        );
        assert!(!err.is_decode_failure());
    }

    #[test]
    fn missing_node_message_names_role() {
        let err = OboGraphError::missing_node("subject", "SO_0000001");
        assert_eq!(err.to_string(), "subject node id SO_0000001 does not exist");
        assert!(err.is_decode_failure());
    }
}
