//! Response helpers

use serde::{Deserialize, Serialize};

/// JSON error body the backend sends on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_decodes() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "sales slot not found"}"#).unwrap();
        assert_eq!(body.message, "sales slot not found");
    }
}
