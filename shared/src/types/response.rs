//! The response envelope used by every endpoint

use serde::{Deserialize, Serialize};

use crate::errors::status_codes;

/// `{status, message, data}` envelope
///
/// `data` is omitted from the JSON when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> StandardResponse<T> {
    /// Successful response carrying a payload
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: status_codes::SUCCESS.to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Response carrying a payload under an arbitrary status
    pub fn with_status(status: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl StandardResponse<()> {
    /// Response without payload, used for errors and bare acknowledgements
    pub fn message(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization() {
        let response = StandardResponse::success("ok", serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "ok");
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn test_message_omits_data() {
        let response = StandardResponse::message(status_codes::NOT_FOUND, "Template not found");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "not_found");
        assert!(json.get("data").is_none());
    }
}
