//! JSON bodies exchanged between the client and the API server.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{NewLink, Platform};

/// Body of `POST /api/links`.
///
/// Every field is optional at the wire level so that a missing field surfaces
/// as a [`ValidationError`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CreateLinkRequest {
    pub fn new(url: impl Into<String>, platform: Platform, user_id: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            platform: Some(platform.as_str().to_string()),
            user_id: Some(user_id.into()),
        }
    }

    pub fn validate(&self) -> Result<NewLink, ValidationError> {
        NewLink::parse(
            self.url.as_deref(),
            self.platform.as_deref(),
            self.user_id.as_deref(),
        )
    }
}

/// Acknowledgement returned by `DELETE /api/links/{id}`, whether or not a
/// record existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

impl DeleteAck {
    pub fn deleted() -> Self {
        Self {
            message: "Link deleted".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Plain informational body, e.g. the root banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_reads_camel_case_user_id() {
        let req: CreateLinkRequest = serde_json::from_str(
            r#"{"url":"https://x.com/a","platform":"twitter","userId":"u1"}"#,
        )
        .unwrap();
        let link = req.validate().unwrap();
        assert_eq!(link.user_id(), "u1");
        assert_eq!(link.platform(), Platform::Twitter);
    }

    #[test]
    fn create_request_missing_field_is_validation_error() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"url":"https://x.com/a","platform":"twitter"}"#).unwrap();
        assert_eq!(req.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn error_body_omits_absent_path() {
        let body = ErrorBody {
            error: "Missing required fields".into(),
            path: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Missing required fields"}"#
        );
    }
}
