use crate::validation::{validate_message, validate_name, EMAIL_RE, PHONE_RE};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use validator::Validate;

/// A contact form exactly as it arrives over the wire. Missing and `null`
/// fields read as empty text, which no rule accepts.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ContactForm {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(regex(path = *EMAIL_RE, message = "Please provide a valid email address"))]
    pub email: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(regex(path = *PHONE_RE, message = "Please provide a valid phone number"))]
    pub phone: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

/// A contact form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub submitted_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    pub data: SubmissionReceipt,
}

impl From<SubmissionReceipt> for SubmissionResponse {
    fn from(data: SubmissionReceipt) -> Self {
        Self {
            success: true,
            message: "Form submitted successfully".to_string(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfigStatus {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
