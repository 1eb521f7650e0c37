use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A persisted inquiry. `id` and `date_registered` are assigned by the
/// database on insert and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub option: String,
    pub message: String,
    pub flag: String,
    pub date_registered: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitInquiryRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, max = 200, message = "Organization name is required"))]
    pub organization: String,
    #[validate(length(min = 1, max = 100, message = "Organization type is required"))]
    pub option: String,
    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFlagRequest {
    #[validate(length(min = 1, max = 50, message = "Flag must not be empty"))]
    pub flag: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct InquiryResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub option: String,
    pub message: String,
    pub flag: String,
    pub date_registered: DateTime<Utc>,
}

impl From<Inquiry> for InquiryResponse {
    fn from(inquiry: Inquiry) -> Self {
        Self {
            id: inquiry.id,
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            organization: inquiry.organization,
            option: inquiry.option,
            message: inquiry.message,
            flag: inquiry.flag,
            date_registered: inquiry.date_registered,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitInquiryResponse {
    pub message: String,
    pub id: Uuid,
    pub notified: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SubmitInquiryRequest {
        SubmitInquiryRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            organization: "Acme Clinics".to_string(),
            option: "Hospital".to_string(),
            message: "We would like a demo.".to_string(),
        }
    }

    #[test]
    fn valid_submission_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut request = valid_request();
        request.email = "not-an-email".to_string();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut request = valid_request();
        request.name = String::new();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn empty_flag_is_rejected() {
        let request = UpdateFlagRequest {
            flag: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn response_serializes_id_as_string() {
        let response = InquiryResponse {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            organization: "Acme Clinics".to_string(),
            option: "Hospital".to_string(),
            message: "Hello".to_string(),
            flag: "new".to_string(),
            date_registered: Utc::now(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["id"].is_string());
        assert_eq!(value["flag"], "new");
    }
}
