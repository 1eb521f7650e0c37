use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::AppConfig,
    middleware::error_handling::{AppError, Result},
    models::{
        Inquiry, InquiryResponse, MessageResponse, SubmitInquiryRequest, SubmitInquiryResponse,
        UpdateFlagRequest,
    },
    repositories::InquiryRepository,
    services::Notifier,
};

/// Accept an inquiry form submission: validate, persist, notify.
///
/// The record is kept even when the notification email fails; the response
/// reports `notified: false` in that case so the caller can tell "saved and
/// notified" from "saved only".
pub async fn submit_inquiry(
    State(config): State<AppConfig>,
    payload: std::result::Result<Json<SubmitInquiryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitInquiryResponse>)> {
    let Json(request) = payload?;
    request.validate().map_err(AppError::Validation)?;

    let repo = InquiryRepository::new(config.database_pool.clone());
    let inquiry = repo.create(request).await?;

    let response = notify_submission(&config.notifier, &inquiry).await;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Send the notification for a persisted inquiry and build the submission
/// response. The record is already saved, so a send failure only downgrades
/// the response to `notified: false`.
async fn notify_submission(notifier: &Notifier, inquiry: &Inquiry) -> SubmitInquiryResponse {
    let notified = match notifier.send_inquiry_notification(inquiry).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Inquiry {} saved but notification failed: {}", inquiry.id, e);
            false
        }
    };

    let message = if notified {
        "Inquiry submitted successfully"
    } else {
        "Inquiry saved, but the notification email could not be sent"
    };

    SubmitInquiryResponse {
        message: message.to_string(),
        id: inquiry.id,
        notified,
    }
}

/// Return every inquiry. No pagination or filtering; this backs a small
/// administrative view.
pub async fn list_inquiries(
    State(config): State<AppConfig>,
) -> Result<Json<Vec<InquiryResponse>>> {
    let repo = InquiryRepository::new(config.database_pool.clone());

    let inquiries = repo.find_all().await?;

    Ok(Json(inquiries.into_iter().map(Into::into).collect()))
}

pub async fn delete_inquiry(
    State(config): State<AppConfig>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_inquiry_id(&id)?;

    let repo = InquiryRepository::new(config.database_pool.clone());
    repo.delete(id).await?;

    Ok(Json(MessageResponse::new("Inquiry deleted successfully")))
}

pub async fn update_inquiry_flag(
    State(config): State<AppConfig>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateFlagRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let id = parse_inquiry_id(&id)?;
    let Json(request) = payload?;
    request.validate().map_err(AppError::Validation)?;

    let repo = InquiryRepository::new(config.database_pool.clone());
    repo.update_flag(id, &request.flag).await?;

    Ok(Json(MessageResponse::new("Flag updated successfully")))
}

// A malformed id is a client error, not a server fault.
fn parse_inquiry_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid inquiry id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmtpConfig;
    use chrono::Utc;

    #[test]
    fn well_formed_id_parses() {
        let id = Uuid::new_v4();
        assert_eq!(parse_inquiry_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn malformed_id_is_bad_request() {
        let err = parse_inquiry_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn failed_notification_reports_unnotified() {
        // Port 1 on loopback refuses the connection, so the send fails
        // without a real relay.
        let notifier = Notifier::new(&SmtpConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            username: "sender@example.com".to_string(),
            password: "secret".to_string(),
            recipient: "inbox@example.com".to_string(),
        })
        .unwrap();

        let inquiry = Inquiry {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            organization: "Acme Clinics".to_string(),
            option: "Hospital".to_string(),
            message: "We would like a demo.".to_string(),
            flag: "new".to_string(),
            date_registered: Utc::now(),
        };

        let response = notify_submission(&notifier, &inquiry).await;

        assert!(!response.notified);
        assert_eq!(response.id, inquiry.id);
        assert!(response.message.contains("could not be sent"));
    }
}
