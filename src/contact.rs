//! Contact form endpoint.
//!
//! Validates and acknowledges submissions. Delivery to an inbox happens
//! outside this service; accepted submissions are logged so they are
//! never silently dropped.

use crate::models::{is_email_shaped, MessageResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

const MIN_MESSAGE_LEN: usize = 10;

/// Contact form payload
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Contact endpoint - POST /api/contact
pub async fn send_contact(
    Json(payload): Json<ContactRequest>,
) -> Result<Json<MessageResponse>, ContactError> {
    let name = payload.name.trim();
    let email = payload.email.trim();
    let subject = payload.subject.trim();
    let message = payload.message.trim();

    if name.is_empty() || email.is_empty() || subject.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }

    if !is_email_shaped(email) {
        return Err(ContactError::InvalidEmail);
    }

    if message.chars().count() < MIN_MESSAGE_LEN {
        return Err(ContactError::MessageTooShort);
    }

    info!(
        name = %name,
        email = %email,
        subject = %subject,
        message_len = message.len(),
        "📬 Contact form submission received"
    );

    Ok(Json(MessageResponse::new(
        "Message received. Thank you for reaching out!",
    )))
}

/// Contact form errors
#[derive(Debug, PartialEq, Eq)]
pub enum ContactError {
    MissingFields,
    InvalidEmail,
    MessageTooShort,
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let message = match self {
            ContactError::MissingFields => "All fields are required",
            ContactError::InvalidEmail => "Please provide a valid email address",
            ContactError::MessageTooShort => "Message must be at least 10 characters long",
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
