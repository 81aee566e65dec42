use crate::app_state::{iso_timestamp, AppState};
use crate::data_models::{
    ContactForm, ContactSubmission, HealthStatus, MailConfigStatus, SubmissionResponse,
};
use crate::errors::AppErrors;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Result};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp: iso_timestamp(),
        environment: state.environment.as_str().to_string(),
    })
}

pub async fn test_email_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.verify_mailer().await {
        Ok(()) => (
            StatusCode::OK,
            Json(MailConfigStatus {
                success: true,
                message: "Email configuration is valid".to_string(),
                error: None,
            }),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MailConfigStatus {
                success: false,
                message: "Email configuration is invalid".to_string(),
                error: Some(err.to_string()),
            }),
        ),
    }
}

pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, AppErrors> {
    let form = match form {
        Ok(Json(form)) => form,
        // Bodies that are not declared as JSON carry no fields at all.
        Err(JsonRejection::MissingJsonContentType(_)) => ContactForm::default(),
        Err(rejection) => {
            return Err(AppErrors::Internal {
                details: rejection.body_text(),
                environment: state.environment.clone(),
            })
        }
    };
    let submission = ContactSubmission::try_from(form)?;
    let receipt = state.submit(&submission).await?;
    Ok(Json(receipt.into()))
}
