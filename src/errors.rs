use crate::configuration::Environment;
use crate::mail::MailError;
use crate::validation::ValidationError;
use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use std::any::Any;
use thiserror::Error;
use tower_http::catch_panic::ResponseForPanic;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("socket address parsing error: {0}")]
    SocketAddressParsingError(#[from] std::net::AddrParseError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to set up mail transport: {0}")]
    MailSetupError(#[from] MailError),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unknown smtp security mode, use one of `tls`, `starttls` or `none`")]
    UnknownSmtpSecurity,
}

#[derive(Error, Debug)]
pub enum AppErrors {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("failed to submit form: {0}")]
    TransportError(#[from] MailError),
    #[error("internal error: {details}")]
    Internal {
        details: String,
        environment: Environment,
    },
}

impl IntoResponse for AppErrors {
    fn into_response(self) -> Response {
        match self {
            AppErrors::ValidationError(err) => {
                info!("rejected submission: {:?}", err.errors());
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "message": "Validation failed",
                        "errors": err.errors(),
                    })),
                )
                    .into_response()
            }
            AppErrors::TransportError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Failed to submit form",
                    "error": err.to_string(),
                })),
            )
                .into_response(),
            AppErrors::Internal {
                details,
                environment,
            } => {
                error!("internal error: {details}");
                internal_error_response(details, &environment)
            }
        }
    }
}

/// The generic failure for anything that is neither a validation nor a
/// transport error. Details are only exposed while running in development.
pub fn internal_error_response(details: String, environment: &Environment) -> Response {
    let error = match environment {
        Environment::Development => details,
        _ => "Something went wrong".to_string(),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "message": "Internal server error",
            "error": error,
        })),
    )
        .into_response()
}

pub fn panic_response(err: Box<dyn Any + Send + 'static>, environment: &Environment) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.to_owned()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("handler panicked: {details}");
    internal_error_response(details, environment)
}

/// Answers a panicking handler with the internal error response.
#[derive(Debug, Clone)]
pub struct PanicResponder(pub Environment);

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response {
        panic_response(err, &self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn read_json(response: Response) -> (StatusCode, Value) {
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("Failed");
        let value = serde_json::from_slice(&bytes).expect("response was not valid json");
        (parts.status, value)
    }

    #[tokio::test]
    async fn panic_response_shows_string_payload_in_development() {
        let payload: Box<dyn Any + Send> = Box::new("index out of bounds".to_string());
        let (status, value) = read_json(panic_response(payload, &Environment::Development)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Internal server error");
        assert_eq!(value["error"], "index out of bounds");
    }

    #[tokio::test]
    async fn panic_response_shows_str_payload_in_development() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        let (_, value) = read_json(panic_response(payload, &Environment::Development)).await;
        assert_eq!(value["error"], "boom");
    }

    #[tokio::test]
    async fn panic_response_hides_string_payload_in_production() {
        let payload: Box<dyn Any + Send> = Box::new("secret detail".to_string());
        let (status, value) = read_json(panic_response(payload, &Environment::Production)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value["error"], "Something went wrong");
    }

    #[tokio::test]
    async fn panic_response_hides_str_payload_outside_development() {
        let payload: Box<dyn Any + Send> = Box::new("secret detail");
        let environment = Environment::Other("staging".to_string());
        let (_, value) = read_json(panic_response(payload, &environment)).await;
        assert_eq!(value["error"], "Something went wrong");
    }

    async fn explode() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn panic_responder_catches_handler_panics() {
        let app = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(PanicResponder(
                Environment::Development,
            )));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/explode")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("Failed");
        let value: Value = serde_json::from_slice(&bytes).expect("response was not valid json");
        assert_eq!(parts.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value["message"], "Internal server error");
        assert_eq!(value["error"], "handler exploded");
    }

    #[tokio::test]
    async fn internal_error_hides_details_in_production() {
        let err = AppErrors::Internal {
            details: "expected value at line 1 column 1".to_string(),
            environment: Environment::Production,
        };
        let (status, value) = read_json(err.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(value["message"], "Internal server error");
        assert_eq!(value["error"], "Something went wrong");
    }
}
