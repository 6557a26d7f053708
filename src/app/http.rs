use crate::adapters::{GeminiClient, ResendMailer};
use crate::config::SiteConfig;
use crate::core::blueprint::BlueprintService;
use crate::core::contact::{validate_request, ContactService};
use crate::domain::model::ContactRequest;
use crate::utils::error::SiteError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct AppState {
    pub config: SiteConfig,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/generate-blueprint", post(handle_generate_blueprint))
        .route("/api/contact", post(handle_contact))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// Bodies are read as raw bytes and navigated as values: a missing field, a
// non-string field, and an unparseable body all take the same 400 path
// instead of leaking a framework rejection.
async fn handle_generate_blueprint(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let niche = payload.get("niche").and_then(Value::as_str).unwrap_or("");

    if niche.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Niche is required");
    }

    let generator = match GeminiClient::from_config(&state.config) {
        Ok(generator) => generator,
        Err(err) => {
            tracing::error!(error = %err, "Blueprint endpoint is misconfigured");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
        }
    };

    let service = BlueprintService::with_policy(generator, state.config.generator.retry_policy());

    match service.generate(niche).await {
        Ok(blueprint) => {
            (StatusCode::OK, Json(json!({ "blueprint": blueprint }))).into_response()
        }
        Err(SiteError::NicheRequired) => {
            error_response(StatusCode::BAD_REQUEST, "Niche is required")
        }
        Err(err) => {
            tracing::error!(error = %err, "Blueprint generation failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &client_facing_message(&err),
            )
        }
    }
}

/// The client sees the last underlying failure, never attempt-level detail.
fn client_facing_message(err: &SiteError) -> String {
    match err {
        SiteError::GenerationExhausted { source, .. } => source.to_string(),
        _ => "Failed to generate blueprint".to_string(),
    }
}

async fn handle_contact(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: ContactRequest = serde_json::from_slice(&body).unwrap_or_default();

    // Validation comes before the credential check so a misconfigured
    // deployment still gives senders accurate feedback on their input.
    if let Err(err) = validate_request(&request) {
        return message_response(StatusCode::BAD_REQUEST, &validation_message(err));
    }

    let mailer = match ResendMailer::from_config(&state.config) {
        Ok(mailer) => mailer,
        Err(err) => {
            tracing::error!(error = %err, "Contact endpoint is misconfigured");
            return contact_failure_response(&state.config);
        }
    };

    let service = ContactService::new(mailer, state.config.mail.clone());

    match service.submit(request).await {
        Ok(_) => message_response(
            StatusCode::OK,
            "Thanks for reaching out! We'll get back to you soon.",
        ),
        Err(SiteError::ValidationError { message }) => {
            message_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(err) => {
            tracing::error!(error = %err, "Contact relay failed");
            contact_failure_response(&state.config)
        }
    }
}

fn validation_message(err: SiteError) -> String {
    match err {
        SiteError::ValidationError { message } => message,
        other => other.to_string(),
    }
}

fn contact_failure_response(config: &SiteConfig) -> Response {
    message_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!(
            "Something went wrong sending your message. Please email us directly at {}.",
            config.mail.fallback_address
        ),
    )
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_surfaces_last_underlying_message() {
        let err = SiteError::GenerationExhausted {
            attempts: 5,
            source: Box::new(SiteError::NoJsonFound),
        };

        assert_eq!(
            client_facing_message(&err),
            "No JSON object found in model output"
        );
    }

    #[test]
    fn test_other_errors_get_generic_message() {
        let err = SiteError::MalformedResponse;
        assert_eq!(client_facing_message(&err), "Failed to generate blueprint");
    }
}
