use actix_web::{
    error::JsonPayloadError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError,
};
use uuid::Uuid;

use crate::{
    domain::{NewSubmission, NewSubmissionBody, ValidationError},
    notification::ContactNotifier,
    routes::{error_chain_fmt, ErrorBody},
    store::{with_query_timeout, StoreError, SubmissionStore},
};

#[derive(serde::Serialize)]
struct SubmissionCreated {
    message: &'static str,
    id: Uuid,
}

#[tracing::instrument(
    name = "Creating a new contact submission handler",
    skip(body, store, notifier),
    fields(
        submitter_email = %body.email.as_deref().unwrap_or_default(),
        submission_subject = %body.subject.as_deref().unwrap_or_default()
    )
)]
pub async fn handle_create_submission(
    body: web::Json<NewSubmissionBody>,
    store: web::Data<dyn SubmissionStore>,
    notifier: web::Data<ContactNotifier>,
) -> Result<HttpResponse, ContactError> {
    let new_submission: NewSubmission = body.into_inner().try_into().map_err(|err| {
        tracing::warn!("Validation error: {}", err);
        ContactError::Validation(err)
    })?;

    let submission = with_query_timeout(store.create(&new_submission))
        .await
        .map_err(ContactError::Persistence)?;

    // The submission is stored at this point; the outcome of the emails does
    // not change the response.
    let report = notifier.notify(&submission).await;
    tracing::info!(
        submission_id = %submission.id,
        ?report,
        "Contact submission stored"
    );

    Ok(HttpResponse::Ok().json(SubmissionCreated {
        message: "Contact form submitted successfully",
        id: submission.id,
    }))
}

/// Turns body deserialisation failures on JSON endpoints into an
/// `InvalidPayload` response.
pub fn json_error_handler(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    tracing::warn!("Rejected malformed payload: {}", err);
    ContactError::InvalidPayload(err.to_string()).into()
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Invalid request payload")]
    InvalidPayload(String),
    #[error(transparent)]
    Validation(ValidationError),
    #[error("Internal server error")]
    Persistence(#[source] StoreError),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)?;

        if let ContactError::InvalidPayload(detail) = self {
            write!(f, "Caused by:\n\t{}", detail)?;
        }

        Ok(())
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
