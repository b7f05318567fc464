use actix_web::{
    error::QueryPayloadError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use subtle::ConstantTimeEq;

use crate::{
    domain::PageRequest,
    routes::{error_chain_fmt, ErrorBody},
    store::{with_query_timeout, StoreError, SubmissionStore},
};

/// Shared secret that gates the submissions listing.
pub struct AdminKey(Secret<String>);

impl AdminKey {
    pub fn new(key: Secret<String>) -> Self {
        Self(key)
    }

    /// Constant-time comparison. An empty configured key matches nothing.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.expose_secret();

        if expected.is_empty() {
            return false;
        }

        expected.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminParameters {
    pub admin_key: Option<Secret<String>>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[tracing::instrument(
    name = "Listing contact submissions handler",
    skip(parameters, admin_key, store),
    fields(
        page = ?parameters.page,
        limit = ?parameters.limit
    )
)]
pub async fn handle_list_submissions(
    parameters: web::Query<AdminParameters>,
    admin_key: web::Data<AdminKey>,
    store: web::Data<dyn SubmissionStore>,
) -> Result<HttpResponse, AdminError> {
    let parameters = parameters.into_inner();
    let is_authorized = parameters
        .admin_key
        .as_ref()
        .map(|candidate| admin_key.matches(candidate.expose_secret()))
        .unwrap_or(false);

    if !is_authorized {
        tracing::warn!("Rejected a listing request with a missing or wrong admin key");
        return Err(AdminError::Unauthorized);
    }

    let page_request = PageRequest::new(
        parse_number("page", parameters.page)?,
        parse_number("limit", parameters.limit)?,
    );
    let page = with_query_timeout(store.list(page_request))
        .await
        .map_err(AdminError::Persistence)?;

    Ok(HttpResponse::Ok().json(page))
}

/// A query string that cannot be read carries no usable admin key, so it is
/// rejected the same way as a wrong one.
pub fn query_error_handler(err: QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    tracing::warn!("Rejected unreadable listing query: {}", err);
    AdminError::Unauthorized.into()
}

/// Blank values count as absent so the defaults apply.
fn parse_number(name: &'static str, value: Option<String>) -> Result<Option<u32>, AdminError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| AdminError::InvalidQuery(name)),
    }
}

#[derive(thiserror::Error)]
pub enum AdminError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid {0} parameter")]
    InvalidQuery(&'static str),
    #[error("Internal server error")]
    Persistence(#[source] StoreError),
}

impl std::fmt::Debug for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for AdminError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Unauthorized => StatusCode::UNAUTHORIZED,
            AdminError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AdminError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
