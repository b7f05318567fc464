mod admin;
mod contact;
mod health_check;

pub use admin::{
    handle_list_submissions, query_error_handler, AdminError, AdminKey, AdminParameters,
};
pub use contact::{handle_create_submission, json_error_handler, ContactError};
pub use health_check::health_check;

/// JSON body returned with every error response.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// Writes `err` followed by its chain of sources, one per line.
fn error_chain_fmt(
    err: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}", err)?;

    let mut current = err.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }

    Ok(())
}
