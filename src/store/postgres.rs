use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{NewSubmission, PageRequest, Pagination, Submission, SubmissionPage};
use crate::store::{StoreError, SubmissionStore};

/// Postgres backed store. The pool is created once at startup and shared by
/// every request.
#[derive(Clone)]
pub struct PgSubmissionStore {
    db_pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db_pool
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    #[tracing::instrument(
        name = "Insert a new contact submission into the database",
        skip(self, new_submission),
        fields(submitter_email = %new_submission.email.as_ref())
    )]
    async fn create(&self, new_submission: &NewSubmission) -> Result<Submission, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO contact_submissions (id, name, email, subject, message, created_at, read)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING id, name, email, subject, message, created_at, read
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_submission.name.as_ref())
        .bind(new_submission.email.as_ref())
        .bind(new_submission.subject.as_ref())
        .bind(new_submission.message.as_ref())
        .bind(Utc::now())
        .try_map(|row: PgRow| submission_from_row(&row))
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            StoreError::Database(err)
        })
    }

    #[tracing::instrument(
        name = "Fetch a page of contact submissions",
        skip(self),
        fields(page = page_request.page(), limit = page_request.limit())
    )]
    async fn list(&self, page_request: PageRequest) -> Result<SubmissionPage, StoreError> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM contact_submissions")
            .try_map(|row: PgRow| row.try_get("total"))
            .fetch_one(&self.db_pool)
            .await?;

        let contacts = sqlx::query(
            r#"
            SELECT id, name, email, subject, message, created_at, read
            FROM contact_submissions
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page_request.limit()))
        .bind(i64::try_from(page_request.offset()).unwrap_or(i64::MAX))
        .try_map(|row: PgRow| submission_from_row(&row))
        .fetch_all(&self.db_pool)
        .await?;

        Ok(SubmissionPage {
            contacts,
            pagination: Pagination::new(page_request, u64::try_from(total).unwrap_or_default()),
        })
    }
}

fn submission_from_row(row: &PgRow) -> Result<Submission, sqlx::Error> {
    Ok(Submission {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        subject: row.try_get("subject")?,
        message: row.try_get("message")?,
        created_at: row.try_get("created_at")?,
        read: row.try_get("read")?,
    })
}
