//! These tests need a running Postgres reachable with the settings in
//! `config/`.

use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{configure_db, new_submission, valid_body, PostgresTestApp};
use portfolio_contact::{
    config::get_configuration,
    domain::PageRequest,
    store::{PgSubmissionStore, SubmissionStore},
};

async fn store() -> PgSubmissionStore {
    let mut config = get_configuration().expect("Missing configuration file.");

    PgSubmissionStore::new(configure_db(&mut config.database).await)
}

#[tokio::test]
async fn created_submission_is_listed_first() {
    let store = store().await;

    store.create(&new_submission(0)).await.unwrap();
    let created = store.create(&new_submission(1)).await.unwrap();

    let page = store
        .list(PageRequest::new(Some(1), Some(10)))
        .await
        .unwrap();

    assert_eq!(page.contacts[0], created);
    assert!(!page.contacts[0].read);
    assert_eq!(page.pagination.total, 2);
}

#[tokio::test]
async fn pages_follow_the_ceiling_of_total_over_limit() {
    let store = store().await;

    for index in 0..7 {
        store.create(&new_submission(index)).await.unwrap();
    }

    let last_page = store
        .list(PageRequest::new(Some(3), Some(3)))
        .await
        .unwrap();
    let past_the_end = store
        .list(PageRequest::new(Some(4), Some(3)))
        .await
        .unwrap();

    assert_eq!(last_page.pagination.pages, 3);
    assert_eq!(last_page.contacts.len(), 1);
    assert_eq!(last_page.contacts[0].name, "Sender 0");
    assert!(past_the_end.contacts.is_empty());
}

#[tokio::test]
async fn submissions_are_stored_with_every_field() {
    let store = store().await;

    let created = store.create(&new_submission(5)).await.unwrap();

    let stored: (String, String, String, String, bool) = sqlx::query_as(
        "SELECT name, email, subject, message, read FROM contact_submissions WHERE id = $1",
    )
    .bind(created.id)
    .fetch_one(store.pool())
    .await
    .expect("Failed to fetch the saved submission.");

    assert_eq!(
        stored,
        (
            String::from("Sender 5"),
            String::from("sender5@example.com"),
            String::from("Subject number 5"),
            String::from("Message body number 5"),
            false
        )
    );
}

#[tokio::test]
async fn posted_submission_is_stored_and_listed_by_the_running_service() {
    let test_app = PostgresTestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());

    let query = "SELECT name, read FROM contact_submissions";
    let (name, read): (String, bool) = sqlx::query_as(query)
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to fetch the saved submission.");

    assert_eq!(name, "Jane Doe");
    assert!(!read);

    let response = test_app.get_contacts("page=1&limit=5").await;

    assert_eq!(200, response.status().as_u16());

    let listing: serde_json::Value = response.json().await.unwrap();

    assert_eq!(listing["contacts"][0]["name"], "Jane Doe");
    assert_eq!(listing["pagination"]["total"], 1);
    assert_eq!(listing["pagination"]["limit"], 5);
}

#[tokio::test]
async fn running_service_rejects_listing_with_a_wrong_key() {
    let test_app = PostgresTestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/contact?adminKey=wrong-key", test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
}
