use uuid::Uuid;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{valid_body, TestApp};

async fn error_message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Body is not JSON.");

    body["error"]
        .as_str()
        .expect("Missing error message.")
        .to_string()
}

fn email_subject(body: &[u8]) -> String {
    let body: serde_json::Value = serde_json::from_slice(body).unwrap();

    body["subject"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn contact_returns_200_and_the_new_id_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();

    assert_eq!(body["message"], "Contact form submitted successfully");
    assert_eq!(test_app.store.submissions()[0].id, id);
}

#[tokio::test]
async fn contact_persists_the_new_submission_as_unread() {
    let test_app = TestApp::spawn_app_without_mail().await;

    test_app.post_contact(&valid_body()).await;

    let submissions = test_app.store.submissions();

    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].name, "Jane Doe");
    assert_eq!(submissions[0].email, "jane@example.com");
    assert_eq!(submissions[0].subject, "Hello there");
    assert_eq!(submissions[0].message, "This is a test message.");
    assert!(!submissions[0].read);
}

#[tokio::test]
async fn contact_returns_400_when_a_required_field_is_missing() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases = vec![
        (serde_json::json!({}), "missing body parameters"),
        (
            serde_json::json!({"email": "jane@example.com", "subject": "Hello there", "message": "This is a test message."}),
            "missing name",
        ),
        (
            serde_json::json!({"name": "Jane Doe", "subject": "Hello there", "message": "This is a test message."}),
            "missing email",
        ),
        (
            serde_json::json!({"name": "Jane Doe", "email": "jane@example.com", "message": "This is a test message."}),
            "missing subject",
        ),
        (
            serde_json::json!({"name": "Jane Doe", "email": "jane@example.com", "subject": "Hello there"}),
            "missing message",
        ),
        (
            serde_json::json!({"name": "", "email": "jane@example.com", "subject": "Hello there", "message": "This is a test message."}),
            "empty name",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_contact(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );
    }

    assert!(test_app.store.submissions().is_empty());
}

#[tokio::test]
async fn contact_returns_400_when_email_is_malformed() {
    let test_app = TestApp::spawn_app().await;

    for email in ["bob", "bob@", "bob@x"] {
        let mut body = valid_body();
        body["email"] = serde_json::Value::from(email);

        let response = test_app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API accepted the email {}",
            email
        );
        assert_eq!(error_message(response).await, "Invalid email format");
    }

    assert!(test_app.store.submissions().is_empty());
}

#[tokio::test]
async fn contact_returns_400_when_fields_are_too_short() {
    let test_app = TestApp::spawn_app().await;
    let test_cases = vec![("name", "J"), ("subject", "Hiya"), ("message", "Too short")];

    for (field, value) in test_cases {
        let mut body = valid_body();
        body[field] = serde_json::Value::from(value);

        let response = test_app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API accepted a short {}",
            field
        );
        assert!(error_message(response).await.contains(field));
    }

    assert!(test_app.store.submissions().is_empty());
}

#[tokio::test]
async fn contact_returns_400_when_payload_is_malformed() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_raw_contact("{ this is not json").await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(error_message(response).await, "Invalid request payload");

    let mut body = valid_body();
    body["name"] = serde_json::Value::from(42);
    let response = test_app.post_contact(&body).await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(error_message(response).await, "Invalid request payload");
    assert!(test_app.store.submissions().is_empty());
}

#[tokio::test]
async fn contact_sends_an_alert_and_an_acknowledgment() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());

    let received_requests = test_app.email_server.received_requests().await.unwrap();
    let subjects: Vec<String> = received_requests
        .iter()
        .map(|request| email_subject(&request.body))
        .collect();
    let alert_subject = String::from("New Contact Form Submission: Hello there");

    assert!(subjects.contains(&alert_subject));
    assert!(subjects.contains(&String::from("Thank you for your message!")));
}

#[tokio::test]
async fn contact_succeeds_when_the_mail_transport_fails() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(test_app.store.submissions().len(), 1);
}

#[tokio::test]
async fn contact_succeeds_without_mail_configuration() {
    let test_app = TestApp::spawn_app_without_mail().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(test_app.store.submissions().len(), 1);
}

#[tokio::test]
async fn same_payload_twice_creates_two_submissions() {
    let test_app = TestApp::spawn_app_without_mail().await;

    let first: serde_json::Value = test_app
        .post_contact(&valid_body())
        .await
        .json()
        .await
        .unwrap();
    let second: serde_json::Value = test_app
        .post_contact(&valid_body())
        .await
        .json()
        .await
        .unwrap();

    assert_ne!(first["id"], second["id"]);
    assert_eq!(test_app.store.submissions().len(), 2);
}

#[tokio::test]
async fn contact_returns_500_without_details_when_the_store_fails() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    test_app.store.make_unavailable();

    let response = test_app.post_contact(&valid_body()).await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!(error_message(response).await, "Internal server error");
}
