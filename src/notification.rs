use crate::domain::{Submission, SubmitterEmail};
use crate::email_client::EmailClient;

const ACKNOWLEDGMENT_SUBJECT: &str = "Thank you for your message!";

/// What happened to a single notification email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationReport {
    pub admin_alert: DeliveryStatus,
    pub acknowledgment: DeliveryStatus,
}

/// Best-effort emails sent after a submission is stored: an alert to the site
/// owner and an acknowledgment to the submitter. Nothing here ever fails the
/// request.
#[derive(Debug)]
pub struct ContactNotifier {
    email_client: Option<EmailClient>,
    notification_address: Option<SubmitterEmail>,
    signature_name: String,
}

impl ContactNotifier {
    pub fn new(
        email_client: Option<EmailClient>,
        notification_address: Option<SubmitterEmail>,
        signature_name: String,
    ) -> Self {
        Self {
            email_client,
            notification_address,
            signature_name,
        }
    }

    /// A notifier without mail transport; every send is skipped.
    pub fn disabled() -> Self {
        Self::new(None, None, String::new())
    }

    #[tracing::instrument(
        name = "Send contact submission notifications",
        skip(self, submission),
        fields(submission_id = %submission.id)
    )]
    pub async fn notify(&self, submission: &Submission) -> NotificationReport {
        let Some(email_client) = &self.email_client else {
            tracing::info!(
                name = %submission.name,
                email = %submission.email,
                subject = %submission.subject,
                message = %submission.message,
                "Mail transport is not configured, skipping contact notifications"
            );

            return NotificationReport {
                admin_alert: DeliveryStatus::Skipped,
                acknowledgment: DeliveryStatus::Skipped,
            };
        };

        let (admin_alert, acknowledgment) = tokio::join!(
            self.send_admin_alert(email_client, submission),
            self.send_acknowledgment(email_client, submission)
        );

        NotificationReport {
            admin_alert,
            acknowledgment,
        }
    }

    async fn send_admin_alert(
        &self,
        email_client: &EmailClient,
        submission: &Submission,
    ) -> DeliveryStatus {
        let Some(notification_address) = &self.notification_address else {
            return DeliveryStatus::Skipped;
        };

        let subject = format!("New Contact Form Submission: {}", submission.subject);
        let result = email_client
            .send_email(
                notification_address,
                &subject,
                &admin_alert_html(submission),
            )
            .await;

        match result {
            Ok(()) => DeliveryStatus::Sent,
            Err(err) => {
                tracing::error!("Failed to send email notification: {:?}", err);
                DeliveryStatus::Failed
            }
        }
    }

    async fn send_acknowledgment(
        &self,
        email_client: &EmailClient,
        submission: &Submission,
    ) -> DeliveryStatus {
        // Stored addresses were validated on the way in; this only fails if
        // the record was written by something else.
        let recipient = match SubmitterEmail::parse(submission.email.clone()) {
            Ok(recipient) => recipient,
            Err(err) => {
                tracing::error!("Cannot send auto-reply to {}: {}", submission.email, err);
                return DeliveryStatus::Failed;
            }
        };

        let result = email_client
            .send_email(
                &recipient,
                ACKNOWLEDGMENT_SUBJECT,
                &acknowledgment_html(submission, &self.signature_name),
            )
            .await;

        match result {
            Ok(()) => DeliveryStatus::Sent,
            Err(err) => {
                tracing::error!(
                    "Failed to send auto-reply to {}: {:?}",
                    recipient.as_ref(),
                    err
                );
                DeliveryStatus::Failed
            }
        }
    }
}

fn escape(value: &str) -> String {
    html_escape::encode_safe(value).to_string()
}

/// Escapes `value` and turns line breaks into `<br>` tags.
fn escape_multiline(value: &str) -> String {
    escape(value).replace("\r\n", "\n").replace('\n', "<br>")
}

pub fn admin_alert_html(submission: &Submission) -> String {
    format!(
        r#"
            <h2>New Contact Form Submission</h2>
            <p><strong>Name:</strong> {name}</p>
            <p><strong>Email:</strong> {email}</p>
            <p><strong>Subject:</strong> {subject}</p>
            <p><strong>Message:</strong></p>
            <p>{message}</p>
            <p><strong>Submitted at:</strong> {submitted_at}</p>
        "#,
        name = escape(&submission.name),
        email = escape(&submission.email),
        subject = escape(&submission.subject),
        message = escape_multiline(&submission.message),
        submitted_at = submission.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

pub fn acknowledgment_html(submission: &Submission, signature_name: &str) -> String {
    format!(
        r#"
            <h2>Thank you for reaching out!</h2>
            <p>Hi {name},</p>
            <p>Thank you for your message. I've received your inquiry about "{subject}" and will get back to you as soon as possible.</p>
            <p>Best regards,<br>{signature}</p>
        "#,
        name = escape(&submission.name),
        subject = escape(&submission.subject),
        signature = escape(signature_name),
    )
}
